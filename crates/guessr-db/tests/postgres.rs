#![cfg(feature = "postgres")]

use guessr_core::{BannedWordSource, DonationLedger, DonationTotal};
use guessr_db::{migrate_postgres, DbStore, PgPool, StorePool};
use sqlx_core::pool::PoolOptions;
use sqlx_postgres::{PgConnectOptions, Postgres};
use std::env;
use std::str::FromStr;
use uuid::Uuid;

async fn setup_db() -> PgPool {
    let db_url =
        env::var("TEST_DATABASE_URL").expect("TEST_DATABASE_URL must be set for Postgres tests");
    let schema = format!("guessr_db_test_{}", Uuid::now_v7().simple());
    let admin_options =
        PgConnectOptions::from_str(&db_url).expect("failed to parse TEST_DATABASE_URL");
    let admin_pool = PoolOptions::new()
        .max_connections(1)
        .connect_with(admin_options.clone())
        .await
        .expect("connect admin pool");
    sqlx_core::query::query::<Postgres>(&format!("CREATE SCHEMA \"{}\"", schema))
        .execute(&admin_pool)
        .await
        .expect("create schema");
    let options = admin_options.options([("search_path", schema.as_str())]);
    let pool = PoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .expect("connect test pool");
    migrate_postgres(&pool).await.expect("migrate");
    pool
}

#[tokio::test]
#[cfg_attr(not(feature = "postgres-tests"), ignore = "requires TEST_DATABASE_URL")]
async fn postgres_store_sums_and_lists() {
    let store = DbStore::new(StorePool::Postgres(setup_db().await));

    assert!(store.sum_donations_for_user(9).await.expect("sum").is_zero());
    store
        .record_donation(9, DonationTotal::from_cents(499))
        .await
        .expect("record");
    store
        .record_donation(9, DonationTotal::from_cents(1))
        .await
        .expect("record");
    assert_eq!(
        store.sum_donations_for_user(9).await.expect("sum"),
        DonationTotal::from_units(5)
    );

    store.add_banned_word("Troll").await.expect("add");
    assert_eq!(store.list_banned_words().await.expect("list"), ["troll"]);
}
