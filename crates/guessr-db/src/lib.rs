#![allow(clippy::pedantic)]
#![allow(clippy::nursery)]
#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::needless_raw_string_hashes)]

extern crate sqlx_core as sqlx;

#[cfg(not(any(feature = "postgres", feature = "sqlite")))]
compile_error!("guessr-db needs the `postgres` or `sqlite` feature");

use sqlx_core::pool::{Pool, PoolOptions};
#[cfg(feature = "postgres")]
use sqlx_postgres::{PgConnectOptions, Postgres};
#[cfg(feature = "sqlite")]
use sqlx_sqlite::{Sqlite, SqliteConnectOptions, SqliteJournalMode, SqliteSynchronous};
use std::str::FromStr;
#[cfg(feature = "sqlite")]
use std::time::Duration;

pub mod repo;
mod store;

pub use store::{DbStore, StorePool};

#[cfg(feature = "sqlite")]
pub type SqlitePool = Pool<Sqlite>;
#[cfg(feature = "postgres")]
pub type PgPool = Pool<Postgres>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    Postgres,
    Sqlite,
}

impl Backend {
    pub fn from_url(url: &str) -> Option<Self> {
        let url = url.trim();
        if url.starts_with("postgres://") || url.starts_with("postgresql://") {
            Some(Self::Postgres)
        } else if url.starts_with("sqlite:") {
            Some(Self::Sqlite)
        } else {
            None
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Sqlite => "sqlite",
        }
    }
}

#[cfg(feature = "postgres")]
pub async fn connect_postgres_with_max(
    path: &str,
    max_connections: u32,
) -> Result<PgPool, sqlx_core::Error> {
    let options = PgConnectOptions::from_str(path)?;
    PoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

#[cfg(feature = "sqlite")]
pub async fn connect_sqlite_with_max(
    path: &str,
    max_connections: u32,
) -> Result<SqlitePool, sqlx_core::Error> {
    let options = SqliteConnectOptions::from_str(path)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .synchronous(SqliteSynchronous::Normal)
        .busy_timeout(Duration::from_secs(5));

    PoolOptions::new()
        .max_connections(max_connections)
        .connect_with(options)
        .await
}

#[cfg(feature = "postgres")]
pub async fn migrate_postgres(pool: &PgPool) -> Result<(), sqlx_core::migrate::MigrateError> {
    sqlx_macros::migrate!("./migrations/postgres")
        .run(pool)
        .await
}

#[cfg(feature = "sqlite")]
pub async fn migrate_sqlite(pool: &SqlitePool) -> Result<(), sqlx_core::migrate::MigrateError> {
    sqlx_macros::migrate!("./migrations/sqlite")
        .run(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_from_url_scheme() {
        assert_eq!(
            Backend::from_url("postgres://guessr@localhost/guessr"),
            Some(Backend::Postgres)
        );
        assert_eq!(
            Backend::from_url("postgresql://localhost"),
            Some(Backend::Postgres)
        );
        assert_eq!(
            Backend::from_url("sqlite://guessr.sqlite"),
            Some(Backend::Sqlite)
        );
        assert_eq!(Backend::from_url("sqlite::memory:"), Some(Backend::Sqlite));
        assert_eq!(Backend::from_url("mysql://localhost"), None);
    }
}
