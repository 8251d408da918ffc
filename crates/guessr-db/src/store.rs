use async_trait::async_trait;
use guessr_core::{
    BannedWordSource, DonationLedger, DonationTotal, SettingsSource, StoreError, StoreResult,
};

use crate::Backend;
#[cfg(feature = "postgres")]
use crate::PgPool;
#[cfg(feature = "sqlite")]
use crate::SqlitePool;

#[derive(Clone)]
pub enum StorePool {
    #[cfg(feature = "postgres")]
    Postgres(PgPool),
    #[cfg(feature = "sqlite")]
    Sqlite(SqlitePool),
}

macro_rules! with_repo {
    ($pool:expr, $repo:ident, |$r:ident| $body:expr) => {
        match $pool {
            #[cfg(feature = "postgres")]
            StorePool::Postgres(pool) => {
                let $r = crate::repo::pg::$repo::new(pool);
                $body
            }
            #[cfg(feature = "sqlite")]
            StorePool::Sqlite(pool) => {
                let $r = crate::repo::sqlite::$repo::new(pool);
                $body
            }
        }
    };
}

impl StorePool {
    /// Opens a pool for `url`, picking the backend from its scheme.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, sqlx_core::Error> {
        match Backend::from_url(url) {
            #[cfg(feature = "postgres")]
            Some(Backend::Postgres) => Ok(Self::Postgres(
                crate::connect_postgres_with_max(url, max_connections).await?,
            )),
            #[cfg(feature = "sqlite")]
            Some(Backend::Sqlite) => Ok(Self::Sqlite(
                crate::connect_sqlite_with_max(url, max_connections).await?,
            )),
            #[allow(unreachable_patterns)]
            Some(backend) => Err(sqlx_core::Error::Configuration(
                format!("{} support is not compiled in", backend.as_str()).into(),
            )),
            None => Err(sqlx_core::Error::Configuration(
                "unsupported database url scheme".into(),
            )),
        }
    }

    pub fn backend(&self) -> Backend {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres(_) => Backend::Postgres,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(_) => Backend::Sqlite,
        }
    }

    pub async fn migrate(&self) -> Result<(), sqlx_core::migrate::MigrateError> {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres(pool) => crate::migrate_postgres(pool).await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(pool) => crate::migrate_sqlite(pool).await,
        }
    }

    pub async fn close(&self) {
        match self {
            #[cfg(feature = "postgres")]
            Self::Postgres(pool) => pool.close().await,
            #[cfg(feature = "sqlite")]
            Self::Sqlite(pool) => pool.close().await,
        }
    }
}

fn store_error(err: sqlx_core::Error) -> StoreError {
    let message = err.to_string();
    match err {
        sqlx_core::Error::Io(_)
        | sqlx_core::Error::Tls(_)
        | sqlx_core::Error::PoolTimedOut
        | sqlx_core::Error::PoolClosed
        | sqlx_core::Error::Configuration(_) => StoreError::Unavailable(message),
        _ => StoreError::Query(message),
    }
}

fn normalize_word(word: &str) -> String {
    word.trim().to_lowercase()
}

/// Database-backed implementation of the domain collaborators, plus the
/// admin writes the operator CLI needs.
#[derive(Clone)]
pub struct DbStore {
    pool: StorePool,
}

impl DbStore {
    pub fn new(pool: StorePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &StorePool {
        &self.pool
    }

    pub async fn record_donation(&self, user_id: i64, amount: DonationTotal) -> StoreResult<i64> {
        let id = with_repo!(&self.pool, DonationRepo, |repo| repo
            .record(user_id, amount.cents())
            .await)
        .map_err(store_error)?;
        tracing::info!(
            event = "donation_recorded",
            donation_id = id,
            user_id,
            amount = %amount
        );
        Ok(id)
    }

    /// Stores `word` trimmed and lowercased. Blank words are refused.
    pub async fn add_banned_word(&self, word: &str) -> StoreResult<bool> {
        let word = normalize_word(word);
        if word.is_empty() {
            return Ok(false);
        }
        with_repo!(&self.pool, BannedWordRepo, |repo| repo.insert(&word).await)
            .map_err(store_error)
    }

    pub async fn remove_banned_word(&self, word: &str) -> StoreResult<bool> {
        let word = normalize_word(word);
        with_repo!(&self.pool, BannedWordRepo, |repo| repo.delete(&word).await)
            .map_err(store_error)
    }

    pub async fn setting_value(&self, key: &str) -> StoreResult<Option<String>> {
        with_repo!(&self.pool, SettingsRepo, |repo| repo.get_value(key).await)
            .map_err(store_error)
    }

    pub async fn set_setting(&self, key: &str, value: &str) -> StoreResult<()> {
        with_repo!(&self.pool, SettingsRepo, |repo| repo
            .set_value(key, value)
            .await)
        .map_err(store_error)?;
        tracing::info!(event = "setting_updated", key);
        Ok(())
    }
}

#[async_trait]
impl DonationLedger for DbStore {
    async fn sum_donations_for_user(&self, user_id: i64) -> StoreResult<DonationTotal> {
        let cents = with_repo!(&self.pool, DonationRepo, |repo| repo
            .sum_for_user(user_id)
            .await)
        .map_err(store_error)?;
        Ok(DonationTotal::from_cents(cents))
    }
}

#[async_trait]
impl BannedWordSource for DbStore {
    async fn list_banned_words(&self) -> StoreResult<Vec<String>> {
        with_repo!(&self.pool, BannedWordRepo, |repo| repo.list().await).map_err(store_error)
    }
}

#[async_trait]
impl SettingsSource for DbStore {
    async fn get_setting(&self, key: &str, default: &str) -> StoreResult<String> {
        Ok(self
            .setting_value(key)
            .await?
            .unwrap_or_else(|| default.to_string()))
    }
}
