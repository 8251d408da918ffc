use async_trait::async_trait;
use thiserror::Error;

use crate::DonationTotal;

#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("query failed: {0}")]
    Query(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

#[async_trait]
pub trait DonationLedger: Send + Sync {
    /// Sum of every recorded donation for `user_id`; zero when there are none.
    async fn sum_donations_for_user(&self, user_id: i64) -> StoreResult<DonationTotal>;
}

#[async_trait]
pub trait BannedWordSource: Send + Sync {
    async fn list_banned_words(&self) -> StoreResult<Vec<String>>;
}

#[async_trait]
pub trait SettingsSource: Send + Sync {
    async fn get_setting(&self, key: &str, default: &str) -> StoreResult<String>;
}
