use guessr_core::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("bad_request: {0}")]
    BadRequest(&'static str),
    #[error("db_error: {0}")]
    DbError(#[from] StoreError),
    #[error("migrate: {0}")]
    Migrate(String),
    #[error("encode: {0}")]
    Encode(#[from] serde_json::Error),
}
