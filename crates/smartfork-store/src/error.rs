//! Storage errors

use rusqlite::ErrorCode;
use thiserror::Error;

/// Storage backend errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[source] rusqlite::Error),

    /// Another process holds the store lock; callers may retry
    #[error("store is busy: {0}")]
    Busy(#[source] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown backend: {0}")]
    UnknownBackend(String),
}

impl StoreError {
    /// True for lock-contention failures that are safe to retry
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Busy(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(err: rusqlite::Error) -> Self {
        match err.sqlite_error_code() {
            Some(ErrorCode::DatabaseBusy) | Some(ErrorCode::DatabaseLocked) => {
                StoreError::Busy(err)
            }
            _ => StoreError::Sqlite(err),
        }
    }
}
