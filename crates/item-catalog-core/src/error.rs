//! Error taxonomy shared by every storage backend.

use thiserror::Error;

/// Failure of an item or image store operation.
///
/// Each variant maps to one HTTP status in the server; none of them are
/// retried internally.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file, table, or directory could not be read or written.
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Persisted data exists but could not be deserialized.
    #[error("corrupt data: {0}")]
    CorruptData(String),

    /// No record matches the request.
    #[error("not found: {0}")]
    NotFound(String),

    /// The request itself is malformed (e.g. an image name without `.jpg`).
    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub fn unavailable(err: impl std::fmt::Display) -> Self {
        Self::StorageUnavailable(err.to_string())
    }

    pub fn corrupt(err: impl std::fmt::Display) -> Self {
        Self::CorruptData(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::CorruptData(err.to_string())
    }
}
