//! Error types shared by the controller and the store.

use thiserror::Error;

/// Errors surfaced to the user by the state controller.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TodoError {
    #[error("Please input todo")]
    EmptyTask,
}

/// Errors raised while reading or writing the local key-value store.
///
/// These are logged and swallowed by the persistence adapter; only the
/// `list` command reports them.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored value is not valid task JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid store key `{0}`")]
    InvalidKey(String),
}
