//! Error types for the store module.

use thiserror::Error;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Database error from SQLite.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The backend could not serve the request (lock poisoned, task
    /// cancelled, backend offline).
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Migration error.
    #[error("migration error: {0}")]
    Migration(String),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
