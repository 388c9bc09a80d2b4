//! Error types for board persistence
//!
//! Board operations themselves never fail; only storage and encoding do.

use thiserror::Error;

/// Result type for persistence operations
pub type Result<T> = std::result::Result<T, KanboardError>;

/// Errors that can occur while loading or saving a board
#[derive(Debug, Error)]
pub enum KanboardError {
    /// No storage backend could be obtained (e.g. LocalStorage disabled)
    #[error("storage unavailable: {message}")]
    StorageUnavailable { message: String },

    /// Reading a key from storage failed
    #[error("failed to read '{key}': {message}")]
    Read { key: String, message: String },

    /// Writing a key to storage failed
    #[error("failed to write '{key}': {message}")]
    Write { key: String, message: String },

    /// Serializing a snapshot or settings failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
