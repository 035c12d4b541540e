//! Error types for tilawa-store

use std::path::PathBuf;

use thiserror::Error;

/// Result type for storage operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised by the persistence bridge
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A stored record could not be decoded
    #[error("Corrupt record under key '{key}': {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize record for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// Keys are restricted to `[a-z0-9_]` so they map to file names
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("No platform data directory available")]
    NoDataDir,
}
