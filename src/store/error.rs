//! Record storage error types.

use std::path::PathBuf;

/// Errors that can occur while reading or writing the record list.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Stored data could not be read
    #[error("Failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Stored data could not be written
    #[error("Failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Stored data was not a valid record list
    #[error("Failed to decode stored records: {0}")]
    Decode(#[source] serde_json::Error),

    /// The record list could not be serialized
    #[error("Failed to encode records: {0}")]
    Encode(#[source] serde_json::Error),

    /// The storage backend refused the operation
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}
