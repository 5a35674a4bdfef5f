//! Error types for lapse-core.
//!
//! Storage failures never escape [`TapStore`](crate::TapStore); the log
//! keeps serving from memory and the failure becomes a log line. The
//! types here exist for [`BlobStore`](crate::BlobStore) implementors
//! and for those log lines.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced by blob storage backends and the tap log codec.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open the backing store
    #[error("Failed to open blob store at {path}: {message}")]
    OpenFailed { path: PathBuf, message: String },

    /// Read for a key failed (distinct from the key being absent)
    #[error("Failed to read blob '{key}': {message}")]
    ReadFailed { key: String, message: String },

    /// Write for a key failed
    #[error("Failed to write blob '{key}': {message}")]
    WriteFailed { key: String, message: String },

    /// Tap log could not be serialized
    #[error("Failed to encode tap log: {0}")]
    Encode(serde_json::Error),

    /// Blob contents matched no known tap log format
    #[error("Failed to decode tap log: {0}")]
    Decode(serde_json::Error),
}

/// Result type alias for StorageError
pub type Result<T, E = StorageError> = std::result::Result<T, E>;
