//! Tap log persistence.
//!
//! Storage is split in two layers: [`TapStore`] owns the in-memory tap
//! list and the persistence rules, while [`BlobStore`] is the byte-level
//! port a host satisfies with whatever key-value storage it has.
//! [`MemoryBlobStore`] and [`SqliteBlobStore`] are the bundled
//! implementations.

pub mod blob;
pub mod sqlite;
pub mod tap_store;

pub use blob::{BlobStore, MemoryBlobStore};
pub use sqlite::SqliteBlobStore;
pub use tap_store::{TapStore, TAP_LOG_KEY};

use std::path::PathBuf;

/// Returns `~/.config/lapse[-dev]/` based on LAPSE_ENV.
///
/// Set LAPSE_ENV=dev to use the development data directory.
///
/// # Errors
/// Returns an error if the home directory cannot be determined or if
/// creating the config directory fails.
pub fn data_dir() -> Result<PathBuf, Box<dyn std::error::Error>> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("LAPSE_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("lapse-dev")
    } else {
        base_dir.join("lapse")
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
