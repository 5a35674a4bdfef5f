//! Byte-blob storage port.
//!
//! The tap log persists through this two-method interface so hosts can
//! plug in whatever key-value storage they have. `get` distinguishes
//! "no value yet" (`Ok(None)`) from a failed read; `set` overwrites
//! unconditionally.

use std::collections::HashMap;

use crate::error::StorageError;

/// Minimal key-value byte store the tap log persists through.
pub trait BlobStore {
    /// Fetch the blob stored under `key`, or `None` if the key is absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Store `bytes` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;
}

/// Forwarding impl so a host can lend its store to a
/// [`TapStore`](crate::TapStore) without giving up ownership.
impl<S: BlobStore + ?Sized> BlobStore for &mut S {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        (**self).set(key, bytes)
    }
}

/// HashMap-backed store for hosts without durable storage and for tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    blobs: HashMap<String, Vec<u8>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self.blobs.get(key).cloned())
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.blobs.insert(key.to_string(), bytes.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_key_reads_as_none() {
        let store = MemoryBlobStore::new();
        assert!(store.get("taps").unwrap().is_none());
    }

    #[test]
    fn set_then_get_round_trips() {
        let mut store = MemoryBlobStore::new();
        store.set("taps", b"[1,2,3]").unwrap();
        assert_eq!(store.get("taps").unwrap().unwrap(), b"[1,2,3]");
    }

    #[test]
    fn set_replaces_existing_value() {
        let mut store = MemoryBlobStore::new();
        store.set("taps", b"first").unwrap();
        store.set("taps", b"second").unwrap();
        assert_eq!(store.get("taps").unwrap().unwrap(), b"second");
    }

    #[test]
    fn borrowed_store_forwards_both_methods() {
        let mut store = MemoryBlobStore::new();
        {
            let mut borrowed = &mut store;
            borrowed.set("taps", b"via borrow").unwrap();
            assert!(borrowed.get("taps").unwrap().is_some());
        }
        assert_eq!(store.get("taps").unwrap().unwrap(), b"via borrow");
    }
}
