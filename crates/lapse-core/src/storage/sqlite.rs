//! SQLite-backed blob storage.
//!
//! A single `blobs` table keyed by name. This is the durable backend
//! used when the host does not bring its own [`BlobStore`].

use std::path::{Path, PathBuf};

use rusqlite::{params, Connection};

use crate::error::{Result, StorageError};

use super::{data_dir, BlobStore};

/// SQLite implementation of [`BlobStore`].
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    /// Open the store at `~/.config/lapse/lapse.db`.
    ///
    /// Creates the database file and schema if they don't exist.
    ///
    /// # Errors
    /// Returns an error if the data directory or database cannot be opened.
    pub fn open() -> Result<Self> {
        let dir = data_dir().map_err(|e| StorageError::OpenFailed {
            path: PathBuf::from("~/.config/lapse"),
            message: e.to_string(),
        })?;
        Self::open_at(dir.join("lapse.db"))
    }

    /// Open the store at a specific path (tests, portable installs).
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_at(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path).map_err(|e| StorageError::OpenFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_connection(conn, path)
    }

    /// Open an in-memory store (ephemeral hosts, tests).
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open_memory() -> Result<Self> {
        let path = Path::new(":memory:");
        let conn = Connection::open_in_memory().map_err(|e| StorageError::OpenFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Self::from_connection(conn, path)
    }

    fn from_connection(conn: Connection, path: &Path) -> Result<Self> {
        let store = Self { conn };
        store.migrate().map_err(|e| StorageError::OpenFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(store)
    }

    fn migrate(&self) -> Result<(), rusqlite::Error> {
        self.conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS blobs (
                key   TEXT PRIMARY KEY,
                value BLOB NOT NULL
            );",
        )?;
        Ok(())
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut stmt = self
            .conn
            .prepare("SELECT value FROM blobs WHERE key = ?1")
            .map_err(|e| StorageError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        let result = stmt.query_row(params![key], |row| row.get::<_, Vec<u8>>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(StorageError::ReadFailed {
                key: key.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn set(&mut self, key: &str, bytes: &[u8]) -> Result<()> {
        self.conn
            .execute(
                "INSERT OR REPLACE INTO blobs (key, value) VALUES (?1, ?2)",
                params![key, bytes],
            )
            .map_err(|e| StorageError::WriteFailed {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_round_trip() {
        let mut store = SqliteBlobStore::open_memory().unwrap();
        assert!(store.get("taps").unwrap().is_none());
        store.set("taps", b"hello").unwrap();
        assert_eq!(store.get("taps").unwrap().unwrap(), b"hello");
    }

    #[test]
    fn set_replaces_existing() {
        let mut store = SqliteBlobStore::open_memory().unwrap();
        store.set("taps", b"first").unwrap();
        store.set("taps", b"second").unwrap();
        assert_eq!(store.get("taps").unwrap().unwrap(), b"second");
    }

    #[test]
    fn keys_are_independent() {
        let mut store = SqliteBlobStore::open_memory().unwrap();
        store.set("a", b"1").unwrap();
        store.set("b", b"2").unwrap();
        assert_eq!(store.get("a").unwrap().unwrap(), b"1");
        assert_eq!(store.get("b").unwrap().unwrap(), b"2");
    }
}
