//! Tap log with injected blob persistence.
//!
//! The store owns the full tap list in memory and mirrors every change
//! into a single blob under [`TAP_LOG_KEY`]. Reads never touch storage;
//! writes rewrite the whole log. Storage failures are logged and
//! swallowed so callers always have a working in-memory log.

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::StorageError;
use crate::event::TapEvent;

use super::BlobStore;

/// Blob key the tap log persists under.
pub const TAP_LOG_KEY: &str = "tap_events";

/// Tap log backed by a [`BlobStore`].
///
/// The list stays sorted by timestamp, oldest first, across every
/// mutation. Taps with equal timestamps keep their insertion order.
pub struct TapStore<S: BlobStore> {
    blob: S,
    key: String,
    taps: Vec<TapEvent>,
}

impl<S: BlobStore> TapStore<S> {
    /// Open the store, loading whatever the blob holds.
    ///
    /// Never fails: an absent or unreadable blob yields an empty log,
    /// and a legacy-format blob is migrated in place.
    pub fn open(blob: S) -> Self {
        Self::open_with_key(blob, TAP_LOG_KEY)
    }

    /// Open against a non-default blob key (tests, multi-log hosts).
    pub fn open_with_key(blob: S, key: &str) -> Self {
        let mut store = Self {
            blob,
            key: key.to_string(),
            taps: Vec::new(),
        };
        store.load();
        store
    }

    /// Log a tap now. Returns the stored record.
    ///
    /// Negative `minutes` are floored to zero.
    pub fn add(&mut self, minutes: i64) -> TapEvent {
        self.add_at(minutes, Utc::now())
    }

    /// Log a tap at an explicit time (backdating, imports).
    pub fn add_at(&mut self, minutes: i64, at: DateTime<Utc>) -> TapEvent {
        let tap = TapEvent::new(minutes, at);
        self.taps.push(tap.clone());
        self.taps.sort_by_key(|t| t.timestamp);
        self.persist();
        tap
    }

    /// Replace the stored tap carrying the same id.
    ///
    /// Unknown ids are ignored without touching storage.
    pub fn update(&mut self, tap: TapEvent) {
        let Some(slot) = self.taps.iter_mut().find(|t| t.id == tap.id) else {
            debug!(id = %tap.id, "update for unknown tap id ignored");
            return;
        };
        *slot = tap;
        self.taps.sort_by_key(|t| t.timestamp);
        self.persist();
    }

    /// Delete the tap with `id`. Unknown ids leave the log untouched.
    pub fn delete_by_id(&mut self, id: &Uuid) {
        let before = self.taps.len();
        self.taps.retain(|t| t.id != *id);
        if self.taps.len() != before {
            self.persist();
        }
    }

    /// Delete taps by position in the order [`taps`](Self::taps) exposes.
    ///
    /// Out-of-range and duplicate positions are ignored.
    pub fn delete_at(&mut self, positions: &[usize]) {
        let mut positions: Vec<usize> = positions
            .iter()
            .copied()
            .filter(|&i| i < self.taps.len())
            .collect();
        positions.sort_unstable();
        positions.dedup();

        if positions.is_empty() {
            return;
        }
        for &i in positions.iter().rev() {
            self.taps.remove(i);
        }
        self.persist();
    }

    /// Drop every tap and persist the empty log.
    pub fn clear_all(&mut self) {
        self.taps.clear();
        self.persist();
    }

    /// All taps, oldest first.
    pub fn taps(&self) -> &[TapEvent] {
        &self.taps
    }

    /// The most recent tap, if any.
    pub fn latest(&self) -> Option<&TapEvent> {
        self.taps.last()
    }

    /// Number of logged taps.
    pub fn len(&self) -> usize {
        self.taps.len()
    }

    /// Check if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Rewrite the blob from the in-memory log.
    ///
    /// Runs after every mutation; a failed write is logged and the
    /// in-memory state kept, so the next mutation retries a full write.
    pub fn persist(&mut self) {
        match self.try_persist() {
            Ok(()) => debug!(key = %self.key, count = self.taps.len(), "tap log persisted"),
            Err(e) => {
                warn!(key = %self.key, error = %e, "tap log persist failed, keeping in-memory state");
            }
        }
    }

    fn try_persist(&mut self) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(&self.taps).map_err(StorageError::Encode)?;
        self.blob.set(&self.key, &bytes)
    }

    fn load(&mut self) {
        let bytes = match self.blob.get(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return,
            Err(e) => {
                warn!(key = %self.key, error = %e, "tap log read failed, starting empty");
                return;
            }
        };

        match serde_json::from_slice::<Vec<TapEvent>>(&bytes) {
            Ok(mut taps) => {
                taps.sort_by_key(|t| t.timestamp);
                self.taps = taps;
            }
            // Older installs stored a bare array of epoch seconds.
            Err(current_err) => match serde_json::from_slice::<Vec<f64>>(&bytes) {
                Ok(stamps) => {
                    self.taps = migrate_legacy(&stamps);
                    info!(key = %self.key, count = self.taps.len(), "migrated legacy tap log");
                    self.persist();
                }
                Err(_) => {
                    warn!(key = %self.key, error = %current_err, "tap log unreadable, starting empty");
                }
            },
        }
    }
}

/// Convert a legacy epoch-seconds array into zero-minute taps.
///
/// Values that do not map to a representable timestamp are skipped.
fn migrate_legacy(stamps: &[f64]) -> Vec<TapEvent> {
    let mut taps: Vec<TapEvent> = stamps
        .iter()
        .filter_map(|&secs| {
            if !secs.is_finite() {
                warn!(seconds = secs, "skipping unrepresentable legacy timestamp");
                return None;
            }
            let millis = (secs * 1000.0).round() as i64;
            match Utc.timestamp_millis_opt(millis) {
                chrono::LocalResult::Single(at) => Some(TapEvent::new(0, at)),
                _ => {
                    warn!(seconds = secs, "skipping unrepresentable legacy timestamp");
                    None
                }
            }
        })
        .collect();
    taps.sort_by_key(|t| t.timestamp);
    taps
}
