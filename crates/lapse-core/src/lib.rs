//! # Lapse Core Library
//!
//! This library provides the core business logic for Lapse, a habit
//! tracker built around taps: one logged event per lapse, carrying a
//! timestamp and the minutes it cost. The log heals on its own; a
//! severity gauge decays back toward calm as taps age out. Any GUI or
//! CLI shell is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Tap log**: [`TapStore`] owns the event list and mirrors every
//!   mutation into an injected byte-blob store
//! - **Storage**: a two-method [`BlobStore`] port with bundled
//!   in-memory and SQLite implementations
//! - **Severity**: [`SeverityModel`] maps the log to a decayed score,
//!   normalized progress, gauge color, and critical flag
//!
//! ## Key Components
//!
//! - [`TapStore`]: Persistent tap log
//! - [`BlobStore`]: Storage port hosts implement
//! - [`SeverityModel`]: Pure scoring over the log
//! - [`SeverityReading`]: One evaluation result

pub mod error;
pub mod event;
pub mod severity;
pub mod storage;

pub use error::StorageError;
pub use event::TapEvent;
pub use severity::{Rgb, SeverityConfig, SeverityModel, SeverityPalette, SeverityReading};
pub use storage::{BlobStore, MemoryBlobStore, SqliteBlobStore, TapStore, TAP_LOG_KEY};
