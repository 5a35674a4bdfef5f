//! Severity scoring.
//!
//! Pure functions of (now, tap log) with no storage access; pair with
//! [`TapStore`](crate::TapStore) to read severity off the live log.

pub mod color;
pub mod model;

pub use color::{Rgb, SeverityPalette};
pub use model::{SeverityConfig, SeverityModel, SeverityReading};
