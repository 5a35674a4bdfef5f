//! Tap event records.
//!
//! A tap is one logged lapse: when it happened and how many minutes it
//! cost. Taps are the only thing the store persists and the only input
//! the severity model reads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single logged tap.
///
/// Serialized with the wire names `id` / `date` / `minutes`; the
/// persisted tap log is a JSON array of these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TapEvent {
    /// Stable identity, assigned at creation.
    pub id: Uuid,
    /// When the tap happened (UTC).
    #[serde(rename = "date")]
    pub timestamp: DateTime<Utc>,
    /// Minutes lost to this tap. Never negative by construction.
    #[serde(rename = "minutes")]
    pub minutes_wasted: u32,
}

impl TapEvent {
    /// Create a tap at `at` with a fresh id.
    ///
    /// Negative `minutes` are floored to zero.
    pub fn new(minutes: i64, at: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            timestamp: at,
            minutes_wasted: clamp_minutes(minutes),
        }
    }

    /// Overwrite the minutes value, flooring negative input to zero.
    pub fn set_minutes(&mut self, minutes: i64) {
        self.minutes_wasted = clamp_minutes(minutes);
    }
}

fn clamp_minutes(minutes: i64) -> u32 {
    minutes.clamp(0, u32::MAX as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_minutes_floor_to_zero() {
        let tap = TapEvent::new(-30, Utc::now());
        assert_eq!(tap.minutes_wasted, 0);
    }

    #[test]
    fn oversized_minutes_saturate() {
        let tap = TapEvent::new(i64::MAX, Utc::now());
        assert_eq!(tap.minutes_wasted, u32::MAX);
    }

    #[test]
    fn set_minutes_clamps() {
        let mut tap = TapEvent::new(10, Utc::now());
        tap.set_minutes(-1);
        assert_eq!(tap.minutes_wasted, 0);
        tap.set_minutes(45);
        assert_eq!(tap.minutes_wasted, 45);
    }

    #[test]
    fn wire_field_names() {
        let tap = TapEvent::new(12, Utc::now());
        let json = serde_json::to_value(&tap).unwrap();
        assert!(json.get("id").is_some());
        assert!(json.get("date").is_some());
        assert_eq!(json["minutes"], 12);
    }

    #[test]
    fn round_trips_through_json() {
        let tap = TapEvent::new(42, Utc::now());
        let bytes = serde_json::to_vec(&tap).unwrap();
        let back: TapEvent = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(back, tap);
    }
}
