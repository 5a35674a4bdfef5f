//! Decayed severity scoring over the tap log.
//!
//! Every tap starts at full weight and heals linearly to zero over the
//! repair window. The decayed total is normalized against a full-scale
//! value and rendered as a gauge color through gamma-adjusted banding.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::event::TapEvent;
use crate::severity::color::{Rgb, SeverityPalette};

/// Configuration for severity evaluation.
///
/// Fixed for the lifetime of a [`SeverityModel`]; build a new model to
/// change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityConfig {
    /// Seconds until a tap's contribution fully heals.
    #[serde(default = "default_repair_window_secs")]
    pub repair_window_secs: i64,
    /// Decayed minutes that map to a full gauge.
    #[serde(default = "default_full_scale_minutes")]
    pub full_scale_minutes: f64,
    /// Ascending progress thresholds splitting the gauge into four bands.
    #[serde(default = "default_band_thresholds")]
    pub band_thresholds: [f64; 3],
    /// Exponent applied to progress before band lookup.
    #[serde(default = "default_gamma")]
    pub gamma: f64,
    /// Gradient stops.
    #[serde(default)]
    pub palette: SeverityPalette,
}

// Default functions
fn default_repair_window_secs() -> i64 {
    86_400
}
fn default_full_scale_minutes() -> f64 {
    120.0
}
fn default_band_thresholds() -> [f64; 3] {
    [0.35, 0.65, 0.85]
}
fn default_gamma() -> f64 {
    0.88
}

impl Default for SeverityConfig {
    fn default() -> Self {
        Self {
            repair_window_secs: default_repair_window_secs(),
            full_scale_minutes: default_full_scale_minutes(),
            band_thresholds: default_band_thresholds(),
            gamma: default_gamma(),
            palette: SeverityPalette::default(),
        }
    }
}

/// One evaluation of the tap log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeverityReading {
    /// Sum of decayed contributions, in minutes.
    pub decayed_total: f64,
    /// Decayed total normalized against full scale, in `[0.0, 1.0]`.
    pub progress: f64,
    /// Gauge color for this progress.
    pub color: Rgb,
    /// Whether raw progress reached the last band threshold.
    ///
    /// Reads linear progress, not the gamma-adjusted value the color
    /// uses, so the alarm tracks actual fullness rather than the
    /// display curve.
    pub is_critical: bool,
    /// Undecayed sum of all logged minutes.
    pub all_time_minutes: u64,
    /// Undecayed sum of minutes from the trailing seven days.
    pub last_week_minutes: u64,
    /// Timestamp the evaluation was made against.
    pub evaluated_at: DateTime<Utc>,
}

/// Stateless severity evaluator.
///
/// Holds only configuration; call [`evaluate`](Self::evaluate) whenever
/// a fresh reading is needed. The caller drives the cadence, typically
/// once a minute plus after every log mutation.
pub struct SeverityModel {
    config: SeverityConfig,
}

impl SeverityModel {
    /// Create a model with default configuration.
    pub fn new() -> Self {
        Self {
            config: SeverityConfig::default(),
        }
    }

    /// Create with custom configuration.
    pub fn with_config(config: SeverityConfig) -> Self {
        Self { config }
    }

    /// Get the active configuration.
    pub fn config(&self) -> &SeverityConfig {
        &self.config
    }

    /// Evaluate the tap log as of `now`.
    pub fn evaluate(&self, now: DateTime<Utc>, taps: &[TapEvent]) -> SeverityReading {
        let decayed_total: f64 = taps.iter().map(|t| self.contribution(now, t)).sum();
        let progress = self.progress(decayed_total);

        SeverityReading {
            decayed_total,
            progress,
            color: self.band_color(progress),
            is_critical: progress >= self.config.band_thresholds[2],
            all_time_minutes: Self::all_time_minutes(taps),
            last_week_minutes: Self::last_week_minutes(now, taps),
            evaluated_at: now,
        }
    }

    /// Decayed weight of one tap at `now`, in minutes.
    ///
    /// Full weight at age zero, linearly down to zero at the repair
    /// window. Future-dated taps clamp to full weight.
    pub fn contribution(&self, now: DateTime<Utc>, tap: &TapEvent) -> f64 {
        let window = self.config.repair_window_secs as f64;
        if window <= 0.0 {
            return 0.0;
        }
        let age_secs = (now - tap.timestamp).num_milliseconds() as f64 / 1000.0;
        if age_secs >= window {
            return 0.0;
        }
        let weight = (1.0 - age_secs / window).clamp(0.0, 1.0);
        tap.minutes_wasted as f64 * weight
    }

    /// Undecayed sum of all logged minutes.
    pub fn all_time_minutes(taps: &[TapEvent]) -> u64 {
        taps.iter().map(|t| t.minutes_wasted as u64).sum()
    }

    /// Undecayed sum of minutes logged in the seven days before `now`.
    ///
    /// Future-dated taps count: their distance from `now` is negative,
    /// which is inside the window.
    pub fn last_week_minutes(now: DateTime<Utc>, taps: &[TapEvent]) -> u64 {
        taps.iter()
            .filter(|t| now - t.timestamp <= Duration::days(7))
            .map(|t| t.minutes_wasted as u64)
            .sum()
    }

    fn progress(&self, decayed_total: f64) -> f64 {
        let full_scale = self.config.full_scale_minutes;
        if full_scale <= 0.0 {
            return 0.0;
        }
        (decayed_total / full_scale).clamp(0.0, 1.0)
    }

    /// Map progress to a gauge color.
    ///
    /// Progress is gamma-adjusted, assigned to one of four bands by the
    /// thresholds (lower bound inclusive, upper exclusive, except the
    /// last band which includes 1.0), then interpolated between the
    /// band's two palette stops.
    fn band_color(&self, progress: f64) -> Rgb {
        let p = progress.clamp(0.0, 1.0).powf(self.config.gamma);
        let [s1, s2, s3] = self.config.band_thresholds;
        let palette = &self.config.palette;

        let (lo, hi, from, to) = if p < s1 {
            (0.0, s1, palette.fresh, palette.mild)
        } else if p < s2 {
            (s1, s2, palette.mild, palette.elevated)
        } else if p < s3 {
            (s2, s3, palette.elevated, palette.severe)
        } else {
            (s3, 1.0, palette.severe, palette.critical)
        };

        let span = hi - lo;
        let t = if span > 0.0 { (p - lo) / span } else { 1.0 };
        from.lerp(to, t)
    }
}

impl Default for SeverityModel {
    fn default() -> Self {
        Self::new()
    }
}
