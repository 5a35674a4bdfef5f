//! Gradient colors for the severity gauge.

use serde::{Deserialize, Serialize};

/// RGB color with channels in `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Create a color from channel values.
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Channel-wise linear interpolation toward `other`.
    ///
    /// `t` is clamped to `[0.0, 1.0]`.
    pub fn lerp(&self, other: Rgb, t: f64) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        Rgb {
            r: self.r + (other.r - self.r) * t,
            g: self.g + (other.g - self.g) * t,
            b: self.b + (other.b - self.b) * t,
        }
    }

    /// Render as `#rrggbb` for hosts that want CSS-style colors.
    pub fn to_hex(&self) -> String {
        let channel = |v: f64| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }
}

/// The five gradient stops the gauge color moves through.
///
/// `fresh` is the at-rest color; each later stop anchors the top of one
/// band on the way to `critical`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityPalette {
    pub fresh: Rgb,
    pub mild: Rgb,
    pub elevated: Rgb,
    pub severe: Rgb,
    pub critical: Rgb,
}

impl Default for SeverityPalette {
    fn default() -> Self {
        Self {
            fresh: Rgb::new(0.20, 0.78, 0.35),
            mild: Rgb::new(1.00, 0.80, 0.00),
            elevated: Rgb::new(1.00, 0.58, 0.00),
            severe: Rgb::new(1.00, 0.23, 0.19),
            critical: Rgb::new(0.60, 0.04, 0.08),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_midpoint() {
        let mid = Rgb::new(0.0, 0.0, 0.0).lerp(Rgb::new(1.0, 0.5, 0.0), 0.5);
        assert!((mid.r - 0.5).abs() < 1e-12);
        assert!((mid.g - 0.25).abs() < 1e-12);
        assert!(mid.b.abs() < 1e-12);
    }

    #[test]
    fn lerp_clamps_t() {
        let black = Rgb::new(0.0, 0.0, 0.0);
        let white = Rgb::new(1.0, 1.0, 1.0);
        assert_eq!(black.lerp(white, -3.0), black);
        assert_eq!(black.lerp(white, 7.0), white);
    }

    #[test]
    fn hex_rendering() {
        assert_eq!(Rgb::new(0.0, 0.0, 0.0).to_hex(), "#000000");
        assert_eq!(Rgb::new(1.0, 1.0, 1.0).to_hex(), "#ffffff");
        assert_eq!(Rgb::new(0.20, 0.78, 0.35).to_hex(), "#33c759");
    }

    #[test]
    fn hex_clamps_out_of_range_channels() {
        assert_eq!(Rgb::new(-0.5, 2.0, 0.5).to_hex(), "#00ff80");
    }
}
