//! HSV conversion and color band tests.
//!
//! Uses the OpenCV byte convention (H ∈ [0, 180), S and V ∈ [0, 255]) so
//! that band constants from common tooling carry over unchanged.

use serde::{Deserialize, Serialize};

/// One HSV acceptance band.
///
/// Red needs two hue sub-ranges because hue wraps at the origin; the
/// ranges are inclusive on both ends.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorBand {
    pub hue_ranges: Vec<[u8; 2]>,
    pub sat_min: u8,
    pub val_min: u8,
}

impl ColorBand {
    pub fn red() -> Self {
        Self {
            hue_ranges: vec![[0, 10], [160, 180]],
            sat_min: 100,
            val_min: 100,
        }
    }

    pub fn green() -> Self {
        Self {
            hue_ranges: vec![[40, 80]],
            sat_min: 50,
            val_min: 50,
        }
    }

    pub fn blue() -> Self {
        Self {
            hue_ranges: vec![[100, 130]],
            sat_min: 100,
            val_min: 100,
        }
    }

    /// Band membership for one pixel.
    #[inline]
    pub fn contains(&self, h: u8, s: u8, v: u8) -> bool {
        s >= self.sat_min
            && v >= self.val_min
            && self.hue_ranges.iter().any(|&[lo, hi]| h >= lo && h <= hi)
    }
}

/// RGB → HSV, H ∈ [0, 180), S, V ∈ [0, 255].
pub fn rgb_to_hsv(r: u8, g: u8, b: u8) -> (u8, u8, u8) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = (max - min) as f32;

    let v = max;
    let s = if max == 0 {
        0
    } else {
        (delta * 255.0 / max as f32).round() as u8
    };

    if delta == 0.0 {
        return (0, s, v);
    }

    let (rf, gf, bf) = (r as f32, g as f32, b as f32);
    let hue_deg = if max == r {
        60.0 * ((gf - bf) / delta)
    } else if max == g {
        60.0 * ((bf - rf) / delta) + 120.0
    } else {
        60.0 * ((rf - gf) / delta) + 240.0
    };
    let hue_deg = if hue_deg < 0.0 { hue_deg + 360.0 } else { hue_deg };

    ((hue_deg / 2.0).round() as u8 % 180, s, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_hues() {
        assert_eq!(rgb_to_hsv(255, 0, 0), (0, 255, 255));
        assert_eq!(rgb_to_hsv(0, 255, 0), (60, 255, 255));
        assert_eq!(rgb_to_hsv(0, 0, 255), (120, 255, 255));
    }

    #[test]
    fn achromatic_pixels_have_zero_saturation() {
        assert_eq!(rgb_to_hsv(0, 0, 0), (0, 0, 0));
        assert_eq!(rgb_to_hsv(200, 200, 200), (0, 0, 200));
    }

    #[test]
    fn red_band_covers_both_hue_wraps() {
        let band = ColorBand::red();
        // Slightly orange red (h near 0) and crimson (h near 180).
        let (h1, s1, v1) = rgb_to_hsv(255, 40, 0);
        assert!(band.contains(h1, s1, v1));
        let (h2, s2, v2) = rgb_to_hsv(255, 0, 40);
        assert!(band.contains(h2, s2, v2));
        // Saturated green is out of band.
        let (h3, s3, v3) = rgb_to_hsv(0, 255, 0);
        assert!(!band.contains(h3, s3, v3));
    }

    #[test]
    fn dim_pixels_fail_the_value_floor() {
        let band = ColorBand::blue();
        let (h, s, v) = rgb_to_hsv(0, 0, 40);
        assert!(!band.contains(h, s, v));
    }
}
