use serde::{Deserialize, Serialize};

use crate::angles::ActuatorAngles;
use crate::error::ConfigError;
use crate::frame::PixelCoord;

/// Actuator angles at the four frame edges, produced by the external
/// calibration procedure.
///
/// The pairs are *directional* endpoints, not ordered bounds: `x_min` is the
/// angle at the frame's left edge and may be numerically greater than
/// `x_max` when the mount geometry mirrors the axis. They must never be
/// reordered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalibrationBounds {
    /// Angle at pixel column 0.
    pub x_min: i32,
    /// Angle at pixel column `width`.
    pub x_max: i32,
    /// Angle at pixel row `height` (bottom edge).
    pub y_min: i32,
    /// Angle at pixel row 0 (top edge).
    pub y_max: i32,
}

/// Map a pixel coordinate to actuator angles by linear interpolation over
/// the calibration endpoints.
///
/// The Y axis is inverted: increasing pixel row (downward in image space)
/// moves toward `y_min`, the lower physical elevation. Results are truncated
/// toward zero to integer degree units, so the mapping is deterministic.
///
/// The locator guarantees in-range pixels, so no extrapolation occurs; a
/// zero frame dimension is a configuration error.
pub fn map_pixel_to_angles(
    pixel: PixelCoord,
    width: u32,
    height: u32,
    bounds: &CalibrationBounds,
) -> Result<ActuatorAngles, ConfigError> {
    if width == 0 || height == 0 {
        return Err(ConfigError::InvalidFrameDimensions { width, height });
    }

    let tx = f64::from(pixel.x) / f64::from(width);
    let ty = f64::from(pixel.y) / f64::from(height);

    let angle_x = f64::from(bounds.x_min) + tx * f64::from(bounds.x_max - bounds.x_min);
    let angle_y = f64::from(bounds.y_max) + ty * f64::from(bounds.y_min - bounds.y_max);

    Ok(ActuatorAngles {
        x: angle_x as i32,
        y: angle_y as i32,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // Calibration from a real bench session; note the mirrored X axis.
    const BOUNDS: CalibrationBounds = CalibrationBounds {
        x_min: 150,
        x_max: 80,
        y_min: 50,
        y_max: 125,
    };

    const W: u32 = 640;
    const H: u32 = 480;

    fn map(x: u32, y: u32) -> ActuatorAngles {
        map_pixel_to_angles(PixelCoord::new(x, y), W, H, &BOUNDS).unwrap()
    }

    #[test]
    fn corners_hit_calibration_endpoints() {
        // Top-left: left edge → x_min, top edge → y_max.
        assert_eq!(map(0, 0), ActuatorAngles::new(150, 125));
        // Far edges approach the opposite endpoints; truncation keeps the
        // last in-range pixel within one unit of the endpoint.
        let tr = map(W - 1, 0);
        assert!((tr.x - BOUNDS.x_max).abs() <= 1);
        assert_eq!(tr.y, BOUNDS.y_max);
        let bl = map(0, H - 1);
        assert_eq!(bl.x, BOUNDS.x_min);
        assert!((bl.y - BOUNDS.y_min).abs() <= 1);
        let br = map(W - 1, H - 1);
        assert!((br.x - BOUNDS.x_max).abs() <= 1);
        assert!((br.y - BOUNDS.y_min).abs() <= 1);
    }

    #[test]
    fn x_moves_monotonically_toward_x_max() {
        let mut prev = map(0, 0).x;
        for x in (0..W).step_by(40) {
            let cur = map(x, 0).x;
            // x_max < x_min here, so angle_x never increases.
            assert!(cur <= prev, "x={x}: {cur} > {prev}");
            prev = cur;
        }
    }

    #[test]
    fn y_moves_monotonically_toward_y_min() {
        let mut prev = map(0, 0).y;
        for y in (0..H).step_by(40) {
            let cur = map(0, y).y;
            assert!(cur <= prev, "y={y}: {cur} > {prev}");
            prev = cur;
        }
    }

    #[test]
    fn non_mirrored_endpoints_interpolate_upward() {
        let bounds = CalibrationBounds {
            x_min: 60,
            x_max: 105,
            y_min: 0,
            y_max: 60,
        };
        let mid = map_pixel_to_angles(PixelCoord::new(320, 240), W, H, &bounds).unwrap();
        assert_eq!(mid, ActuatorAngles::new(82, 30));
    }

    #[test]
    fn zero_dimension_is_invalid_configuration() {
        let err = map_pixel_to_angles(PixelCoord::new(0, 0), 0, H, &BOUNDS).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidFrameDimensions { width: 0, .. }
        ));
        assert!(map_pixel_to_angles(PixelCoord::new(0, 0), W, 0, &BOUNDS).is_err());
    }

    #[test]
    fn truncates_toward_zero() {
        // 150 + (1/640)·(80−150) = 149.89… → 149
        assert_eq!(map(1, 0).x, 149);
    }
}
