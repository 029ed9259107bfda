use serde::{Deserialize, Serialize};

use laser_track_core::{DetectionMode, PixelCoord, RgbFrameView};

use crate::brightness::{argmax, box_blur, luma};
use crate::hsv::{rgb_to_hsv, ColorBand};
use crate::regions::largest_region;

/// Frame-level failures. A frame with no target in it is `Ok(None)`, never
/// an error.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("degenerate frame (width={width}, height={height})")]
    EmptyFrame { width: usize, height: usize },

    #[error("invalid frame buffer length (expected {expected} bytes, got {got})")]
    InvalidBuffer { expected: usize, got: usize },
}

/// Locator tuning. All thresholds are data so mode variants stay plain
/// enum tags.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LocatorParams {
    /// Smoothing radius for brightness mode; kernel side is `2r + 1`.
    pub blur_radius: usize,
    /// Minimum connected-region area (pixels) for color modes.
    pub min_area: usize,
    pub red: ColorBand,
    pub green: ColorBand,
    pub blue: ColorBand,
}

impl Default for LocatorParams {
    fn default() -> Self {
        Self {
            blur_radius: 7, // 15×15 kernel
            min_area: 500,
            red: ColorBand::red(),
            green: ColorBand::green(),
            blue: ColorBand::blue(),
        }
    }
}

/// Per-frame target locator. Stateless across calls apart from its tuning;
/// a mode switch takes effect on the next `locate`.
#[derive(Clone, Debug, Default)]
pub struct Locator {
    params: LocatorParams,
}

impl Locator {
    pub fn new(params: LocatorParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &LocatorParams {
        &self.params
    }

    /// Find at most one target pixel in the frame.
    pub fn locate(
        &self,
        frame: &RgbFrameView<'_>,
        mode: DetectionMode,
    ) -> Result<Option<PixelCoord>, DetectError> {
        if frame.width == 0 || frame.height == 0 {
            return Err(DetectError::EmptyFrame {
                width: frame.width,
                height: frame.height,
            });
        }
        let expected = frame.width * frame.height * 3;
        if frame.data.len() != expected {
            return Err(DetectError::InvalidBuffer {
                expected,
                got: frame.data.len(),
            });
        }

        match mode {
            DetectionMode::Brightness => Ok(Some(self.brightest_spot(frame))),
            DetectionMode::Red => Ok(self.color_blob(frame, &self.params.red)),
            DetectionMode::Green => Ok(self.color_blob(frame, &self.params.green)),
            DetectionMode::Blue => Ok(self.color_blob(frame, &self.params.blue)),
        }
    }

    fn brightest_spot(&self, frame: &RgbFrameView<'_>) -> PixelCoord {
        let gray = luma(frame);
        let smoothed = box_blur(&gray, frame.width, frame.height, self.params.blur_radius);
        argmax(&smoothed, frame.width)
    }

    fn color_blob(&self, frame: &RgbFrameView<'_>, band: &ColorBand) -> Option<PixelCoord> {
        let mut mask = vec![false; frame.width * frame.height];
        for (i, px) in frame.data.chunks_exact(3).enumerate() {
            let (h, s, v) = rgb_to_hsv(px[0], px[1], px[2]);
            mask[i] = band.contains(h, s, v);
        }

        let region = largest_region(&mask, frame.width, frame.height)?;
        if region.area < self.params.min_area {
            log::debug!(
                "largest region below area floor ({} < {})",
                region.area,
                self.params.min_area
            );
            return None;
        }
        Some(PixelCoord::new(
            region.centroid.x.round() as u32,
            region.centroid.y.round() as u32,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use laser_track_core::RgbFrame;

    const NEUTRAL: [u8; 3] = [60, 60, 60];

    fn frame_with_rect(
        width: usize,
        height: usize,
        cx: usize,
        cy: usize,
        side: usize,
        color: [u8; 3],
    ) -> RgbFrame {
        let mut data = Vec::with_capacity(width * height * 3);
        for _ in 0..width * height {
            data.extend_from_slice(&NEUTRAL);
        }
        let mut frame = RgbFrame::from_raw(width, height, data).unwrap();
        let half = side / 2;
        for y in cy.saturating_sub(half)..(cy + side - half).min(height) {
            for x in cx.saturating_sub(half)..(cx + side - half).min(width) {
                let i = (y * width + x) * 3;
                frame.data[i..i + 3].copy_from_slice(&color);
            }
        }
        frame
    }

    #[test]
    fn red_blob_of_sufficient_area_is_centered() {
        // 32×32 = 1024 px ≥ 500.
        let frame = frame_with_rect(640, 480, 100, 50, 32, [255, 0, 0]);
        let found = Locator::default()
            .locate(&frame.view(), DetectionMode::Red)
            .unwrap()
            .unwrap();
        assert!((found.x as i32 - 100).abs() <= 1, "x = {}", found.x);
        assert!((found.y as i32 - 50).abs() <= 1, "y = {}", found.y);
    }

    #[test]
    fn small_red_blob_is_rejected() {
        // 10×10 = 100 px < 500.
        let frame = frame_with_rect(640, 480, 100, 50, 10, [255, 0, 0]);
        let found = Locator::default()
            .locate(&frame.view(), DetectionMode::Red)
            .unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn green_and_blue_bands_do_not_cross_detect() {
        let frame = frame_with_rect(320, 240, 160, 120, 40, [0, 255, 0]);
        let locator = Locator::default();
        let green = locator
            .locate(&frame.view(), DetectionMode::Green)
            .unwrap()
            .unwrap();
        assert_eq!(green, PixelCoord::new(160, 120));
        assert_eq!(
            locator.locate(&frame.view(), DetectionMode::Blue).unwrap(),
            None
        );
    }

    #[test]
    fn brightness_finds_bright_patch_within_blur_radius() {
        let mut frame = frame_with_rect(640, 480, 200, 150, 5, [255, 255, 255]);
        // Darken the background below the blob drawing default.
        for (i, b) in frame.data.iter_mut().enumerate() {
            if *b == NEUTRAL[i % 3] {
                *b = 10;
            }
        }
        let found = Locator::default()
            .locate(&frame.view(), DetectionMode::Brightness)
            .unwrap()
            .unwrap();
        let radius = LocatorParams::default().blur_radius as i32;
        assert!((found.x as i32 - 200).abs() <= radius, "x = {}", found.x);
        assert!((found.y as i32 - 150).abs() <= radius, "y = {}", found.y);
    }

    #[test]
    fn degenerate_frame_is_an_error() {
        let view = RgbFrameView {
            width: 0,
            height: 0,
            data: &[],
        };
        assert!(matches!(
            Locator::default().locate(&view, DetectionMode::Brightness),
            Err(DetectError::EmptyFrame { .. })
        ));
    }

    #[test]
    fn mismatched_buffer_is_an_error() {
        let data = vec![0u8; 10];
        let view = RgbFrameView {
            width: 4,
            height: 4,
            data: &data,
        };
        assert!(matches!(
            Locator::default().locate(&view, DetectionMode::Red),
            Err(DetectError::InvalidBuffer { .. })
        ));
    }
}
