//! Conversions between `image` crate buffers and the core frame types.

use laser_track_core::{RgbFrame, RgbFrameView};

/// Borrow an `image::RgbImage` as a core frame view.
pub fn rgb_view(img: &image::RgbImage) -> RgbFrameView<'_> {
    RgbFrameView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Copy an `image::RgbImage` into an owned core frame.
pub fn rgb_frame_from_image(img: &image::RgbImage) -> RgbFrame {
    RgbFrame {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw().clone(),
    }
}
