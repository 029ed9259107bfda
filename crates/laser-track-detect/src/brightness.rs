//! Brightest-spot pipeline: luma conversion, box smoothing, argmax.

use laser_track_core::{PixelCoord, RgbFrameView};

/// Convert an RGB frame to single-channel intensity (BT.601 weights,
/// integer arithmetic).
pub fn luma(frame: &RgbFrameView<'_>) -> Vec<u8> {
    let mut out = Vec::with_capacity(frame.width * frame.height);
    for px in frame.data.chunks_exact(3) {
        let (r, g, b) = (px[0] as u32, px[1] as u32, px[2] as u32);
        out.push(((77 * r + 150 * g + 29 * b) >> 8) as u8);
    }
    out
}

/// Separable box blur with edge replication, normalized by the actual
/// window size so borders are not darkened.
///
/// `radius = 7` gives the 15×15 neighborhood used for spot smoothing.
pub fn box_blur(src: &[u8], width: usize, height: usize, radius: usize) -> Vec<u8> {
    if radius == 0 || width == 0 || height == 0 {
        return src.to_vec();
    }
    let horizontal = blur_pass(src, width, height, radius, true);
    blur_pass(&horizontal, width, height, radius, false)
}

fn blur_pass(src: &[u8], width: usize, height: usize, radius: usize, rows: bool) -> Vec<u8> {
    let (lines, len) = if rows { (height, width) } else { (width, height) };
    let at = |line: usize, i: usize| -> usize {
        if rows {
            line * width + i
        } else {
            i * width + line
        }
    };

    let mut out = vec![0u8; width * height];
    for line in 0..lines {
        // Running window sum over [i-radius, i+radius] clipped to the line.
        let mut sum: u32 = 0;
        let mut count: u32 = 0;
        for i in 0..=radius.min(len - 1) {
            sum += src[at(line, i)] as u32;
            count += 1;
        }
        for i in 0..len {
            out[at(line, i)] = (sum / count) as u8;
            if i + radius + 1 < len {
                sum += src[at(line, i + radius + 1)] as u32;
                count += 1;
            }
            if i >= radius {
                sum -= src[at(line, i - radius)] as u32;
                count -= 1;
            }
        }
    }
    out
}

/// Coordinate of the global intensity maximum; the first occurrence wins in
/// row-major order.
pub fn argmax(gray: &[u8], width: usize) -> PixelCoord {
    let mut best = 0usize;
    let mut best_val = 0u8;
    for (i, &v) in gray.iter().enumerate() {
        if v > best_val {
            best_val = v;
            best = i;
        }
    }
    PixelCoord::new((best % width) as u32, (best / width) as u32)
}
