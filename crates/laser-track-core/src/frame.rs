/// Borrowed RGB8 frame.
#[derive(Clone, Copy, Debug)]
pub struct RgbFrameView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8], // row-major RGB triplets, len = w*h*3
}

/// Owned RGB8 frame, fixed size for the capture session.
#[derive(Clone, Debug)]
pub struct RgbFrame {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

/// Integer pixel coordinate inside a frame (0 ≤ x < width, 0 ≤ y < height).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PixelCoord {
    pub x: u32,
    pub y: u32,
}

impl PixelCoord {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

impl RgbFrame {
    /// Build a frame from a raw RGB buffer; `None` if the length does not
    /// match `width * height * 3`.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        let expected = width.checked_mul(height)?.checked_mul(3)?;
        if data.len() != expected {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn view(&self) -> RgbFrameView<'_> {
        RgbFrameView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

impl<'a> RgbFrameView<'a> {
    /// RGB triplet at (x, y). Caller guarantees in-range coordinates.
    #[inline]
    pub fn rgb_at(&self, x: usize, y: usize) -> [u8; 3] {
        let i = (y * self.width + x) * 3;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_validates_length() {
        assert!(RgbFrame::from_raw(2, 2, vec![0; 12]).is_some());
        assert!(RgbFrame::from_raw(2, 2, vec![0; 11]).is_none());
        assert!(RgbFrame::from_raw(usize::MAX, 2, vec![0; 12]).is_none());
    }

    #[test]
    fn view_indexes_row_major() {
        let mut data = vec![0u8; 2 * 2 * 3];
        data[(1 * 2 + 1) * 3] = 7; // red channel of (1, 1)
        let frame = RgbFrame::from_raw(2, 2, data).unwrap();
        assert_eq!(frame.view().rgb_at(1, 1), [7, 0, 0]);
        assert_eq!(frame.view().rgb_at(0, 0), [0, 0, 0]);
    }
}
