//! Connected-region labeling over a binary mask.

use nalgebra::Point2;

/// One 4-connected region of set mask pixels.
#[derive(Clone, Copy, Debug)]
pub struct Region {
    /// Pixel count.
    pub area: usize,
    /// Area centroid (first moment).
    pub centroid: Point2<f32>,
}

/// Largest 4-connected region in a row-major binary mask, or `None` for an
/// all-clear mask.
pub fn largest_region(mask: &[bool], width: usize, height: usize) -> Option<Region> {
    debug_assert_eq!(mask.len(), width * height);

    let mut visited = vec![false; mask.len()];
    let mut stack: Vec<usize> = Vec::new();
    let mut best: Option<Region> = None;

    for start in 0..mask.len() {
        if !mask[start] || visited[start] {
            continue;
        }

        let mut area = 0usize;
        let mut sum_x = 0u64;
        let mut sum_y = 0u64;
        visited[start] = true;
        stack.push(start);

        while let Some(i) = stack.pop() {
            let x = i % width;
            let y = i / width;
            area += 1;
            sum_x += x as u64;
            sum_y += y as u64;

            if x > 0 {
                push_unvisited(mask, &mut visited, &mut stack, i - 1);
            }
            if x + 1 < width {
                push_unvisited(mask, &mut visited, &mut stack, i + 1);
            }
            if y > 0 {
                push_unvisited(mask, &mut visited, &mut stack, i - width);
            }
            if y + 1 < height {
                push_unvisited(mask, &mut visited, &mut stack, i + width);
            }
        }

        let centroid = Point2::new(
            sum_x as f32 / area as f32,
            sum_y as f32 / area as f32,
        );
        if best.is_none_or(|b| area > b.area) {
            best = Some(Region { area, centroid });
        }
    }

    best
}

#[inline]
fn push_unvisited(mask: &[bool], visited: &mut [bool], stack: &mut Vec<usize>, i: usize) {
    if mask[i] && !visited[i] {
        visited[i] = true;
        stack.push(i);
    }
}
