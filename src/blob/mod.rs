//! Connected-component labeling over a binary mask.
//!
//! Components are grown with an explicit stack (no recursion) and a visited
//! bitmap, so every dark pixel is pushed exactly once and the cost is
//! `O(width * height)` regardless of content. Components are emitted in the
//! row-major order of their first pixel.

use crate::geom::{PixelBox, PixelPoint};
use crate::mask::BinaryMask;
use crate::trace::{trace_event, trace_span};

pub mod classify;

/// Pixel neighbourhood used when growing components.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Connectivity {
    /// Edge neighbours only.
    Four,
    /// Edge and corner neighbours.
    #[default]
    Eight,
}

impl Connectivity {
    fn offsets(self) -> &'static [(isize, isize)] {
        const FOUR: [(isize, isize); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        const EIGHT: [(isize, isize); 8] = [
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 1),
            (1, -1),
            (-1, 1),
            (-1, -1),
        ];
        match self {
            Connectivity::Four => &FOUR,
            Connectivity::Eight => &EIGHT,
        }
    }
}

/// Inclusive pixel-index bounding box of a component.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BoundingBox {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl BoundingBox {
    pub fn width(&self) -> usize {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> usize {
        self.max_y - self.min_y + 1
    }

    /// `max(w, h) / max(1, min(w, h))`.
    pub fn aspect_ratio(&self) -> f64 {
        let (w, h) = (self.width(), self.height());
        w.max(h) as f64 / w.min(h).max(1) as f64
    }

    /// Fraction of the box covered by `area` pixels.
    pub fn fill_ratio(&self, area: usize) -> f64 {
        area as f64 / (self.width() * self.height()) as f64
    }

    pub fn to_pixel_box(&self) -> PixelBox {
        PixelBox::from_pixel_range(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// A connected region of dark pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Blob {
    /// Number of member pixels.
    pub area: usize,
    /// Mean of member pixel centers.
    pub centroid: PixelPoint,
    pub bbox: BoundingBox,
    /// Set when `area` exceeded the finder's ceiling.
    pub oversized: bool,
}

/// Options for [`find_blobs`].
#[derive(Clone, Copy, Debug)]
pub struct FindParams {
    pub connectivity: Connectivity,
    /// Components larger than this are flagged `oversized`.
    pub area_ceiling: usize,
}

impl Default for FindParams {
    fn default() -> Self {
        Self {
            connectivity: Connectivity::Eight,
            area_ceiling: usize::MAX,
        }
    }
}

/// Finds all connected dark components of `mask`.
///
/// An empty result is valid and simply means the mask has no dark pixels.
pub fn find_blobs(mask: &BinaryMask, params: FindParams) -> Vec<Blob> {
    let width = mask.width();
    let height = mask.height();
    let _span = trace_span!("find_blobs", width = width, height = height).entered();

    let bits = mask.bits();
    let offsets = params.connectivity.offsets();
    let mut visited = vec![false; bits.len()];
    let mut stack: Vec<usize> = Vec::new();
    let mut blobs = Vec::new();

    for seed in 0..bits.len() {
        if !bits[seed] || visited[seed] {
            continue;
        }
        visited[seed] = true;
        stack.push(seed);

        let mut area = 0usize;
        let (mut sum_x, mut sum_y) = (0u64, 0u64);
        let mut bbox = BoundingBox {
            min_x: seed % width,
            min_y: seed / width,
            max_x: seed % width,
            max_y: seed / width,
        };

        while let Some(idx) = stack.pop() {
            let x = idx % width;
            let y = idx / width;
            area += 1;
            sum_x += x as u64;
            sum_y += y as u64;
            bbox.min_x = bbox.min_x.min(x);
            bbox.max_x = bbox.max_x.max(x);
            bbox.min_y = bbox.min_y.min(y);
            bbox.max_y = bbox.max_y.max(y);

            for &(dx, dy) in offsets {
                let (Some(nx), Some(ny)) = (x.checked_add_signed(dx), y.checked_add_signed(dy))
                else {
                    continue;
                };
                if nx >= width || ny >= height {
                    continue;
                }
                let n = ny * width + nx;
                if bits[n] && !visited[n] {
                    visited[n] = true;
                    stack.push(n);
                }
            }
        }

        let centroid = PixelPoint::new(
            sum_x as f64 / area as f64 + 0.5,
            sum_y as f64 / area as f64 + 0.5,
        );
        blobs.push(Blob {
            area,
            centroid,
            bbox,
            oversized: area > params.area_ceiling,
        });
    }

    trace_event!(
        "blobs_found",
        count = blobs.len(),
        oversized = blobs.iter().filter(|b| b.oversized).count()
    );
    blobs
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mask_from_rows(rows: &[&str]) -> BinaryMask {
        let width = rows[0].len();
        let bits = rows
            .iter()
            .flat_map(|r| r.chars().map(|c| c == '#'))
            .collect();
        BinaryMask::from_bits(bits, width, rows.len()).unwrap()
    }

    #[test]
    fn diagonal_pixels_join_only_under_eight_connectivity() {
        let mask = mask_from_rows(&["#..", ".#.", "..#"]);
        let eight = find_blobs(&mask, FindParams::default());
        assert_eq!(eight.len(), 1);
        assert_eq!(eight[0].area, 3);
        let four = find_blobs(
            &mask,
            FindParams {
                connectivity: Connectivity::Four,
                ..FindParams::default()
            },
        );
        assert_eq!(four.len(), 3);
    }

    #[test]
    fn blobs_are_emitted_in_scan_order_with_stats() {
        let mask = mask_from_rows(&[
            "......##",
            "##....##",
            "##......",
            "........",
        ]);
        let blobs = find_blobs(&mask, FindParams::default());
        assert_eq!(blobs.len(), 2);
        assert_eq!(blobs[0].bbox.min_x, 6);
        assert_eq!(blobs[1].bbox.min_x, 0);
        assert_eq!(blobs[1].area, 4);
        assert_eq!(blobs[1].centroid, PixelPoint::new(1.0, 2.0));
        assert_eq!(blobs[1].bbox.aspect_ratio(), 1.0);
    }

    #[test]
    fn oversized_components_are_flagged_not_dropped() {
        let mask = mask_from_rows(&["####", "####"]);
        let blobs = find_blobs(
            &mask,
            FindParams {
                area_ceiling: 5,
                ..FindParams::default()
            },
        );
        assert_eq!(blobs.len(), 1);
        assert!(blobs[0].oversized);
        assert_eq!(blobs[0].area, 8);
    }

    #[test]
    fn empty_mask_yields_no_blobs() {
        let mask = mask_from_rows(&["...", "..."]);
        assert!(find_blobs(&mask, FindParams::default()).is_empty());
    }
}
