//! Synthetic target rasterisation shared by the integration tests.
#![allow(dead_code)]

use zerosight::ImageView;

/// Pixels per inch of the synthetic letter targets.
pub const PPI: f64 = 40.0;
/// White margin between the image edge and the paper.
pub const MARGIN: usize = 20;
pub const PAPER_W: usize = 340;
pub const PAPER_H: usize = 440;
pub const IMG_W: usize = PAPER_W + 2 * MARGIN;
pub const IMG_H: usize = PAPER_H + 2 * MARGIN;
/// Radius of a drawn hole in pixels (0.25 in diameter).
pub const HOLE_RADIUS_PX: f64 = 5.0;

/// White grayscale canvas with simple drawing primitives.
pub struct Canvas {
    pub data: Vec<u8>,
    pub width: usize,
    pub height: usize,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            data: vec![255u8; width * height],
            width,
            height,
        }
    }

    /// Letter-size paper with a 3 px printed border at the paper edge.
    pub fn letter_with_border() -> Self {
        let mut canvas = Self::new(IMG_W, IMG_H);
        canvas.outline(
            MARGIN,
            MARGIN,
            MARGIN + PAPER_W - 1,
            MARGIN + PAPER_H - 1,
            3,
        );
        canvas
    }

    /// Letter-size paper with 0.4 in solid squares centered 0.5 in from each edge.
    pub fn letter_with_corner_markers() -> Self {
        let mut canvas = Self::new(IMG_W, IMG_H);
        let inset = (0.5 * PPI) as usize;
        let half = 8usize;
        let xs = [MARGIN + inset, MARGIN + PAPER_W - inset];
        let ys = [MARGIN + inset, MARGIN + PAPER_H - inset];
        for &cx in &xs {
            for &cy in &ys {
                canvas.fill_rect(cx - half, cy - half, cx + half - 1, cy + half - 1, 0);
            }
        }
        canvas
    }

    pub fn fill_rect(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, value: u8) {
        for y in y0..=y1.min(self.height - 1) {
            for x in x0..=x1.min(self.width - 1) {
                self.data[y * self.width + x] = value;
            }
        }
    }

    pub fn outline(&mut self, x0: usize, y0: usize, x1: usize, y1: usize, thickness: usize) {
        self.fill_rect(x0, y0, x1, y0 + thickness - 1, 0);
        self.fill_rect(x0, y1 + 1 - thickness, x1, y1, 0);
        self.fill_rect(x0, y0, x0 + thickness - 1, y1, 0);
        self.fill_rect(x1 + 1 - thickness, y0, x1, y1, 0);
    }

    /// Fills every pixel whose center lies within `r` of `(cx, cy)`.
    pub fn disc(&mut self, cx: f64, cy: f64, r: f64) {
        let x0 = (cx - r).floor().max(0.0) as usize;
        let y0 = (cy - r).floor().max(0.0) as usize;
        let x1 = ((cx + r).ceil() as usize).min(self.width - 1);
        let y1 = ((cy + r).ceil() as usize).min(self.height - 1);
        for y in y0..=y1 {
            for x in x0..=x1 {
                let dx = x as f64 + 0.5 - cx;
                let dy = y as f64 + 0.5 - cy;
                if dx * dx + dy * dy <= r * r {
                    self.data[y * self.width + x] = 0;
                }
            }
        }
    }

    /// Punches a hole at a y-up inch position on the letter paper.
    pub fn hole_at_inches(&mut self, x_in: f64, y_in: f64) {
        let (px, py) = inches_to_px(x_in, y_in);
        self.disc(px, py, HOLE_RADIUS_PX);
    }

    /// Crosshair lines, 2 px thick, through a y-up inch position.
    pub fn crosshair_at_inches(&mut self, x_in: f64, y_in: f64) {
        let (px, py) = inches_to_px(x_in, y_in);
        let (cx, cy) = (px as usize, py as usize);
        self.fill_rect(MARGIN, cy - 1, MARGIN + PAPER_W - 1, cy, 0);
        self.fill_rect(cx - 1, MARGIN, cx, MARGIN + PAPER_H - 1, 0);
    }

    pub fn view(&self) -> ImageView<'_, u8> {
        ImageView::from_slice(&self.data, self.width, self.height).unwrap()
    }
}

/// Pixel position of a y-up inch position on the letter paper.
pub fn inches_to_px(x_in: f64, y_in: f64) -> (f64, f64) {
    (
        MARGIN as f64 + x_in * PPI,
        (MARGIN + PAPER_H) as f64 - y_in * PPI,
    )
}

pub fn assert_close(got: f64, expected: f64, tol: f64) {
    assert!(
        (got - expected).abs() <= tol,
        "expected {expected} +/- {tol}, got {got}"
    );
}
