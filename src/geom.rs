//! Point and rectangle types for the two coordinate spaces.
//!
//! Pixel space has its origin at the top-left image corner with y growing
//! downwards; pixel `(i, j)` covers `[i, i + 1) x [j, j + 1)` so its center is
//! `(i + 0.5, j + 0.5)`. Inch space is physical target space whose origin and
//! y direction are fixed by [`AxisConvention`](crate::convention::AxisConvention).
//! The two point types are deliberately distinct so a pixel value can never be
//! passed where an inch value is expected.

/// A point in image pixel space.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Center of the pixel at integer indices `(x, y)`.
    pub fn pixel_center(x: usize, y: usize) -> Self {
        Self {
            x: x as f64 + 0.5,
            y: y as f64 + 0.5,
        }
    }

    /// Euclidean distance to `other`.
    pub fn distance(self, other: PixelPoint) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Arithmetic mean of a set of points, `None` when empty.
    pub fn mean<I: IntoIterator<Item = PixelPoint>>(points: I) -> Option<PixelPoint> {
        let (mut sx, mut sy, mut n) = (0.0, 0.0, 0usize);
        for p in points {
            sx += p.x;
            sy += p.y;
            n += 1;
        }
        (n > 0).then(|| PixelPoint::new(sx / n as f64, sy / n as f64))
    }
}

/// A point in physical target space, in inches.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct InchPoint {
    pub x: f64,
    pub y: f64,
}

impl InchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle in pixel space with floating-point edges.
///
/// `left <= right` and `top <= bottom`; `top` is the edge nearest row 0.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PixelBox {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PixelBox {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Box covering the inclusive pixel index range `[min_x, max_x] x [min_y, max_y]`.
    pub fn from_pixel_range(min_x: usize, min_y: usize, max_x: usize, max_y: usize) -> Self {
        Self::new(
            min_x as f64,
            min_y as f64,
            max_x as f64 + 1.0,
            max_y as f64 + 1.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(
            0.5 * (self.left + self.right),
            0.5 * (self.top + self.bottom),
        )
    }

    /// Half-open containment test, `[left, right) x [top, bottom)`.
    pub fn contains(&self, p: PixelPoint) -> bool {
        p.x >= self.left && p.x < self.right && p.y >= self.top && p.y < self.bottom
    }

    /// Shrinks every edge inwards by `margin`; `None` if the box collapses.
    pub fn shrink(&self, margin: f64) -> Option<PixelBox> {
        let shrunk = PixelBox::new(
            self.left + margin,
            self.top + margin,
            self.right - margin,
            self.bottom - margin,
        );
        (shrunk.width() > 0.0 && shrunk.height() > 0.0).then_some(shrunk)
    }
}
