//! The coordinate convention contract.
//!
//! Every conversion between pixel space and inch space, the subtraction that
//! defines a correction, and the mapping from signed clicks to direction labels
//! live here and nowhere else:
//!
//! - x is positive to the right in both spaces.
//! - The y direction of inch space is the [`AxisConvention`]: `YUp` flips the
//!   image's down-positive rows exactly once in [`AxisConvention::pixel_to_inch`];
//!   `YDown` keeps them.
//! - A correction is always `Bull - POIB`.
//! - Labels come from the sign of the signed clicks under the same convention.

use crate::geom::{InchPoint, PixelBox, PixelPoint};
use std::fmt;

/// Direction of the inch-space y axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum AxisConvention {
    /// y grows towards the top of the target (origin at the bottom-left corner).
    #[default]
    YUp,
    /// y grows towards the bottom of the target (origin at the top-left corner).
    YDown,
}

impl AxisConvention {
    /// Converts a pixel position to inches relative to `origin`.
    ///
    /// This is the only place the y flip happens.
    pub fn pixel_to_inch(self, px: PixelPoint, origin: PixelPoint, pixels_per_inch: f64) -> InchPoint {
        let x = (px.x - origin.x) / pixels_per_inch;
        let y = match self {
            AxisConvention::YUp => (origin.y - px.y) / pixels_per_inch,
            AxisConvention::YDown => (px.y - origin.y) / pixels_per_inch,
        };
        InchPoint::new(x, y)
    }

    /// Inverse of [`pixel_to_inch`](Self::pixel_to_inch).
    pub fn inch_to_pixel(self, p: InchPoint, origin: PixelPoint, pixels_per_inch: f64) -> PixelPoint {
        let x = origin.x + p.x * pixels_per_inch;
        let y = match self {
            AxisConvention::YUp => origin.y - p.y * pixels_per_inch,
            AxisConvention::YDown => origin.y + p.y * pixels_per_inch,
        };
        PixelPoint::new(x, y)
    }

    /// Pixel position of the inch-space origin for a target occupying `target`.
    pub fn origin_corner(self, target: &PixelBox) -> PixelPoint {
        match self {
            AxisConvention::YUp => PixelPoint::new(target.left, target.bottom),
            AxisConvention::YDown => PixelPoint::new(target.left, target.top),
        }
    }

    /// Label for a signed windage value.
    pub fn windage_direction(self, signed: f64) -> Direction {
        if signed > 0.0 {
            Direction::Right
        } else if signed < 0.0 {
            Direction::Left
        } else {
            Direction::Hold
        }
    }

    /// Label for a signed elevation value.
    pub fn elevation_direction(self, signed: f64) -> Direction {
        let towards_positive_y = match self {
            AxisConvention::YUp => Direction::Up,
            AxisConvention::YDown => Direction::Down,
        };
        if signed > 0.0 {
            towards_positive_y
        } else if signed < 0.0 {
            towards_positive_y.opposite()
        } else {
            Direction::Hold
        }
    }
}

/// Signed correction in inches, `Bull - POIB`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CorrectionVector {
    pub dx_in: f64,
    pub dy_in: f64,
}

/// Computes the correction that moves `poib` onto `bull`.
pub fn correction(bull: InchPoint, poib: InchPoint) -> CorrectionVector {
    CorrectionVector {
        dx_in: bull.x - poib.x,
        dy_in: bull.y - poib.y,
    }
}

/// Human-readable adjustment direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
    /// No adjustment on this axis.
    Hold,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Left => "LEFT",
            Direction::Right => "RIGHT",
            Direction::Up => "UP",
            Direction::Down => "DOWN",
            Direction::Hold => "HOLD",
        }
    }

    fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Hold => Direction::Hold,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
