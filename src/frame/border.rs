//! Border-scan frame locator.
//!
//! The outermost rows and columns whose dark fraction reaches `density` bound
//! the printed border. The box must cover a reasonable share of the image and
//! match the target's aspect ratio in either orientation.

use crate::convention::AxisConvention;
use crate::frame::{Frame, FrameMethod};
use crate::geom::PixelBox;
use crate::mask::BinaryMask;
use crate::target::TargetSize;
use crate::util::error::invalid;
use crate::util::math::relative_deviation;
use crate::util::{ZeroSightError, ZeroSightResult};

/// Thresholds for the border scan.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BorderParams {
    /// Minimum dark fraction of a row/column to count as border.
    pub density: f64,
    /// Allowed relative deviation of the box aspect from the target aspect.
    pub aspect_tolerance: f64,
    /// Minimum box extent as a fraction of the image extent, per axis.
    pub min_extent_frac: f64,
}

impl Default for BorderParams {
    fn default() -> Self {
        Self {
            density: 0.4,
            aspect_tolerance: 0.15,
            min_extent_frac: 0.2,
        }
    }
}

fn first_last_dense(counts: &[usize], needed: f64) -> Option<(usize, usize)> {
    let dense = |c: &usize| *c > 0 && *c as f64 >= needed;
    let first = counts.iter().position(dense)?;
    let last = counts.iter().rposition(dense)?;
    Some((first, last))
}

/// Finds the printed border and derives the frame from it.
pub fn locate_border(
    mask: &BinaryMask,
    target: TargetSize,
    convention: AxisConvention,
    params: BorderParams,
) -> ZeroSightResult<Frame> {
    if !(params.density > 0.0 && params.density <= 1.0) {
        return Err(invalid("border.density", "must be in (0, 1]"));
    }
    let (width, height) = (mask.width(), mask.height());

    let (top, bottom) = first_last_dense(&mask.row_counts(), params.density * width as f64)
        .ok_or(ZeroSightError::FrameNotFound {
            reason: "no dense border rows",
        })?;
    let (left, right) = first_last_dense(&mask.column_counts(), params.density * height as f64)
        .ok_or(ZeroSightError::FrameNotFound {
            reason: "no dense border columns",
        })?;

    let border = PixelBox::from_pixel_range(left, top, right, bottom);
    if border.width() < params.min_extent_frac * width as f64
        || border.height() < params.min_extent_frac * height as f64
    {
        return Err(ZeroSightError::FrameNotFound {
            reason: "border box is degenerate",
        });
    }

    let extent = target.oriented(border.width() > border.height());
    let aspect = border.width() / border.height();
    if relative_deviation(aspect, extent.aspect()) > params.aspect_tolerance {
        return Err(ZeroSightError::FrameNotFound {
            reason: "border aspect does not match target",
        });
    }

    Ok(Frame::from_target_box(border, extent, convention)?.with_method(FrameMethod::Border))
}
