//! Corner-fiducial frame locator.
//!
//! Targets printed with four solid square markers, each centered `inset_in`
//! from two paper edges, are located by taking the squarest solid blob nearest
//! each image corner. The four centroids must form a rectangle whose aspect
//! matches the target less the insets.

use crate::blob::{find_blobs, Blob, FindParams};
use crate::convention::AxisConvention;
use crate::frame::{Frame, FrameMethod};
use crate::geom::{PixelBox, PixelPoint};
use crate::mask::BinaryMask;
use crate::target::TargetSize;
use crate::util::error::invalid;
use crate::util::math::relative_deviation;
use crate::util::{ZeroSightError, ZeroSightResult};

/// Thresholds for corner fiducial detection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CornerParams {
    /// Distance in inches from each paper edge to a marker center.
    pub inset_in: f64,
    /// Minimum marker area in pixels.
    pub min_area: usize,
    /// Largest accepted bounding-box aspect ratio of a marker.
    pub max_aspect_ratio: f64,
    /// Minimum fraction of the bounding box a marker must fill.
    pub min_fill: f64,
    /// Search radius around each image corner, as a fraction of the diagonal.
    pub search_frac: f64,
    /// Allowed relative deviation between opposite sides and from the target aspect.
    pub tolerance: f64,
}

impl Default for CornerParams {
    fn default() -> Self {
        Self {
            inset_in: 0.5,
            min_area: 16,
            max_aspect_ratio: 1.5,
            min_fill: 0.6,
            search_frac: 0.3,
            tolerance: 0.1,
        }
    }
}

fn is_marker(blob: &Blob, params: &CornerParams) -> bool {
    blob.area >= params.min_area
        && blob.bbox.aspect_ratio() <= params.max_aspect_ratio
        && blob.bbox.fill_ratio(blob.area) >= params.min_fill
}

/// Locates four corner markers and derives the frame from them.
pub fn locate_corners(
    mask: &BinaryMask,
    target: TargetSize,
    convention: AxisConvention,
    params: CornerParams,
) -> ZeroSightResult<Frame> {
    if !(params.inset_in.is_finite() && params.inset_in >= 0.0) {
        return Err(invalid("corners.inset_in", "must be finite and >= 0"));
    }
    if 2.0 * params.inset_in >= target.short_side() {
        return Err(invalid("corners.inset_in", "insets leave no room on the target"));
    }

    let (w, h) = (mask.width() as f64, mask.height() as f64);
    let reach = params.search_frac * w.hypot(h);
    let markers: Vec<Blob> = find_blobs(mask, FindParams::default())
        .into_iter()
        .filter(|b| is_marker(b, &params))
        .collect();

    let nearest = |corner: PixelPoint| -> ZeroSightResult<Blob> {
        markers
            .iter()
            .map(|b| (b.centroid.distance(corner), b))
            .filter(|(d, _)| *d <= reach)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, b)| *b)
            .ok_or(ZeroSightError::FrameNotFound {
                reason: "corner marker missing",
            })
    };
    let tl = nearest(PixelPoint::new(0.0, 0.0))?;
    let tr = nearest(PixelPoint::new(w, 0.0))?;
    let bl = nearest(PixelPoint::new(0.0, h))?;
    let br = nearest(PixelPoint::new(w, h))?;
    let (tl_c, tr_c, bl_c, br_c) = (tl.centroid, tr.centroid, bl.centroid, br.centroid);

    let top = tr_c.x - tl_c.x;
    let bottom = br_c.x - bl_c.x;
    let left = bl_c.y - tl_c.y;
    let right = br_c.y - tr_c.y;
    if top <= 0.0 || bottom <= 0.0 || left <= 0.0 || right <= 0.0 {
        return Err(ZeroSightError::FrameNotFound {
            reason: "corner markers are not distinct",
        });
    }
    if relative_deviation(top, bottom) > params.tolerance
        || relative_deviation(left, right) > params.tolerance
    {
        return Err(ZeroSightError::FrameNotFound {
            reason: "corner markers do not form a rectangle",
        });
    }

    let span_w = 0.5 * (top + bottom);
    let span_h = 0.5 * (left + right);
    let extent = target.oriented(span_w > span_h);
    let spacing_w = extent.width_in() - 2.0 * params.inset_in;
    let spacing_h = extent.height_in() - 2.0 * params.inset_in;
    if relative_deviation(span_w / span_h, spacing_w / spacing_h) > params.tolerance {
        return Err(ZeroSightError::FrameNotFound {
            reason: "corner marker aspect does not match target",
        });
    }

    let ppi = span_w / spacing_w;
    let inset_px = params.inset_in * ppi;
    let paper = PixelBox::new(
        0.5 * (tl_c.x + bl_c.x) - inset_px,
        0.5 * (tl_c.y + tr_c.y) - inset_px,
        0.5 * (tr_c.x + br_c.x) + inset_px,
        0.5 * (bl_c.y + br_c.y) + inset_px,
    );
    let fiducials = [tl, tr, bl, br]
        .iter()
        .map(|b| b.bbox.to_pixel_box())
        .collect();

    Ok(Frame::from_target_box(paper, extent, convention)?
        .with_method(FrameMethod::Corners)
        .with_fiducials(fiducials))
}
