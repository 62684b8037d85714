//! Pixel-to-inch reference frames.
//!
//! A [`Frame`] pins inch space to the image: the pixel position of the inch
//! origin, the scale in pixels per inch, and the target outline it was derived
//! from. Locators either produce a plausible frame or fail with
//! `FrameNotFound`; they never fall back to the image bounds.

use crate::convention::AxisConvention;
use crate::geom::{InchPoint, PixelBox, PixelPoint};
use crate::mask::BinaryMask;
use crate::target::TargetSize;
use crate::trace::{trace_event, trace_span};
use crate::util::error::invalid;
use crate::util::math::positive_finite;
use crate::util::ZeroSightResult;

mod border;
mod corners;
mod crosshair;

pub use border::{locate_border, BorderParams};
pub use corners::{locate_corners, CornerParams};
pub use crosshair::{locate_crosshair, CrosshairParams};

/// Which fiducials produced a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameMethod {
    Border,
    Corners,
    /// Built directly by the caller.
    Explicit,
}

/// Detected physical reference grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    origin_px: PixelPoint,
    pixels_per_inch: f64,
    target_px: Option<PixelBox>,
    extent: TargetSize,
    convention: AxisConvention,
    fiducials_px: Vec<PixelBox>,
    method: FrameMethod,
}

impl Frame {
    /// Builds a frame from an explicit origin and scale.
    ///
    /// `extent` is the target size as laid out along the image axes.
    pub fn new(
        origin_px: PixelPoint,
        pixels_per_inch: f64,
        extent: TargetSize,
        convention: AxisConvention,
    ) -> ZeroSightResult<Self> {
        let pixels_per_inch = positive_finite(pixels_per_inch)
            .ok_or(invalid("pixels_per_inch", "must be finite and > 0"))?;
        if !(origin_px.x.is_finite() && origin_px.y.is_finite()) {
            return Err(invalid("origin_px", "must be finite"));
        }
        Ok(Self {
            origin_px,
            pixels_per_inch,
            target_px: None,
            extent,
            convention,
            fiducials_px: Vec::new(),
            method: FrameMethod::Explicit,
        })
    }

    /// Builds a frame from the target's outline in pixels.
    ///
    /// The scale is `target_px.width() / extent.width_in()`.
    pub fn from_target_box(
        target_px: PixelBox,
        extent: TargetSize,
        convention: AxisConvention,
    ) -> ZeroSightResult<Self> {
        let origin = convention.origin_corner(&target_px);
        let mut frame = Frame::new(
            origin,
            target_px.width() / extent.width_in(),
            extent,
            convention,
        )?;
        frame.target_px = Some(target_px);
        Ok(frame)
    }

    pub(crate) fn with_method(mut self, method: FrameMethod) -> Self {
        self.method = method;
        self
    }

    pub(crate) fn with_fiducials(mut self, fiducials: Vec<PixelBox>) -> Self {
        self.fiducials_px = fiducials;
        self
    }

    /// Converts a pixel position to inch space.
    pub fn to_inches(&self, px: PixelPoint) -> InchPoint {
        self.convention
            .pixel_to_inch(px, self.origin_px, self.pixels_per_inch)
    }

    /// Converts an inch-space position back to pixels.
    pub fn to_pixels(&self, p: InchPoint) -> PixelPoint {
        self.convention
            .inch_to_pixel(p, self.origin_px, self.pixels_per_inch)
    }

    pub fn origin_px(&self) -> PixelPoint {
        self.origin_px
    }

    pub fn pixels_per_inch(&self) -> f64 {
        self.pixels_per_inch
    }

    /// Target outline in pixels, when the frame came from a locator.
    pub fn target_px(&self) -> Option<PixelBox> {
        self.target_px
    }

    /// Target size oriented to the image axes.
    pub fn extent(&self) -> TargetSize {
        self.extent
    }

    pub fn convention(&self) -> AxisConvention {
        self.convention
    }

    /// Bounding boxes of the fiducial markers used, if any.
    pub fn fiducials_px(&self) -> &[PixelBox] {
        &self.fiducials_px
    }

    pub fn method(&self) -> FrameMethod {
        self.method
    }
}

/// How to locate the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FrameStrategy {
    /// Dense outer border lines.
    Border(BorderParams),
    /// Four square markers near the image corners.
    Corners(CornerParams),
}

impl Default for FrameStrategy {
    fn default() -> Self {
        FrameStrategy::Border(BorderParams::default())
    }
}

/// Locates the frame using the chosen strategy.
pub fn locate_frame(
    mask: &BinaryMask,
    target: TargetSize,
    convention: AxisConvention,
    strategy: FrameStrategy,
) -> ZeroSightResult<Frame> {
    let _span = trace_span!("locate_frame").entered();
    let frame = match strategy {
        FrameStrategy::Border(params) => locate_border(mask, target, convention, params)?,
        FrameStrategy::Corners(params) => locate_corners(mask, target, convention, params)?,
    };
    trace_event!(
        "frame_located",
        pixels_per_inch = frame.pixels_per_inch(),
        origin_x = frame.origin_px().x,
        origin_y = frame.origin_px().y
    );
    Ok(frame)
}
