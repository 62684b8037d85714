//! End-to-end correction from a target photograph or from hole coordinates.
//!
//! Image mode runs mask building, frame location, blob finding,
//! classification, cluster selection and the correction engine as one
//! straight-line pass. Coordinate mode feeds inch positions directly to the
//! correction engine. Both modes share [`CorrectorConfig`] and produce a
//! [`CorrectionReport`].

use crate::blob::classify::{Classification, RejectReason};
use crate::blob::Connectivity;
use crate::convention::{AxisConvention, CorrectionVector};
use crate::correction::ClickResult;
use crate::frame::{CrosshairParams, FrameMethod, FrameStrategy};
use crate::geom::{InchPoint, PixelPoint};
use crate::image::ImageView;
use crate::mask::ThresholdStrategy;
use crate::target::TargetSize;
use crate::util::error::invalid;
use crate::util::ZeroSightResult;

mod batch;
mod run;

pub use run::Corrector;

/// Accepted hole size, used to derive the classifier's area bounds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HoleSize {
    /// Diameters in inches, converted with the frame scale.
    Inches {
        min_diameter_in: f64,
        max_diameter_in: f64,
    },
    /// Explicit pixel areas.
    Pixels { min_area: usize, max_area: usize },
}

impl Default for HoleSize {
    fn default() -> Self {
        HoleSize::Inches {
            min_diameter_in: 0.12,
            max_diameter_in: 0.75,
        }
    }
}

impl HoleSize {
    /// Pixel area bounds at the given scale.
    pub fn area_bounds(&self, pixels_per_inch: f64) -> ZeroSightResult<(usize, usize)> {
        match *self {
            HoleSize::Pixels { min_area, max_area } => Ok((min_area, max_area)),
            HoleSize::Inches {
                min_diameter_in,
                max_diameter_in,
            } => {
                if !(min_diameter_in > 0.0 && min_diameter_in <= max_diameter_in)
                    || !max_diameter_in.is_finite()
                {
                    return Err(invalid("hole_size", "need 0 < min_diameter <= max_diameter"));
                }
                let area = |d: f64| {
                    let r = 0.5 * d * pixels_per_inch;
                    std::f64::consts::PI * r * r
                };
                let min_area = area(min_diameter_in).floor().max(1.0) as usize;
                let max_area = area(max_diameter_in).ceil() as usize;
                Ok((min_area, max_area.max(min_area)))
            }
        }
    }
}

/// Where the aim point comes from in image mode.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BullSource {
    /// Center of the located target.
    #[default]
    Center,
    /// Fixed inch position in the active convention.
    Explicit(InchPoint),
    /// Printed crosshair intersection inside the target outline.
    Crosshair(CrosshairParams),
}

/// Configuration for [`Corrector`].
#[derive(Clone, Debug, PartialEq)]
pub struct CorrectorConfig {
    /// Direction of the inch-space y axis for inputs and outputs.
    pub convention: AxisConvention,
    pub threshold: ThresholdStrategy,
    pub connectivity: Connectivity,
    pub frame: FrameStrategy,
    pub bull: BullSource,
    pub hole_size: HoleSize,
    pub max_aspect_ratio: f64,
    /// Blobs closer than this to the target outline, or outside it, are ignored.
    pub border_margin_in: f64,
    /// Height of an ignored band below the top edge (0 disables).
    pub header_in: f64,
    /// Height of an ignored band above the bottom edge (0 disables).
    pub footer_in: f64,
    /// Half-width of ignored bands along the crosshair through the bull.
    pub crosshair_half_width_in: Option<f64>,
    pub min_shots: usize,
    pub max_shots: usize,
    /// Radius slack in inches under which shot clusters count as equally tight.
    pub cluster_tie_in: f64,
    /// Components above `oversize_factor * max hole area` are flagged oversized.
    pub oversize_factor: usize,
    /// Largest accepted image, in pixels.
    pub max_pixels: usize,
    /// Process batches on the rayon thread pool (requires the `rayon` feature).
    pub parallel: bool,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        Self {
            convention: AxisConvention::YUp,
            threshold: ThresholdStrategy::default(),
            connectivity: Connectivity::Eight,
            frame: FrameStrategy::default(),
            bull: BullSource::Center,
            hole_size: HoleSize::default(),
            max_aspect_ratio: 3.0,
            border_margin_in: 0.25,
            header_in: 0.0,
            footer_in: 0.0,
            crosshair_half_width_in: None,
            min_shots: 1,
            max_shots: 7,
            cluster_tie_in: 1.0,
            oversize_factor: 4,
            max_pixels: 40_000_000,
            parallel: false,
        }
    }
}

/// Image-mode request.
#[derive(Clone, Copy, Debug)]
pub struct ImageInput<'a> {
    pub pixels: ImageView<'a, u8>,
    pub target: TargetSize,
    pub distance_yards: f64,
    pub click_value_moa: f64,
    /// Overrides the configured [`BullSource`].
    pub bull: Option<InchPoint>,
    pub deadband_in: f64,
    /// Overrides `CorrectorConfig::min_shots`.
    pub min_shots: Option<usize>,
    /// Overrides `CorrectorConfig::max_shots`.
    pub max_shots: Option<usize>,
}

impl<'a> ImageInput<'a> {
    /// Request with no overrides and no deadband.
    pub fn new(
        pixels: ImageView<'a, u8>,
        target: TargetSize,
        distance_yards: f64,
        click_value_moa: f64,
    ) -> Self {
        Self {
            pixels,
            target,
            distance_yards,
            click_value_moa,
            bull: None,
            deadband_in: 0.0,
            min_shots: None,
            max_shots: None,
        }
    }
}

/// Coordinate-mode request; hole and bull positions are in inches.
#[derive(Clone, Debug, PartialEq)]
pub struct CoordinateInput {
    pub holes: Vec<InchPoint>,
    pub bull: InchPoint,
    pub distance_yards: f64,
    pub click_value_moa: f64,
    pub deadband_in: f64,
}

/// Either request mode.
#[derive(Clone, Debug)]
pub enum ComputeInput<'a> {
    Image(ImageInput<'a>),
    Coordinates(CoordinateInput),
}

/// Rejected blob counts by reason.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RejectCounts {
    pub too_small: usize,
    pub too_large: usize,
    pub too_elongated: usize,
    pub excluded: usize,
}

impl From<&Classification> for RejectCounts {
    fn from(c: &Classification) -> Self {
        Self {
            too_small: c.rejected_count(RejectReason::TooSmall),
            too_large: c.rejected_count(RejectReason::TooLarge),
            too_elongated: c.rejected_count(RejectReason::TooElongated),
            excluded: c.rejected_count(RejectReason::Excluded(0)),
        }
    }
}

/// Informational values; nothing here is needed to use the result.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Diagnostics {
    pub threshold: Option<u8>,
    pub mean_intensity: Option<f64>,
    pub pixels_per_inch: Option<f64>,
    pub frame_origin_px: Option<PixelPoint>,
    pub frame_method: Option<FrameMethod>,
    pub blobs_found: Option<usize>,
    pub holes_detected: Option<usize>,
    pub rejected: Option<RejectCounts>,
    pub holes_selected: usize,
}

/// Result of a successful computation.
#[derive(Clone, Debug, PartialEq)]
pub struct CorrectionReport {
    pub poib: InchPoint,
    pub bull: InchPoint,
    /// `Bull - POIB` in inches, before the deadband.
    pub correction: CorrectionVector,
    pub clicks: ClickResult,
    /// Selected hole positions in inches.
    pub holes: Vec<InchPoint>,
    pub convention: AxisConvention,
    pub diagnostics: Diagnostics,
}

/// Runs either mode with the default configuration.
pub fn compute_correction(input: &ComputeInput<'_>) -> ZeroSightResult<CorrectionReport> {
    Corrector::default().correct(input)
}
