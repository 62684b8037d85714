//! Single-request execution.

use crate::blob::classify::{classify_blobs, ClassifyParams, ExclusionZone};
use crate::blob::{find_blobs, FindParams};
use crate::cluster::{select_cluster, ClusterParams};
use crate::correction::{poib_of, solve, Ballistics};
use crate::frame::{locate_crosshair, locate_frame, Frame};
use crate::geom::{InchPoint, PixelPoint};
use crate::image::ImageView;
use crate::mask::{build_mask, MaskBuild};
use crate::pipeline::{
    BullSource, ComputeInput, CoordinateInput, CorrectionReport, CorrectorConfig, Diagnostics,
    ImageInput, RejectCounts,
};
use crate::trace::{trace_event, trace_span};
use crate::util::error::invalid;
use crate::util::{ZeroSightError, ZeroSightResult};

/// Computes sight corrections with a fixed configuration.
///
/// A corrector holds no per-request state and can be shared across threads.
#[derive(Clone, Debug, Default)]
pub struct Corrector {
    cfg: CorrectorConfig,
}

impl Corrector {
    pub fn new(cfg: CorrectorConfig) -> Self {
        Self { cfg }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, cfg: CorrectorConfig) -> Self {
        self.cfg = cfg;
        self
    }

    pub fn config(&self) -> &CorrectorConfig {
        &self.cfg
    }

    /// Runs either request mode.
    pub fn correct(&self, input: &ComputeInput<'_>) -> ZeroSightResult<CorrectionReport> {
        match input {
            ComputeInput::Image(image) => self.correct_image(image),
            ComputeInput::Coordinates(coords) => self.correct_holes(coords),
        }
    }

    /// Coordinate mode: skips detection and corrects the given holes.
    pub fn correct_holes(&self, input: &CoordinateInput) -> ZeroSightResult<CorrectionReport> {
        let _span = trace_span!("correct_holes", holes = input.holes.len()).entered();
        let ballistics = Ballistics::new(input.distance_yards, input.click_value_moa)?;
        if !input.bull.is_finite() {
            return Err(ZeroSightError::MalformedBull {
                reason: "bull coordinate is not finite",
            });
        }
        let poib = poib_of(&input.holes)?;
        let solution = solve(
            poib,
            input.bull,
            ballistics,
            input.deadband_in,
            self.cfg.convention,
        )?;

        Ok(CorrectionReport {
            poib,
            bull: input.bull,
            correction: solution.correction,
            clicks: solution.clicks,
            holes: input.holes.clone(),
            convention: self.cfg.convention,
            diagnostics: Diagnostics {
                holes_selected: input.holes.len(),
                ..Diagnostics::default()
            },
        })
    }

    /// Image mode: detects holes on a target photograph and corrects them.
    pub fn correct_image(&self, input: &ImageInput<'_>) -> ZeroSightResult<CorrectionReport> {
        let cfg = &self.cfg;
        let pixels = input.pixels;
        let _span = trace_span!(
            "correct_image",
            width = pixels.width(),
            height = pixels.height()
        )
        .entered();

        let ballistics = Ballistics::new(input.distance_yards, input.click_value_moa)?;
        if pixels.len() > cfg.max_pixels {
            return Err(ZeroSightError::ImageTooLarge {
                pixels: pixels.len(),
                max_pixels: cfg.max_pixels,
            });
        }

        let MaskBuild {
            mask,
            threshold,
            mean_intensity,
        } = build_mask(pixels, cfg.threshold)?;
        let frame = locate_frame(&mask, input.target, cfg.convention, cfg.frame)?;
        let ppi = frame.pixels_per_inch();
        let bull = self.resolve_bull(input, pixels, &frame)?;

        let (min_area, max_area) = cfg.hole_size.area_bounds(ppi)?;
        let blobs = find_blobs(
            &mask,
            FindParams {
                connectivity: cfg.connectivity,
                area_ceiling: max_area.saturating_mul(cfg.oversize_factor.max(1)),
            },
        );
        let classification = classify_blobs(
            &blobs,
            &ClassifyParams {
                min_area,
                max_area,
                max_aspect_ratio: cfg.max_aspect_ratio,
                zones: self.exclusion_zones(&frame, bull)?,
            },
        )?;
        if classification.candidates.is_empty() {
            return Err(ZeroSightError::NoHolesDetected { blobs: blobs.len() });
        }

        let selected = select_cluster(
            &classification.candidates,
            ClusterParams {
                min_shots: input.min_shots.unwrap_or(cfg.min_shots),
                max_shots: input.max_shots.unwrap_or(cfg.max_shots),
                ..ClusterParams::default()
            }
            .with_tie_inches(cfg.cluster_tie_in.max(0.0), ppi),
        )?;
        let poib_px = PixelPoint::mean(selected.iter().map(|b| b.centroid)).ok_or(
            ZeroSightError::NoHolesDetected { blobs: blobs.len() },
        )?;
        let poib = frame.to_inches(poib_px);
        let holes = selected.iter().map(|b| frame.to_inches(b.centroid)).collect();

        let solution = solve(poib, bull, ballistics, input.deadband_in, cfg.convention)?;
        trace_event!(
            "image_corrected",
            holes = selected.len(),
            poib_x = poib.x,
            poib_y = poib.y
        );

        Ok(CorrectionReport {
            poib,
            bull,
            correction: solution.correction,
            clicks: solution.clicks,
            holes,
            convention: cfg.convention,
            diagnostics: Diagnostics {
                threshold: Some(threshold),
                mean_intensity: Some(mean_intensity),
                pixels_per_inch: Some(ppi),
                frame_origin_px: Some(frame.origin_px()),
                frame_method: Some(frame.method()),
                blobs_found: Some(blobs.len()),
                holes_detected: Some(classification.candidates.len()),
                rejected: Some(RejectCounts::from(&classification)),
                holes_selected: selected.len(),
            },
        })
    }

    fn resolve_bull(
        &self,
        input: &ImageInput<'_>,
        pixels: ImageView<'_, u8>,
        frame: &Frame,
    ) -> ZeroSightResult<InchPoint> {
        if let Some(bull) = input.bull {
            return Ok(bull);
        }
        match self.cfg.bull {
            BullSource::Center => Ok(frame.extent().center()),
            BullSource::Explicit(bull) => Ok(bull),
            BullSource::Crosshair(params) => {
                let within = frame.target_px().ok_or(ZeroSightError::FrameNotFound {
                    reason: "frame has no target outline",
                })?;
                Ok(frame.to_inches(locate_crosshair(pixels, within, params)?))
            }
        }
    }

    fn exclusion_zones(
        &self,
        frame: &Frame,
        bull: InchPoint,
    ) -> ZeroSightResult<Vec<ExclusionZone>> {
        let cfg = &self.cfg;
        let ppi = frame.pixels_per_inch();
        let mut zones = Vec::new();

        if let Some(outline) = frame.target_px() {
            let margin = cfg.border_margin_in.max(0.0) * ppi;
            let inner = outline
                .shrink(margin)
                .ok_or(invalid("border_margin_in", "margin leaves no room on the target"))?;
            zones.push(ExclusionZone::Outside(inner));
            if cfg.header_in > 0.0 {
                zones.push(ExclusionZone::Rows {
                    y0: outline.top,
                    y1: outline.top + cfg.header_in * ppi,
                });
            }
            if cfg.footer_in > 0.0 {
                zones.push(ExclusionZone::Rows {
                    y0: outline.bottom - cfg.footer_in * ppi,
                    y1: outline.bottom,
                });
            }
        }
        if let Some(half_width) = cfg.crosshair_half_width_in {
            let bull_px = frame.to_pixels(bull);
            let w = half_width * ppi;
            zones.push(ExclusionZone::Columns {
                x0: bull_px.x - w,
                x1: bull_px.x + w,
            });
            zones.push(ExclusionZone::Rows {
                y0: bull_px.y - w,
                y1: bull_px.y + w,
            });
        }
        zones.extend(
            frame
                .fiducials_px()
                .iter()
                .copied()
                .map(ExclusionZone::Inside),
        );
        Ok(zones)
    }
}
