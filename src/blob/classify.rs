//! Separating hole-like blobs from noise, grid lines and fiducials.

use crate::blob::Blob;
use crate::geom::{PixelBox, PixelPoint};
use crate::trace::{trace_event, trace_span};
use crate::util::error::invalid;
use crate::util::ZeroSightResult;

/// Region whose blobs are rejected, tested against the blob centroid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExclusionZone {
    /// Reject centroids inside the box.
    Inside(PixelBox),
    /// Reject centroids outside the box.
    Outside(PixelBox),
    /// Reject centroids with `y0 <= y < y1` (header/footer, horizontal crosshair).
    Rows { y0: f64, y1: f64 },
    /// Reject centroids with `x0 <= x < x1` (vertical crosshair).
    Columns { x0: f64, x1: f64 },
}

impl ExclusionZone {
    pub fn excludes(&self, p: PixelPoint) -> bool {
        match *self {
            ExclusionZone::Inside(b) => b.contains(p),
            ExclusionZone::Outside(b) => !b.contains(p),
            ExclusionZone::Rows { y0, y1 } => p.y >= y0 && p.y < y1,
            ExclusionZone::Columns { x0, x1 } => p.x >= x0 && p.x < x1,
        }
    }
}

/// Explicit classification thresholds.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassifyParams {
    pub min_area: usize,
    pub max_area: usize,
    /// Largest accepted `max(w, h) / max(1, min(w, h))` of the bounding box.
    pub max_aspect_ratio: f64,
    pub zones: Vec<ExclusionZone>,
}

impl Default for ClassifyParams {
    fn default() -> Self {
        Self {
            min_area: 20,
            max_area: 5_000,
            max_aspect_ratio: 3.0,
            zones: Vec::new(),
        }
    }
}

impl ClassifyParams {
    fn validate(&self) -> ZeroSightResult<()> {
        if self.min_area > self.max_area {
            return Err(invalid("min_area", "must not exceed max_area"));
        }
        if !(self.max_aspect_ratio.is_finite() && self.max_aspect_ratio >= 1.0) {
            return Err(invalid("max_aspect_ratio", "must be finite and >= 1"));
        }
        Ok(())
    }
}

/// Why a blob was not accepted as a hole.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RejectReason {
    TooSmall,
    /// Larger than `max_area`, or flagged oversized by the finder.
    TooLarge,
    TooElongated,
    /// Centroid fell in the exclusion zone with this index.
    Excluded(usize),
}

/// Blobs partitioned into hole candidates and rejects.
#[derive(Clone, Debug, Default)]
pub struct Classification {
    pub candidates: Vec<Blob>,
    pub rejected: Vec<(Blob, RejectReason)>,
}

impl Classification {
    /// Number of rejects with the given reason; `Excluded` matches any zone.
    pub fn rejected_count(&self, reason: RejectReason) -> usize {
        self.rejected
            .iter()
            .filter(|(_, r)| match (r, reason) {
                (RejectReason::Excluded(_), RejectReason::Excluded(_)) => true,
                _ => *r == reason,
            })
            .count()
    }
}

/// Checks a single blob; `None` means it is a hole candidate.
pub fn reject_reason(blob: &Blob, params: &ClassifyParams) -> Option<RejectReason> {
    if blob.oversized || blob.area > params.max_area {
        return Some(RejectReason::TooLarge);
    }
    if blob.area < params.min_area {
        return Some(RejectReason::TooSmall);
    }
    if blob.bbox.aspect_ratio() > params.max_aspect_ratio {
        return Some(RejectReason::TooElongated);
    }
    params
        .zones
        .iter()
        .position(|zone| zone.excludes(blob.centroid))
        .map(RejectReason::Excluded)
}

/// Partitions blobs, preserving input order in both halves.
pub fn classify_blobs(blobs: &[Blob], params: &ClassifyParams) -> ZeroSightResult<Classification> {
    params.validate()?;
    let _span = trace_span!("classify_blobs", blobs = blobs.len()).entered();

    let mut out = Classification::default();
    for blob in blobs {
        match reject_reason(blob, params) {
            None => out.candidates.push(*blob),
            Some(reason) => out.rejected.push((*blob, reason)),
        }
    }

    trace_event!(
        "blobs_classified",
        candidates = out.candidates.len(),
        rejected = out.rejected.len()
    );
    Ok(out)
}
