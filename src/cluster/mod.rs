//! Shot-group selection among hole candidates.
//!
//! When there are more candidates than `max_shots`, every `(k, center)` pair
//! with `k` in `[min_shots, max_shots]` is scored by the radius of the cluster
//! formed by the center's `k` nearest candidates, measured from that cluster's
//! own centroid. Radii within `tie_tolerance_px` of the tightest radius count
//! as ties; among ties the larger `k` wins, then the smaller radius, then the
//! lower center index. Flyers are dropped without per-image tuning.

use crate::blob::Blob;
use crate::geom::PixelPoint;
use crate::trace::{trace_event, trace_span};
use crate::util::error::invalid;
use crate::util::{ZeroSightError, ZeroSightResult};
use std::cmp::Ordering;

/// Shot-count bounds and tie tolerance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterParams {
    pub min_shots: usize,
    pub max_shots: usize,
    /// Radius slack, in pixels, under which two clusters count as equally tight.
    ///
    /// Depends on image scale. The default of 100 px is one inch on a 100 ppi
    /// scan; use [`ClusterParams::with_tie_inches`] once the frame scale is known.
    pub tie_tolerance_px: f64,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            min_shots: 1,
            max_shots: 7,
            tie_tolerance_px: 100.0,
        }
    }
}

impl ClusterParams {
    /// Sets the tie tolerance from inches at the given scale.
    ///
    /// Negative or non-finite inputs yield a tolerance that fails validation.
    pub fn with_tie_inches(mut self, tie_in: f64, pixels_per_inch: f64) -> Self {
        self.tie_tolerance_px = tie_in * pixels_per_inch;
        self
    }

    fn validate(&self) -> ZeroSightResult<()> {
        if self.min_shots == 0 {
            return Err(invalid("min_shots", "must be at least 1"));
        }
        if self.max_shots < self.min_shots {
            return Err(invalid("max_shots", "must be >= min_shots"));
        }
        if !(self.tie_tolerance_px.is_finite() && self.tie_tolerance_px >= 0.0) {
            return Err(invalid("tie_tolerance", "must be finite and >= 0"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug)]
struct Scored {
    k: usize,
    center: usize,
    radius: f64,
}

/// Radius of `members` measured from their own centroid.
fn cluster_radius(members: &[PixelPoint]) -> f64 {
    let Some(c) = PixelPoint::mean(members.iter().copied()) else {
        return 0.0;
    };
    members.iter().map(|p| p.distance(c)).fold(0.0, f64::max)
}

fn better(a: &Scored, b: &Scored) -> Ordering {
    b.k.cmp(&a.k)
        .then(a.radius.total_cmp(&b.radius))
        .then(a.center.cmp(&b.center))
}

/// Selects the blobs that make up the shot group.
///
/// Returns the selection in input order, or `InsufficientShots` when there are
/// fewer candidates than `min_shots`.
pub fn select_cluster(candidates: &[Blob], params: ClusterParams) -> ZeroSightResult<Vec<Blob>> {
    params.validate()?;
    let _span = trace_span!("select_cluster", candidates = candidates.len()).entered();

    let n = candidates.len();
    if n < params.min_shots {
        return Err(ZeroSightError::InsufficientShots {
            found: n,
            required: params.min_shots,
        });
    }
    if n <= params.max_shots {
        trace_event!("cluster_selected", k = n, radius = 0.0);
        return Ok(candidates.to_vec());
    }

    let points: Vec<PixelPoint> = candidates.iter().map(|b| b.centroid).collect();
    let mut scored = Vec::with_capacity(n * (params.max_shots - params.min_shots + 1));
    let mut neighbours: Vec<usize> = (0..n).collect();
    let mut members = Vec::with_capacity(params.max_shots);
    for center in 0..n {
        let origin = points[center];
        neighbours.sort_by(|&a, &b| {
            points[a]
                .distance(origin)
                .total_cmp(&points[b].distance(origin))
                .then(a.cmp(&b))
        });
        for k in params.min_shots..=params.max_shots {
            members.clear();
            members.extend(neighbours[..k].iter().map(|&i| points[i]));
            scored.push(Scored {
                k,
                center,
                radius: cluster_radius(&members),
            });
        }
    }

    let tightest = scored
        .iter()
        .map(|s| s.radius)
        .fold(f64::INFINITY, f64::min);
    let limit = tightest + params.tie_tolerance_px;
    let best = scored
        .iter()
        .filter(|s| s.radius <= limit)
        .min_by(|a, b| better(a, b))
        .copied()
        .ok_or(ZeroSightError::InsufficientShots {
            found: n,
            required: params.min_shots,
        })?;

    let origin = points[best.center];
    neighbours.sort_by(|&a, &b| {
        points[a]
            .distance(origin)
            .total_cmp(&points[b].distance(origin))
            .then(a.cmp(&b))
    });
    let mut chosen: Vec<usize> = neighbours[..best.k].to_vec();
    chosen.sort_unstable();

    trace_event!("cluster_selected", k = best.k, radius = best.radius);
    Ok(chosen.into_iter().map(|i| candidates[i]).collect())
}
