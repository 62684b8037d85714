//! Point-of-impact to sight clicks.
//!
//! Inches are converted to angle with the true-MOA model
//! (`1.047 in` per MOA at 100 yards, linear in distance) and then to clicks of
//! `click_value_moa` each. Full precision is kept until the final rounding of
//! the click values to two decimals.

use crate::convention::{correction, AxisConvention, CorrectionVector, Direction};
use crate::geom::InchPoint;
use crate::trace::{trace_event, trace_span};
use crate::util::error::invalid;
use crate::util::math::{positive_finite, round2};
use crate::util::{ZeroSightError, ZeroSightResult};

/// Inches subtended by one true MOA at 100 yards.
pub const INCHES_PER_MOA_AT_100_YARDS: f64 = 1.047;

/// Inches subtended by one MOA at `distance_yards`.
pub fn inches_per_moa(distance_yards: f64) -> f64 {
    INCHES_PER_MOA_AT_100_YARDS * (distance_yards / 100.0)
}

/// Shooting distance and sight click value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ballistics {
    distance_yards: f64,
    click_value_moa: f64,
}

impl Ballistics {
    /// Validates both values are finite and strictly positive.
    pub fn new(distance_yards: f64, click_value_moa: f64) -> ZeroSightResult<Self> {
        let distance_yards = positive_finite(distance_yards)
            .ok_or(invalid("distance_yards", "must be finite and > 0"))?;
        let click_value_moa = positive_finite(click_value_moa)
            .ok_or(invalid("click_value_moa", "must be finite and > 0"))?;
        Ok(Self {
            distance_yards,
            click_value_moa,
        })
    }

    pub fn distance_yards(&self) -> f64 {
        self.distance_yards
    }

    pub fn click_value_moa(&self) -> f64 {
        self.click_value_moa
    }

    pub fn inches_per_click(&self) -> f64 {
        inches_per_moa(self.distance_yards) * self.click_value_moa
    }
}

/// Final signed clicks and their labels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickResult {
    /// Positive means move right.
    pub windage_clicks: f64,
    /// Positive means move towards +y of the active convention.
    pub elevation_clicks: f64,
    pub windage: Direction,
    pub elevation: Direction,
}

/// Mean of a set of hole positions.
///
/// Every coordinate must be finite; an empty set is `NoHolesDetected`.
pub fn poib_of(holes: &[InchPoint]) -> ZeroSightResult<InchPoint> {
    if holes.is_empty() {
        return Err(ZeroSightError::NoHolesDetected { blobs: 0 });
    }
    if let Some(index) = holes.iter().position(|h| !h.is_finite()) {
        return Err(ZeroSightError::MalformedInput {
            index,
            reason: "coordinate is not finite",
        });
    }
    let n = holes.len() as f64;
    let (sx, sy) = holes
        .iter()
        .fold((0.0, 0.0), |(sx, sy), h| (sx + h.x, sy + h.y));
    Ok(InchPoint::new(sx / n, sy / n))
}

/// Zeroes each axis whose magnitude is below `deadband_in`.
pub fn apply_deadband(v: CorrectionVector, deadband_in: f64) -> CorrectionVector {
    let clip = |d: f64| if d.abs() < deadband_in { 0.0 } else { d };
    CorrectionVector {
        dx_in: clip(v.dx_in),
        dy_in: clip(v.dy_in),
    }
}

/// Converts an inch correction to signed, labelled clicks.
pub fn to_clicks(
    v: CorrectionVector,
    ballistics: Ballistics,
    convention: AxisConvention,
) -> ClickResult {
    let per_click = ballistics.inches_per_click();
    let windage_clicks = round2(v.dx_in / per_click);
    let elevation_clicks = round2(v.dy_in / per_click);
    ClickResult {
        windage_clicks,
        elevation_clicks,
        windage: convention.windage_direction(windage_clicks),
        elevation: convention.elevation_direction(elevation_clicks),
    }
}

/// Correction and clicks for one group.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Solution {
    /// Raw `Bull - POIB`, before the deadband.
    pub correction: CorrectionVector,
    pub clicks: ClickResult,
}

/// Computes the correction moving `poib` onto `bull` and converts it to clicks.
pub fn solve(
    poib: InchPoint,
    bull: InchPoint,
    ballistics: Ballistics,
    deadband_in: f64,
    convention: AxisConvention,
) -> ZeroSightResult<Solution> {
    let _span = trace_span!("compute_clicks").entered();
    if !bull.is_finite() {
        return Err(invalid("bull", "coordinates must be finite"));
    }
    if !(deadband_in.is_finite() && deadband_in >= 0.0) {
        return Err(invalid("deadband_in", "must be finite and >= 0"));
    }
    let raw = correction(bull, poib);
    let clicks = to_clicks(apply_deadband(raw, deadband_in), ballistics, convention);
    trace_event!(
        "clicks",
        windage = clicks.windage_clicks,
        elevation = clicks.elevation_clicks
    );
    Ok(Solution {
        correction: raw,
        clicks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn true_moa_scales_with_distance() {
        assert!((inches_per_moa(100.0) - 1.047).abs() < 1e-12);
        assert!((inches_per_moa(50.0) - 0.5235).abs() < 1e-12);
        let b = Ballistics::new(100.0, 0.25).unwrap();
        assert!((b.inches_per_click() - 0.26175).abs() < 1e-12);
    }

    #[test]
    fn ballistics_reject_non_positive() {
        assert_eq!(
            Ballistics::new(0.0, 0.25).unwrap_err(),
            ZeroSightError::InvalidParameter {
                name: "distance_yards",
                reason: "must be finite and > 0"
            }
        );
        assert!(Ballistics::new(100.0, -0.25).is_err());
        assert!(Ballistics::new(f64::NAN, 0.25).is_err());
    }

    #[test]
    fn poib_reports_bad_hole_index() {
        let holes = [InchPoint::new(1.0, 1.0), InchPoint::new(f64::NAN, 2.0)];
        assert_eq!(
            poib_of(&holes).unwrap_err(),
            ZeroSightError::MalformedInput {
                index: 1,
                reason: "coordinate is not finite"
            }
        );
    }

    #[test]
    fn deadband_zeroes_small_axes_only() {
        let v = apply_deadband(
            CorrectionVector {
                dx_in: -0.05,
                dy_in: 0.3,
            },
            0.1,
        );
        assert_eq!(v.dx_in, 0.0);
        assert_eq!(v.dy_in, 0.3);
    }
}
