//! Numeric helpers shared by the frame and correction stages.

/// Rounds to two decimal places, normalizing `-0.0` to `0.0`.
pub(crate) fn round2(value: f64) -> f64 {
    let rounded = (value * 100.0).round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Returns `value` if it is finite and strictly positive.
pub(crate) fn positive_finite(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}

/// Relative deviation of `got` from `expected`, `|got / expected - 1|`.
pub(crate) fn relative_deviation(got: f64, expected: f64) -> f64 {
    (got / expected - 1.0).abs()
}
