//! Python bindings for the zerosight sight-correction library.
//!
//! Exposes coordinate mode and image mode as plain functions returning a
//! `Correction` object.

use numpy::{PyReadonlyArray2, PyUntypedArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use zerosight::{
    AxisConvention, BullSource, ComputeInput, CoordinateInput, CornerParams, CorrectionReport,
    Corrector, CorrectorConfig, CrosshairParams, FrameStrategy, ImageInput, ImageView, InchPoint,
    TargetSize, ZeroSightError,
};

/// Caller-correctable errors become `ValueError`, the rest `RuntimeError`.
fn to_py_err(err: ZeroSightError) -> PyErr {
    let kind = err.kind();
    let msg = format!("{}: {}", kind.code(), err);
    if kind.is_recoverable() {
        PyValueError::new_err(msg)
    } else {
        PyRuntimeError::new_err(msg)
    }
}

fn parse_convention(convention: &str) -> PyResult<AxisConvention> {
    match convention.to_lowercase().as_str() {
        "y_up" | "up" => Ok(AxisConvention::YUp),
        "y_down" | "down" => Ok(AxisConvention::YDown),
        _ => Err(PyValueError::new_err("convention must be 'y_up' or 'y_down'")),
    }
}

fn points(holes: &[(f64, f64)]) -> Vec<InchPoint> {
    holes.iter().map(|&(x, y)| InchPoint::new(x, y)).collect()
}

/// Sight correction for one group.
#[pyclass]
#[derive(Clone)]
pub struct Correction {
    /// Point of impact (group center) in inches.
    #[pyo3(get)]
    pub poib: (f64, f64),
    #[pyo3(get)]
    pub bull: (f64, f64),
    /// `bull - poib` in inches.
    #[pyo3(get)]
    pub correction: (f64, f64),
    #[pyo3(get)]
    pub windage_clicks: f64,
    #[pyo3(get)]
    pub elevation_clicks: f64,
    /// "LEFT", "RIGHT" or "HOLD".
    #[pyo3(get)]
    pub windage: String,
    /// "UP", "DOWN" or "HOLD".
    #[pyo3(get)]
    pub elevation: String,
    /// Holes used for the group, in inches.
    #[pyo3(get)]
    pub holes: Vec<(f64, f64)>,
    /// Image scale; `None` in coordinate mode.
    #[pyo3(get)]
    pub pixels_per_inch: Option<f64>,
    #[pyo3(get)]
    pub holes_detected: Option<usize>,
}

#[pymethods]
impl Correction {
    fn __repr__(&self) -> String {
        format!(
            "Correction(windage={:.2} {}, elevation={:.2} {}, poib=({:.3}, {:.3}))",
            self.windage_clicks,
            self.windage,
            self.elevation_clicks,
            self.elevation,
            self.poib.0,
            self.poib.1
        )
    }
}

impl From<CorrectionReport> for Correction {
    fn from(r: CorrectionReport) -> Self {
        Self {
            poib: (r.poib.x, r.poib.y),
            bull: (r.bull.x, r.bull.y),
            correction: (r.correction.dx_in, r.correction.dy_in),
            windage_clicks: r.clicks.windage_clicks,
            elevation_clicks: r.clicks.elevation_clicks,
            windage: r.clicks.windage.to_string(),
            elevation: r.clicks.elevation.to_string(),
            holes: r.holes.iter().map(|p| (p.x, p.y)).collect(),
            pixels_per_inch: r.diagnostics.pixels_per_inch,
            holes_detected: r.diagnostics.holes_detected,
        }
    }
}

/// Correction from hole coordinates in inches.
///
/// Args:
///     holes: list of (x, y) hole positions
///     bull: (x, y) aim point (default: center of a letter target)
///     distance_yards: shooting distance (default: 100)
///     click_value_moa: MOA per click (default: 0.25)
///     deadband_in: per-axis offsets below this are held (default: 0)
///     convention: "y_up" or "y_down" (default: "y_up")
#[pyfunction]
#[pyo3(signature = (holes, bull = (4.25, 5.5), distance_yards = 100.0, click_value_moa = 0.25, deadband_in = 0.0, convention = "y_up"))]
fn compute_from_holes(
    holes: Vec<(f64, f64)>,
    bull: (f64, f64),
    distance_yards: f64,
    click_value_moa: f64,
    deadband_in: f64,
    convention: &str,
) -> PyResult<Correction> {
    let corrector = Corrector::new(CorrectorConfig {
        convention: parse_convention(convention)?,
        ..CorrectorConfig::default()
    });
    let input = CoordinateInput {
        holes: points(&holes),
        bull: InchPoint::new(bull.0, bull.1),
        distance_yards,
        click_value_moa,
        deadband_in,
    };
    let report = corrector.correct_holes(&input).map_err(to_py_err)?;
    Ok(report.into())
}

/// Corrections for many groups sharing one aim point, computed in parallel.
///
/// Returns one `(correction, error)` pair per group, in input order. Exactly
/// one side is set: the `Correction`, or the error code of the failed group
/// (for example "no_holes_detected" or "malformed_input").
#[pyfunction]
#[pyo3(signature = (groups, bull = (4.25, 5.5), distance_yards = 100.0, click_value_moa = 0.25, convention = "y_up"))]
fn compute_batch_from_holes(
    py: Python<'_>,
    groups: Vec<Vec<(f64, f64)>>,
    bull: (f64, f64),
    distance_yards: f64,
    click_value_moa: f64,
    convention: &str,
) -> PyResult<Vec<(Option<Correction>, Option<&'static str>)>> {
    let corrector = Corrector::new(CorrectorConfig {
        convention: parse_convention(convention)?,
        parallel: true,
        ..CorrectorConfig::default()
    });
    let inputs: Vec<ComputeInput<'static>> = groups
        .iter()
        .map(|holes| {
            ComputeInput::Coordinates(CoordinateInput {
                holes: points(holes),
                bull: InchPoint::new(bull.0, bull.1),
                distance_yards,
                click_value_moa,
                deadband_in: 0.0,
            })
        })
        .collect();
    let results = py.detach(|| corrector.correct_batch(&inputs));
    Ok(results
        .into_iter()
        .map(|r| match r {
            Ok(report) => (Some(report.into()), None),
            Err(err) => (None, Some(err.kind().code())),
        })
        .collect())
}

/// Correction from a grayscale photograph of the target.
///
/// Args:
///     image: 2D uint8 numpy array (height x width)
///     target: paper size, "WIDTHxHEIGHT" in inches or a preset name (default: "letter")
///     distance_yards: shooting distance (default: 100)
///     click_value_moa: MOA per click (default: 0.25)
///     bull: optional (x, y) aim point overriding `bull_source`
///     deadband_in: per-axis offsets below this are held (default: 0)
///     min_shots / max_shots: group size bounds
///     frame: "border" or "corners" (default: "border")
///     bull_source: "center" or "crosshair" (default: "center")
///     convention: "y_up" or "y_down" (default: "y_up")
#[pyfunction]
#[pyo3(signature = (image, target = "letter", distance_yards = 100.0, click_value_moa = 0.25, bull = None, deadband_in = 0.0, min_shots = None, max_shots = None, frame = "border", bull_source = "center", convention = "y_up"))]
#[allow(clippy::too_many_arguments)]
fn compute_from_image(
    image: PyReadonlyArray2<'_, u8>,
    target: &str,
    distance_yards: f64,
    click_value_moa: f64,
    bull: Option<(f64, f64)>,
    deadband_in: f64,
    min_shots: Option<usize>,
    max_shots: Option<usize>,
    frame: &str,
    bull_source: &str,
    convention: &str,
) -> PyResult<Correction> {
    let target: TargetSize = target.parse().map_err(to_py_err)?;
    let frame = match frame.to_lowercase().as_str() {
        "border" => FrameStrategy::default(),
        "corners" => FrameStrategy::Corners(CornerParams::default()),
        _ => return Err(PyValueError::new_err("frame must be 'border' or 'corners'")),
    };
    let bull_source = match bull_source.to_lowercase().as_str() {
        "center" => BullSource::Center,
        "crosshair" => BullSource::Crosshair(CrosshairParams::default()),
        _ => {
            return Err(PyValueError::new_err(
                "bull_source must be 'center' or 'crosshair'",
            ))
        }
    };
    let corrector = Corrector::new(CorrectorConfig {
        convention: parse_convention(convention)?,
        frame,
        bull: bull_source,
        ..CorrectorConfig::default()
    });

    let shape = image.shape();
    let height = shape[0];
    let width = shape[1];
    let data = image.as_slice()?;
    let view = ImageView::from_slice(data, width, height).map_err(to_py_err)?;

    let mut input = ImageInput::new(view, target, distance_yards, click_value_moa);
    input.bull = bull.map(|(x, y)| InchPoint::new(x, y));
    input.deadband_in = deadband_in;
    input.min_shots = min_shots;
    input.max_shots = max_shots;

    let report = corrector.correct_image(&input).map_err(to_py_err)?;
    Ok(report.into())
}

/// Python module for zerosight.
#[pymodule]
fn _zerosight(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<Correction>()?;
    m.add_function(wrap_pyfunction!(compute_from_holes, m)?)?;
    m.add_function(wrap_pyfunction!(compute_batch_from_holes, m)?)?;
    m.add_function(wrap_pyfunction!(compute_from_image, m)?)?;

    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}
