use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use zerosight::io::load_gray_image;
use zerosight::{
    AxisConvention, BorderParams, BullSource, ComputeInput, CoordinateInput, CornerParams,
    CorrectionReport, Corrector, CorrectorConfig, CrosshairParams, FrameStrategy, HoleSize,
    ImageInput, InchPoint, TargetSize, ThresholdStrategy, ZeroSightError,
};

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "ZeroSight CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output for the detection stages.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ModeConfig {
    #[default]
    Image,
    Holes,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ConventionConfig {
    #[default]
    YUp,
    YDown,
}

impl From<ConventionConfig> for AxisConvention {
    fn from(value: ConventionConfig) -> Self {
        match value {
            ConventionConfig::YUp => AxisConvention::YUp,
            ConventionConfig::YDown => AxisConvention::YDown,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum FrameConfig {
    #[default]
    Border,
    Corners,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum BullConfig {
    #[default]
    Center,
    Crosshair,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct DetectConfigJson {
    /// Fixed threshold; adaptive when absent.
    threshold: Option<u8>,
    frame: FrameConfig,
    bull_source: BullConfig,
    corner_inset_in: f64,
    min_hole_diameter_in: f64,
    max_hole_diameter_in: f64,
    max_aspect_ratio: f64,
    border_margin_in: f64,
    header_in: f64,
    footer_in: f64,
    crosshair_half_width_in: Option<f64>,
    min_shots: usize,
    max_shots: usize,
    cluster_tie_in: f64,
}

impl Default for DetectConfigJson {
    fn default() -> Self {
        let cfg = CorrectorConfig::default();
        let (min_hole_diameter_in, max_hole_diameter_in) = match cfg.hole_size {
            HoleSize::Inches {
                min_diameter_in,
                max_diameter_in,
            } => (min_diameter_in, max_diameter_in),
            HoleSize::Pixels { .. } => (0.12, 0.75),
        };
        Self {
            threshold: None,
            frame: FrameConfig::Border,
            bull_source: BullConfig::Center,
            corner_inset_in: CornerParams::default().inset_in,
            min_hole_diameter_in,
            max_hole_diameter_in,
            max_aspect_ratio: cfg.max_aspect_ratio,
            border_margin_in: cfg.border_margin_in,
            header_in: cfg.header_in,
            footer_in: cfg.footer_in,
            crosshair_half_width_in: cfg.crosshair_half_width_in,
            min_shots: cfg.min_shots,
            max_shots: cfg.max_shots,
            cluster_tie_in: cfg.cluster_tie_in,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    mode: ModeConfig,
    convention: ConventionConfig,
    image_path: String,
    target_size: String,
    holes: Vec<[f64; 2]>,
    bull: Option<[f64; 2]>,
    distance_yards: f64,
    click_value_moa: f64,
    deadband_in: f64,
    detect: DetectConfigJson,
    output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ModeConfig::Image,
            convention: ConventionConfig::YUp,
            image_path: String::new(),
            target_size: "letter".to_string(),
            holes: Vec::new(),
            bull: None,
            distance_yards: 100.0,
            click_value_moa: 0.25,
            deadband_in: 0.0,
            detect: DetectConfigJson::default(),
            output_path: None,
        }
    }
}

fn corrector_config(convention: AxisConvention, detect: &DetectConfigJson) -> CorrectorConfig {
    CorrectorConfig {
        convention,
        threshold: match detect.threshold {
            Some(value) => ThresholdStrategy::Fixed(value),
            None => ThresholdStrategy::default(),
        },
        frame: match detect.frame {
            FrameConfig::Border => FrameStrategy::Border(BorderParams::default()),
            FrameConfig::Corners => FrameStrategy::Corners(CornerParams {
                inset_in: detect.corner_inset_in,
                ..CornerParams::default()
            }),
        },
        bull: match detect.bull_source {
            BullConfig::Center => BullSource::Center,
            BullConfig::Crosshair => BullSource::Crosshair(CrosshairParams::default()),
        },
        hole_size: HoleSize::Inches {
            min_diameter_in: detect.min_hole_diameter_in,
            max_diameter_in: detect.max_hole_diameter_in,
        },
        max_aspect_ratio: detect.max_aspect_ratio,
        border_margin_in: detect.border_margin_in,
        header_in: detect.header_in,
        footer_in: detect.footer_in,
        crosshair_half_width_in: detect.crosshair_half_width_in,
        min_shots: detect.min_shots,
        max_shots: detect.max_shots,
        cluster_tie_in: detect.cluster_tie_in,
        ..CorrectorConfig::default()
    }
}

#[derive(Debug, Serialize)]
struct Point {
    x: f64,
    y: f64,
}

impl From<InchPoint> for Point {
    fn from(value: InchPoint) -> Self {
        Self {
            x: value.x,
            y: value.y,
        }
    }
}

#[derive(Debug, Serialize)]
struct DiagnosticsRecord {
    threshold: Option<u8>,
    pixels_per_inch: Option<f64>,
    frame_origin_px: Option<[f64; 2]>,
    blobs_found: Option<usize>,
    holes_detected: Option<usize>,
    holes_selected: usize,
}

#[derive(Debug, Serialize)]
struct Output {
    poib_in: Point,
    bull_in: Point,
    correction_in: Point,
    windage_clicks: f64,
    windage: &'static str,
    elevation_clicks: f64,
    elevation: &'static str,
    holes_in: Vec<Point>,
    diagnostics: DiagnosticsRecord,
}

impl From<CorrectionReport> for Output {
    fn from(report: CorrectionReport) -> Self {
        let d = report.diagnostics;
        Self {
            poib_in: report.poib.into(),
            bull_in: report.bull.into(),
            correction_in: Point {
                x: report.correction.dx_in,
                y: report.correction.dy_in,
            },
            windage_clicks: report.clicks.windage_clicks,
            windage: report.clicks.windage.as_str(),
            elevation_clicks: report.clicks.elevation_clicks,
            elevation: report.clicks.elevation.as_str(),
            holes_in: report.holes.into_iter().map(Point::from).collect(),
            diagnostics: DiagnosticsRecord {
                threshold: d.threshold,
                pixels_per_inch: d.pixels_per_inch,
                frame_origin_px: d.frame_origin_px.map(|p| [p.x, p.y]),
                blobs_found: d.blobs_found,
                holes_detected: d.holes_detected,
                holes_selected: d.holes_selected,
            },
        }
    }
}

#[derive(Debug, Serialize)]
struct ErrorOutput {
    error: &'static str,
    message: String,
}

impl From<&ZeroSightError> for ErrorOutput {
    fn from(err: &ZeroSightError) -> Self {
        Self {
            error: err.kind().code(),
            message: err.to_string(),
        }
    }
}

/// Runs one request. Every failure past config parsing ends up here so it can
/// be reported as an `ErrorOutput`.
fn run(config: &Config, corrector: &Corrector) -> Result<CorrectionReport, ZeroSightError> {
    let bull = config.bull.map(|[x, y]| InchPoint::new(x, y));
    match config.mode {
        ModeConfig::Holes => {
            let bull = match bull {
                Some(bull) => bull,
                None => config.target_size.parse::<TargetSize>()?.center(),
            };
            corrector.correct(&ComputeInput::Coordinates(CoordinateInput {
                holes: config
                    .holes
                    .iter()
                    .map(|&[x, y]| InchPoint::new(x, y))
                    .collect(),
                bull,
                distance_yards: config.distance_yards,
                click_value_moa: config.click_value_moa,
                deadband_in: config.deadband_in,
            }))
        }
        ModeConfig::Image => {
            if config.image_path.is_empty() {
                return Err(ZeroSightError::InvalidParameter {
                    name: "image_path",
                    reason: "must be set in image mode",
                });
            }
            let target: TargetSize = config.target_size.parse()?;
            let image = load_gray_image(&config.image_path)?;
            let mut input = ImageInput::new(
                image.view(),
                target,
                config.distance_yards,
                config.click_value_moa,
            );
            input.bull = bull;
            input.deadband_in = config.deadband_in;
            corrector.correct(&ComputeInput::Image(input))
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("zerosight=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    let convention = AxisConvention::from(config.convention);
    let corrector = Corrector::new(corrector_config(convention, &config.detect));
    tracing::info!(mode = ?config.mode, convention = ?convention, "config loaded");

    let (json, failed) = match run(&config, &corrector) {
        Ok(report) => (serde_json::to_string_pretty(&Output::from(report))?, None),
        Err(err) => (
            serde_json::to_string_pretty(&ErrorOutput::from(&err))?,
            Some(err),
        ),
    };
    match config.output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    match failed {
        Some(err) => Err(err.into()),
        None => Ok(()),
    }
}
