use serde::Deserialize;
use zerosight::{
    AxisConvention, ComputeInput, CoordinateInput, Corrector, CorrectorConfig, InchPoint,
};

#[derive(Deserialize)]
struct Case {
    name: String,
    holes: Vec<[f64; 2]>,
    bull: [f64; 2],
    distance_yards: f64,
    click_value_moa: f64,
    #[serde(default)]
    deadband_in: f64,
    #[serde(default)]
    y_down: bool,
    windage: f64,
    windage_dir: String,
    elevation: f64,
    elevation_dir: String,
}

const CASES: &str = r#"[
  {
    "name": "low-left group, quarter-MOA clicks",
    "holes": [[3.90, 4.85], [3.88, 4.78]],
    "bull": [4.25, 5.5],
    "distance_yards": 100, "click_value_moa": 0.25,
    "windage": 1.38, "windage_dir": "RIGHT",
    "elevation": 2.62, "elevation_dir": "UP"
  },
  {
    "name": "high-right group at 50 yards",
    "holes": [[5.25, 6.5]],
    "bull": [4.25, 5.5],
    "distance_yards": 50, "click_value_moa": 0.25,
    "windage": -7.64, "windage_dir": "LEFT",
    "elevation": -7.64, "elevation_dir": "DOWN"
  },
  {
    "name": "image-style coordinates with y down",
    "holes": [[4.25, 6.5]],
    "bull": [4.25, 5.5],
    "distance_yards": 100, "click_value_moa": 0.5,
    "y_down": true,
    "windage": 0.0, "windage_dir": "HOLD",
    "elevation": -1.91, "elevation_dir": "UP"
  },
  {
    "name": "inside the deadband",
    "holes": [[4.2, 5.45], [4.3, 5.5]],
    "bull": [4.25, 5.5],
    "distance_yards": 100, "click_value_moa": 0.25,
    "deadband_in": 0.1,
    "windage": 0.0, "windage_dir": "HOLD",
    "elevation": 0.0, "elevation_dir": "HOLD"
  },
  {
    "name": "one MOA clicks at 300 yards",
    "holes": [[0.0, 0.0], [0.0, -6.282]],
    "bull": [3.141, 0.0],
    "distance_yards": 300, "click_value_moa": 1.0,
    "windage": 1.0, "windage_dir": "RIGHT",
    "elevation": 1.0, "elevation_dir": "UP"
  }
]"#;

#[test]
fn coordinate_case_table() {
    let cases: Vec<Case> = serde_json::from_str(CASES).unwrap();
    for case in cases {
        let convention = if case.y_down {
            AxisConvention::YDown
        } else {
            AxisConvention::YUp
        };
        let corrector = Corrector::new(CorrectorConfig {
            convention,
            ..CorrectorConfig::default()
        });
        let input = CoordinateInput {
            holes: case
                .holes
                .iter()
                .map(|&[x, y]| InchPoint::new(x, y))
                .collect(),
            bull: InchPoint::new(case.bull[0], case.bull[1]),
            distance_yards: case.distance_yards,
            click_value_moa: case.click_value_moa,
            deadband_in: case.deadband_in,
        };
        let report = corrector
            .correct(&ComputeInput::Coordinates(input))
            .unwrap_or_else(|e| panic!("{}: {e}", case.name));
        let c = report.clicks;
        assert_eq!(c.windage_clicks, case.windage, "{}", case.name);
        assert_eq!(c.windage.as_str(), case.windage_dir, "{}", case.name);
        assert_eq!(c.elevation_clicks, case.elevation, "{}", case.name);
        assert_eq!(c.elevation.as_str(), case.elevation_dir, "{}", case.name);
        assert_eq!(report.convention, convention);
    }
}
