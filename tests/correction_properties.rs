use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zerosight::lowlevel::solve;
use zerosight::{
    compute_correction, inches_per_moa, AxisConvention, Ballistics, ComputeInput,
    CoordinateInput, Corrector, Direction, ErrorKind, InchPoint, ZeroSightError,
};

fn coords(holes: &[(f64, f64)], bull: (f64, f64), distance: f64, click: f64) -> CoordinateInput {
    CoordinateInput {
        holes: holes.iter().map(|&(x, y)| InchPoint::new(x, y)).collect(),
        bull: InchPoint::new(bull.0, bull.1),
        distance_yards: distance,
        click_value_moa: click,
        deadband_in: 0.0,
    }
}

#[test]
fn two_hole_group_at_one_hundred_yards() {
    let input = coords(&[(3.90, 4.85), (3.88, 4.78)], (4.25, 5.5), 100.0, 0.25);
    let report = compute_correction(&ComputeInput::Coordinates(input)).unwrap();

    assert!((report.poib.x - 3.89).abs() < 1e-12);
    assert!((report.poib.y - 4.815).abs() < 1e-12);
    assert_eq!(report.clicks.windage_clicks, 1.38);
    assert_eq!(report.clicks.windage, Direction::Right);
    assert_eq!(report.clicks.elevation_clicks, 2.62);
    assert_eq!(report.clicks.elevation, Direction::Up);
    assert_eq!(report.diagnostics.holes_selected, 2);
    assert_eq!(report.diagnostics.threshold, None);
}

#[test]
fn group_on_the_bull_holds() {
    let input = coords(&[(4.0, 5.0), (4.5, 6.0)], (4.25, 5.5), 100.0, 0.25);
    let report = compute_correction(&ComputeInput::Coordinates(input)).unwrap();
    assert_eq!(report.clicks.windage_clicks, 0.0);
    assert_eq!(report.clicks.elevation_clicks, 0.0);
    assert_eq!(report.clicks.windage, Direction::Hold);
    assert_eq!(report.clicks.elevation, Direction::Hold);
}

#[test]
fn doubling_distance_halves_clicks() {
    let near = coords(&[(3.25, 4.5)], (4.25, 5.5), 100.0, 0.25);
    let far = CoordinateInput {
        distance_yards: 200.0,
        ..near.clone()
    };
    let near = compute_correction(&ComputeInput::Coordinates(near)).unwrap();
    let far = compute_correction(&ComputeInput::Coordinates(far)).unwrap();
    assert_eq!(near.clicks.windage_clicks, 3.82);
    assert_eq!(far.clicks.windage_clicks, 1.91);
    assert_eq!(far.clicks.windage, near.clicks.windage);
    assert!((inches_per_moa(200.0) - 2.0 * inches_per_moa(100.0)).abs() < 1e-12);
}

#[test]
fn deadband_zeroes_small_axis_only() {
    let mut input = coords(&[(4.05, 4.5)], (4.25, 5.5), 100.0, 0.25);
    input.deadband_in = 0.25;
    let report = compute_correction(&ComputeInput::Coordinates(input)).unwrap();
    assert_eq!(report.clicks.windage_clicks, 0.0);
    assert_eq!(report.clicks.windage, Direction::Hold);
    assert_eq!(report.clicks.elevation_clicks, 3.82);
    // The reported correction is the raw vector.
    assert!((report.correction.dx_in - 0.2).abs() < 1e-9);
}

#[test]
fn non_positive_ballistics_are_rejected() {
    for (distance, click) in [(0.0, 0.25), (-50.0, 0.25), (100.0, 0.0), (f64::NAN, 0.25)] {
        let input = coords(&[(1.0, 1.0)], (4.25, 5.5), distance, click);
        let err = compute_correction(&ComputeInput::Coordinates(input)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter, "{distance} {click}");
    }
}

#[test]
fn empty_and_non_finite_holes() {
    let input = coords(&[], (4.25, 5.5), 100.0, 0.25);
    let err = compute_correction(&ComputeInput::Coordinates(input)).unwrap_err();
    assert_eq!(err, ZeroSightError::NoHolesDetected { blobs: 0 });

    let input = coords(&[(1.0, 1.0), (f64::NAN, 2.0)], (4.25, 5.5), 100.0, 0.25);
    let err = compute_correction(&ComputeInput::Coordinates(input)).unwrap_err();
    assert!(matches!(err, ZeroSightError::MalformedInput { index: 1, .. }));
    assert_eq!(err.kind().code(), "malformed_input");

    let input = coords(&[(1.0, 1.0)], (f64::NAN, 5.5), 100.0, 0.25);
    let err = compute_correction(&ComputeInput::Coordinates(input)).unwrap_err();
    assert_eq!(
        err,
        ZeroSightError::MalformedBull {
            reason: "bull coordinate is not finite"
        }
    );
    assert_eq!(err.kind(), ErrorKind::MalformedInput);
}

#[test]
fn labels_follow_rounded_signs() {
    let mut rng = StdRng::seed_from_u64(0x5eed_0001);
    let ballistics = Ballistics::new(100.0, 0.25).unwrap();
    for _ in 0..500 {
        let poib = InchPoint::new(rng.random_range(0.0..8.5), rng.random_range(0.0..11.0));
        let bull = InchPoint::new(rng.random_range(0.0..8.5), rng.random_range(0.0..11.0));
        for convention in [AxisConvention::YUp, AxisConvention::YDown] {
            let s = solve(poib, bull, ballistics, 0.0, convention).unwrap();
            let c = s.clicks;

            let expected_windage = if c.windage_clicks > 0.0 {
                Direction::Right
            } else if c.windage_clicks < 0.0 {
                Direction::Left
            } else {
                Direction::Hold
            };
            assert_eq!(c.windage, expected_windage);

            let (pos, neg) = match convention {
                AxisConvention::YUp => (Direction::Up, Direction::Down),
                AxisConvention::YDown => (Direction::Down, Direction::Up),
            };
            let expected_elevation = if c.elevation_clicks > 0.0 {
                pos
            } else if c.elevation_clicks < 0.0 {
                neg
            } else {
                Direction::Hold
            };
            assert_eq!(c.elevation, expected_elevation);

            if c.windage_clicks != 0.0 {
                assert_eq!(c.windage_clicks > 0.0, bull.x > poib.x);
            }
            assert_eq!(s.correction.dx_in, bull.x - poib.x);
            assert_eq!(s.correction.dy_in, bull.y - poib.y);
        }
    }
}

#[test]
fn clicks_have_two_decimals() {
    let mut rng = StdRng::seed_from_u64(7);
    let ballistics = Ballistics::new(137.0, 0.125).unwrap();
    for _ in 0..200 {
        let poib = InchPoint::new(rng.random_range(-3.0..3.0), rng.random_range(-3.0..3.0));
        let s = solve(poib, InchPoint::new(0.0, 0.0), ballistics, 0.0, AxisConvention::YUp)
            .unwrap();
        for v in [s.clicks.windage_clicks, s.clicks.elevation_clicks] {
            assert!((v * 100.0 - (v * 100.0).round()).abs() < 1e-6, "{v}");
        }
    }
}

#[test]
fn batch_keeps_each_group_error() {
    let inputs = vec![
        ComputeInput::Coordinates(coords(&[(3.75, 4.5)], (4.25, 5.5), 100.0, 0.25)),
        ComputeInput::Coordinates(coords(&[], (4.25, 5.5), 100.0, 0.25)),
        ComputeInput::Coordinates(coords(&[(1.0, 1.0)], (4.25, f64::INFINITY), 100.0, 0.25)),
        ComputeInput::Coordinates(coords(&[(1.0, 1.0)], (4.25, 5.5), 0.0, 0.25)),
    ];
    let results = Corrector::default().correct_batch(&inputs);
    assert_eq!(results.len(), 4);
    assert_eq!(results[0].as_ref().unwrap().clicks.elevation_clicks, 3.82);

    let codes: Vec<Option<&str>> = results
        .iter()
        .map(|r| r.as_ref().err().map(|e| e.kind().code()))
        .collect();
    assert_eq!(
        codes,
        [
            None,
            Some("no_holes_detected"),
            Some("malformed_input"),
            Some("invalid_parameter"),
        ]
    );
}
