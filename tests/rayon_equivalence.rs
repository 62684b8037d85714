#![cfg(feature = "rayon")]

mod common;

use common::Canvas;
use zerosight::{
    ComputeInput, CoordinateInput, Corrector, CorrectorConfig, ImageInput, InchPoint, TargetSize,
};

#[test]
fn parallel_batch_matches_sequential() {
    let mut canvases = Vec::new();
    for shift in 0..4 {
        let mut canvas = Canvas::letter_with_border();
        let dx = 0.25 * shift as f64;
        canvas.hole_at_inches(3.0 + dx, 4.0);
        canvas.hole_at_inches(3.25 + dx, 4.5);
        canvas.hole_at_inches(3.5 + dx, 4.25);
        canvases.push(canvas);
    }
    canvases.push(Canvas::letter_with_border());

    let mut inputs: Vec<ComputeInput<'_>> = canvases
        .iter()
        .map(|c| ComputeInput::Image(ImageInput::new(c.view(), TargetSize::LETTER, 100.0, 0.25)))
        .collect();
    inputs.push(ComputeInput::Coordinates(CoordinateInput {
        holes: vec![InchPoint::new(1.0, 2.0), InchPoint::new(1.5, 2.5)],
        bull: InchPoint::new(4.25, 5.5),
        distance_yards: 25.0,
        click_value_moa: 0.125,
        deadband_in: 0.0,
    }));

    let sequential = Corrector::default().correct_batch(&inputs);
    let parallel = Corrector::new(CorrectorConfig {
        parallel: true,
        ..CorrectorConfig::default()
    })
    .correct_batch(&inputs);

    assert_eq!(sequential.len(), inputs.len());
    assert_eq!(sequential, parallel);
    assert!(sequential[4].is_err());
    assert!(sequential[..4].iter().all(Result::is_ok));
}
