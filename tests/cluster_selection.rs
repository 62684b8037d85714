use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use zerosight::lowlevel::{select_cluster, Blob, BoundingBox, ClusterParams};
use zerosight::PixelPoint;

fn hole(x: f64, y: f64) -> Blob {
    Blob {
        area: 60,
        centroid: PixelPoint::new(x, y),
        bbox: BoundingBox {
            min_x: x as usize - 4,
            min_y: y as usize - 4,
            max_x: x as usize + 4,
            max_y: y as usize + 4,
        },
        oversized: false,
    }
}

fn tight_group_with_flyers() -> Vec<Blob> {
    vec![
        hole(300.0, 50.0),
        hole(100.0, 100.0),
        hole(104.0, 100.0),
        hole(100.0, 104.0),
        hole(20.0, 380.0),
        hole(104.0, 104.0),
        hole(102.0, 102.0),
    ]
}

#[test]
fn flyers_are_left_out() {
    let blobs = tight_group_with_flyers();
    let picked = select_cluster(
        &blobs,
        ClusterParams {
            max_shots: 5,
            ..ClusterParams::default()
        },
    )
    .unwrap();
    let expected: Vec<Blob> = [1, 2, 3, 5, 6].iter().map(|&i| blobs[i]).collect();
    assert_eq!(picked, expected);
}

#[test]
fn zero_tolerance_takes_the_tightest_minimum_group() {
    let blobs = tight_group_with_flyers();
    let picked = select_cluster(
        &blobs,
        ClusterParams {
            min_shots: 2,
            max_shots: 5,
            tie_tolerance_px: 0.0,
        },
    )
    .unwrap();
    assert_eq!(picked, vec![blobs[1], blobs[6]]);
}

#[test]
fn all_candidates_kept_when_within_max() {
    let blobs = tight_group_with_flyers();
    let picked = select_cluster(&blobs, ClusterParams::default()).unwrap();
    assert_eq!(picked, blobs);
}

#[test]
fn selection_is_deterministic_and_bounded() {
    let mut rng = StdRng::seed_from_u64(42);
    let blobs: Vec<Blob> = (0..15)
        .map(|_| hole(rng.random_range(10.0..400.0), rng.random_range(10.0..500.0)))
        .collect();
    let params = ClusterParams {
        min_shots: 3,
        max_shots: 6,
        tie_tolerance_px: 25.0,
    };
    let first = select_cluster(&blobs, params).unwrap();
    let second = select_cluster(&blobs, params).unwrap();
    assert_eq!(first, second);
    assert!((3..=6).contains(&first.len()));
}
