//! Background sampler window growth, sufficiency and quality tiers.

use firespot::{sample_background, BackgroundConfig, Grid, Quality};

fn uniform_grids(rows: usize, cols: usize, mir: f32, ir1: f32) -> (Grid<f32>, Grid<f32>) {
    (
        Grid::filled(mir, rows, cols).unwrap(),
        Grid::filled(ir1, rows, cols).unwrap(),
    )
}

fn config(sides: &[usize]) -> BackgroundConfig {
    BackgroundConfig {
        side_lengths: sides.to_vec(),
        min_count: 8,
        min_fraction: 0.25,
        mir_limit: 400.0,
        delta_limit: 50.0,
    }
}

#[test]
fn clean_neighbourhood_gives_high_quality_sample() {
    let (mir, ir1) = uniform_grids(15, 15, 300.0, 290.0);
    let mask = Grid::filled(false, 15, 15).unwrap();
    let (sample, quality) = sample_background(&mir, &ir1, &mask, 7, 7, &config(&[5, 7]));
    let sample = sample.unwrap();
    // First sufficient window is the 5x5 ring without the inner 3x3.
    assert_eq!(sample.mir.len(), 16);
    assert!(sample.mir.iter().all(|v| (*v - 300.0).abs() < 1e-6));
    assert!(sample.ir1.iter().all(|v| (*v - 290.0).abs() < 1e-6));
    assert_eq!(quality, Quality::High);
}

#[test]
fn masked_direct_neighbours_give_low_quality() {
    let (mir, ir1) = uniform_grids(15, 15, 300.0, 290.0);
    let mask = Grid::from_fn(15, 15, |r, c| {
        r.abs_diff(7) <= 1 && c.abs_diff(7) <= 1 && (r, c) != (7, 7)
    })
    .unwrap();
    let (sample, quality) = sample_background(&mir, &ir1, &mask, 7, 7, &config(&[5, 7]));
    // The 5x5 ring stays clean, so a sample still exists.
    assert!(sample.is_some());
    assert_eq!(quality, Quality::Low);
}

#[test]
fn contamination_first_seen_at_five_gives_medium_quality() {
    let (mir, ir1) = uniform_grids(15, 15, 300.0, 290.0);
    // Excluded ring at Chebyshev distance 2 from the center.
    let mask = Grid::from_fn(15, 15, |r, c| r.abs_diff(7).max(c.abs_diff(7)) == 2).unwrap();
    let (sample, quality) = sample_background(&mir, &ir1, &mask, 7, 7, &config(&[5, 7]));
    assert_eq!(quality, Quality::Medium);
    // The 5x5 ring is fully excluded; sufficiency is first reached at 7x7.
    let sample = sample.unwrap();
    assert_eq!(sample.mir.len(), 24);
}

#[test]
fn quality_grows_with_contamination_distance() {
    let (mir, ir1) = uniform_grids(21, 21, 300.0, 290.0);
    let cfg = config(&[5, 7, 9]);
    let mut qualities = Vec::new();
    for distance in [1usize, 2, 3] {
        let mask =
            Grid::from_fn(21, 21, |r, c| r.abs_diff(10).max(c.abs_diff(10)) == distance).unwrap();
        let (_, quality) = sample_background(&mir, &ir1, &mask, 10, 10, &cfg);
        qualities.push(quality);
    }
    assert_eq!(qualities, vec![Quality::Low, Quality::Medium, Quality::High]);
    assert!(qualities.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn hot_window_pixels_are_masked_and_dropped_from_the_sample() {
    let (mut mir, ir1) = uniform_grids(15, 15, 300.0, 290.0);
    // Hot halo at distance 2: above both background-fire limits.
    for r in 0..15usize {
        for c in 0..15usize {
            if r.abs_diff(7).max(c.abs_diff(7)) == 2 {
                mir.set(r, c, 330.0);
            }
        }
    }
    let mask = Grid::filled(false, 15, 15).unwrap();
    let cfg = BackgroundConfig {
        side_lengths: vec![5, 7],
        min_count: 8,
        min_fraction: 0.25,
        mir_limit: 318.0,
        delta_limit: 12.0,
    };
    let (sample, quality) = sample_background(&mir, &ir1, &mask, 7, 7, &cfg);
    // The halo contaminates the 5x5 window even though the exclusion mask
    // is clean there.
    assert_eq!(quality, Quality::Medium);
    let sample = sample.unwrap();
    assert_eq!(sample.mir.len(), 24);
    assert!(sample.mir.iter().all(|v| (*v - 300.0).abs() < 1e-6));
}

#[test]
fn exhausted_windows_return_no_sample_but_keep_quality() {
    let (mir, ir1) = uniform_grids(13, 13, 330.0, 285.0);
    // Everything around the candidate is excluded out to the 5x5 block.
    let mask = Grid::from_fn(13, 13, |r, c| {
        let d = r.abs_diff(6).max(c.abs_diff(6));
        d >= 1 && d <= 2
    })
    .unwrap();
    let (sample, quality) = sample_background(&mir, &ir1, &mask, 6, 6, &config(&[5]));
    assert!(sample.is_none());
    assert_eq!(quality, Quality::Low);
}

#[test]
fn insufficient_count_rejects_the_window() {
    let (mir, ir1) = uniform_grids(15, 15, 300.0, 290.0);
    let mask = Grid::filled(false, 15, 15).unwrap();
    let cfg = BackgroundConfig {
        min_count: 16,
        ..config(&[5])
    };
    // The 5x5 ring holds exactly 16 unmasked pixels; the strict count test
    // rejects it.
    let (sample, _) = sample_background(&mir, &ir1, &mask, 7, 7, &cfg);
    assert!(sample.is_none());
}

#[test]
fn windows_clip_at_the_swath_border() {
    let (mir, ir1) = uniform_grids(9, 9, 300.0, 290.0);
    let mask = Grid::filled(false, 9, 9).unwrap();
    let cfg = BackgroundConfig {
        min_count: 4,
        ..config(&[5])
    };
    // Corner pixel: the 5x5 window is clipped to 3x3 and the inner block
    // removal leaves a 5-pixel L-shape.
    let (sample, _) = sample_background(&mir, &ir1, &mask, 0, 0, &cfg);
    let sample = sample.unwrap();
    assert_eq!(sample.mir.len(), 5);
}
