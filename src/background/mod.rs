//! Adaptive background sampling around hotspot candidates.
//!
//! The qualifier needs a contamination-free estimate of the background
//! radiometry near a candidate. Windows grow through the configured side
//! lengths until one holds enough unmasked pixels; the distance at which
//! the first masked pixel appears sets the quality tier.

use crate::grid::Grid;
use crate::qualify::Quality;

/// Background sampling parameters.
#[derive(Clone, Debug)]
pub struct BackgroundConfig {
    /// Window side lengths to try, ascending. A 3 is forced to the front
    /// for the quality determination regardless of the configured list.
    pub side_lengths: Vec<usize>,
    /// Minimum number of unmasked window pixels for a sufficient sample
    /// (strictly greater than).
    pub min_count: usize,
    /// Minimum unmasked fraction of the window for a sufficient sample.
    pub min_fraction: f32,
    /// MIR brightness temperature above which a window pixel is treated as
    /// a potential background fire, kelvin.
    pub mir_limit: f32,
    /// MIR-IR1 contrast above which a window pixel is treated as a
    /// potential background fire, kelvin.
    pub delta_limit: f32,
}

impl Default for BackgroundConfig {
    fn default() -> Self {
        Self {
            side_lengths: vec![5, 7, 9, 11, 13, 15],
            min_count: 8,
            min_fraction: 0.25,
            mir_limit: 318.0,
            delta_limit: 12.0,
        }
    }
}

/// Unmasked background radiometry around one candidate.
#[derive(Clone, Debug, PartialEq)]
pub struct BackgroundSample {
    /// MIR brightness temperatures.
    pub mir: Vec<f32>,
    /// IR1 brightness temperatures.
    pub ir1: Vec<f32>,
}

/// Samples the background around `(row, col)`.
///
/// Grows a window through the configured side lengths. The 3x3 window is
/// always inspected first and keeps the candidate's immediate neighbours;
/// larger windows drop the innermost 3x3 to avoid halo contamination from
/// the fire itself. Window pixels that look like background fires are
/// masked on top of the exclusion mask. Quality is decided once, at the
/// first side where the window holds a masked pixel or the side exceeds 5.
/// Returns `(None, quality)` when no window reaches sufficiency.
pub fn sample_background(
    mir: &Grid<f32>,
    ir1: &Grid<f32>,
    mask: &Grid<bool>,
    row: usize,
    col: usize,
    cfg: &BackgroundConfig,
) -> (Option<BackgroundSample>, Quality) {
    let mut sample = None;
    let mut quality = Quality::Unknown;

    for side in window_sides(&cfg.side_lengths) {
        if sample.is_some() && quality != Quality::Unknown {
            break;
        }

        let window = collect_window(mir, ir1, mask, row, col, side, cfg);

        if quality == Quality::Unknown && (window.masked > 0 || side > 5) {
            quality = Quality::for_window_side(side);
        }

        if side > 3 && sample.is_none() {
            let total = window.total();
            let valid = total - window.masked;
            if valid > cfg.min_count && valid as f32 / total as f32 >= cfg.min_fraction {
                sample = Some(BackgroundSample {
                    mir: window.mir,
                    ir1: window.ir1,
                });
            }
        }
    }

    (sample, quality)
}

/// Configured sides with a 3x3 forced to the front.
fn window_sides(configured: &[usize]) -> impl Iterator<Item = usize> + '_ {
    std::iter::once(3).chain(configured.iter().copied().filter(|side| *side != 3))
}

struct Window {
    /// Unmasked values only.
    mir: Vec<f32>,
    ir1: Vec<f32>,
    masked: usize,
}

impl Window {
    fn total(&self) -> usize {
        self.mir.len() + self.masked
    }
}

fn collect_window(
    mir: &Grid<f32>,
    ir1: &Grid<f32>,
    mask: &Grid<bool>,
    row: usize,
    col: usize,
    side: usize,
    cfg: &BackgroundConfig,
) -> Window {
    let (rows, cols) = mask.shape();
    let half = side / 2;
    let r0 = row.saturating_sub(half);
    let r1 = (row + half).min(rows - 1);
    let c0 = col.saturating_sub(half);
    let c1 = (col + half).min(cols - 1);
    let remove_neighbours = side > 3;

    let mut out = Window {
        mir: Vec::new(),
        ir1: Vec::new(),
        masked: 0,
    };
    for r in r0..=r1 {
        for c in c0..=c1 {
            if remove_neighbours && r.abs_diff(row) <= 1 && c.abs_diff(col) <= 1 {
                continue;
            }
            let m = mir.at(r, c);
            let i = ir1.at(r, c);
            let background_fire = m > cfg.mir_limit && (m - i) > cfg.delta_limit;
            if mask.at(r, c) || background_fire {
                out.masked += 1;
            } else {
                out.mir.push(m);
                out.ir1.push(i);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::window_sides;

    #[test]
    fn sides_force_a_leading_three() {
        let sides: Vec<usize> = window_sides(&[5, 7]).collect();
        assert_eq!(sides, vec![3, 5, 7]);

        let sides: Vec<usize> = window_sides(&[3, 5]).collect();
        assert_eq!(sides, vec![3, 5]);
    }
}
