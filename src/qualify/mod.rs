//! Final accept/reject decision for hotspot candidates.
//!
//! A candidate that passed the threshold scan is compared against the
//! statistics of its background sample. Daytime adds an IR1 brightness
//! test compensating for reflected-solar contamination; at night the
//! contrast test alone decides.

use crate::background::BackgroundSample;
use crate::util::stats::{mean, mean_abs_deviation};

/// Fixed daytime IR1 offset, kelvin. Daytime IR1 carries a reflected-solar
/// component, so the background comparison is relaxed by this amount.
const DAY_IR1_OFFSET_K: f32 = 3.0;

/// Confidence label attached to a detected hotspot.
///
/// Ordered from rejection through increasing confidence; `Unknown` means no
/// background evidence either way.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Quality {
    /// Candidate failed the background comparison.
    NotFire,
    /// No statistically sufficient background sample was found.
    Unknown,
    /// Masked pixels directly adjacent to the candidate.
    Low,
    /// Masked pixels within the 5x5 neighbourhood.
    Medium,
    /// Clean neighbourhood out to at least 5x5.
    High,
}

impl Quality {
    /// Quality tier implied by the window side length at which the first
    /// masked pixel was found.
    pub(crate) fn for_window_side(side: usize) -> Self {
        match side {
            3 => Quality::Low,
            5 => Quality::Medium,
            _ => Quality::High,
        }
    }
}

/// Decides whether a candidate is a fire.
///
/// Returns `Unknown` when no background sample exists, the sampled quality
/// tier on acceptance, `NotFire` on rejection. The background must contain
/// at least one pixel, which the sampler's sufficiency test guarantees.
pub fn classify(
    mir: f32,
    ir1: f32,
    background: Option<&BackgroundSample>,
    quality: Quality,
    is_day: bool,
) -> Quality {
    let Some(bg) = background else {
        return Quality::Unknown;
    };

    let delta: Vec<f32> = bg
        .mir
        .iter()
        .zip(bg.ir1.iter())
        .map(|(m, i)| m - i)
        .collect();
    let mean_delta = mean(&delta);
    let mad_delta = mean_abs_deviation(&delta);

    let contrast_ok = (mir - ir1) > mean_delta + mad_delta;
    if is_day {
        let mean_ir1 = mean(&bg.ir1);
        let mad_ir1 = mean_abs_deviation(&bg.ir1);
        if contrast_ok && ir1 > mean_ir1 + mad_ir1 - DAY_IR1_OFFSET_K {
            quality
        } else {
            Quality::NotFire
        }
    } else if contrast_ok {
        quality
    } else {
        Quality::NotFire
    }
}

#[cfg(test)]
mod tests {
    use super::{classify, Quality};
    use crate::background::BackgroundSample;

    fn uniform_background(mir: f32, ir1: f32, count: usize) -> BackgroundSample {
        BackgroundSample {
            mir: vec![mir; count],
            ir1: vec![ir1; count],
        }
    }

    #[test]
    fn quality_ordering_matches_confidence() {
        assert!(Quality::NotFire < Quality::Unknown);
        assert!(Quality::Unknown < Quality::Low);
        assert!(Quality::Low < Quality::Medium);
        assert!(Quality::Medium < Quality::High);
    }

    #[test]
    fn window_side_mapping_is_total() {
        assert_eq!(Quality::for_window_side(3), Quality::Low);
        assert_eq!(Quality::for_window_side(5), Quality::Medium);
        assert_eq!(Quality::for_window_side(7), Quality::High);
        assert_eq!(Quality::for_window_side(25), Quality::High);
    }

    #[test]
    fn missing_background_yields_unknown() {
        assert_eq!(classify(330.0, 290.0, None, Quality::High, true), Quality::Unknown);
    }

    // Background statistics of spec scenario A: delta mean 30, MAD 0,
    // IR1 mean 290, MAD 0.
    #[test]
    fn day_candidate_above_background_is_accepted() {
        let bg = uniform_background(320.0, 290.0, 16);
        let quality = classify(321.0, 290.0, Some(&bg), Quality::High, true);
        assert_eq!(quality, Quality::High);
    }

    // Scenario B: contrast passes but the candidate IR1 sits below the
    // background IR1 test (285 < 290 - 3), so the day rule demotes it.
    #[test]
    fn day_candidate_with_cold_ir1_is_demoted() {
        let bg = uniform_background(320.0, 290.0, 16);
        let quality = classify(320.0, 285.0, Some(&bg), Quality::High, true);
        assert_eq!(quality, Quality::NotFire);
    }

    #[test]
    fn night_rule_skips_the_ir1_test() {
        let bg = uniform_background(320.0, 290.0, 16);
        // Same radiometry that the day rule demotes.
        let quality = classify(320.0, 285.0, Some(&bg), Quality::Medium, false);
        assert_eq!(quality, Quality::Medium);
    }

    #[test]
    fn day_rule_is_more_restrictive_than_night() {
        let bg = uniform_background(315.0, 288.0, 12);
        for (mir, ir1) in [(320.0, 284.0), (330.0, 280.0), (317.0, 286.0)] {
            let day = classify(mir, ir1, Some(&bg), Quality::High, true);
            let night = classify(mir, ir1, Some(&bg), Quality::High, false);
            if day == Quality::High {
                assert_eq!(night, Quality::High);
            }
        }
    }

    #[test]
    fn weak_contrast_is_rejected_day_and_night() {
        let bg = uniform_background(320.0, 290.0, 16);
        // Candidate delta equals the background mean; strict test fails.
        assert_eq!(classify(320.0, 290.0, Some(&bg), Quality::High, true), Quality::NotFire);
        assert_eq!(classify(320.0, 290.0, Some(&bg), Quality::High, false), Quality::NotFire);
    }
}
