//! Footprint-aware static-mask filtering of candidate pixels.
//!
//! Static geographic masks (urban areas, bare ground, permanent water) live
//! outside the crate. The filter is consulted per candidate with the
//! pixel's geolocation and footprint extent; rejections are written back
//! into the exclusion mask and never retried.

use crate::geometry::footprint_size;
use crate::grid::Grid;
use crate::scene::Scene;
use crate::trace::trace_event;
use crate::util::{FireSpotError, FireSpotResult};
use crate::ScanConfig;

/// One candidate as seen by a static-mask filter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FootprintSample {
    /// Pixel longitude, degrees.
    pub longitude: f32,
    /// Pixel latitude, degrees.
    pub latitude: f32,
    /// Along-track footprint extent, kilometers.
    pub along_km: f32,
    /// Across-track footprint extent, kilometers.
    pub across_km: f32,
}

/// External check of candidate footprints against static geographic masks.
pub trait StaticMaskFilter {
    /// Returns one verdict per candidate, `true` meaning acceptable.
    fn check(&self, candidates: &[FootprintSample]) -> Vec<bool>;
}

/// Filters `candidates` through the static masks, marking rejections in the
/// exclusion mask. Returns the surviving coordinates in input order.
pub(crate) fn apply_static_masks(
    scene: &Scene,
    cfg: &ScanConfig,
    filter: &dyn StaticMaskFilter,
    candidates: &[(usize, usize)],
    mask: &mut Grid<bool>,
) -> FireSpotResult<Vec<(usize, usize)>> {
    let samples: Vec<FootprintSample> = candidates
        .iter()
        .map(|&(row, col)| {
            let footprint = footprint_size(scene.sat_zenith().at(row, col), &cfg.geometry);
            FootprintSample {
                longitude: scene.longitude().at(row, col),
                latitude: scene.latitude().at(row, col),
                along_km: footprint.along_km,
                across_km: footprint.across_km,
            }
        })
        .collect();

    let verdicts = filter.check(&samples);
    if verdicts.len() != candidates.len() {
        return Err(FireSpotError::StaticFilterContract {
            expected: candidates.len(),
            got: verdicts.len(),
        });
    }

    let mut kept = Vec::with_capacity(candidates.len());
    for (&(row, col), accepted) in candidates.iter().zip(verdicts) {
        if accepted {
            kept.push((row, col));
        } else {
            mask.set(row, col, true);
        }
    }
    trace_event!(
        "static_masks_checked",
        submitted = candidates.len(),
        kept = kept.len()
    );
    Ok(kept)
}
