//! Multi-level hotspot search.
//!
//! The scan walks the configured probability levels from most to least
//! confident. Each level derives day/night threshold candidates, drops
//! pixels already excluded or no longer eligible, consults the static-mask
//! filter, and qualifies the survivors against their background. The
//! shared exclusion mask only ever grows; the eligibility mask narrows to
//! each level's survivors so later levels re-examine only pixels that
//! stayed promising.

use std::collections::BTreeMap;

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use crate::background::{sample_background, BackgroundConfig};
use crate::config::ScanConfig;
use crate::grid::Grid;
use crate::mask::statics::{apply_static_masks, StaticMaskFilter};
use crate::mask::{exclusion_mask, AuxMaskSource, MaskContext};
use crate::qualify::{classify, Quality};
use crate::scene::Scene;
use crate::trace::{trace_event, trace_span, trace_warn};
use crate::util::{FireSpotError, FireSpotResult};

/// Day or night MIR thresholds for one probability level.
#[derive(Clone, Copy, Debug)]
pub struct Thresholds {
    /// Minimum MIR brightness temperature, kelvin.
    pub temp_mir: f32,
    /// Minimum MIR-IR1 contrast, kelvin.
    pub delta_mir_ir: f32,
}

/// One tier of the multi-level threshold scan.
#[derive(Clone, Copy, Debug)]
pub struct ProbabilityLevel {
    /// Tier label recorded on accepted fires.
    pub level: u8,
    /// Daytime thresholds.
    pub day: Thresholds,
    /// Nighttime thresholds.
    pub night: Thresholds,
}

/// A detected hotspot. Created once and never mutated; re-detections at
/// later levels do not overwrite the record.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FireRecord {
    /// Final confidence label.
    pub quality: Quality,
    /// Probability level at which the pixel was first accepted.
    pub level: u8,
    /// Pixel latitude, degrees.
    pub latitude: f32,
    /// Pixel longitude, degrees.
    pub longitude: f32,
}

/// Scan output keyed by pixel coordinate `(row, col)`.
///
/// A `BTreeMap` keeps iteration deterministic for downstream reporting.
pub type FireMap = BTreeMap<(usize, usize), FireRecord>;

/// Configured hotspot scan over one scene.
pub struct HotspotScan<'a> {
    scene: &'a Scene,
    config: &'a ScanConfig,
    cloud: Option<&'a Grid<bool>>,
    aux: Option<&'a dyn AuxMaskSource>,
    static_filter: Option<&'a dyn StaticMaskFilter>,
}

impl<'a> HotspotScan<'a> {
    /// Creates a scan for `scene` under `config`.
    pub fn new(scene: &'a Scene, config: &'a ScanConfig) -> FireSpotResult<Self> {
        config.validate()?;
        Ok(Self {
            scene,
            config,
            cloud: None,
            aux: None,
            static_filter: None,
        })
    }

    /// Supplies an externally computed cloud mask.
    pub fn with_cloud_mask(mut self, cloud: &'a Grid<bool>) -> Self {
        self.cloud = Some(cloud);
        self
    }

    /// Injects the auxiliary-mask source for land-cover and snow rasters.
    pub fn with_aux_masks(mut self, aux: &'a dyn AuxMaskSource) -> Self {
        self.aux = Some(aux);
        self
    }

    /// Injects the static-mask filter consulted per candidate.
    pub fn with_static_filter(mut self, filter: &'a dyn StaticMaskFilter) -> Self {
        self.static_filter = Some(filter);
        self
    }

    /// Runs the masking pipeline and the level scan, returning the fire set.
    pub fn run(&self) -> FireSpotResult<FireMap> {
        let _span = trace_span!("hotspot_scan", levels = self.config.probability_levels.len())
            .entered();

        if let Some(cloud) = self.cloud {
            if cloud.shape() != self.scene.shape() {
                return Err(FireSpotError::ShapeMismatch {
                    name: "cloud_mask".to_owned(),
                    rows: cloud.rows(),
                    cols: cloud.cols(),
                    expected_rows: self.scene.shape().0,
                    expected_cols: self.scene.shape().1,
                });
            }
        }
        let statics_configured = self.config.static_masks.is_some();
        if statics_configured && self.static_filter.is_none() {
            return Err(FireSpotError::MissingStaticFilter);
        }
        if !statics_configured {
            trace_warn!("no static masks configured, candidates pass unfiltered");
        }

        let ctx = MaskContext {
            cloud: self.cloud,
            aux: self.aux,
        };
        let mut mask = exclusion_mask(self.scene, self.config, &ctx)?;
        let day = self.day_mask()?;

        let mut fires = FireMap::new();
        let (rows, cols) = self.scene.shape();
        let mut eligible = Grid::filled(true, rows, cols)?;

        for level in &self.config.probability_levels {
            let _level_span = trace_span!("probability_level", level = level.level).entered();

            let candidates = self.raw_candidates(level, &mask, &day, &eligible);
            trace_event!("raw_candidates", level = level.level, count = candidates.len());
            if candidates.is_empty() {
                break;
            }

            let survivors = match self.static_filter {
                Some(filter) if statics_configured => {
                    apply_static_masks(self.scene, self.config, filter, &candidates, &mut mask)?
                }
                _ => candidates,
            };

            // Only this level's survivors stay eligible for later levels.
            eligible = Grid::filled(false, rows, cols)?;
            for &(row, col) in &survivors {
                eligible.set(row, col, true);
            }

            let qualified = self.qualify_candidates(&mask, &day, &survivors);
            for ((row, col), quality) in qualified {
                fires.entry((row, col)).or_insert_with(|| FireRecord {
                    quality,
                    level: level.level,
                    latitude: self.scene.latitude().at(row, col),
                    longitude: self.scene.longitude().at(row, col),
                });
            }
            trace_event!("level_done", level = level.level, fires = fires.len());
        }

        Ok(fires)
    }

    /// Day flag per pixel; the partition is total and exclusive.
    fn day_mask(&self) -> FireSpotResult<Grid<bool>> {
        let (rows, cols) = self.scene.shape();
        let limit = self.config.day_sun_zenith_limit;
        Grid::from_fn(rows, cols, |r, c| self.scene.sun_zenith().at(r, c) < limit)
    }

    /// Pixels passing this level's day or night thresholds, minus excluded
    /// and ineligible ones, in row-major order.
    fn raw_candidates(
        &self,
        level: &ProbabilityLevel,
        mask: &Grid<bool>,
        day: &Grid<bool>,
        eligible: &Grid<bool>,
    ) -> Vec<(usize, usize)> {
        let (rows, cols) = self.scene.shape();
        let mir = self.scene.mir();
        let ir1 = self.scene.ir1();

        let mut out = Vec::new();
        for row in 0..rows {
            for col in 0..cols {
                if mask.at(row, col) || !eligible.at(row, col) {
                    continue;
                }
                let th = if day.at(row, col) {
                    &level.day
                } else {
                    &level.night
                };
                let m = mir.at(row, col);
                if m > th.temp_mir && m - ir1.at(row, col) > th.delta_mir_ir {
                    out.push((row, col));
                }
            }
        }
        out
    }

    /// Qualifies each candidate against its background. The mask and scene
    /// are read-only here, so the per-candidate work parallelizes without
    /// changing the result; output stays in candidate (row-major) order.
    #[cfg(not(feature = "rayon"))]
    fn qualify_candidates(
        &self,
        mask: &Grid<bool>,
        day: &Grid<bool>,
        candidates: &[(usize, usize)],
    ) -> Vec<((usize, usize), Quality)> {
        let scene = self.scene;
        let background = &self.config.background;
        candidates
            .iter()
            .map(|&coord| qualify_pixel(scene, background, mask, day, coord))
            .collect()
    }

    /// Parallel variant, identical output order.
    #[cfg(feature = "rayon")]
    fn qualify_candidates(
        &self,
        mask: &Grid<bool>,
        day: &Grid<bool>,
        candidates: &[(usize, usize)],
    ) -> Vec<((usize, usize), Quality)> {
        let scene = self.scene;
        let background = &self.config.background;
        candidates
            .par_iter()
            .map(|&coord| qualify_pixel(scene, background, mask, day, coord))
            .collect()
    }
}

/// Background sampling plus the final accept/reject decision for one pixel.
fn qualify_pixel(
    scene: &Scene,
    background: &BackgroundConfig,
    mask: &Grid<bool>,
    day: &Grid<bool>,
    (row, col): (usize, usize),
) -> ((usize, usize), Quality) {
    let (sample, sampled_quality) =
        sample_background(scene.mir(), scene.ir1(), mask, row, col, background);
    let quality = classify(
        scene.mir().at(row, col),
        scene.ir1().at(row, col),
        sample.as_ref(),
        sampled_quality,
        day.at(row, col),
    );
    ((row, col), quality)
}
