//! Exclusion-mask pipeline.
//!
//! The pipeline folds a configured, ordered list of mask kinds over the
//! sensor's native invalid flag with an accumulating OR. Mask functions are
//! pure; only the pipeline (and later the static-mask filter) writes into
//! the exclusion mask.

pub mod functions;
pub mod statics;

use crate::grid::Grid;
use crate::scene::Scene;
use crate::trace::{trace_event, trace_span};
use crate::util::{FireSpotError, FireSpotResult};
use crate::ScanConfig;

/// Registry of mask functions addressable from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MaskKind {
    /// Water surfaces (Planck eq. 1).
    Water,
    /// Sun-glint cone (eqs. 5-8).
    SunGlint,
    /// Sparse vegetation cover (eqs. 9-10).
    VegetationFraction,
    /// Extreme viewing angles at the swath edges.
    SwathEdge,
    /// Fixed row bands at the swath ends.
    SwathEnd,
    /// Cloud cover, supplied or derived (eqs. 2-4).
    Cloud,
    /// External land-cover raster resampled onto the swath.
    LandCover,
    /// External snow raster resampled onto the swath.
    Snow,
}

impl MaskKind {
    /// Registry name used by configuration files.
    pub fn name(self) -> &'static str {
        match self {
            MaskKind::Water => "water",
            MaskKind::SunGlint => "sun_glint",
            MaskKind::VegetationFraction => "vegetation_fraction",
            MaskKind::SwathEdge => "swath_edge",
            MaskKind::SwathEnd => "swath_end",
            MaskKind::Cloud => "cloud",
            MaskKind::LandCover => "land_cover",
            MaskKind::Snow => "snow",
        }
    }

    /// Resolves a registry name from configuration.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "water" => Some(MaskKind::Water),
            "sun_glint" => Some(MaskKind::SunGlint),
            "vegetation_fraction" => Some(MaskKind::VegetationFraction),
            "swath_edge" => Some(MaskKind::SwathEdge),
            "swath_end" => Some(MaskKind::SwathEnd),
            "cloud" => Some(MaskKind::Cloud),
            "land_cover" => Some(MaskKind::LandCover),
            "snow" => Some(MaskKind::Snow),
            _ => None,
        }
    }
}

/// Auxiliary static rasters available from an external source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AuxMaskKind {
    /// Land-cover exclusion classes.
    LandCover,
    /// Snow cover.
    Snow,
}

/// External reader + resampler for auxiliary static rasters.
///
/// Implementations own the raw raster and its geolocation and return the
/// mask already resampled onto the swath grid. The resampling method is the
/// implementation's choice.
pub trait AuxMaskSource {
    /// Returns the raster of `kind` resampled to `shape` (rows, cols).
    fn swath_mask(&self, kind: AuxMaskKind, shape: (usize, usize)) -> FireSpotResult<Grid<bool>>;
}

/// Per-run mask inputs that are not part of the scene.
#[derive(Clone, Copy, Default)]
pub struct MaskContext<'a> {
    /// Externally supplied cloud mask; the cloud test derives one when absent.
    pub cloud: Option<&'a Grid<bool>>,
    /// Source for land-cover and snow rasters.
    pub aux: Option<&'a dyn AuxMaskSource>,
}

/// Builds the exclusion grid for one configured mask kind.
pub fn build_mask(
    kind: MaskKind,
    scene: &Scene,
    cfg: &ScanConfig,
    ctx: &MaskContext<'_>,
) -> FireSpotResult<Grid<bool>> {
    match kind {
        MaskKind::Water => functions::water(scene, &cfg.water),
        MaskKind::SunGlint => functions::sun_glint(scene, &cfg.sun_glint),
        MaskKind::VegetationFraction => functions::vegetation_fraction(scene, &cfg.vegetation),
        MaskKind::SwathEdge => functions::swath_edge(scene, &cfg.swath_edge),
        MaskKind::SwathEnd => functions::swath_end(scene, &cfg.swath_end),
        MaskKind::Cloud => match ctx.cloud {
            Some(mask) => Ok(mask.clone()),
            None => functions::cloud(scene, &cfg.cloud),
        },
        MaskKind::LandCover => aux_mask(AuxMaskKind::LandCover, kind, scene, ctx),
        MaskKind::Snow => aux_mask(AuxMaskKind::Snow, kind, scene, ctx),
    }
}

fn aux_mask(
    aux_kind: AuxMaskKind,
    kind: MaskKind,
    scene: &Scene,
    ctx: &MaskContext<'_>,
) -> FireSpotResult<Grid<bool>> {
    let source = ctx.aux.ok_or(FireSpotError::MissingAuxSource {
        kind: kind.name(),
    })?;
    let mask = source.swath_mask(aux_kind, scene.shape())?;
    if mask.shape() != scene.shape() {
        return Err(FireSpotError::ShapeMismatch {
            name: kind.name().to_owned(),
            rows: mask.rows(),
            cols: mask.cols(),
            expected_rows: scene.shape().0,
            expected_cols: scene.shape().1,
        });
    }
    Ok(mask)
}

/// Runs the configured mask functions and accumulates one exclusion grid.
///
/// Starts from the sensor's native invalid flag; the result only grows as
/// each function's output is OR-ed in.
pub fn exclusion_mask(
    scene: &Scene,
    cfg: &ScanConfig,
    ctx: &MaskContext<'_>,
) -> FireSpotResult<Grid<bool>> {
    let _span = trace_span!("exclusion_mask", functions = cfg.mask_functions.len()).entered();

    let mut mask = scene.invalid().clone();
    for kind in &cfg.mask_functions {
        let contribution = build_mask(*kind, scene, cfg, ctx)?;
        mask.or_assign(&contribution)?;
        trace_event!("mask_applied", function = kind.name(), excluded = mask.count_set());
    }
    Ok(mask)
}
