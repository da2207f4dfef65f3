//! Radiometric and geometric exclusion masks (Planck et al. eqs. 1-10).
//!
//! Each function is pure: scene and parameters in, boolean exclusion grid
//! out. The pipeline in the parent module owns the accumulation.

use crate::grid::Grid;
use crate::scene::Scene;
use crate::util::FireSpotResult;

/// Water test parameters. Reflectances are percent.
#[derive(Clone, Copy, Debug)]
pub struct WaterConfig {
    /// Upper bound on `mean(vis,nir)^2 / std(vis,nir)` over water.
    pub threshold: f32,
}

impl Default for WaterConfig {
    fn default() -> Self {
        Self { threshold: 5.0 }
    }
}

/// Sun-glint cone parameters.
#[derive(Clone, Copy, Debug)]
pub struct SunGlintConfig {
    /// Glint angle below which pixels are always excluded, degrees.
    pub angle_threshold_1: f32,
    /// Glint angle below which bright-NIR pixels are excluded, degrees.
    pub angle_threshold_2: f32,
    /// NIR reflectance bound for the wider cone, percent.
    pub nir_threshold: f32,
}

impl Default for SunGlintConfig {
    fn default() -> Self {
        Self {
            angle_threshold_1: 10.0,
            angle_threshold_2: 15.0,
            nir_threshold: 20.0,
        }
    }
}

/// Fractional vegetation cover parameters.
#[derive(Clone, Copy, Debug)]
pub struct VegetationConfig {
    /// Minimum fractional vegetation cover for a burnable pixel.
    pub threshold: f32,
}

impl Default for VegetationConfig {
    fn default() -> Self {
        Self { threshold: 0.25 }
    }
}

/// Swath-edge cutoff.
#[derive(Clone, Copy, Debug)]
pub struct SwathEdgeConfig {
    /// Satellite zenith angle above which pixels are excluded, degrees.
    pub threshold: f32,
}

impl Default for SwathEdgeConfig {
    fn default() -> Self {
        Self { threshold: 60.0 }
    }
}

/// Swath-end cutoff.
#[derive(Clone, Copy, Debug)]
pub struct SwathEndConfig {
    /// Number of rows excluded at the top and at the bottom of the swath.
    pub rows: usize,
}

impl Default for SwathEndConfig {
    fn default() -> Self {
        Self { rows: 10 }
    }
}

/// Derived cloud-test parameters. Reflectances are percent.
#[derive(Clone, Copy, Debug)]
pub struct CloudConfig {
    /// Combined cloud-weight product above which a pixel is excluded.
    pub threshold: f32,
}

impl Default for CloudConfig {
    fn default() -> Self {
        Self { threshold: 50.0 }
    }
}

/// Water pixels: low, flat visible/NIR signal with vis above nir.
///
/// The per-pixel standard deviation of the two reflectances reduces to
/// `|vis - nir| / 2`. Equal reflectances drive the ratio to infinity and
/// fail the `vis > nir` arm, so flat pixels stay unmasked.
pub fn water(scene: &Scene, cfg: &WaterConfig) -> FireSpotResult<Grid<bool>> {
    let (rows, cols) = scene.shape();
    Grid::from_fn(rows, cols, |r, c| {
        let vis = scene.vis().at(r, c);
        let nir = scene.nir().at(r, c);
        let mean = (vis + nir) / 2.0;
        let std = (vis - nir).abs() / 2.0;
        mean * mean / std < cfg.threshold && vis > nir
    })
}

/// Specular sun-glint cone around the reflected solar ray.
pub fn sun_glint(scene: &Scene, cfg: &SunGlintConfig) -> FireSpotResult<Grid<bool>> {
    let (rows, cols) = scene.shape();
    let th1 = cfg.angle_threshold_1.to_radians();
    let th2 = cfg.angle_threshold_2.to_radians();
    Grid::from_fn(rows, cols, |r, c| {
        let vza = scene.sat_zenith().at(r, c).to_radians();
        let sza = scene.sun_zenith().at(r, c).to_radians();
        let raa = scene.rel_azimuth().at(r, c).to_radians();
        let glint = (vza.cos() * sza.cos() - vza.sin() * sza.sin() * raa.cos()).acos();
        glint < th1 || (glint < th2 && scene.nir().at(r, c) > cfg.nir_threshold)
    })
}

/// Sparse vegetation, from NDVI normalized over the whole scene.
///
/// A scene with flat NDVI has no normalization range; nothing is excluded.
pub fn vegetation_fraction(scene: &Scene, cfg: &VegetationConfig) -> FireSpotResult<Grid<bool>> {
    let (rows, cols) = scene.shape();
    let ndvi = Grid::from_fn(rows, cols, |r, c| {
        let vis = scene.vis().at(r, c);
        let nir = scene.nir().at(r, c);
        (nir - vis) / (nir + vis)
    })?;
    let mut min = f32::INFINITY;
    let mut max = f32::NEG_INFINITY;
    for v in ndvi.as_slice() {
        min = min.min(*v);
        max = max.max(*v);
    }
    let range = max - min;
    Grid::from_fn(rows, cols, |r, c| {
        let fcv = (ndvi.at(r, c) - min) / range;
        fcv * fcv < cfg.threshold
    })
}

/// Swath-edge pixels viewed past the zenith-angle cutoff.
pub fn swath_edge(scene: &Scene, cfg: &SwathEdgeConfig) -> FireSpotResult<Grid<bool>> {
    let (rows, cols) = scene.shape();
    Grid::from_fn(rows, cols, |r, c| scene.sat_zenith().at(r, c) > cfg.threshold)
}

/// Fixed bands at the very top and bottom of the swath, excluded
/// regardless of content.
pub fn swath_end(scene: &Scene, cfg: &SwathEndConfig) -> FireSpotResult<Grid<bool>> {
    let (rows, cols) = scene.shape();
    let band = cfg.rows.min(rows);
    Grid::from_fn(rows, cols, |r, _| r < band || r >= rows - band)
}

/// Cloud test derived from the scene radiometry.
///
/// Cold MIR and small MIR-IR contrast over a bright visible/NIR surface
/// weight toward cloud.
pub fn cloud(scene: &Scene, cfg: &CloudConfig) -> FireSpotResult<Grid<bool>> {
    let (rows, cols) = scene.shape();
    Grid::from_fn(rows, cols, |r, c| {
        let mir = scene.mir().at(r, c);
        let ir_mean = (scene.ir1().at(r, c) + scene.ir2().at(r, c)) / 2.0;
        let w_mir = ((310.0 - mir) / 20.0).exp();
        let w_delta = ((mir - ir_mean - 14.0) / 14.0).exp();
        let mean_vis_nir = (scene.vis().at(r, c) + scene.nir().at(r, c)) / 2.0;
        w_mir * w_delta * mean_vis_nir > cfg.threshold
    })
}
