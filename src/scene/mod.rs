//! Co-registered multi-channel swath scenes.
//!
//! A `Scene` owns one grid per required channel plus the sensor's native
//! invalid-pixel flag. The external reader hands over a name → grid map;
//! `Scene::from_channels` resolves the configured bindings and enforces
//! co-registration up front, so every later stage can index any channel
//! with coordinates from any other.

use std::collections::HashMap;

use crate::grid::Grid;
use crate::util::{FireSpotError, FireSpotResult};

/// Channel-name bindings between the reader's dataset names and the roles
/// the algorithm needs.
#[derive(Clone, Debug)]
pub struct ChannelBindings {
    /// Visible reflectance channel.
    pub vis: String,
    /// Near-infrared reflectance channel.
    pub nir: String,
    /// Mid-infrared brightness temperature channel.
    pub mir: String,
    /// First thermal-infrared brightness temperature channel.
    pub ir1: String,
    /// Second thermal-infrared brightness temperature channel.
    pub ir2: String,
    /// Satellite zenith angle, degrees.
    pub sat_zenith: String,
    /// Solar zenith angle, degrees.
    pub sun_zenith: String,
    /// Relative sun-sensor azimuth angle, degrees.
    pub rel_azimuth: String,
    /// Per-pixel latitude, degrees.
    pub latitude: String,
    /// Per-pixel longitude, degrees.
    pub longitude: String,
}

impl Default for ChannelBindings {
    fn default() -> Self {
        Self {
            vis: "vis".to_owned(),
            nir: "nir".to_owned(),
            mir: "mir".to_owned(),
            ir1: "ir108".to_owned(),
            ir2: "ir120".to_owned(),
            sat_zenith: "sat_zenith".to_owned(),
            sun_zenith: "sun_zenith".to_owned(),
            rel_azimuth: "rel_azimuth".to_owned(),
            latitude: "latitude".to_owned(),
            longitude: "longitude".to_owned(),
        }
    }
}

/// Immutable co-registered scene for one swath.
#[derive(Clone, Debug)]
pub struct Scene {
    vis: Grid<f32>,
    nir: Grid<f32>,
    mir: Grid<f32>,
    ir1: Grid<f32>,
    ir2: Grid<f32>,
    sat_zenith: Grid<f32>,
    sun_zenith: Grid<f32>,
    rel_azimuth: Grid<f32>,
    latitude: Grid<f32>,
    longitude: Grid<f32>,
    invalid: Grid<bool>,
}

impl Scene {
    /// Builds a scene from the reader's channel map and native invalid flag.
    ///
    /// Every bound channel must be present and share the invalid flag's
    /// shape; violations are fatal before any processing starts.
    pub fn from_channels(
        mut channels: HashMap<String, Grid<f32>>,
        invalid: Grid<bool>,
        bindings: &ChannelBindings,
    ) -> FireSpotResult<Self> {
        let shape = invalid.shape();
        let mut take = |name: &str| -> FireSpotResult<Grid<f32>> {
            let grid = channels
                .remove(name)
                .ok_or_else(|| FireSpotError::MissingChannel {
                    name: name.to_owned(),
                })?;
            if grid.shape() != shape {
                return Err(FireSpotError::ShapeMismatch {
                    name: name.to_owned(),
                    rows: grid.rows(),
                    cols: grid.cols(),
                    expected_rows: shape.0,
                    expected_cols: shape.1,
                });
            }
            Ok(grid)
        };

        Ok(Self {
            vis: take(&bindings.vis)?,
            nir: take(&bindings.nir)?,
            mir: take(&bindings.mir)?,
            ir1: take(&bindings.ir1)?,
            ir2: take(&bindings.ir2)?,
            sat_zenith: take(&bindings.sat_zenith)?,
            sun_zenith: take(&bindings.sun_zenith)?,
            rel_azimuth: take(&bindings.rel_azimuth)?,
            latitude: take(&bindings.latitude)?,
            longitude: take(&bindings.longitude)?,
            invalid,
        })
    }

    /// Returns `(rows, cols)` shared by every grid of the scene.
    pub fn shape(&self) -> (usize, usize) {
        self.invalid.shape()
    }

    /// Visible reflectance.
    pub fn vis(&self) -> &Grid<f32> {
        &self.vis
    }

    /// Near-infrared reflectance.
    pub fn nir(&self) -> &Grid<f32> {
        &self.nir
    }

    /// Mid-infrared brightness temperature.
    pub fn mir(&self) -> &Grid<f32> {
        &self.mir
    }

    /// First thermal-infrared brightness temperature.
    pub fn ir1(&self) -> &Grid<f32> {
        &self.ir1
    }

    /// Second thermal-infrared brightness temperature.
    pub fn ir2(&self) -> &Grid<f32> {
        &self.ir2
    }

    /// Satellite zenith angle, degrees.
    pub fn sat_zenith(&self) -> &Grid<f32> {
        &self.sat_zenith
    }

    /// Solar zenith angle, degrees.
    pub fn sun_zenith(&self) -> &Grid<f32> {
        &self.sun_zenith
    }

    /// Relative sun-sensor azimuth angle, degrees.
    pub fn rel_azimuth(&self) -> &Grid<f32> {
        &self.rel_azimuth
    }

    /// Per-pixel latitude, degrees.
    pub fn latitude(&self) -> &Grid<f32> {
        &self.latitude
    }

    /// Per-pixel longitude, degrees.
    pub fn longitude(&self) -> &Grid<f32> {
        &self.longitude
    }

    /// Sensor-native invalid-pixel flag; the exclusion mask starts here.
    pub fn invalid(&self) -> &Grid<bool> {
        &self.invalid
    }
}
