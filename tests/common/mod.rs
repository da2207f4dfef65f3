//! Shared synthetic-scene builders for integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use firespot::{ChannelBindings, Grid, Scene};

/// Mutable channel set handed to test customizers before assembly.
pub struct Channels {
    pub vis: Grid<f32>,
    pub nir: Grid<f32>,
    pub mir: Grid<f32>,
    pub ir1: Grid<f32>,
    pub ir2: Grid<f32>,
    pub sat_zenith: Grid<f32>,
    pub sun_zenith: Grid<f32>,
    pub rel_azimuth: Grid<f32>,
    pub latitude: Grid<f32>,
    pub longitude: Grid<f32>,
    pub invalid: Grid<bool>,
}

/// Builds a benign daytime scene and lets `customize` adjust it.
///
/// Defaults: vegetated land (vis 10 %, nir 30 %), warm cloud-free
/// radiometry (MIR 300 K, IR 290/289 K), mid-swath viewing geometry,
/// daytime sun, a simple lat/lon ramp and an all-valid sensor flag.
pub fn scene_with(rows: usize, cols: usize, customize: impl FnOnce(&mut Channels)) -> Scene {
    let f = |value: f32| Grid::filled(value, rows, cols).unwrap();
    let mut channels = Channels {
        vis: f(10.0),
        nir: f(30.0),
        mir: f(300.0),
        ir1: f(290.0),
        ir2: f(289.0),
        sat_zenith: f(20.0),
        sun_zenith: f(40.0),
        rel_azimuth: f(90.0),
        latitude: Grid::from_fn(rows, cols, |r, _| 60.0 + r as f32 * 0.01).unwrap(),
        longitude: Grid::from_fn(rows, cols, |_, c| 25.0 + c as f32 * 0.01).unwrap(),
        invalid: Grid::filled(false, rows, cols).unwrap(),
    };
    customize(&mut channels);

    let bindings = ChannelBindings::default();
    let map: HashMap<String, Grid<f32>> = [
        (bindings.vis.clone(), channels.vis),
        (bindings.nir.clone(), channels.nir),
        (bindings.mir.clone(), channels.mir),
        (bindings.ir1.clone(), channels.ir1),
        (bindings.ir2.clone(), channels.ir2),
        (bindings.sat_zenith.clone(), channels.sat_zenith),
        (bindings.sun_zenith.clone(), channels.sun_zenith),
        (bindings.rel_azimuth.clone(), channels.rel_azimuth),
        (bindings.latitude.clone(), channels.latitude),
        (bindings.longitude.clone(), channels.longitude),
    ]
    .into_iter()
    .collect();

    Scene::from_channels(map, channels.invalid, &bindings).unwrap()
}

/// Sets every pixel of a rectangular block.
pub fn fill_block(grid: &mut Grid<f32>, r0: usize, c0: usize, r1: usize, c1: usize, value: f32) {
    for r in r0..=r1 {
        for c in c0..=c1 {
            grid.set(r, c, value);
        }
    }
}
