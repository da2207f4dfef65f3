use clap::Parser;
use firespot::{
    BackgroundConfig, ChannelBindings, FireMap, GeometryConfig, Grid, HotspotScan, MaskKind,
    ProbabilityLevel, Quality, ScanConfig, Scene, Thresholds,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "FireSpot CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Run the detector on a built-in synthetic swath and print the fires.
    #[arg(long)]
    demo: bool,
    /// Enable tracing output for pipeline diagnostics.
    #[arg(long)]
    trace: bool,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct ChannelBindingsJson {
    vis: String,
    nir: String,
    mir: String,
    ir1: String,
    ir2: String,
    sat_zenith: String,
    sun_zenith: String,
    rel_azimuth: String,
    latitude: String,
    longitude: String,
}

impl Default for ChannelBindingsJson {
    fn default() -> Self {
        let b = ChannelBindings::default();
        Self {
            vis: b.vis,
            nir: b.nir,
            mir: b.mir,
            ir1: b.ir1,
            ir2: b.ir2,
            sat_zenith: b.sat_zenith,
            sun_zenith: b.sun_zenith,
            rel_azimuth: b.rel_azimuth,
            latitude: b.latitude,
            longitude: b.longitude,
        }
    }
}

impl From<ChannelBindingsJson> for ChannelBindings {
    fn from(value: ChannelBindingsJson) -> Self {
        Self {
            vis: value.vis,
            nir: value.nir,
            mir: value.mir,
            ir1: value.ir1,
            ir2: value.ir2,
            sat_zenith: value.sat_zenith,
            sun_zenith: value.sun_zenith,
            rel_azimuth: value.rel_azimuth,
            latitude: value.latitude,
            longitude: value.longitude,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ThresholdsJson {
    temp_mir: f32,
    delta_mir_ir: f32,
}

#[derive(Debug, Deserialize)]
struct LevelJson {
    level: u8,
    day: ThresholdsJson,
    night: ThresholdsJson,
}

impl From<LevelJson> for ProbabilityLevel {
    fn from(value: LevelJson) -> Self {
        Self {
            level: value.level,
            day: Thresholds {
                temp_mir: value.day.temp_mir,
                delta_mir_ir: value.day.delta_mir_ir,
            },
            night: Thresholds {
                temp_mir: value.night.temp_mir,
                delta_mir_ir: value.night.delta_mir_ir,
            },
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct BackgroundJson {
    side_lengths: Vec<usize>,
    min_count: usize,
    min_fraction: f32,
    mir_limit: f32,
    delta_limit: f32,
}

impl Default for BackgroundJson {
    fn default() -> Self {
        let cfg = BackgroundConfig::default();
        Self {
            side_lengths: cfg.side_lengths,
            min_count: cfg.min_count,
            min_fraction: cfg.min_fraction,
            mir_limit: cfg.mir_limit,
            delta_limit: cfg.delta_limit,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct GeometryJson {
    ifov: f32,
    satellite_altitude_km: f32,
    max_swath_width_km: f32,
}

impl Default for GeometryJson {
    fn default() -> Self {
        let cfg = GeometryConfig::default();
        Self {
            ifov: cfg.ifov,
            satellite_altitude_km: cfg.satellite_altitude_km,
            max_swath_width_km: cfg.max_swath_width_km,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ThresholdJson {
    threshold: f32,
}

#[derive(Debug, Deserialize)]
struct SunGlintJson {
    angle_threshold_1: f32,
    angle_threshold_2: f32,
    nir_threshold: f32,
}

#[derive(Debug, Deserialize)]
struct SwathEndJson {
    rows: usize,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    channels: ChannelBindingsJson,
    mask_functions: Vec<String>,
    probability_levels: Vec<LevelJson>,
    day_sun_zenith_limit: f32,
    background: BackgroundJson,
    geometry: GeometryJson,
    water: Option<ThresholdJson>,
    sun_glint: Option<SunGlintJson>,
    vegetation: Option<ThresholdJson>,
    swath_edge: Option<ThresholdJson>,
    swath_end: Option<SwathEndJson>,
    cloud: Option<ThresholdJson>,
    static_masks: Option<Vec<String>>,
    output_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = ScanConfig::default();
        Self {
            channels: ChannelBindingsJson::default(),
            mask_functions: cfg
                .mask_functions
                .iter()
                .map(|kind| kind.name().to_owned())
                .collect(),
            probability_levels: Vec::new(),
            day_sun_zenith_limit: cfg.day_sun_zenith_limit,
            background: BackgroundJson::default(),
            geometry: GeometryJson::default(),
            water: None,
            sun_glint: None,
            vegetation: None,
            swath_edge: None,
            swath_end: None,
            cloud: None,
            static_masks: None,
            output_path: None,
        }
    }
}

fn resolve_config(config: Config) -> Result<(ScanConfig, Option<String>), String> {
    let mut out = ScanConfig::default();
    out.channels = config.channels.into();

    out.mask_functions = config
        .mask_functions
        .iter()
        .map(|name| {
            MaskKind::from_name(name).ok_or_else(|| format!("unknown mask function '{name}'"))
        })
        .collect::<Result<_, _>>()?;

    if !config.probability_levels.is_empty() {
        out.probability_levels = config
            .probability_levels
            .into_iter()
            .map(ProbabilityLevel::from)
            .collect();
    }
    out.day_sun_zenith_limit = config.day_sun_zenith_limit;

    out.background.side_lengths = config.background.side_lengths;
    out.background.min_count = config.background.min_count;
    out.background.min_fraction = config.background.min_fraction;
    out.background.mir_limit = config.background.mir_limit;
    out.background.delta_limit = config.background.delta_limit;

    out.geometry.ifov = config.geometry.ifov;
    out.geometry.satellite_altitude_km = config.geometry.satellite_altitude_km;
    out.geometry.max_swath_width_km = config.geometry.max_swath_width_km;

    if let Some(water) = config.water {
        out.water.threshold = water.threshold;
    }
    if let Some(glint) = config.sun_glint {
        out.sun_glint.angle_threshold_1 = glint.angle_threshold_1;
        out.sun_glint.angle_threshold_2 = glint.angle_threshold_2;
        out.sun_glint.nir_threshold = glint.nir_threshold;
    }
    if let Some(vegetation) = config.vegetation {
        out.vegetation.threshold = vegetation.threshold;
    }
    if let Some(edge) = config.swath_edge {
        out.swath_edge.threshold = edge.threshold;
    }
    if let Some(end) = config.swath_end {
        out.swath_end.rows = end.rows;
    }
    if let Some(cloud) = config.cloud {
        out.cloud.threshold = cloud.threshold;
    }
    out.static_masks = config.static_masks;

    Ok((out, config.output_path))
}

#[derive(Debug, Serialize)]
struct FireRecordJson {
    row: usize,
    col: usize,
    latitude: f32,
    longitude: f32,
    quality: &'static str,
    level: u8,
}

#[derive(Debug, Serialize)]
struct Output {
    fires: Vec<FireRecordJson>,
}

fn quality_name(quality: Quality) -> &'static str {
    match quality {
        Quality::NotFire => "not_fire",
        Quality::Unknown => "unknown",
        Quality::Low => "low",
        Quality::Medium => "medium",
        Quality::High => "high",
    }
}

fn to_output(fires: &FireMap) -> Output {
    Output {
        fires: fires
            .iter()
            .map(|(&(row, col), record)| FireRecordJson {
                row,
                col,
                latitude: record.latitude,
                longitude: record.longitude,
                quality: quality_name(record.quality),
                level: record.level,
            })
            .collect(),
    }
}

/// Builds a small vegetated daytime swath with two burning blocks, used to
/// exercise a configuration end to end without satellite input.
fn demo_scene(bindings: &ChannelBindings) -> Result<Scene, Box<dyn std::error::Error>> {
    let rows = 64;
    let cols = 64;
    let hot = |r: usize, c: usize| {
        (20..23).contains(&r) && (30..33).contains(&c)
            || (44..46).contains(&r) && (10..12).contains(&c)
    };

    let mut channels: HashMap<String, Grid<f32>> = HashMap::new();
    channels.insert(
        bindings.vis.clone(),
        Grid::from_fn(rows, cols, |r, c| 8.0 + ((r * 7 + c * 3) % 5) as f32)?,
    );
    channels.insert(
        bindings.nir.clone(),
        Grid::from_fn(rows, cols, |r, c| 28.0 + ((r * 3 + c * 5) % 7) as f32)?,
    );
    channels.insert(
        bindings.mir.clone(),
        Grid::from_fn(rows, cols, |r, c| {
            if hot(r, c) {
                335.0
            } else {
                298.0 + ((r + c) % 4) as f32
            }
        })?,
    );
    channels.insert(
        bindings.ir1.clone(),
        Grid::from_fn(rows, cols, |r, c| {
            if hot(r, c) {
                295.0
            } else {
                291.0 + ((r + 2 * c) % 3) as f32
            }
        })?,
    );
    channels.insert(
        bindings.ir2.clone(),
        Grid::from_fn(rows, cols, |r, c| 290.0 + ((2 * r + c) % 3) as f32)?,
    );
    channels.insert(
        bindings.sat_zenith.clone(),
        Grid::from_fn(rows, cols, |_, c| (c as f32 - 32.0).abs() * 1.5)?,
    );
    channels.insert(bindings.sun_zenith.clone(), Grid::filled(45.0, rows, cols)?);
    channels.insert(bindings.rel_azimuth.clone(), Grid::filled(90.0, rows, cols)?);
    channels.insert(
        bindings.latitude.clone(),
        Grid::from_fn(rows, cols, |r, _| 61.0 + r as f32 * 0.01)?,
    );
    channels.insert(
        bindings.longitude.clone(),
        Grid::from_fn(rows, cols, |_, c| 24.0 + c as f32 * 0.02)?,
    );

    let invalid = Grid::filled(false, rows, cols)?;
    Ok(Scene::from_channels(channels, invalid, bindings)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("firespot=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    let (scan_config, output_path) = resolve_config(config)?;
    scan_config.validate()?;

    if !cli.demo {
        println!(
            "config OK: {} probability levels, {} mask functions",
            scan_config.probability_levels.len(),
            scan_config.mask_functions.len()
        );
        return Ok(());
    }

    let scene = demo_scene(&scan_config.channels)?;
    let fires = HotspotScan::new(&scene, &scan_config)?.run()?;
    let json = serde_json::to_string_pretty(&to_output(&fires))?;

    match output_path {
        Some(path) => fs::write(path, json)?,
        None => println!("{json}"),
    }

    Ok(())
}
