//! Per-run scan configuration.
//!
//! One nested, read-only record drives a whole run. Defaults carry
//! plausible values for a polar-orbiting AVHRR-class imager; operational
//! deployments override them from their configuration files (the CLI ships
//! JSON mirrors of these structs).

use crate::background::BackgroundConfig;
use crate::geometry::GeometryConfig;
use crate::mask::functions::{
    CloudConfig, SunGlintConfig, SwathEdgeConfig, SwathEndConfig, VegetationConfig, WaterConfig,
};
use crate::mask::MaskKind;
use crate::scene::ChannelBindings;
use crate::search::{ProbabilityLevel, Thresholds};
use crate::util::{FireSpotError, FireSpotResult};

/// Static per-run configuration.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// Reader dataset names for each channel role.
    pub channels: ChannelBindings,
    /// Mask functions applied by the pipeline, in order.
    pub mask_functions: Vec<MaskKind>,
    /// Threshold tiers, scanned from most to least confident.
    pub probability_levels: Vec<ProbabilityLevel>,
    /// Solar zenith angle below which a pixel counts as daytime, degrees.
    pub day_sun_zenith_limit: f32,
    /// Background sampling parameters.
    pub background: BackgroundConfig,
    /// Footprint model constants.
    pub geometry: GeometryConfig,
    /// Water test parameters.
    pub water: WaterConfig,
    /// Sun-glint test parameters.
    pub sun_glint: SunGlintConfig,
    /// Vegetation-fraction test parameters.
    pub vegetation: VegetationConfig,
    /// Swath-edge cutoff.
    pub swath_edge: SwathEdgeConfig,
    /// Swath-end cutoff.
    pub swath_end: SwathEndConfig,
    /// Derived cloud test parameters.
    pub cloud: CloudConfig,
    /// Names of static geographic masks the injected filter consults.
    /// `None` disables static-mask filtering entirely.
    pub static_masks: Option<Vec<String>>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            channels: ChannelBindings::default(),
            mask_functions: vec![
                MaskKind::Cloud,
                MaskKind::Water,
                MaskKind::SunGlint,
                MaskKind::VegetationFraction,
                MaskKind::SwathEdge,
                MaskKind::SwathEnd,
            ],
            probability_levels: vec![
                ProbabilityLevel {
                    level: 3,
                    day: Thresholds {
                        temp_mir: 320.0,
                        delta_mir_ir: 15.0,
                    },
                    night: Thresholds {
                        temp_mir: 312.0,
                        delta_mir_ir: 10.0,
                    },
                },
                ProbabilityLevel {
                    level: 2,
                    day: Thresholds {
                        temp_mir: 315.0,
                        delta_mir_ir: 12.0,
                    },
                    night: Thresholds {
                        temp_mir: 308.0,
                        delta_mir_ir: 8.0,
                    },
                },
                ProbabilityLevel {
                    level: 1,
                    day: Thresholds {
                        temp_mir: 310.0,
                        delta_mir_ir: 9.0,
                    },
                    night: Thresholds {
                        temp_mir: 305.0,
                        delta_mir_ir: 6.0,
                    },
                },
            ],
            day_sun_zenith_limit: 85.0,
            background: BackgroundConfig::default(),
            geometry: GeometryConfig::default(),
            water: WaterConfig::default(),
            sun_glint: SunGlintConfig::default(),
            vegetation: VegetationConfig::default(),
            swath_edge: SwathEdgeConfig::default(),
            swath_end: SwathEndConfig::default(),
            cloud: CloudConfig::default(),
            static_masks: None,
        }
    }
}

impl ScanConfig {
    /// Checks the configuration for unusable values before a run.
    pub fn validate(&self) -> FireSpotResult<()> {
        if self.probability_levels.is_empty() {
            return Err(FireSpotError::InvalidConfig(
                "at least one probability level is required",
            ));
        }
        if !(0.0..=1.0).contains(&self.background.min_fraction) {
            return Err(FireSpotError::InvalidConfig(
                "background min_fraction must lie in [0, 1]",
            ));
        }
        if self
            .background
            .side_lengths
            .windows(2)
            .any(|pair| pair[0] >= pair[1])
        {
            return Err(FireSpotError::InvalidConfig(
                "background side lengths must be strictly ascending",
            ));
        }
        Ok(())
    }
}
