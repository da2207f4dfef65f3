//! FireSpot detects active forest-fire hotspots in satellite imaging
//! swaths using a multi-channel thermal-anomaly algorithm after Planck
//! et al.
//!
//! The crate covers the masking pipeline, the multi-level candidate
//! search, the footprint-aware static-mask filter and the background
//! qualification logic. Reading satellite data, resampling auxiliary
//! rasters and persisting results are the caller's concern and enter
//! through the `Scene` input contract and the `AuxMaskSource` /
//! `StaticMaskFilter` traits. Per-candidate qualification parallelizes
//! via the optional `rayon` feature.

pub mod background;
pub mod config;
pub mod geometry;
pub mod grid;
pub mod mask;
pub mod qualify;
pub mod scene;
pub mod search;
pub(crate) mod trace;
pub mod util;

pub use background::{sample_background, BackgroundConfig, BackgroundSample};
pub use config::ScanConfig;
pub use geometry::{footprint_size, Footprint, GeometryConfig};
pub use grid::Grid;
pub use mask::statics::{FootprintSample, StaticMaskFilter};
pub use mask::{build_mask, exclusion_mask, AuxMaskKind, AuxMaskSource, MaskContext, MaskKind};
pub use qualify::{classify, Quality};
pub use scene::{ChannelBindings, Scene};
pub use search::{FireMap, FireRecord, HotspotScan, ProbabilityLevel, Thresholds};
pub use util::{FireSpotError, FireSpotResult};
