//! Pixel footprint model.
//!
//! Off-nadir pixels cover a larger, distorted ground area. The static-mask
//! filter checks candidates against geographic zones with that footprint
//! instead of a point sample, so it needs the along- and across-track
//! extent at each candidate's viewing geometry.

/// Instrument and orbit constants for the footprint model.
#[derive(Clone, Copy, Debug)]
pub struct GeometryConfig {
    /// Instantaneous field of view, radians.
    pub ifov: f32,
    /// Satellite altitude, kilometers.
    pub satellite_altitude_km: f32,
    /// Full swath width on the ground, kilometers.
    pub max_swath_width_km: f32,
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            ifov: 1.3e-3,
            satellite_altitude_km: 833.0,
            max_swath_width_km: 2900.0,
        }
    }
}

/// Ground extent of one sensor pixel, kilometers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Footprint {
    /// Extent perpendicular to the scan direction.
    pub along_km: f32,
    /// Extent in the scan direction.
    pub across_km: f32,
}

/// Footprint size at the given satellite zenith angle.
///
/// Flat-swath slant-range model: the along-track extent grows with the
/// slant range (`h / cos θ`), the across-track extent picks up another
/// `1 / cos θ` from the oblique intersection with the ground. The zenith
/// angle is clamped to the viewing angle at the swath edge implied by
/// `max_swath_width_km`, which bounds the distortion at extreme scan
/// positions.
pub fn footprint_size(sat_zenith_deg: f32, cfg: &GeometryConfig) -> Footprint {
    let edge = (0.5 * cfg.max_swath_width_km / cfg.satellite_altitude_km).atan();
    let zenith = sat_zenith_deg.abs().to_radians().min(edge);
    let slant_km = cfg.satellite_altitude_km / zenith.cos();
    let along_km = slant_km * cfg.ifov;
    let across_km = along_km / zenith.cos();
    Footprint {
        along_km,
        across_km,
    }
}

#[cfg(test)]
mod tests {
    use super::{footprint_size, GeometryConfig};

    #[test]
    fn nadir_footprint_is_square() {
        let cfg = GeometryConfig::default();
        let fp = footprint_size(0.0, &cfg);
        let nadir = cfg.satellite_altitude_km * cfg.ifov;
        assert!((fp.along_km - nadir).abs() < 1e-4);
        assert!((fp.across_km - nadir).abs() < 1e-4);
    }

    #[test]
    fn footprint_grows_off_nadir() {
        let cfg = GeometryConfig::default();
        let near = footprint_size(10.0, &cfg);
        let far = footprint_size(45.0, &cfg);
        assert!(far.along_km > near.along_km);
        assert!(far.across_km > near.across_km);
        // Across-track stretches faster than along-track.
        assert!(far.across_km / far.along_km > near.across_km / near.along_km);
    }

    #[test]
    fn footprint_is_bounded_by_swath_edge() {
        let cfg = GeometryConfig::default();
        let edge_deg = (0.5 * cfg.max_swath_width_km / cfg.satellite_altitude_km)
            .atan()
            .to_degrees();
        let at_edge = footprint_size(edge_deg, &cfg);
        let beyond = footprint_size(89.0, &cfg);
        assert!((beyond.along_km - at_edge.along_km).abs() < 1e-4);
        assert!((beyond.across_km - at_edge.across_km).abs() < 1e-4);
    }
}
