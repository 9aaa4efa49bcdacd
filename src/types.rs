//! Core physical constants, unit conversions and map coordinates.

use serde::{Deserialize, Serialize};

/// Physical constants (SI units)

/// Bulk density assumed for every impactor (kg/m³), a generic rocky body.
pub const ASTEROID_DENSITY: f64 = 3000.0;

/// Joules per megaton of TNT
pub const JOULES_PER_MEGATON: f64 = 4.184e15;

/// Joules per kiloton of TNT
pub const JOULES_PER_KILOTON: f64 = 4.184e12;

/// Meters per kilometer
pub const METERS_PER_KM: f64 = 1000.0;

/// Empirical scaling constants for the impact heuristic.
///
/// These are fixed heuristic values, not derived from a cratering model.
pub mod scaling {
    /// Crater diameter coefficient (km per megaton^0.25).
    pub const CRATER_COEFFICIENT: f64 = 1.8;

    /// Yield exponent for crater diameter.
    pub const CRATER_EXPONENT: f64 = 0.25;

    /// Shockwave radius coefficient (km per kiloton^(1/3)).
    pub const SHOCK_COEFFICIENT: f64 = 0.35;

    /// Yield exponent for shockwave radius (cube-root scaling).
    pub const SHOCK_EXPONENT: f64 = 1.0 / 3.0;

    /// Seismic magnitude coefficient.
    pub const SEISMIC_COEFFICIENT: f64 = 50.0;

    /// Yield exponent for seismic magnitude.
    pub const SEISMIC_EXPONENT: f64 = 0.17;

    /// Energy above which the global-effect score becomes nonzero (megatons).
    pub const GLOBAL_EFFECT_THRESHOLD_MT: f64 = 1000.0;

    /// Divisor turning megatons into the global-effect score.
    pub const GLOBAL_EFFECT_DIVISOR: f64 = 100.0;
}

/// Mass of a sphere of the given diameter at [`ASTEROID_DENSITY`] (kg).
pub fn sphere_mass(diameter_m: f64) -> f64 {
    (4.0 / 3.0) * std::f64::consts::PI * (diameter_m / 2.0).powi(3) * ASTEROID_DENSITY
}

/// Convert km/s to m/s
pub fn km_s_to_m_s(velocity_km_s: f64) -> f64 {
    velocity_km_s * METERS_PER_KM
}

/// Convert joules to megatons of TNT
pub fn joules_to_megatons(joules: f64) -> f64 {
    joules / JOULES_PER_MEGATON
}

/// Convert joules to kilotons of TNT
pub fn joules_to_kilotons(joules: f64) -> f64 {
    joules / JOULES_PER_KILOTON
}

/// A point on the map in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    /// Latitude, degrees north
    pub lat: f64,
    /// Longitude, degrees east
    pub lng: f64,
}

impl LatLng {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Location text as shown in the info panel ("lat, lng" at 2 dp).
    pub fn display(&self) -> String {
        format!("{:.2}, {:.2}", self.lat, self.lng)
    }
}

/// A request for the map to recenter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct MapView {
    pub center: LatLng,
    pub zoom: u8,
}

/// Zoom level used when jumping to a random impact site.
pub const RANDOM_IMPACT_ZOOM: u8 = 4;

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sphere_mass_one_km() {
        // (4/3)π(500)³ × 3000 ≈ 1.5708e12 kg
        assert_relative_eq!(sphere_mass(1000.0), 1.5707963e12, max_relative = 1e-6);
    }

    #[test]
    fn test_megaton_kiloton_ratio() {
        let joules = 4.184e18;
        assert_relative_eq!(joules_to_megatons(joules), 1000.0, max_relative = 1e-12);
        assert_relative_eq!(joules_to_kilotons(joules), 1_000_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_latlng_display() {
        assert_eq!(LatLng::new(12.3456, -98.7).display(), "12.35, -98.70");
    }
}
