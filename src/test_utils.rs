//! Test utilities for impact estimation tests.
//!
//! Provides fixtures for typical impactors and assertions for the
//! invariants every estimate must satisfy.

use crate::catalog::{NeoCatalog, NeoRecord};
use crate::impact::ImpactResult;
use crate::types::{joules_to_megatons, sphere_mass};

/// Fixtures for creating test impactors.
pub mod fixtures {
    use super::*;

    /// Velocity (km/s) giving exactly `megatons` for a given diameter.
    ///
    /// E = ½ m v²  →  v = sqrt(2E / m)
    pub fn velocity_for_energy(diameter_m: f64, megatons: f64) -> f64 {
        let joules = megatons * crate::types::JOULES_PER_MEGATON;
        (2.0 * joules / sphere_mass(diameter_m)).sqrt() / 1000.0
    }

    /// Chelyabinsk-class airburst: ~20 m at ~19 km/s.
    pub fn chelyabinsk() -> (f64, f64) {
        (20.0, 19.0)
    }

    /// Tunguska-class: ~50 m at ~20 km/s.
    pub fn tunguska() -> (f64, f64) {
        (50.0, 20.0)
    }

    /// Chicxulub-class: ~10 km at ~20 km/s.
    pub fn chicxulub() -> (f64, f64) {
        (10_000.0, 20.0)
    }

    /// A small catalog with one record per size class.
    pub fn catalog() -> NeoCatalog {
        NeoCatalog::new(vec![
            NeoRecord::new("3542519", "(2010 PK9)", 20.4),
            NeoRecord::new("2000433", "433 Eros (A898 PA)", 49208.0),
            NeoRecord::new("2099942", "99942 Apophis (2004 MN4)", 370.0),
        ])
    }
}

/// Assertions for verifying estimator invariants.
pub mod assertions {
    use super::*;

    /// Energy of an input in megatons, computed independently of the estimator.
    pub fn expected_megatons(diameter_m: f64, velocity_km_s: f64) -> f64 {
        let v = velocity_km_s * 1000.0;
        joules_to_megatons(0.5 * sphere_mass(diameter_m) * v * v)
    }

    /// All five fields as an array, in declaration order.
    pub fn fields(result: &ImpactResult) -> [f64; 5] {
        [
            result.energy_megatons,
            result.crater_diameter_m,
            result.shockwave_radius_m,
            result.seismic_magnitude,
            result.global_effect_score,
        ]
    }

    /// Assert every field is finite and non-negative.
    ///
    /// # Panics
    /// Panics naming the first offending field.
    pub fn assert_finite_non_negative(result: &ImpactResult) {
        let names = ["energy", "crater", "shockwave", "seismic", "global"];
        for (name, value) in names.iter().zip(fields(result)) {
            assert!(
                value.is_finite() && value >= 0.0,
                "{name} should be finite and non-negative, got {value}"
            );
        }
    }

    /// Assert two results are bit-for-bit identical.
    pub fn assert_bit_identical(a: &ImpactResult, b: &ImpactResult) {
        for (x, y) in fields(a).iter().zip(fields(b)) {
            assert_eq!(x.to_bits(), y.to_bits(), "{x} and {y} differ in bits");
        }
    }

    /// Assert the global score follows the step threshold exactly.
    pub fn assert_global_step(result: &ImpactResult) {
        if result.energy_megatons > 1000.0 {
            assert_eq!(result.global_effect_score, result.energy_megatons / 100.0);
        } else {
            assert_eq!(result.global_effect_score, 0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::impact::estimate;
    use approx::assert_relative_eq;

    #[test]
    fn test_velocity_for_energy_round_trips() {
        let v = fixtures::velocity_for_energy(300.0, 1500.0);
        assert_relative_eq!(
            assertions::expected_megatons(300.0, v),
            1500.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_size_classes_order_by_energy() {
        let e = |(d, v): (f64, f64)| assertions::expected_megatons(d, v);
        let small = e(fixtures::chelyabinsk());
        let medium = e(fixtures::tunguska());
        let large = e(fixtures::chicxulub());
        assert!(small < medium && medium < large);
        // Chicxulub-class is in the tens of millions of megatons
        assert!(large > 1e7, "got {large}");
    }

    #[test]
    fn test_fixture_results_satisfy_invariants() {
        for (d, v) in [fixtures::chelyabinsk(), fixtures::tunguska(), fixtures::chicxulub()] {
            let result = estimate(d, v).expect("valid fixture");
            assertions::assert_finite_non_negative(&result);
            assertions::assert_global_step(&result);
        }
    }

    #[test]
    fn test_fixture_catalog_ids_unique() {
        let catalog = fixtures::catalog();
        let mut ids: Vec<&str> = catalog.records().iter().map(|r| r.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), catalog.len());
    }
}
