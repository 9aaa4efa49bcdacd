//! Property-based tests for the impact estimator using proptest.
//!
//! These tests verify the estimator's invariants across the full range of
//! realistic asteroid sizes and impact velocities.

use approx::relative_eq;
use proptest::prelude::*;

use crate::impact::{estimate, ImpactError, ImpactResult};
use crate::test_utils::{assertions, fixtures};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Every field is finite and non-negative for valid input.
    #[test]
    fn prop_results_finite_non_negative(
        diameter in 0.01f64..100_000.0,
        velocity in 0.1f64..100.0,
    ) {
        let result = estimate(diameter, velocity).expect("valid input");
        assertions::assert_finite_non_negative(&result);
    }

    /// Energy matches ½mv² converted to megatons.
    #[test]
    fn prop_energy_matches_kinetic_energy(
        diameter in 1.0f64..50_000.0,
        velocity in 1.0f64..72.0,
    ) {
        let result = estimate(diameter, velocity).expect("valid input");
        let expected = assertions::expected_megatons(diameter, velocity);
        prop_assert!(
            relative_eq!(result.energy_megatons, expected, max_relative = 1e-12),
            "energy {} vs expected {}", result.energy_megatons, expected
        );
    }

    /// Larger diameter at fixed velocity strictly increases energy, crater and shockwave.
    #[test]
    fn prop_monotonic_in_diameter(
        diameter in 1.0f64..10_000.0,
        factor in 1.01f64..10.0,
        velocity in 1.0f64..72.0,
    ) {
        let small = estimate(diameter, velocity).expect("valid input");
        let large = estimate(diameter * factor, velocity).expect("valid input");
        prop_assert!(large.energy_megatons > small.energy_megatons);
        prop_assert!(large.crater_diameter_m > small.crater_diameter_m);
        prop_assert!(large.shockwave_radius_m > small.shockwave_radius_m);
        prop_assert!(large.seismic_magnitude > small.seismic_magnitude);
    }

    /// Higher velocity at fixed diameter strictly increases energy, crater and shockwave.
    #[test]
    fn prop_monotonic_in_velocity(
        diameter in 1.0f64..10_000.0,
        velocity in 1.0f64..50.0,
        delta in 0.1f64..20.0,
    ) {
        let slow = estimate(diameter, velocity).expect("valid input");
        let fast = estimate(diameter, velocity + delta).expect("valid input");
        prop_assert!(fast.energy_megatons > slow.energy_megatons);
        prop_assert!(fast.crater_diameter_m > slow.crater_diameter_m);
        prop_assert!(fast.shockwave_radius_m > slow.shockwave_radius_m);
    }

    /// Global score is a hard step at 1000 Mt.
    #[test]
    fn prop_global_effect_step(
        diameter in 1.0f64..5_000.0,
        velocity in 1.0f64..72.0,
    ) {
        let result = estimate(diameter, velocity).expect("valid input");
        assertions::assert_global_step(&result);
    }

    /// Energies chosen just either side of the threshold land on the right side.
    #[test]
    fn prop_threshold_neighbourhood(
        diameter in 100.0f64..2_000.0,
        offset in 1.0f64..50.0,
    ) {
        let below = estimate(diameter, fixtures::velocity_for_energy(diameter, 1000.0 - offset))
            .expect("valid input");
        let above = estimate(diameter, fixtures::velocity_for_energy(diameter, 1000.0 + offset))
            .expect("valid input");
        prop_assert_eq!(below.global_effect_score, 0.0);
        prop_assert!(above.global_effect_score > 10.0);
    }

    /// Identical inputs give bit-identical outputs.
    #[test]
    fn prop_deterministic(
        diameter in 0.01f64..100_000.0,
        velocity in 0.1f64..100.0,
    ) {
        let a = estimate(diameter, velocity).expect("valid input");
        let b = estimate(diameter, velocity).expect("valid input");
        assertions::assert_bit_identical(&a, &b);
    }

    /// Non-positive inputs never produce a result.
    #[test]
    fn prop_non_positive_rejected(
        bad in -1e6f64..=0.0,
        good in 0.1f64..100.0,
    ) {
        let is_invalid = |r: Result<ImpactResult, ImpactError>| {
            matches!(r, Err(ImpactError::InvalidInput { .. }))
        };
        prop_assert!(is_invalid(estimate(bad, good)));
        prop_assert!(is_invalid(estimate(good, bad)));
    }
}
