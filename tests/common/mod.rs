//! Common test utilities for integration tests.
#![allow(dead_code)]

use std::path::PathBuf;

use impact_sim::catalog::{CatalogState, FileCatalog};
use impact_sim::config::SimConfig;
use impact_sim::effects::{EffectCue, EffectError, ImpactEffects};
use impact_sim::types::LatLng;

/// Path to the saved neo/browse response used across tests.
pub fn sample_catalog_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/neo_browse_sample.json")
}

/// Catalog loaded from the sample file.
pub fn sample_catalog() -> CatalogState {
    CatalogState::load(&FileCatalog::new(sample_catalog_path()))
}

/// Default config with a fixed seed.
pub fn seeded_config(seed: u64) -> SimConfig {
    SimConfig {
        seed: Some(seed),
        ..SimConfig::default()
    }
}

/// Records every cue played, with the impact location.
#[derive(Default)]
pub struct RecordingEffects {
    pub played: Vec<(LatLng, EffectCue)>,
}

impl ImpactEffects for RecordingEffects {
    fn play_cue(&mut self, at: LatLng, cue: &EffectCue) -> Result<(), EffectError> {
        self.played.push((at, *cue));
        Ok(())
    }
}

/// Energy in megatons, straight from ½mv² with a 3000 kg/m³ sphere.
pub fn megatons(diameter_m: f64, velocity_km_s: f64) -> f64 {
    let radius = diameter_m / 2.0;
    let mass = 4.0 / 3.0 * std::f64::consts::PI * radius.powi(3) * 3000.0;
    let v = velocity_km_s * 1000.0;
    0.5 * mass * v.powi(2) / 4.184e15
}
