//! Impact simulation shell.
//!
//! Ties the pieces together the way the map page does:
//! 1. pick an asteroid from the catalog (first entry by default)
//! 2. on a click (or a random point), draw a velocity and run the estimator
//! 3. replace the overlay on the map and play the effect plan
//! 4. report the numbers for the info panel
//!
//! Reset clears the overlay and blanks the panel.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use tracing::{info, warn};

use crate::catalog::{CatalogState, NeoRecord};
use crate::config::{ConfigError, SimConfig};
use crate::effects::{EffectPlan, ImpactEffects};
use crate::impact::{estimate, to_fixed, ImpactError, ImpactResult};
use crate::overlay::{ImpactOverlay, OverlayState};
use crate::types::{LatLng, MapView, RANDOM_IMPACT_ZOOM};

/// Text shown in an empty info panel field.
pub const BLANK_FIELD: &str = "--";

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimulationError {
    #[error("asteroid data not loaded")]
    CatalogNotLoaded,

    #[error("no asteroid selected")]
    NoSelection,

    #[error("unknown asteroid id {0:?}")]
    UnknownAsteroid(String),

    #[error(transparent)]
    Impact(#[from] ImpactError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Everything produced by one simulated impact.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImpactReport {
    pub asteroid_id: String,
    pub asteroid_name: String,
    pub location: LatLng,
    /// Diameter used for the estimate (whole meters)
    pub diameter_m: f64,
    /// Velocity used for the estimate (km/s, one decimal)
    pub velocity_km_s: f64,
    pub result: ImpactResult,
    pub overlay: ImpactOverlay,
    /// Set when the map should recenter on the impact
    pub view: Option<MapView>,
}

impl ImpactReport {
    /// Info panel text at display precision.
    pub fn panel(&self) -> PanelText {
        let display = self.result.display();
        PanelText {
            name: self.asteroid_name.clone(),
            location: self.location.display(),
            diameter: to_fixed(self.diameter_m, 0),
            velocity: to_fixed(self.velocity_km_s, 1),
            energy: display.energy,
            crater: display.crater,
            shock: display.shock,
            seismic: display.seismic,
            global: display.global,
        }
    }
}

/// Info panel fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PanelText {
    pub name: String,
    pub location: String,
    pub diameter: String,
    pub velocity: String,
    pub energy: String,
    pub crater: String,
    pub shock: String,
    pub seismic: String,
    pub global: String,
}

impl PanelText {
    /// Panel after a reset: every field shows `--`.
    pub fn blank() -> Self {
        let b = || BLANK_FIELD.to_string();
        Self {
            name: b(),
            location: b(),
            diameter: b(),
            velocity: b(),
            energy: b(),
            crater: b(),
            shock: b(),
            seismic: b(),
            global: b(),
        }
    }
}

/// Interactive impact simulator.
pub struct Simulator<E: ImpactEffects> {
    config: SimConfig,
    catalog: CatalogState,
    selected: Option<String>,
    overlay: OverlayState,
    effects: E,
    plan: EffectPlan,
    rng: StdRng,
}

impl<E: ImpactEffects> Simulator<E> {
    pub fn new(
        config: SimConfig,
        catalog: CatalogState,
        effects: E,
    ) -> Result<Self, SimulationError> {
        config.validate()?;

        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let selected = catalog
            .catalog()
            .and_then(|c| c.first())
            .map(|r| r.id.clone());

        Ok(Self {
            config,
            catalog,
            selected,
            overlay: OverlayState::default(),
            effects,
            plan: EffectPlan::standard(),
            rng,
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn catalog(&self) -> &CatalogState {
        &self.catalog
    }

    pub fn effects(&self) -> &E {
        &self.effects
    }

    /// Overlay currently drawn, if any.
    pub fn overlay(&self) -> Option<&ImpactOverlay> {
        self.overlay.current()
    }

    /// Currently selected asteroid.
    pub fn selected(&self) -> Option<&NeoRecord> {
        let catalog = self.catalog.catalog()?;
        catalog.find(self.selected.as_deref()?)
    }

    /// Select an asteroid by catalog id.
    pub fn select(&mut self, id: &str) -> Result<(), SimulationError> {
        let catalog = self
            .catalog
            .catalog()
            .ok_or(SimulationError::CatalogNotLoaded)?;
        if catalog.find(id).is_none() {
            return Err(SimulationError::UnknownAsteroid(id.to_string()));
        }
        self.selected = Some(id.to_string());
        Ok(())
    }

    /// Simulate an impact of the selected asteroid at `at` with a random velocity.
    pub fn simulate(&mut self, at: LatLng) -> Result<ImpactReport, SimulationError> {
        let velocity = self.random_velocity();
        self.simulate_with_velocity(at, velocity)
    }

    /// Simulate an impact at `at` with a given velocity (km/s).
    ///
    /// The velocity is rounded to 0.1 km/s first, so the panel shows exactly
    /// the value the estimate used.
    pub fn simulate_with_velocity(
        &mut self,
        at: LatLng,
        velocity_km_s: f64,
    ) -> Result<ImpactReport, SimulationError> {
        let velocity_km_s = round_velocity(velocity_km_s);
        let asteroid = self.current_asteroid()?.clone();
        let diameter_m = asteroid.impact_diameter_m();

        let result = estimate(diameter_m, velocity_km_s).inspect_err(|err| {
            warn!("Cannot simulate impact of {}: {err}", asteroid.name);
        })?;

        let overlay = ImpactOverlay::from_result(at, &result);
        self.overlay.replace(overlay.clone());
        self.effects.play(at, &self.plan);

        info!(
            "Impact of {} at {}: {} m at {:.1} km/s, {}",
            asteroid.name,
            at.display(),
            diameter_m,
            velocity_km_s,
            result
        );

        Ok(ImpactReport {
            asteroid_id: asteroid.id,
            asteroid_name: asteroid.name,
            location: at,
            diameter_m,
            velocity_km_s,
            result,
            overlay,
            view: None,
        })
    }

    /// Simulate at a uniformly random point and ask the map to recenter there.
    pub fn random_impact(&mut self) -> Result<ImpactReport, SimulationError> {
        let at = self.random_location();
        let mut report = self.simulate(at)?;
        report.view = Some(MapView {
            center: at,
            zoom: RANDOM_IMPACT_ZOOM,
        });
        Ok(report)
    }

    /// Remove the overlay and return the blank panel.
    pub fn reset(&mut self) -> PanelText {
        if self.overlay.clear().is_some() {
            info!("Impact overlay cleared");
        }
        PanelText::blank()
    }

    fn current_asteroid(&self) -> Result<&NeoRecord, SimulationError> {
        let catalog = self
            .catalog
            .catalog()
            .ok_or(SimulationError::CatalogNotLoaded)?;
        let id = self.selected.as_deref().ok_or(SimulationError::NoSelection)?;
        catalog
            .find(id)
            .ok_or_else(|| SimulationError::UnknownAsteroid(id.to_string()))
    }

    /// Uniform in [min, min + span), rounded to 0.1 km/s.
    fn random_velocity(&mut self) -> f64 {
        let u: f64 = self.rng.gen_range(0.0..1.0);
        round_velocity(u * self.config.velocity_span_km_s + self.config.velocity_min_km_s)
    }

    fn random_location(&mut self) -> LatLng {
        let lat = self.rng.gen_range(0.0..1.0) * 180.0 - 90.0;
        let lng = self.rng.gen_range(0.0..1.0) * 360.0 - 180.0;
        LatLng::new(lat, lng)
    }
}

/// Velocities are quoted and used at 0.1 km/s resolution.
fn round_velocity(velocity_km_s: f64) -> f64 {
    (velocity_km_s * 10.0).round() / 10.0
}
