//! Map overlay geometry for an impact.
//!
//! Each simulation produces a marker, a crater circle and a shockwave
//! circle. The caller holds at most one overlay at a time; a new impact
//! replaces the previous one as a unit.

use serde::Serialize;

use crate::impact::ImpactResult;
use crate::types::LatLng;

pub const CRATER_COLOR: &str = "red";
pub const CRATER_FILL_OPACITY: f64 = 0.3;
pub const SHOCKWAVE_COLOR: &str = "yellow";
pub const SHOCKWAVE_FILL_OPACITY: f64 = 0.25;

/// A filled circle drawn on the map.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct OverlayCircle {
    pub center: LatLng,
    /// Radius on the ground (meters)
    pub radius_m: f64,
    pub color: &'static str,
    pub fill_opacity: f64,
}

/// Marker plus the two effect circles for one impact.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ImpactOverlay {
    pub marker: LatLng,
    pub crater: OverlayCircle,
    pub shockwave: OverlayCircle,
}

impl ImpactOverlay {
    /// Build overlay geometry from estimator output.
    ///
    /// The crater figure is a diameter, so the circle uses half of it. The
    /// shockwave figure is already a radius.
    pub fn from_result(at: LatLng, result: &ImpactResult) -> Self {
        Self {
            marker: at,
            crater: OverlayCircle {
                center: at,
                radius_m: result.crater_diameter_m / 2.0,
                color: CRATER_COLOR,
                fill_opacity: CRATER_FILL_OPACITY,
            },
            shockwave: OverlayCircle {
                center: at,
                radius_m: result.shockwave_radius_m,
                color: SHOCKWAVE_COLOR,
                fill_opacity: SHOCKWAVE_FILL_OPACITY,
            },
        }
    }
}

/// Caller-held slot for the overlay currently on the map.
#[derive(Clone, Debug, Default)]
pub struct OverlayState {
    current: Option<ImpactOverlay>,
}

impl OverlayState {
    pub fn current(&self) -> Option<&ImpactOverlay> {
        self.current.as_ref()
    }

    /// Install `overlay`, returning the one it displaced so it can be removed.
    pub fn replace(&mut self, overlay: ImpactOverlay) -> Option<ImpactOverlay> {
        self.current.replace(overlay)
    }

    /// Remove the current overlay, if any.
    pub fn clear(&mut self) -> Option<ImpactOverlay> {
        self.current.take()
    }
}
