//! Impact effect estimation.
//!
//! Turns an asteroid's diameter and impact velocity into a handful of
//! headline numbers: TNT-equivalent energy, crater diameter, shockwave
//! radius, a Richter-like seismic scalar and a global-effect score.
//!
//! The scaling laws are simplified heuristics (see [`crate::types::scaling`]),
//! not a validated impact model. They are reproduced exactly so results match
//! the reference output digit for digit at display precision.

use std::fmt;

use serde::Serialize;

use crate::types::{
    joules_to_kilotons, joules_to_megatons, km_s_to_m_s, scaling, sphere_mass, METERS_PER_KM,
};

/// Error returned when impact inputs cannot produce meaningful results.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ImpactError {
    #[error("invalid input: {parameter} = {value} ({reason})")]
    InvalidInput {
        parameter: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Validated estimator input. Only constructible through [`ImpactInput::new`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ImpactInput {
    /// Estimated maximum diameter (meters)
    diameter_m: f64,
    /// Impact velocity (km/s)
    velocity_km_s: f64,
}

impl ImpactInput {
    /// Validate both values are finite and strictly positive.
    pub fn new(diameter_m: f64, velocity_km_s: f64) -> Result<Self, ImpactError> {
        check_positive("diameter_m", diameter_m)?;
        check_positive("velocity_km_s", velocity_km_s)?;
        Ok(Self {
            diameter_m,
            velocity_km_s,
        })
    }

    pub fn diameter_m(&self) -> f64 {
        self.diameter_m
    }

    pub fn velocity_km_s(&self) -> f64 {
        self.velocity_km_s
    }

    /// Kinetic energy of the impactor (joules).
    pub fn kinetic_energy(&self) -> f64 {
        let mass = sphere_mass(self.diameter_m);
        0.5 * mass * km_s_to_m_s(self.velocity_km_s).powi(2)
    }

    /// Run the estimator on this input.
    ///
    /// Inputs are checked again here so no path yields NaN. Beyond that it
    /// fails only if the energy overflows `f64`, which needs absurd inputs
    /// (diameters around 1e100 m).
    pub fn estimate(&self) -> Result<ImpactResult, ImpactError> {
        check_positive("diameter_m", self.diameter_m)?;
        check_positive("velocity_km_s", self.velocity_km_s)?;

        let joules = self.kinetic_energy();
        if !joules.is_finite() {
            return Err(ImpactError::InvalidInput {
                parameter: "kinetic_energy",
                value: joules,
                reason: "energy overflows",
            });
        }

        let megatons = joules_to_megatons(joules);

        let crater_diameter_m =
            scaling::CRATER_COEFFICIENT * megatons.powf(scaling::CRATER_EXPONENT) * METERS_PER_KM;
        let shockwave_radius_m = scaling::SHOCK_COEFFICIENT
            * joules_to_kilotons(joules).powf(scaling::SHOCK_EXPONENT)
            * METERS_PER_KM;
        let seismic_magnitude =
            scaling::SEISMIC_COEFFICIENT * megatons.powf(scaling::SEISMIC_EXPONENT);

        // Step threshold, no smoothing.
        let global_effect_score = if megatons > scaling::GLOBAL_EFFECT_THRESHOLD_MT {
            megatons / scaling::GLOBAL_EFFECT_DIVISOR
        } else {
            0.0
        };

        Ok(ImpactResult {
            energy_megatons: megatons,
            crater_diameter_m,
            shockwave_radius_m,
            seismic_magnitude,
            global_effect_score,
        })
    }
}

fn check_positive(parameter: &'static str, value: f64) -> Result<(), ImpactError> {
    if !value.is_finite() {
        return Err(ImpactError::InvalidInput {
            parameter,
            value,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(ImpactError::InvalidInput {
            parameter,
            value,
            reason: "must be positive",
        });
    }
    Ok(())
}

/// Estimated impact effects. All fields are at full precision.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ImpactResult {
    /// Kinetic energy in megatons of TNT
    pub energy_megatons: f64,
    /// Crater diameter (meters)
    pub crater_diameter_m: f64,
    /// Shockwave radius (meters)
    pub shockwave_radius_m: f64,
    /// Richter-like scalar; not a calibrated seismological value
    pub seismic_magnitude: f64,
    /// Zero at or below 1000 Mt
    pub global_effect_score: f64,
}

impl ImpactResult {
    /// Returns true if the global-effect threshold was crossed.
    pub fn has_global_effect(&self) -> bool {
        self.global_effect_score > 0.0
    }

    /// Format at reference display precision.
    pub fn display(&self) -> ImpactDisplay {
        ImpactDisplay {
            energy: to_fixed(self.energy_megatons, 2),
            crater: to_fixed(self.crater_diameter_m, 0),
            shock: to_fixed(self.shockwave_radius_m, 0),
            seismic: to_fixed(self.seismic_magnitude, 0),
            global: to_fixed(self.global_effect_score, 0),
        }
    }
}

impl fmt::Display for ImpactResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = self.display();
        write!(
            f,
            "energy {} Mt, crater {} m, shockwave {} m, seismic {}, global {}",
            d.energy, d.crater, d.shock, d.seismic, d.global
        )
    }
}

/// Impact results rendered as display strings.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImpactDisplay {
    /// Megatons, 2 decimal places
    pub energy: String,
    /// Meters, integral
    pub crater: String,
    /// Meters, integral
    pub shock: String,
    pub seismic: String,
    pub global: String,
}

/// Estimate impact effects for a sphere of `diameter_m` meters hitting at
/// `velocity_km_s` kilometers per second.
///
/// Deterministic and side-effect free. Non-positive or non-finite inputs are
/// rejected with [`ImpactError::InvalidInput`] rather than producing NaN.
///
/// # Example
/// ```
/// let result = impact_sim::impact::estimate(1000.0, 20.0).unwrap();
/// assert!(result.has_global_effect());
/// ```
pub fn estimate(diameter_m: f64, velocity_km_s: f64) -> Result<ImpactResult, ImpactError> {
    ImpactInput::new(diameter_m, velocity_km_s)?.estimate()
}

/// Fractional digits needed to print any finite `f64` exactly.
const EXACT_FRACTION_DIGITS: usize = 1100;

/// Format `value` with `digits` decimals, breaking exact ties upward.
///
/// Rust's float formatting sends exact ties to even (`2.5` → `"2"`); the
/// reference display picks the larger magnitude (`"3"`). The tie is judged on
/// the exact binary value, so `0.015` (really 0.01499…) still gives `"0.01"`.
pub fn to_fixed(value: f64, digits: usize) -> String {
    let formatted = format!("{value:.digits$}");
    if !value.is_finite() || digits >= EXACT_FRACTION_DIGITS {
        return formatted;
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let Some((int_part, frac_part)) = exact.split_once('.') else {
        return formatted;
    };
    let tail = &frac_part[digits..];
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    if !is_tie {
        return formatted;
    }

    // Truncated magnitude plus one unit in the last kept place.
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part[..digits].bytes())
        .collect();
    let mut carry = true;
    for d in kept.iter_mut().rev() {
        if !carry {
            break;
        }
        if *d == b'9' {
            *d = b'0';
        } else {
            *d += 1;
            carry = false;
        }
    }
    if carry {
        kept.insert(0, b'1');
    }

    let split = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(kept[..split].iter().map(|&b| b as char));
    if digits > 0 {
        out.push('.');
        out.extend(kept[split..].iter().map(|&b| b as char));
    }
    out
}
