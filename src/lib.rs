//! Impact Sim - Asteroid Impact Effect Estimator
//!
//! A library crate estimating the effects of an asteroid striking a point
//! on a world map, plus the shell that drives it from a near-Earth object
//! catalog.

pub mod catalog;
pub mod config;
pub mod effects;
pub mod impact;
pub mod overlay;
pub mod simulation;
pub mod types;

#[cfg(test)]
pub mod test_utils;

#[cfg(test)]
mod proptest_impact;
