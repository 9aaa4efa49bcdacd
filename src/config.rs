//! Runtime settings for the impact simulator.
//!
//! Layered the usual way: built-in defaults, then environment variables,
//! then command-line flags (applied by the binary).

use std::env;
use std::time::Duration;

/// NASA's public rate-limited API key.
pub const DEMO_API_KEY: &str = "DEMO_KEY";

/// NeoWs "browse" endpoint returning a page of near-Earth objects.
pub const DEFAULT_CATALOG_URL: &str = "https://api.nasa.gov/neo/rest/v1/neo/browse";

pub const ENV_API_KEY: &str = "NASA_API_KEY";
pub const ENV_CATALOG_URL: &str = "NEO_CATALOG_URL";
pub const ENV_SEED: &str = "IMPACT_SEED";

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid {name}: {value:?}")]
    InvalidEnv { name: &'static str, value: String },

    #[error(
        "invalid velocity range: min {min} km/s, span {span} km/s \
         (must be finite, min > 0, span >= 0)"
    )]
    InvalidVelocityRange { min: f64, span: f64 },

    #[error("request timeout must be positive")]
    ZeroTimeout,
}

/// Simulator configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// NeoWs API key
    pub api_key: String,
    /// Catalog endpoint (without query string)
    pub catalog_url: String,
    /// HTTP timeout for the catalog fetch
    pub request_timeout: Duration,
    /// Lower bound of the random impact velocity (km/s)
    pub velocity_min_km_s: f64,
    /// Width of the random impact velocity range (km/s)
    pub velocity_span_km_s: f64,
    /// Fixed RNG seed. None = seed from OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            api_key: DEMO_API_KEY.to_string(),
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            request_timeout: Duration::from_secs(15),
            velocity_min_km_s: 10.0,
            velocity_span_km_s: 30.0,
            seed: None,
        }
    }
}

impl SimConfig {
    /// Defaults overlaid with `NASA_API_KEY`, `NEO_CATALOG_URL` and `IMPACT_SEED`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`SimConfig::from_env`] with an injectable variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(key) = lookup(ENV_API_KEY).filter(|k| !k.trim().is_empty()) {
            config.api_key = key.trim().to_string();
        }
        if let Some(url) = lookup(ENV_CATALOG_URL).filter(|u| !u.trim().is_empty()) {
            config.catalog_url = url.trim().to_string();
        }
        if let Some(seed) = lookup(ENV_SEED) {
            let parsed = seed.trim().parse::<u64>().map_err(|_| ConfigError::InvalidEnv {
                name: ENV_SEED,
                value: seed.clone(),
            })?;
            config.seed = Some(parsed);
        }

        config.validate()?;
        Ok(config)
    }

    /// Full catalog request URL including the API key.
    pub fn catalog_request_url(&self) -> String {
        let sep = if self.catalog_url.contains('?') { '&' } else { '?' };
        format!("{}{}api_key={}", self.catalog_url, sep, self.api_key)
    }

    pub fn velocity_max_km_s(&self) -> f64 {
        self.velocity_min_km_s + self.velocity_span_km_s
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let (min, span) = (self.velocity_min_km_s, self.velocity_span_km_s);
        if !min.is_finite() || !span.is_finite() || min <= 0.0 || span < 0.0 {
            return Err(ConfigError::InvalidVelocityRange { min, span });
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }
}
