//! Near-Earth object catalog.
//!
//! Records follow the NeoWs JSON shape so a saved `neo/browse` response can
//! be read directly. Sources:
//! - [`NeoWsClient`]: live fetch from NASA's API (one request, no retries).
//! - [`FileCatalog`]: a browse response saved to disk.
//! - [`StaticCatalog`]: in-memory records.
//!
//! A failed fetch leaves the catalog [`CatalogState::Unavailable`] with a
//! single placeholder option instead of an error bubbling up to the shell.

pub mod neows;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{error, info};

pub use neows::NeoWsClient;

/// Label shown in place of asteroid options when the catalog failed to load.
pub const PLACEHOLDER_LABEL: &str = "Error loading data";

#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog request failed with status {status}")]
    Status { status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("catalog contains no near-Earth objects")]
    Empty,
}

/// Min/max diameter estimate in one unit.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiameterRange {
    pub estimated_diameter_min: f64,
    pub estimated_diameter_max: f64,
}

/// Diameter estimates. NeoWs also reports km/miles/feet; only meters are kept.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EstimatedDiameter {
    pub meters: DiameterRange,
}

/// One near-Earth object.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NeoRecord {
    pub id: String,
    pub name: String,
    pub estimated_diameter: EstimatedDiameter,
    #[serde(default)]
    pub is_potentially_hazardous_asteroid: bool,
}

impl NeoRecord {
    /// Build a record from a single maximum diameter (meters).
    pub fn new(id: impl Into<String>, name: impl Into<String>, max_diameter_m: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            estimated_diameter: EstimatedDiameter {
                meters: DiameterRange {
                    estimated_diameter_min: max_diameter_m,
                    estimated_diameter_max: max_diameter_m,
                },
            },
            is_potentially_hazardous_asteroid: false,
        }
    }

    /// Estimated maximum diameter (meters).
    pub fn max_diameter_m(&self) -> f64 {
        self.estimated_diameter.meters.estimated_diameter_max
    }

    /// Maximum diameter rounded to whole meters, as the simulator uses it.
    pub fn impact_diameter_m(&self) -> f64 {
        self.max_diameter_m().round()
    }
}

#[derive(Deserialize)]
struct BrowsePage {
    near_earth_objects: Vec<NeoRecord>,
}

/// Ordered list of near-Earth objects.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NeoCatalog {
    records: Vec<NeoRecord>,
}

impl NeoCatalog {
    pub fn new(records: Vec<NeoRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[NeoRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn first(&self) -> Option<&NeoRecord> {
        self.records.first()
    }

    pub fn find(&self, id: &str) -> Option<&NeoRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    /// `(id, name)` pairs in catalog order, for a selector.
    pub fn options(&self) -> Vec<CatalogOption> {
        self.records
            .iter()
            .map(|r| CatalogOption {
                id: Some(r.id.clone()),
                label: r.name.clone(),
            })
            .collect()
    }
}

/// One entry of the asteroid selector. Placeholders have no id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CatalogOption {
    pub id: Option<String>,
    pub label: String,
}

/// Parse a NeoWs `neo/browse` response body.
pub fn parse_browse_response(body: &str) -> Result<NeoCatalog, CatalogError> {
    let page: BrowsePage = serde_json::from_str(body)?;
    if page.near_earth_objects.is_empty() {
        return Err(CatalogError::Empty);
    }
    Ok(NeoCatalog::new(page.near_earth_objects))
}

/// Port for wherever the asteroid list comes from.
pub trait CatalogSource {
    fn fetch(&self) -> Result<NeoCatalog, CatalogError>;

    /// Short description for logs.
    fn describe(&self) -> String;
}

/// Reads a saved browse response from disk.
#[derive(Clone, Debug)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl CatalogSource for FileCatalog {
    fn fetch(&self) -> Result<NeoCatalog, CatalogError> {
        let body = fs::read_to_string(&self.path)?;
        parse_browse_response(&body)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// Serves a fixed record list.
#[derive(Clone, Debug, Default)]
pub struct StaticCatalog {
    records: Vec<NeoRecord>,
}

impl StaticCatalog {
    pub fn new(records: Vec<NeoRecord>) -> Self {
        Self { records }
    }
}

impl CatalogSource for StaticCatalog {
    fn fetch(&self) -> Result<NeoCatalog, CatalogError> {
        if self.records.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(NeoCatalog::new(self.records.clone()))
    }

    fn describe(&self) -> String {
        format!("static list ({} records)", self.records.len())
    }
}

/// Result of the one-time catalog load.
#[derive(Clone, Debug, PartialEq)]
pub enum CatalogState {
    Loaded(NeoCatalog),
    Unavailable { reason: String },
}

impl CatalogState {
    /// Fetch once from `source`, falling back to [`CatalogState::Unavailable`].
    pub fn load(source: &dyn CatalogSource) -> Self {
        match source.fetch() {
            Ok(catalog) => {
                info!(
                    "Loaded {} near-Earth objects from {}",
                    catalog.len(),
                    source.describe()
                );
                CatalogState::Loaded(catalog)
            }
            Err(err) => {
                error!("Failed to load catalog from {}: {err}", source.describe());
                CatalogState::Unavailable {
                    reason: err.to_string(),
                }
            }
        }
    }

    pub fn catalog(&self) -> Option<&NeoCatalog> {
        match self {
            CatalogState::Loaded(catalog) => Some(catalog),
            CatalogState::Unavailable { .. } => None,
        }
    }

    pub fn is_loaded(&self) -> bool {
        matches!(self, CatalogState::Loaded(_))
    }

    /// Selector entries; a single placeholder when unavailable.
    pub fn options(&self) -> Vec<CatalogOption> {
        match self {
            CatalogState::Loaded(catalog) => catalog.options(),
            CatalogState::Unavailable { .. } => vec![CatalogOption {
                id: None,
                label: PLACEHOLDER_LABEL.to_string(),
            }],
        }
    }
}
