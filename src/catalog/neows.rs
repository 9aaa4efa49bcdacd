//! NASA NeoWs client.

use reqwest::blocking::Client;
use tracing::debug;

use crate::config::SimConfig;

use super::{parse_browse_response, CatalogError, CatalogSource, NeoCatalog};

/// Fetches one page of the NeoWs `neo/browse` listing.
pub struct NeoWsClient {
    client: Client,
    url: String,
    catalog_url: String,
}

impl NeoWsClient {
    pub fn new(config: &SimConfig) -> Result<Self, CatalogError> {
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            url: config.catalog_request_url(),
            catalog_url: config.catalog_url.clone(),
        })
    }
}

impl CatalogSource for NeoWsClient {
    fn fetch(&self) -> Result<NeoCatalog, CatalogError> {
        debug!("GET {}", self.catalog_url);
        let resp = self.client.get(&self.url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                status: status.as_u16(),
            });
        }
        let body = resp.text()?;
        parse_browse_response(&body)
    }

    // Never includes the API key.
    fn describe(&self) -> String {
        format!("NeoWs ({})", self.catalog_url)
    }
}
