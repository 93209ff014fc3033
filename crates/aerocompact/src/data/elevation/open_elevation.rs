use std::time::Duration;

use reqwest::blocking::Client;
use serde::Deserialize;

use super::ElevationSource;
use crate::Result;

/// Public Open-Elevation lookup endpoint.
pub const OPEN_ELEVATION_URL: &str = "https://api.open-elevation.com/api/v1/lookup";

const USER_AGENT: &str = "elevation-fetcher/1.0";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct LookupResponse {
    #[serde(default)]
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    elevation: Option<f64>,
}

/**
 * Client for an Open-Elevation compatible lookup service.
 *
 * Locations are sent as `?locations=lat,lon|lat,lon|...` and the service
 * answers with elevations in meters.
 */
pub struct OpenElevation {
    client: Client,
    endpoint: String,
}

impl OpenElevation {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).user_agent(USER_AGENT).build()?;
        Ok(OpenElevation {
            client,
            endpoint: endpoint.into(),
        })
    }

    /// Client for the public endpoint with the default timeout.
    pub fn public() -> Result<Self> {
        Self::new(OPEN_ELEVATION_URL, REQUEST_TIMEOUT)
    }
}

impl ElevationSource for OpenElevation {
    fn lookup(&self, locations: &[(f64, f64)]) -> Result<Vec<Option<f64>>> {
        let query = locations
            .iter()
            .map(|(lat, lon)| format!("{lat},{lon}"))
            .collect::<Vec<_>>()
            .join("|");
        tracing::debug!("Looking up {} locations at {}", locations.len(), self.endpoint);

        let response: LookupResponse = self
            .client
            .get(&self.endpoint)
            .query(&[("locations", query)])
            .send()?
            .error_for_status()?
            .json()?;
        Ok(response.results.into_iter().map(|result| result.elevation).collect())
    }
}
