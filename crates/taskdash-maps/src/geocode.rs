//! Forward and reverse geocoding against Nominatim (OpenStreetMap).
//! Free, no API key required, but a descriptive User-Agent is mandatory.

use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

use crate::error::GeocodeError;
use crate::types::{Coordinate, Place, ReverseResponse};

const REQUEST_TIMEOUT_SECS: u64 = 10;
const USER_AGENT: &str = "Taskdash/0.1.0";

/// Place search keeps only the best few matches.
pub const MAX_SEARCH_RESULTS: usize = 5;

#[derive(Debug, Clone)]
pub struct GeocodingClient {
    client: Client,
    base_url: String,
}

impl GeocodingClient {
    pub fn new(base_url: &str) -> Result<Self, GeocodeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Search places by free text. An empty query returns no results without a request.
    #[instrument(skip(self), level = "debug")]
    pub async fn search(&self, query: &str) -> Result<Vec<Place>, GeocodeError> {
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("format", "json"), ("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status().as_u16()));
        }

        let mut places: Vec<Place> = response.json().await?;
        places.truncate(MAX_SEARCH_RESULTS);
        tracing::debug!("Place search {:?} returned {} results", query, places.len());
        Ok(places)
    }

    /// Name of the place at a point, `None` when the geocoder has no name for it.
    #[instrument(skip(self), level = "debug")]
    pub async fn reverse(&self, point: Coordinate) -> Result<Option<String>, GeocodeError> {
        let url = format!("{}/reverse", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "json".to_string()),
                ("lat", point.lat.to_string()),
                ("lon", point.lng.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GeocodeError::Status(response.status().as_u16()));
        }

        let body: ReverseResponse = response.json().await?;
        Ok(body.display_name.filter(|name| !name.is_empty()))
    }
}
