//! Driving routes from an OSRM server.

use reqwest::Client;
use std::time::Duration;
use tracing::instrument;

use crate::error::RoutingError;
use crate::types::{Coordinate, Route, RouteResponse};

const REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Clone)]
pub struct RoutingClient {
    client: Client,
    base_url: String,
}

impl RoutingClient {
    pub fn new(base_url: &str) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// First driving route between two points.
    ///
    /// OSRM takes coordinates as `lng,lat;lng,lat`.
    #[instrument(skip(self), level = "info")]
    pub async fn route(&self, from: Coordinate, to: Coordinate) -> Result<Route, RoutingError> {
        let url = format!(
            "{}/route/v1/driving/{},{};{},{}",
            self.base_url, from.lng, from.lat, to.lng, to.lat
        );

        let response = self
            .client
            .get(&url)
            .query(&[("overview", "full")])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(RoutingError::Status(response.status().as_u16()));
        }

        let body: RouteResponse = response.json().await?;
        if body.code != "Ok" {
            tracing::warn!("OSRM answered {}", body.code);
            return Err(RoutingError::Unavailable(body.code));
        }

        body.routes.into_iter().next().ok_or(RoutingError::NoRoute)
    }
}
