//! OpenWeather client: city geocoding, current conditions and forecast.

use reqwest::{Client, StatusCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::aggregate::daily_averages;
use crate::types::{
    CurrentResponse, CurrentWeather, DailyAverage, ForecastResponse, GeoPoint, GeoResponseItem,
    WeatherError, WeatherSnapshot,
};

const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: String,
    api_key: String,
}

impl WeatherProvider {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, WeatherError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Full lookup for one city: geocode, then current and forecast in parallel.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let point = self.geocode(city).await?;
        tracing::debug!("Geocoded {} to {}, {}", city, point.lat, point.lon);

        let (current, forecast) = tokio::try_join!(self.current(point), self.forecast(point))?;

        tracing::info!(
            "Fetched weather for {}: {:.1}°C, {} forecast days",
            city,
            current.temperature,
            forecast.len()
        );
        Ok(WeatherSnapshot { current, forecast })
    }

    /// Resolve a city name to the first geocoder match.
    pub async fn geocode(&self, city: &str) -> Result<GeoPoint, WeatherError> {
        let url = format!("{}/geo/1.0/direct", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", city), ("limit", "1"), ("appid", self.api_key.as_str())])
            .send()
            .await?;

        let items: Vec<GeoResponseItem> = Self::handle_response(response).await?;
        items
            .into_iter()
            .next()
            .map(|item| GeoPoint {
                lat: item.lat,
                lon: item.lon,
            })
            .ok_or_else(|| WeatherError::CityNotFound(city.to_string()))
    }

    pub async fn current(&self, point: GeoPoint) -> Result<CurrentWeather, WeatherError> {
        let url = format!("{}/data/2.5/weather", self.base_url);
        let response = self.point_request(&url, point).send().await?;
        let body: CurrentResponse = Self::handle_response(response).await?;
        Ok(body.into())
    }

    /// 5-day/3-hour forecast folded into daily means.
    pub async fn forecast(&self, point: GeoPoint) -> Result<Vec<DailyAverage>, WeatherError> {
        let url = format!("{}/data/2.5/forecast", self.base_url);
        let response = self.point_request(&url, point).send().await?;
        let body: ForecastResponse = Self::handle_response(response).await?;

        let samples: Vec<_> = body
            .list
            .into_iter()
            .filter_map(|item| item.into_sample())
            .collect();
        Ok(daily_averages(&samples))
    }

    fn point_request(&self, url: &str, point: GeoPoint) -> reqwest::RequestBuilder {
        self.client.get(url).query(&[
            ("lat", point.lat.to_string()),
            ("lon", point.lon.to_string()),
            ("units", "metric".to_string()),
            ("appid", self.api_key.clone()),
        ])
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, WeatherError> {
        let status = response.status();

        if status.is_success() {
            response
                .json()
                .await
                .map_err(|e| WeatherError::Parse(e.to_string()))
        } else if status == StatusCode::UNAUTHORIZED {
            Err(WeatherError::InvalidApiKey)
        } else {
            let text = response.text().await.unwrap_or_default();
            Err(WeatherError::Api(format!("{}: {}", status, text)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_paris(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Paris"))
            .and(query_param("limit", "1"))
            .and(query_param("appid", "key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"name": "Paris", "lat": 48.86, "lon": 2.35, "country": "FR"}
            ])))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .and(query_param("lat", "48.86"))
            .and(query_param("lon", "2.35"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Paris",
                "weather": [{"id": 803, "main": "Clouds", "description": "broken clouds", "icon": "04d"}],
                "main": {"temp": 15.0, "feels_like": 14.2, "humidity": 71},
                "wind": {"speed": 4.1}
            })))
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .and(query_param("units", "metric"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "list": [
                    {"dt": 1, "dt_txt": "2026-10-18 09:00:00", "main": {"temp": 14.0}},
                    {"dt": 2, "dt_txt": "2026-10-18 12:00:00", "main": {"temp": 15.0}},
                    {"dt": 3, "dt_txt": "2026-10-19 09:00:00", "main": {"temp": 16.0}},
                    {"dt": 4, "dt_txt": "2026-10-19 12:00:00", "main": {"temp": 16.4}}
                ]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_fetch_paris_snapshot() {
        let mock_server = MockServer::start().await;
        mount_paris(&mock_server).await;

        let provider = WeatherProvider::new(&mock_server.uri(), "key").unwrap();
        let snapshot = provider.fetch("Paris").await.unwrap();

        assert_eq!(snapshot.current.temperature, 15.0);
        assert_eq!(snapshot.current.icon, "04d");
        assert_eq!(snapshot.forecast.len(), 2);
        assert_eq!(snapshot.forecast[0].date.to_string(), "2026-10-18");
        assert_eq!(snapshot.forecast[0].avg_temp_celsius, 14.5);
        assert_eq!(snapshot.forecast[1].avg_temp_celsius, 16.2);
    }

    #[tokio::test]
    async fn test_unknown_city() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let provider = WeatherProvider::new(&mock_server.uri(), "key").unwrap();
        let result = provider.fetch("Atlantis").await;

        assert!(matches!(result, Err(WeatherError::CityNotFound(c)) if c == "Atlantis"));
    }

    #[tokio::test]
    async fn test_invalid_api_key() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        let provider = WeatherProvider::new(&mock_server.uri(), "bad").unwrap();
        let result = provider.fetch("Paris").await;

        assert!(matches!(result, Err(WeatherError::InvalidApiKey)));
    }

    #[tokio::test]
    async fn test_forecast_failure_fails_whole_lookup() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"lat": 1.0, "lon": 2.0}
            ])))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "main": {"temp": 3.0}
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let provider = WeatherProvider::new(&mock_server.uri(), "key").unwrap();
        let result = provider.fetch("Somewhere").await;

        assert!(matches!(result, Err(WeatherError::Api(msg)) if msg.contains("500")));
    }
}
