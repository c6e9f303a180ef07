//! Weather panel view-model.
//!
//! Typed city names pass through a debouncer; each accepted query bumps a
//! generation counter and only results tagged with the latest generation
//! update the panel. Older requests still run to completion and are dropped.

use std::sync::Arc;
use std::time::{Duration, Instant};

use taskdash_weather::{CurrentWeather, DailyAverage, WeatherProvider};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::debounce::Debouncer;
use crate::error_mapping::trace_failure;
use crate::services::{request_weather_fetch, WeatherServiceMessage};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherStatus {
    Idle,
    Loading,
    Loaded,
    /// Blank query: nothing to show
    Empty,
    Error,
}

pub struct WeatherModel {
    runtime: Handle,
    tx: UnboundedSender<WeatherServiceMessage>,
    rx: UnboundedReceiver<WeatherServiceMessage>,
    provider: Arc<WeatherProvider>,
    debouncer: Debouncer<String>,

    input: String,
    generation: u64,
    status: WeatherStatus,
    current: Option<CurrentWeather>,
    forecast: Vec<DailyAverage>,
}

impl WeatherModel {
    pub fn new(runtime: Handle, provider: Arc<WeatherProvider>, debounce: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            tx,
            rx,
            provider,
            debouncer: Debouncer::new(debounce),
            input: String::new(),
            generation: 0,
            status: WeatherStatus::Idle,
            current: None,
            forecast: Vec::new(),
        }
    }

    /// Show `city` in the input and fetch it right away.
    pub fn start(&mut self, city: &str) {
        self.input = city.to_string();
        self.submit(city);
    }

    /// Record a keystroke; the query is accepted once input goes quiet.
    pub fn input_changed_at(&mut self, text: &str, now: Instant) {
        self.input = text.to_string();
        self.debouncer.push(text.to_string(), now);
    }

    /// Fire the debounced query if its quiet period is over.
    pub fn tick_at(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(query) => {
                self.submit(&query);
                true
            }
            None => false,
        }
    }

    /// When the pending keystroke becomes a query, if any.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Query the current input again, or show nothing if it is blank.
    pub fn retry(&mut self) {
        let city = self.input.trim().to_string();
        self.submit(&city);
    }

    fn submit(&mut self, query: &str) {
        self.generation += 1;
        let city = query.trim();

        if city.is_empty() {
            tracing::debug!("Blank city query, clearing weather");
            self.status = WeatherStatus::Empty;
            self.current = None;
            self.forecast.clear();
            return;
        }

        self.status = WeatherStatus::Loading;
        request_weather_fetch(
            &self.runtime,
            &self.tx,
            self.provider.clone(),
            self.generation,
            city.to_string(),
        );
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn status(&self) -> WeatherStatus {
        self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == WeatherStatus::Loading
    }

    pub fn has_error(&self) -> bool {
        self.status == WeatherStatus::Error
    }

    pub fn current(&self) -> Option<&CurrentWeather> {
        self.current.as_ref()
    }

    pub fn forecast(&self) -> &[DailyAverage] {
        &self.forecast
    }

    /// The forecast section has nothing to show, regardless of current weather.
    pub fn forecast_no_data(&self) -> bool {
        self.forecast.is_empty()
    }

    pub fn icon_url(&self) -> Option<String> {
        self.current.as_ref().map(CurrentWeather::icon_url)
    }

    pub fn poll_channel(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
            handled += 1;
        }
        handled
    }

    pub async fn process_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(msg) => {
                self.apply(msg);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, msg: WeatherServiceMessage) {
        match msg {
            WeatherServiceMessage::FetchDone {
                generation,
                city,
                result,
            } => {
                if generation != self.generation {
                    tracing::debug!("Dropping stale weather result for {}", city);
                    return;
                }

                match result {
                    Ok(snapshot) => {
                        self.current = Some(snapshot.current);
                        self.forecast = snapshot.forecast;
                        self.status = WeatherStatus::Loaded;
                    }
                    Err(e) => {
                        trace_failure("weather lookup", e);
                        self.current = None;
                        self.forecast.clear();
                        self.status = WeatherStatus::Error;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const QUIET: Duration = Duration::from_millis(500);

    async fn mount_city(server: &MockServer, city: &str, temp: f64, delay: Duration) {
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", city))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"lat": 48.86, "lon": 2.35}]))
                    .set_delay(delay),
            )
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": city,
                "weather": [{"id": 800, "description": "clear sky", "icon": "01d"}],
                "main": {"temp": temp, "feels_like": temp, "humidity": 50},
                "wind": {"speed": 1.0}
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
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

    fn model_for(server: &MockServer) -> WeatherModel {
        let provider = Arc::new(WeatherProvider::new(&server.uri(), "key").unwrap());
        WeatherModel::new(Handle::current(), provider, QUIET)
    }

    #[tokio::test]
    async fn test_paris_scenario() {
        let mock_server = MockServer::start().await;
        mount_city(&mock_server, "Paris", 15.0, Duration::ZERO).await;

        let mut model = model_for(&mock_server);
        model.start("Paris");
        assert!(model.is_loading());
        model.process_next().await;

        assert_eq!(model.status(), WeatherStatus::Loaded);
        assert_eq!(model.current().map(|c| c.temperature), Some(15.0));
        let forecast: Vec<(String, f64)> = model
            .forecast()
            .iter()
            .map(|d| (d.date.to_string(), d.avg_temp_celsius))
            .collect();
        assert_eq!(
            forecast,
            vec![
                ("2026-10-18".to_string(), 14.5),
                ("2026-10-19".to_string(), 16.2)
            ]
        );
        assert_eq!(
            model.icon_url().as_deref(),
            Some("https://openweathermap.org/img/wn/01d@2x.png")
        );
    }

    #[tokio::test]
    async fn test_empty_forecast_reports_no_data_beside_current() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!([{"lat": 1.0, "lon": 2.0}])),
            )
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/weather"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "name": "Oslo",
                "weather": [{"id": 600, "description": "light snow", "icon": "13d"}],
                "main": {"temp": -2.0}
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/data/2.5/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"list": []})))
            .mount(&mock_server)
            .await;

        let mut model = model_for(&mock_server);
        model.start("Oslo");
        model.process_next().await;

        assert_eq!(model.status(), WeatherStatus::Loaded);
        assert_eq!(model.current().map(|c| c.temperature), Some(-2.0));
        assert!(model.current().is_some() && model.forecast_no_data());
        assert!(!model.has_error());
    }

    #[tokio::test]
    async fn test_whitespace_query_is_empty_without_request() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut model = model_for(&mock_server);
        let start = Instant::now();
        model.input_changed_at("   ", start);
        assert!(!model.tick_at(start + Duration::from_millis(100)));
        assert!(model.tick_at(start + QUIET));

        assert_eq!(model.status(), WeatherStatus::Empty);
        assert!(model.current().is_none());
        assert!(model.forecast_no_data());
        assert_eq!(model.poll_channel(), 0);
    }

    #[tokio::test]
    async fn test_debounce_fires_only_last_input() {
        let mock_server = MockServer::start().await;
        mount_city(&mock_server, "Paris", 15.0, Duration::ZERO).await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Par"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut model = model_for(&mock_server);
        let start = Instant::now();
        model.input_changed_at("Par", start);
        model.input_changed_at("Paris", start + Duration::from_millis(300));

        assert!(!model.tick_at(start + Duration::from_millis(600)));
        assert_eq!(
            model.next_deadline(),
            Some(start + Duration::from_millis(800))
        );
        assert!(model.tick_at(start + Duration::from_millis(800)));
        model.process_next().await;

        assert_eq!(model.status(), WeatherStatus::Loaded);
        assert_eq!(model.current().map(|c| c.city.as_str()), Some("Paris"));
    }

    #[tokio::test]
    async fn test_stale_result_is_ignored() {
        let mock_server = MockServer::start().await;
        mount_city(&mock_server, "Paris", 15.0, Duration::ZERO).await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .and(query_param("q", "Lyon"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([]))
                    .set_delay(Duration::from_millis(200)),
            )
            .mount(&mock_server)
            .await;

        let mut model = model_for(&mock_server);
        model.start("Lyon");
        model.retry();
        model.input_changed_at("Paris", Instant::now());
        model.tick_at(Instant::now() + QUIET);

        model.process_next().await;
        model.process_next().await;
        model.process_next().await;

        assert_eq!(model.status(), WeatherStatus::Loaded);
        assert_eq!(model.current().map(|c| c.temperature), Some(15.0));
    }

    #[tokio::test]
    async fn test_failure_clears_data_and_retry_resets_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/geo/1.0/direct"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&mock_server)
            .await;

        let mut model = model_for(&mock_server);
        model.start("Atlantis");
        model.process_next().await;

        assert!(model.has_error());
        assert!(model.current().is_none());
        assert!(model.forecast().is_empty());

        model.retry();
        assert!(!model.has_error());
        assert!(model.is_loading());
        model.process_next().await;
        assert!(model.has_error());

        model.input_changed_at("", Instant::now());
        model.retry();
        assert_eq!(model.status(), WeatherStatus::Empty);
        assert!(!model.has_error());
    }
}
