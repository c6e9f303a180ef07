//! Application services container.
//!
//! Owns the tokio runtime plus the shared session and API clients, and
//! builds each screen's view-model with its collaborators injected.

use std::sync::Arc;
use std::time::Duration;

use taskdash_auth::{AuthClient, LocalStorage, Session};
use taskdash_core::{AppError, Config};
use taskdash_maps::{GeocodingClient, RoutingClient};
use taskdash_services::TodoClient;
use taskdash_weather::WeatherProvider;
use tokio::runtime::{Handle, Runtime};

use crate::error_mapping::IntoAppError;
use crate::map_surface::MapSurface;
use crate::models::{
    DashboardModel, FormMode, LoginModel, MapModel, MapSettings, TodoDetailModel, TodoFormModel,
    TodoListModel, WeatherModel,
};
use crate::navigation::Navigator;
use crate::notify::Notifier;

const SHUTDOWN_TIMEOUT_SECS: u64 = 5;

pub struct AppServices {
    /// Tokio runtime for async operations
    runtime: Runtime,

    config: Arc<Config>,
    notifier: Arc<dyn Notifier>,

    /// Login session backed by the token store
    session: Arc<Session>,
    todo_client: Arc<TodoClient>,
    weather_provider: Arc<WeatherProvider>,
    geocoder: Arc<GeocodingClient>,
    router: Arc<RoutingClient>,
}

impl AppServices {
    pub fn new(config: Arc<Config>, notifier: Arc<dyn Notifier>) -> Result<Self, AppError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("taskdash-tokio")
            .build()?;

        let session = Arc::new(Session::new(
            LocalStorage::new(config.storage_path()),
            AuthClient::new(&config.services.api_base_url),
        ));
        let todo_client = Arc::new(TodoClient::new(
            &config.services.api_base_url,
            session.clone(),
        ));

        if !config.weather.is_configured() {
            tracing::warn!("OpenWeather API key not configured; weather lookups will fail");
        }
        let weather_provider = Arc::new(
            WeatherProvider::new(&config.weather.api_base_url, &config.weather.api_key)
                .map_err(IntoAppError::into_app_error)?,
        );
        let geocoder = Arc::new(
            GeocodingClient::new(&config.maps.nominatim_url)
                .map_err(IntoAppError::into_app_error)?,
        );
        let router = Arc::new(
            RoutingClient::new(&config.maps.osrm_url).map_err(IntoAppError::into_app_error)?,
        );

        tracing::info!("Services initialized against {}", config.services.api_base_url);

        Ok(Self {
            runtime,
            config,
            notifier,
            session,
            todo_client,
            weather_provider,
            geocoder,
            router,
        })
    }

    pub fn runtime(&self) -> Handle {
        self.runtime.handle().clone()
    }

    /// Run a future to completion on the service runtime.
    pub fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> Arc<Session> {
        self.session.clone()
    }

    pub fn todo_client(&self) -> Arc<TodoClient> {
        self.todo_client.clone()
    }

    fn toast_duration(&self) -> Duration {
        Duration::from_secs(self.config.ui.toast_seconds)
    }

    pub fn navigator(&self) -> Navigator {
        Navigator::new(self.session.clone())
    }

    pub fn login_model(&self) -> LoginModel {
        LoginModel::new(self.runtime(), self.session.clone(), self.notifier.clone())
    }

    pub fn dashboard_model(&self) -> DashboardModel {
        DashboardModel::new(self.session.clone(), self.notifier.clone())
    }

    pub fn todo_list_model(&self) -> TodoListModel {
        TodoListModel::new(
            self.runtime(),
            self.todo_client.clone(),
            self.notifier.clone(),
        )
    }

    pub fn todo_form_model(&self, mode: FormMode) -> TodoFormModel {
        TodoFormModel::new(
            self.runtime(),
            self.todo_client.clone(),
            self.notifier.clone(),
            self.toast_duration(),
            mode,
        )
    }

    pub fn todo_detail_model(&self, id: &str) -> TodoDetailModel {
        TodoDetailModel::open(
            self.runtime.handle(),
            self.todo_client.clone(),
            self.notifier.clone(),
            id,
        )
    }

    /// Weather panel, already fetching the configured default city.
    pub fn weather_model(&self) -> WeatherModel {
        let mut model = WeatherModel::new(
            self.runtime(),
            self.weather_provider.clone(),
            Duration::from_millis(self.config.weather.debounce_ms),
        );
        model.start(&self.config.weather.default_city);
        model
    }

    pub fn map_model(&self, surface: Box<dyn MapSurface>) -> MapModel {
        MapModel::new(
            self.runtime(),
            self.geocoder.clone(),
            self.router.clone(),
            self.notifier.clone(),
            surface,
            MapSettings::from_config(&self.config.maps),
        )
    }

    /// Stop the runtime, giving in-flight requests a short grace period.
    pub fn shutdown(self) {
        tracing::info!("AppServices shutdown initiated");
        self.runtime
            .shutdown_timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS));
        tracing::info!("AppServices shutdown complete");
    }
}
