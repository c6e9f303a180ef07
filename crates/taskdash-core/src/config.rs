use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

use crate::error::ConfigError;

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory (also holds the token store)
    pub config_dir: PathBuf,

    /// Todo/auth API settings
    pub services: ServiceConfig,

    /// Weather panel settings
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Map and routing panel settings
    #[serde(default)]
    pub maps: MapsConfig,

    /// UI preferences
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the todo API (login lives under `/users/login`)
    pub api_base_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeather API root, e.g. `https://api.openweathermap.org`
    pub api_base_url: String,

    /// OpenWeather API key (can be set via `OPENWEATHER_API_KEY`)
    pub api_key: String,

    /// City fetched when the panel first opens
    pub default_city: String,

    /// Quiet period before a typed city is accepted
    pub debounce_ms: u64,
}

impl WeatherConfig {
    /// Check if the API key is configured (not a placeholder)
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty() && !self.api_key.starts_with("YOUR_")
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.openweathermap.org".to_string(),
            api_key: std::env::var("OPENWEATHER_API_KEY")
                .unwrap_or_else(|_| "YOUR_OPENWEATHER_API_KEY".to_string()),
            default_city: "Bengaluru".to_string(),
            debounce_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapsConfig {
    /// Nominatim root used for place search and reverse geocoding
    pub nominatim_url: String,

    /// OSRM root used for driving routes
    pub osrm_url: String,

    /// Minimum characters before a place search is sent
    pub min_query_len: usize,

    /// Initial map centre as (lat, lng)
    pub default_center: (f64, f64),

    pub default_zoom: u8,

    /// Zoom applied when a place is selected
    pub select_zoom: u8,

    /// Padding in pixels when fitting the view to a route
    pub fit_padding: u32,
}

impl Default for MapsConfig {
    fn default() -> Self {
        Self {
            nominatim_url: "https://nominatim.openstreetmap.org".to_string(),
            osrm_url: "https://router.project-osrm.org".to_string(),
            min_query_len: 3,
            default_center: (20.0, 77.0),
            default_zoom: 5,
            select_zoom: 13,
            fit_padding: 50,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// How long a toast stays visible
    pub toast_seconds: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self { toast_seconds: 3 }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("taskdash");

        Self {
            config_dir,
            services: ServiceConfig {
                api_base_url: "https://du-test-api.simbiotiktech.in".to_string(),
            },
            weather: WeatherConfig::default(),
            maps: MapsConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, writing defaults when missing
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            let config = Self::default();
            config.save_to(config_path)?;
            tracing::info!("Wrote default config to {}", config_path.display());
            return Ok(config);
        }

        let contents =
            std::fs::read_to_string(config_path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(format!("{}: {}", config_path.display(), e)))?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        Self::load_validated_from(&Self::config_path()?)
    }

    pub fn load_validated_from(config_path: &Path) -> Result<(Self, ValidationResult)> {
        let config = Self::load_from(config_path)?;
        let validation = config.validate();

        if !validation.is_valid() {
            return Err(ConfigError::Invalid(validation.error_summary()).into());
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    /// Validate the configuration
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.services.api_base_url, "services.api_base_url", &mut result);
        self.validate_url(&self.weather.api_base_url, "weather.api_base_url", &mut result);
        self.validate_url(&self.maps.nominatim_url, "maps.nominatim_url", &mut result);
        self.validate_url(&self.maps.osrm_url, "maps.osrm_url", &mut result);

        if !self.weather.is_configured() {
            result.add_warning(
                "weather.api_key",
                "OpenWeather API key not configured - weather lookups will fail",
            );
        }

        if self.weather.debounce_ms == 0 {
            result.add_warning("weather.debounce_ms", "Debounce disabled (0 ms)");
        }

        if self.maps.min_query_len == 0 {
            result.add_warning(
                "maps.min_query_len",
                "Every keystroke will trigger a place search",
            );
        }

        let (lat, lng) = self.maps.default_center;
        if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
            result.add_error("maps.default_center", "Centre must be a valid (lat, lng)");
        }

        if self.ui.toast_seconds == 0 {
            result.add_error("ui.toast_seconds", "Toast duration must be greater than 0");
        }

        result
    }

    /// Validate a URL field
    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the default file
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(config_path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Path of the persistent key/value store holding the session token
    pub fn storage_path(&self) -> PathBuf {
        self.config_dir.join("storage.json")
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::NotFound("no platform config directory".into()))?
            .join("taskdash");

        Ok(config_dir.join("config.toml"))
    }
}
