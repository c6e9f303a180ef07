use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

const ICON_URL_BASE: &str = "https://openweathermap.org/img/wn";

/// Weather condition categories mapped from OpenWeather condition ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    #[default]
    Clear,
    PartlyCloudy,
    Cloudy,
    Fog,
    Drizzle,
    Rain,
    HeavyRain,
    Snow,
    Thunderstorm,
}

impl WeatherCondition {
    /// Convert an OpenWeather condition id to WeatherCondition
    /// See: https://openweathermap.org/weather-conditions
    pub fn from_owm_code(code: i32) -> Self {
        match code {
            200..=299 => Self::Thunderstorm,
            300..=399 => Self::Drizzle,
            500 | 501 | 520 | 521 => Self::Rain,
            502..=531 => Self::HeavyRain,
            600..=699 => Self::Snow,
            700..=799 => Self::Fog,
            800 => Self::Clear,
            801 | 802 => Self::PartlyCloudy,
            803 | 804 => Self::Cloudy,
            _ => Self::Clear, // Unknown codes default to clear
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::PartlyCloudy => "Partly Cloudy",
            Self::Cloudy => "Cloudy",
            Self::Fog => "Fog",
            Self::Drizzle => "Drizzle",
            Self::Rain => "Rain",
            Self::HeavyRain => "Heavy Rain",
            Self::Snow => "Snow",
            Self::Thunderstorm => "Thunderstorm",
        }
    }
}

/// Coordinates of a geocoded city
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

/// Current weather conditions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentWeather {
    pub city: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub humidity: u8,
    pub wind_speed: f64,
    pub condition: WeatherCondition,
    /// Provider text, e.g. "light rain"
    pub description: String,
    /// Provider icon code, e.g. "10d"
    pub icon: String,
}

impl CurrentWeather {
    /// URL of the provider's icon for the current conditions
    pub fn icon_url(&self) -> String {
        format!("{}/{}@2x.png", ICON_URL_BASE, self.icon)
    }
}

/// One 3-hour forecast sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastSample {
    pub timestamp: NaiveDateTime,
    pub temperature: f64,
}

/// Mean temperature for one calendar date
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyAverage {
    pub date: NaiveDate,
    pub avg_temp_celsius: f64,
}

/// Everything the weather panel shows for one city
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub current: CurrentWeather,
    pub forecast: Vec<DailyAverage>,
}

// OpenWeather wire shapes

#[derive(Debug, Deserialize)]
pub(crate) struct GeoResponseItem {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CurrentResponse {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub weather: Vec<ConditionResponse>,
    pub main: MainResponse,
    #[serde(default)]
    pub wind: Option<WindResponse>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ConditionResponse {
    pub id: i32,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct MainResponse {
    pub temp: f64,
    #[serde(default)]
    pub feels_like: Option<f64>,
    #[serde(default)]
    pub humidity: Option<u8>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct WindResponse {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastResponse {
    pub list: Vec<ForecastItem>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ForecastItem {
    pub dt: i64,
    #[serde(default)]
    pub dt_txt: Option<String>,
    pub main: MainResponse,
}

impl From<CurrentResponse> for CurrentWeather {
    fn from(resp: CurrentResponse) -> Self {
        let first = resp.weather.into_iter().next();
        let (code, description, icon) = match first {
            Some(c) => (c.id, c.description, c.icon),
            None => (800, String::new(), String::new()),
        };
        let condition = WeatherCondition::from_owm_code(code);
        let description = if description.is_empty() {
            condition.description().to_string()
        } else {
            description
        };
        Self {
            city: resp.name,
            temperature: resp.main.temp,
            feels_like: resp.main.feels_like.unwrap_or(resp.main.temp),
            humidity: resp.main.humidity.unwrap_or(0),
            wind_speed: resp.wind.map(|w| w.speed).unwrap_or(0.0),
            condition,
            description,
            icon,
        }
    }
}

impl ForecastItem {
    /// Sample time: the provider's `dt_txt` when present, else `dt` as UTC.
    pub(crate) fn into_sample(self) -> Option<ForecastSample> {
        let timestamp = self
            .dt_txt
            .as_deref()
            .and_then(|s| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").ok())
            .or_else(|| DateTime::from_timestamp(self.dt, 0).map(|d| d.naive_utc()))?;
        Some(ForecastSample {
            timestamp,
            temperature: self.main.temp,
        })
    }
}

/// Weather provider errors
#[derive(Debug, thiserror::Error)]
pub enum WeatherError {
    #[error("City not found: {0}")]
    CityNotFound(String),
    #[error("Invalid API key")]
    InvalidApiKey,
    #[error("Weather API error: {0}")]
    Api(String),
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Parse error: {0}")]
    Parse(String),
}
