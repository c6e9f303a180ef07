//! Weather lookups for Taskdash
//!
//! Resolves a city name through the OpenWeather geocoder, then fetches current
//! conditions and the 5-day/3-hour forecast, folding the forecast into daily
//! mean temperatures.

pub mod aggregate;
pub mod provider;
pub mod types;

pub use aggregate::{daily_averages, MAX_FORECAST_DAYS};
pub use provider::WeatherProvider;
pub use types::*;
