use taskdash_core::{AppError, ConfigError, NetworkError, ReqwestErrorExt};
use taskdash_weather::WeatherError;

use super::IntoAppError;

impl IntoAppError for WeatherError {
    fn into_app_error(self) -> AppError {
        match self {
            WeatherError::CityNotFound(city) => AppError::NotFound(format!("city {}", city)),
            WeatherError::InvalidApiKey => {
                AppError::Config(ConfigError::MissingSetting("weather.api_key".into()))
            }
            WeatherError::Api(s) => AppError::Service(s),
            WeatherError::Network(e) => AppError::Network(e.into_network_error()),
            WeatherError::Parse(s) => AppError::Network(NetworkError::InvalidResponse(s)),
        }
    }
}
