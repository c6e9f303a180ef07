use taskdash_core::{AppError, NetworkError, ReqwestErrorExt};
use taskdash_maps::{GeocodeError, PolylineError, RoutingError};

use super::IntoAppError;

impl IntoAppError for GeocodeError {
    fn into_app_error(self) -> AppError {
        match self {
            GeocodeError::Status(status) => AppError::Network(NetworkError::ServerError {
                status,
                message: "geocoder".into(),
            }),
            GeocodeError::Network(e) => AppError::Network(e.into_network_error()),
        }
    }
}

impl IntoAppError for RoutingError {
    fn into_app_error(self) -> AppError {
        match self {
            RoutingError::Unavailable(code) => AppError::RouteUnavailable(code),
            RoutingError::NoRoute => AppError::RouteUnavailable("no routes".into()),
            RoutingError::Status(status) => AppError::Network(NetworkError::ServerError {
                status,
                message: "router".into(),
            }),
            RoutingError::Network(e) => AppError::Network(e.into_network_error()),
        }
    }
}

impl IntoAppError for PolylineError {
    fn into_app_error(self) -> AppError {
        AppError::Network(NetworkError::InvalidResponse(self.to_string()))
    }
}
