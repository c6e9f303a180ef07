//! Centralized error types for the Taskdash application.
//!
//! Crate-level errors (todo, weather, maps) are folded into [`AppError`] at the
//! view-model boundary so every failure gets one diagnostic trace and one
//! UI-safe message.

use thiserror::Error;

/// Top-level application error type.
///
/// Use `user_message()` to get a UI-appropriate message.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// Client-side check failed before any request was sent.
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Routing API answered without a usable route.
    #[error("Route unavailable: {0}")]
    RouteUnavailable(String),

    /// Service-level errors (todos, weather, maps) mapped from other crates.
    #[error("Service error: {0}")]
    Service(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Returns a user-friendly message suitable for display in the UI.
    pub fn user_message(&self) -> &'static str {
        match self {
            AppError::Network(e) => e.user_message(),
            AppError::Config(e) => e.user_message(),
            AppError::Auth(e) => e.user_message(),
            AppError::Validation(_) => "Please fill all required fields",
            AppError::NotFound(_) => "The requested item was not found.",
            AppError::RouteUnavailable(_) => "Route not found.",
            AppError::Io(_) => "A file operation failed. Please try again.",
            AppError::Service(_) => "Something went wrong. Please try again.",
        }
    }
}

/// Network-related errors (HTTP, connectivity).
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Server error: {status} - {message}")]
    ServerError { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl NetworkError {
    pub fn user_message(&self) -> &'static str {
        match self {
            NetworkError::ConnectionFailed(_) => {
                "Unable to connect. Check your internet connection."
            }
            NetworkError::Timeout => "The request timed out. Please try again.",
            NetworkError::ServerError { status, .. } if *status >= 500 => {
                "The server is experiencing issues. Please try again later."
            }
            NetworkError::ServerError { .. } => "The request failed. Please try again.",
            NetworkError::InvalidResponse(_) => {
                "Received an unexpected response. Please try again."
            }
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No platform config directory to hold the config file.
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Configuration parse error: {0}")]
    ParseError(String),

    #[error("Missing required setting: {0}")]
    MissingSetting(String),
}

impl ConfigError {
    pub fn user_message(&self) -> &'static str {
        match self {
            ConfigError::NotFound(_) => "Configuration not found. Using defaults.",
            ConfigError::Invalid(_) => "Invalid configuration. Check your settings.",
            ConfigError::ParseError(_) => "Configuration file is malformed. Check your settings.",
            ConfigError::MissingSetting(_) => "A required setting is missing. Check your settings.",
        }
    }
}

/// Authentication and authorization errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Login endpoint rejected the credentials.
    #[error("Login rejected")]
    LoginRejected,

    /// A todo call was refused because the token is missing or invalid.
    #[error("Not authorized")]
    Unauthorized,

    #[error("Token storage error: {0}")]
    StorageError(String),
}

impl AuthError {
    pub fn user_message(&self) -> &'static str {
        match self {
            AuthError::LoginRejected => "Login failed",
            AuthError::Unauthorized => "Your session is no longer valid. Please sign in again.",
            AuthError::StorageError(_) => "Could not update saved credentials. Please try again.",
        }
    }
}

/// Extension trait for converting reqwest errors to our error types.
pub trait ReqwestErrorExt {
    fn into_network_error(self) -> NetworkError;
}

impl ReqwestErrorExt for reqwest::Error {
    fn into_network_error(self) -> NetworkError {
        if self.is_timeout() {
            NetworkError::Timeout
        } else if self.is_decode() {
            NetworkError::InvalidResponse(self.to_string())
        } else if let Some(status) = self.status() {
            NetworkError::ServerError {
                status: status.as_u16(),
                message: self.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed(self.to_string())
        }
    }
}
