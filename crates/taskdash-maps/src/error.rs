//! Map-specific error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeocodeError {
    #[error("Geocoder returned status {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Error, Debug)]
pub enum RoutingError {
    /// Router answered with a code other than `Ok`.
    #[error("Router error: {0}")]
    Unavailable(String),

    #[error("Router returned no routes")]
    NoRoute,

    #[error("Router returned status {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PolylineError {
    #[error("Polyline ended in the middle of a value at byte {0}")]
    Truncated(usize),

    #[error("Invalid polyline character {ch:?} at byte {index}")]
    InvalidChar { ch: char, index: usize },

    #[error("Polyline value overflows at byte {0}")]
    Overflow(usize),
}
