//! Place search and driving routes for the map panel.
//! Uses Nominatim (OpenStreetMap) for geocoding and OSRM for routing; neither
//! needs an API key.

pub mod error;
pub mod geocode;
pub mod polyline;
pub mod routing;
pub mod types;

pub use error::{GeocodeError, PolylineError, RoutingError};
pub use geocode::{GeocodingClient, MAX_SEARCH_RESULTS};
pub use routing::RoutingClient;
pub use types::*;
