use serde::{Deserialize, Serialize};

/// A point on the map in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Label used when a clicked point cannot be named
    pub fn fallback_label(&self) -> String {
        format!("Lat: {:.4}, Lng: {:.4}", self.lat, self.lng)
    }
}

/// Geocoder match. Nominatim returns coordinates as strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
}

impl Place {
    /// Build a place from a known point
    pub fn at(display_name: impl Into<String>, point: Coordinate) -> Self {
        Self {
            display_name: display_name.into(),
            lat: point.lat.to_string(),
            lon: point.lng.to_string(),
        }
    }

    /// Parsed coordinate, or `None` if the geocoder sent something unparsable
    pub fn coordinate(&self) -> Option<Coordinate> {
        let lat = self.lat.trim().parse::<f64>().ok()?;
        let lng = self.lon.trim().parse::<f64>().ok()?;
        Some(Coordinate { lat, lng })
    }
}

/// One driving route from the router.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    /// Encoded polyline (precision 5)
    pub geometry: String,
    /// Meters
    pub distance: f64,
    /// Seconds
    pub duration: f64,
}

impl Route {
    /// Display strings: kilometers with 2 decimals, minutes with 1 decimal
    pub fn summary(&self) -> RouteSummary {
        RouteSummary {
            distance_km: format!("{:.2}", self.distance / 1000.0),
            duration_min: format!("{:.1}", self.duration / 60.0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSummary {
    pub distance_km: String,
    pub duration_min: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct RouteResponse {
    pub code: String,
    #[serde(default)]
    pub routes: Vec<Route>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ReverseResponse {
    pub display_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_summary_rounding() {
        let route = Route {
            geometry: String::new(),
            distance: 12345.0,
            duration: 723.0,
        };
        let summary = route.summary();
        assert_eq!(summary.distance_km, "12.35");
        assert_eq!(summary.duration_min, "12.1");
    }

    #[test]
    fn test_place_coordinate_parsing() {
        let place = Place {
            display_name: "Paris".into(),
            lat: "48.8566".into(),
            lon: "2.3522".into(),
        };
        assert_eq!(place.coordinate(), Some(Coordinate::new(48.8566, 2.3522)));

        let broken = Place {
            display_name: "?".into(),
            lat: "north".into(),
            lon: "2".into(),
        };
        assert_eq!(broken.coordinate(), None);
    }

    #[test]
    fn test_fallback_label() {
        let point = Coordinate::new(12.971_598_7, 77.594_566_3);
        assert_eq!(point.fallback_label(), "Lat: 12.9716, Lng: 77.5946");
    }

    #[test]
    fn test_place_at_round_trips_coordinate() {
        let point = Coordinate::new(-33.5, 151.25);
        assert_eq!(Place::at("x", point).coordinate(), Some(point));
    }
}
