//! Map and route panel view-model.
//!
//! Search responses are applied in arrival order with no cancellation, so a
//! slow response can overwrite the results of a newer query.

use std::sync::Arc;

use taskdash_core::MapsConfig;
use taskdash_maps::{
    polyline, Coordinate, GeocodingClient, Place, Route, RouteSummary, RoutingClient,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::error_mapping::trace_failure;
use crate::map_surface::{Endpoint, MapSurface, MarkerHandle};
use crate::notify::Notifier;
use crate::services::{
    request_map_reverse, request_map_route, request_map_search, MapServiceMessage,
};

const CLICK_PROMPT: &str = "Set as From (OK) or To (Cancel)?";
const ROUTE_NOT_FOUND: &str = "Route not found.";
const ROUTE_FAILED: &str = "Route calculation failed.";

/// View settings for the map panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapSettings {
    pub min_query_len: usize,
    pub default_center: Coordinate,
    pub default_zoom: u8,
    pub select_zoom: u8,
    pub fit_padding: u32,
}

impl MapSettings {
    pub fn from_config(config: &MapsConfig) -> Self {
        let (lat, lng) = config.default_center;
        Self {
            min_query_len: config.min_query_len,
            default_center: Coordinate::new(lat, lng),
            default_zoom: config.default_zoom,
            select_zoom: config.select_zoom,
            fit_padding: config.fit_padding,
        }
    }
}

impl Default for MapSettings {
    fn default() -> Self {
        Self::from_config(&MapsConfig::default())
    }
}

#[derive(Debug, Clone, Copy)]
struct Marker {
    handle: MarkerHandle,
    position: Coordinate,
}

/// Search box and marker for one end of the route.
#[derive(Debug, Default)]
struct EndpointState {
    query: String,
    results: Vec<Place>,
    marker: Option<Marker>,
}

pub struct MapModel {
    runtime: Handle,
    tx: UnboundedSender<MapServiceMessage>,
    rx: UnboundedReceiver<MapServiceMessage>,
    geocoder: Arc<GeocodingClient>,
    router: Arc<RoutingClient>,
    notifier: Arc<dyn Notifier>,
    surface: Box<dyn MapSurface>,
    settings: MapSettings,

    from: EndpointState,
    to: EndpointState,
    route_info: Option<RouteSummary>,
    loading_route: bool,
    show_map: bool,
}

impl MapModel {
    pub fn new(
        runtime: Handle,
        geocoder: Arc<GeocodingClient>,
        router: Arc<RoutingClient>,
        notifier: Arc<dyn Notifier>,
        surface: Box<dyn MapSurface>,
        settings: MapSettings,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            runtime,
            tx,
            rx,
            geocoder,
            router,
            notifier,
            surface,
            settings,
            from: EndpointState::default(),
            to: EndpointState::default(),
            route_info: None,
            loading_route: false,
            show_map: false,
        }
    }

    fn endpoint(&self, endpoint: Endpoint) -> &EndpointState {
        match endpoint {
            Endpoint::From => &self.from,
            Endpoint::To => &self.to,
        }
    }

    fn endpoint_mut(&mut self, endpoint: Endpoint) -> &mut EndpointState {
        match endpoint {
            Endpoint::From => &mut self.from,
            Endpoint::To => &mut self.to,
        }
    }

    pub fn query(&self, endpoint: Endpoint) -> &str {
        &self.endpoint(endpoint).query
    }

    pub fn results(&self, endpoint: Endpoint) -> &[Place] {
        &self.endpoint(endpoint).results
    }

    pub fn marker_position(&self, endpoint: Endpoint) -> Option<Coordinate> {
        self.endpoint(endpoint).marker.map(|m| m.position)
    }

    pub fn route_info(&self) -> Option<&RouteSummary> {
        self.route_info.as_ref()
    }

    pub fn is_loading_route(&self) -> bool {
        self.loading_route
    }

    pub fn show_map(&self) -> bool {
        self.show_map
    }

    /// Update a search box. Returns true if a lookup was sent.
    pub fn set_query(&mut self, endpoint: Endpoint, text: &str) -> bool {
        let min_len = self.settings.min_query_len;
        let state = self.endpoint_mut(endpoint);
        state.query = text.to_string();

        if text.chars().count() < min_len {
            state.results.clear();
            return false;
        }

        request_map_search(
            &self.runtime,
            &self.tx,
            self.geocoder.clone(),
            endpoint,
            text.to_string(),
        );
        true
    }

    /// Pick the `index`-th suggestion of an endpoint's search box.
    pub fn select_result(&mut self, endpoint: Endpoint, index: usize) -> bool {
        match self.endpoint(endpoint).results.get(index).cloned() {
            Some(place) => self.select(endpoint, &place),
            None => false,
        }
    }

    /// Put the endpoint's marker on `place` and route if both ends are set.
    pub fn select(&mut self, endpoint: Endpoint, place: &Place) -> bool {
        let Some(point) = place.coordinate() else {
            tracing::warn!("Ignoring place with unparsable coordinates: {:?}", place);
            return false;
        };

        self.ensure_map();

        let state = self.endpoint_mut(endpoint);
        state.query = place.display_name.clone();
        state.results.clear();
        let previous = state.marker.take();

        if let Some(old) = previous {
            self.surface.remove_marker(old.handle);
        }
        let handle = self.surface.add_marker(endpoint, point);
        self.endpoint_mut(endpoint).marker = Some(Marker {
            handle,
            position: point,
        });
        self.surface.set_view(point, self.settings.select_zoom);

        self.try_route();
        true
    }

    /// A marker was dragged to `position`; route again without geocoding.
    pub fn marker_dragged(&mut self, endpoint: Endpoint, position: Coordinate) {
        match self.endpoint_mut(endpoint).marker.as_mut() {
            Some(marker) => marker.position = position,
            None => return,
        }
        self.try_route();
    }

    /// Ask which end the clicked point is for, then name it.
    pub fn map_clicked(&mut self, point: Coordinate) -> Endpoint {
        let endpoint = if self.notifier.confirm(CLICK_PROMPT) {
            Endpoint::From
        } else {
            Endpoint::To
        };

        request_map_reverse(
            &self.runtime,
            &self.tx,
            self.geocoder.clone(),
            endpoint,
            point,
        );
        endpoint
    }

    /// Request a route when both markers exist. Returns true if one was sent.
    pub fn try_route(&mut self) -> bool {
        let (Some(from), Some(to)) = (self.from.marker, self.to.marker) else {
            return false;
        };

        self.ensure_map();
        self.route_info = None;
        self.loading_route = true;
        request_map_route(
            &self.runtime,
            &self.tx,
            self.router.clone(),
            from.position,
            to.position,
        );
        true
    }

    fn ensure_map(&mut self) {
        if self.show_map {
            return;
        }
        self.show_map = true;
        self.surface
            .init(self.settings.default_center, self.settings.default_zoom);
        tracing::debug!("Map surface initialized");
    }

    pub fn poll_channel(&mut self) -> usize {
        let mut handled = 0;
        while let Ok(msg) = self.rx.try_recv() {
            self.apply(msg);
            handled += 1;
        }
        handled
    }

    pub async fn process_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(msg) => {
                self.apply(msg);
                true
            }
            None => false,
        }
    }

    fn apply(&mut self, msg: MapServiceMessage) {
        match msg {
            MapServiceMessage::SearchDone {
                endpoint,
                query,
                result,
            } => {
                let results = match result {
                    Ok(places) => places,
                    Err(e) => {
                        trace_failure("place search", e);
                        Vec::new()
                    }
                };
                tracing::debug!("{} suggestions for {:?}", results.len(), query);
                self.endpoint_mut(endpoint).results = results;
            }
            MapServiceMessage::ReverseDone {
                endpoint,
                point,
                result,
            } => {
                let name = match result {
                    Ok(Some(name)) => name,
                    Ok(None) => point.fallback_label(),
                    Err(e) => {
                        trace_failure("reverse geocode", e);
                        point.fallback_label()
                    }
                };
                self.select(endpoint, &Place::at(name, point));
            }
            MapServiceMessage::RouteDone(result) => {
                self.loading_route = false;
                match result {
                    Ok(route) => self.draw_route(&route),
                    Err(e) => {
                        trace_failure("route", e);
                        self.route_info = None;
                        self.notifier.alert(ROUTE_NOT_FOUND);
                    }
                }
            }
        }
    }

    fn draw_route(&mut self, route: &Route) {
        match polyline::decode(&route.geometry) {
            Ok(path) => {
                self.surface.show_route(&path);
                self.surface.fit_bounds(&path, self.settings.fit_padding);
                let summary = route.summary();
                tracing::info!(
                    "Route: {} km, {} min",
                    summary.distance_km,
                    summary.duration_min
                );
                self.route_info = Some(summary);
            }
            Err(e) => {
                trace_failure("route geometry", e);
                self.route_info = None;
                self.notifier.alert(ROUTE_FAILED);
            }
        }
    }
}
