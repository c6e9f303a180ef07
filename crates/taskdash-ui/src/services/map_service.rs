//! Map backend: place search, reverse geocoding and routing.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::Arc;

use taskdash_maps::{
    Coordinate, GeocodeError, GeocodingClient, Place, Route, RoutingClient, RoutingError,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

use crate::map_surface::Endpoint;

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum MapServiceMessage {
    /// Place suggestions for one endpoint's search box
    SearchDone {
        endpoint: Endpoint,
        query: String,
        result: Result<Vec<Place>, GeocodeError>,
    },
    /// Name of a clicked point
    ReverseDone {
        endpoint: Endpoint,
        point: Coordinate,
        result: Result<Option<String>, GeocodeError>,
    },
    RouteDone(Result<Route, RoutingError>),
}

/// Request place suggestions. Sends `SearchDone` on the channel when complete.
pub fn request_search(
    runtime: &Handle,
    tx: &UnboundedSender<MapServiceMessage>,
    client: Arc<GeocodingClient>,
    endpoint: Endpoint,
    query: String,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.search(&query).await;
        let _ = tx.send(MapServiceMessage::SearchDone {
            endpoint,
            query,
            result,
        });
    });
}

/// Request the name of a point. Sends `ReverseDone` on the channel when complete.
pub fn request_reverse(
    runtime: &Handle,
    tx: &UnboundedSender<MapServiceMessage>,
    client: Arc<GeocodingClient>,
    endpoint: Endpoint,
    point: Coordinate,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.reverse(point).await;
        let _ = tx.send(MapServiceMessage::ReverseDone {
            endpoint,
            point,
            result,
        });
    });
}

/// Request a driving route. Sends `RouteDone` on the channel when complete.
pub fn request_route(
    runtime: &Handle,
    tx: &UnboundedSender<MapServiceMessage>,
    client: Arc<RoutingClient>,
    from: Coordinate,
    to: Coordinate,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = client.route(from, to).await;
        let _ = tx.send(MapServiceMessage::RouteDone(result));
    });
}
