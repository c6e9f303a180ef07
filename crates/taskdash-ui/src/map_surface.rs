//! Interface to the interactive map widget owned by the host UI.

use taskdash_maps::Coordinate;

/// Which end of the route a marker or search belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    From,
    To,
}

/// Opaque id of a marker placed on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MarkerHandle(pub u64);

/// Drawing operations the map panel needs from the widget.
pub trait MapSurface: Send {
    /// Create the map centred on `center`. Called at most once.
    fn init(&mut self, center: Coordinate, zoom: u8);

    /// Place a draggable marker for one endpoint.
    fn add_marker(&mut self, endpoint: Endpoint, at: Coordinate) -> MarkerHandle;

    fn remove_marker(&mut self, marker: MarkerHandle);

    fn set_view(&mut self, center: Coordinate, zoom: u8);

    /// Draw the route line, replacing any previous one.
    fn show_route(&mut self, path: &[Coordinate]);

    fn fit_bounds(&mut self, path: &[Coordinate], padding: u32);
}
