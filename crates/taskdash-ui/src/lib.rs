//! Headless view-models for the Taskdash screens.
//!
//! Each model owns its view state, dispatches network work onto the tokio
//! runtime through `services`, and applies the results it receives back on
//! its channel. The host UI supplies dialogs (`Notifier`) and the map widget
//! (`MapSurface`).

pub mod app_services;
pub mod debounce;
pub mod error_mapping;
pub mod map_surface;
pub mod models;
pub mod navigation;
pub mod notify;
pub mod services;

#[cfg(test)]
pub(crate) mod test_support;

pub use app_services::AppServices;
pub use map_surface::{Endpoint, MapSurface, MarkerHandle};
pub use navigation::{Navigator, Route};
pub use notify::{Notifier, Toast, TracingNotifier};
