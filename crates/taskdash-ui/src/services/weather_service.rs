//! Weather backend: async city lookups.
//! All network work runs off the UI thread; results sent via mpsc.

use std::sync::Arc;

use taskdash_weather::{WeatherError, WeatherProvider, WeatherSnapshot};
use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;

/// Messages sent from async operations back to the UI thread
#[derive(Debug)]
pub enum WeatherServiceMessage {
    /// Result of one lookup, tagged with the generation it was issued under
    FetchDone {
        generation: u64,
        city: String,
        result: Result<WeatherSnapshot, WeatherError>,
    },
}

/// Request weather for a city. Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    runtime: &Handle,
    tx: &UnboundedSender<WeatherServiceMessage>,
    provider: Arc<WeatherProvider>,
    generation: u64,
    city: String,
) {
    let tx = tx.clone();
    runtime.spawn(async move {
        let result = provider.fetch(&city).await;
        let _ = tx.send(WeatherServiceMessage::FetchDone {
            generation,
            city,
            result,
        });
    });
}
