//! Weather backend: async current-conditions fetch.
//! Network work runs on a spawned task; the result comes back over the
//! session channel.

use std::sync::Arc;

use skyview_weather::{RetrievalError, WeatherProvider, WeatherSnapshot};
use tokio::sync::mpsc::UnboundedSender;

use super::SessionEvent;

/// Error type for weather operations, as seen by the session
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct FetchError(#[from] pub RetrievalError);

/// A retrieval started by selecting a candidate
#[derive(Debug, Clone, PartialEq)]
pub struct RetrievalRequest {
    pub generation: u64,
    pub latitude: f64,
    pub longitude: f64,
    /// Place label of the chosen candidate
    pub label: String,
}

/// Messages sent from weather fetches back to the session owner
#[derive(Debug)]
pub enum WeatherServiceMessage {
    FetchDone {
        generation: u64,
        label: String,
        result: Result<WeatherSnapshot, FetchError>,
    },
}

/// Fetch current weather asynchronously.
/// Sends `FetchDone` on the channel when complete.
pub fn request_fetch(
    tx: &UnboundedSender<SessionEvent>,
    provider: Arc<WeatherProvider>,
    request: RetrievalRequest,
) {
    let tx = tx.clone();

    tokio::spawn(async move {
        tracing::info!("Fetching weather for {}", request.label);

        let result = provider
            .fetch_current(request.latitude, request.longitude)
            .await
            .map_err(FetchError::from);

        let _ = tx.send(SessionEvent::Weather(WeatherServiceMessage::FetchDone {
            generation: request.generation,
            label: request.label,
            result,
        }));
    });
}
