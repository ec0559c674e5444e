//! Suggestion backend: debounced geocoding lookups.
//!
//! Each lookup waits out the debounce interval first. Cancelling its token
//! during the wait or the request drops it without sending anything.

use std::sync::Arc;
use std::time::Duration;

use skyview_weather::{LocationCandidate, LocationResolver};
use tokio::sync::mpsc::UnboundedSender;
use tokio_util::sync::CancellationToken;

use super::SessionEvent;

/// A lookup the session asked for after a query edit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionRequest {
    pub generation: u64,
    pub query: String,
}

/// Messages sent from suggestion lookups back to the session owner
#[derive(Debug)]
pub enum SuggestionServiceMessage {
    LookupDone {
        generation: u64,
        query: String,
        candidates: Vec<LocationCandidate>,
    },
}

/// Schedule a lookup for `request` once `debounce` has elapsed.
/// Sends `LookupDone` unless `cancel` fires first.
pub fn request_suggestions(
    tx: &UnboundedSender<SessionEvent>,
    resolver: Arc<LocationResolver>,
    request: SuggestionRequest,
    debounce: Duration,
    cancel: CancellationToken,
) {
    let tx = tx.clone();

    tokio::spawn(async move {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::trace!("Lookup for {:?} superseded during debounce", request.query);
                return;
            }
            _ = tokio::time::sleep(debounce) => {}
        }

        let candidates = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("Lookup for {:?} superseded in flight", request.query);
                return;
            }
            candidates = resolver.resolve(&request.query) => candidates,
        };

        let _ = tx.send(SessionEvent::Suggestions(
            SuggestionServiceMessage::LookupDone {
                generation: request.generation,
                query: request.query,
                candidates,
            },
        ));
    });
}
