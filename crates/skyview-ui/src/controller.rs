//! Owns the live `SearchSession` and drives the background work it asks for.
//!
//! The display layer calls the action methods and then awaits
//! [`SearchController::process_next`] to apply completed work. Only the
//! controller mutates the session.

use std::sync::Arc;
use std::time::Duration;

use skyview_core::{AppError, Config, ConfigError};
use skyview_weather::{LocationResolver, TemperatureUnit, WeatherProvider};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio_util::sync::CancellationToken;

use crate::models::SearchSession;
use crate::services::{
    request_suggestions, request_weather_fetch, SessionEvent, SuggestionServiceMessage,
    WeatherServiceMessage,
};

pub struct SearchController {
    session: SearchSession,
    resolver: Arc<LocationResolver>,
    provider: Arc<WeatherProvider>,
    debounce: Duration,
    tx: UnboundedSender<SessionEvent>,
    rx: UnboundedReceiver<SessionEvent>,
    /// Cancels the pending suggestion lookup, if any
    pending_lookup: Option<CancellationToken>,
}

fn unit_from_config(unit: skyview_core::TemperatureUnit) -> TemperatureUnit {
    match unit {
        skyview_core::TemperatureUnit::Celsius => TemperatureUnit::Celsius,
        skyview_core::TemperatureUnit::Fahrenheit => TemperatureUnit::Fahrenheit,
    }
}

impl SearchController {
    pub fn new(
        resolver: LocationResolver,
        provider: WeatherProvider,
        debounce: Duration,
        unit: TemperatureUnit,
    ) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            session: SearchSession::new(unit),
            resolver: Arc::new(resolver),
            provider: Arc::new(provider),
            debounce,
            tx,
            rx,
            pending_lookup: None,
        }
    }

    /// Build both provider clients from configuration
    ///
    /// # Errors
    /// `AppError::Config` when an endpoint URL is unusable.
    pub fn from_config(config: &Config) -> Result<Self, AppError> {
        let timeout = Duration::from_secs(config.weather.request_timeout_secs);

        let resolver = LocationResolver::new(&config.endpoints.geocoding_url, timeout)
            .map_err(|e| ConfigError::Invalid(format!("endpoints.geocoding_url: {}", e)))?;
        let provider = WeatherProvider::new(&config.endpoints.forecast_url, timeout)
            .map_err(|e| ConfigError::Invalid(format!("endpoints.forecast_url: {}", e)))?;

        Ok(Self::new(
            resolver,
            provider,
            Duration::from_millis(config.search.debounce_ms),
            unit_from_config(config.weather.temperature_unit),
        ))
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    fn cancel_pending_lookup(&mut self) {
        if let Some(token) = self.pending_lookup.take() {
            token.cancel();
        }
    }

    /// The user edited the query text
    pub fn edit_query(&mut self, query: impl Into<String>) {
        self.cancel_pending_lookup();

        if let Some(request) = self.session.set_query(query) {
            let token = CancellationToken::new();
            request_suggestions(
                &self.tx,
                self.resolver.clone(),
                request,
                self.debounce,
                token.clone(),
            );
            self.pending_lookup = Some(token);
        }
    }

    /// The user picked the suggestion at `index`. Returns false if there is
    /// no such suggestion.
    pub fn select_candidate(&mut self, index: usize) -> bool {
        let Some(request) = self.session.select_candidate(index) else {
            return false;
        };

        self.cancel_pending_lookup();
        request_weather_fetch(&self.tx, self.provider.clone(), request);
        true
    }

    pub fn submit(&mut self) {
        self.session.submit();
    }

    pub fn new_search(&mut self) {
        self.cancel_pending_lookup();
        self.session.new_search();
    }

    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.session.toggle_unit()
    }

    /// Wait for the next completed piece of background work
    pub async fn next_event(&mut self) -> Option<SessionEvent> {
        self.rx.recv().await
    }

    /// Apply a completed piece of work to the session. Returns false when it
    /// was superseded and dropped.
    pub fn apply(&mut self, event: SessionEvent) -> bool {
        match event {
            SessionEvent::Suggestions(SuggestionServiceMessage::LookupDone {
                generation,
                query,
                candidates,
            }) => {
                tracing::debug!("{} suggestions for {:?}", candidates.len(), query);
                let applied = self.session.apply_suggestions(generation, candidates);
                if applied {
                    self.pending_lookup = None;
                }
                applied
            }
            SessionEvent::Weather(WeatherServiceMessage::FetchDone {
                generation,
                label,
                result,
            }) => self.session.complete_retrieval(generation, label, result),
        }
    }

    /// Wait for the next completion and apply it
    pub async fn process_next(&mut self) -> bool {
        match self.next_event().await {
            Some(event) => self.apply(event),
            None => false,
        }
    }
}

impl Drop for SearchController {
    fn drop(&mut self) {
        self.cancel_pending_lookup();
    }
}
