//! State of the one live search: query, suggestions, snapshot, error, unit.
//!
//! All transitions are synchronous. Background work is identified by
//! generation numbers; a completion whose generation is no longer current is
//! dropped. A snapshot and a non-empty suggestion list are never shown
//! together.

use skyview_core::AppError;
use skyview_weather::{
    background, format_temperature, is_searchable, AssetRef, DisplayCondition, LocationCandidate,
    TemperatureUnit, WeatherSnapshot,
};

use crate::services::{FetchError, RetrievalRequest, SuggestionRequest};

pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a valid city name.";
pub const SELECT_SUGGESTION_MESSAGE: &str = "Please select a suggestion from the list.";

#[derive(Debug, Default)]
pub struct SearchSession {
    query: String,
    candidates: Vec<LocationCandidate>,
    snapshot: Option<WeatherSnapshot>,
    place_label: Option<String>,
    error_message: Option<String>,
    unit: TemperatureUnit,
    loading: bool,
    suggestion_generation: u64,
    retrieval_generation: u64,
}

impl SearchSession {
    pub fn new(unit: TemperatureUnit) -> Self {
        Self {
            unit,
            ..Self::default()
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn candidates(&self) -> &[LocationCandidate] {
        &self.candidates
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    /// Label of the place the current snapshot belongs to
    pub fn place_label(&self) -> Option<&str> {
        self.place_label.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Record a query edit. Returns the lookup to schedule, if the query
    /// warrants one. Any lookup requested earlier is superseded.
    pub fn set_query(&mut self, query: impl Into<String>) -> Option<SuggestionRequest> {
        self.query = query.into();
        self.suggestion_generation += 1;

        if self.snapshot.is_some() || !is_searchable(&self.query) {
            self.candidates.clear();
            return None;
        }

        Some(SuggestionRequest {
            generation: self.suggestion_generation,
            query: self.query.clone(),
        })
    }

    /// Apply a finished lookup. Returns false when it was superseded.
    pub fn apply_suggestions(&mut self, generation: u64, candidates: Vec<LocationCandidate>) -> bool {
        if generation != self.suggestion_generation || self.snapshot.is_some() {
            tracing::debug!(
                "Discarding stale suggestions (generation {}, current {})",
                generation,
                self.suggestion_generation
            );
            return false;
        }

        self.candidates = candidates;
        true
    }

    /// Start retrieving weather for the suggestion at `index`.
    /// Returns `None` when there is no such suggestion.
    pub fn select_candidate(&mut self, index: usize) -> Option<RetrievalRequest> {
        let candidate = self.candidates.get(index)?.clone();
        Some(self.begin_retrieval(&candidate))
    }

    /// Optimistic reset: the previous snapshot, error and suggestions are
    /// cleared before the fetch resolves.
    pub fn begin_retrieval(&mut self, candidate: &LocationCandidate) -> RetrievalRequest {
        self.snapshot = None;
        self.place_label = None;
        self.error_message = None;
        self.candidates.clear();
        self.suggestion_generation += 1;
        self.retrieval_generation += 1;
        self.loading = true;

        RetrievalRequest {
            generation: self.retrieval_generation,
            latitude: candidate.latitude,
            longitude: candidate.longitude,
            label: candidate.label(),
        }
    }

    /// Apply a finished retrieval. Returns false when it was superseded.
    pub fn complete_retrieval(
        &mut self,
        generation: u64,
        label: String,
        result: Result<WeatherSnapshot, FetchError>,
    ) -> bool {
        if generation != self.retrieval_generation {
            tracing::debug!(
                "Discarding stale weather result (generation {}, current {})",
                generation,
                self.retrieval_generation
            );
            return false;
        }

        self.loading = false;
        match result {
            Ok(snapshot) => {
                self.snapshot = Some(snapshot);
                self.query = label.clone();
                self.place_label = Some(label);
                self.candidates.clear();
                self.suggestion_generation += 1;
            }
            Err(e) => {
                tracing::error!("Failed to fetch weather for {}: {}", label, e);
                self.snapshot = None;
                self.error_message = Some(AppError::from(e).user_message().to_string());
            }
        }
        true
    }

    /// Form submission without choosing a suggestion
    pub fn submit(&mut self) {
        let message = if self.query.trim().is_empty() {
            EMPTY_QUERY_MESSAGE
        } else {
            SELECT_SUGGESTION_MESSAGE
        };
        self.error_message = Some(message.to_string());
    }

    /// Drop the displayed weather and start over. The unit preference stays.
    pub fn new_search(&mut self) {
        self.snapshot = None;
        self.place_label = None;
        self.query.clear();
        self.candidates.clear();
        self.loading = false;
        self.suggestion_generation += 1;
        self.retrieval_generation += 1;
    }

    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.unit = self.unit.toggle();
        self.unit
    }

    /// Temperature of the current snapshot in the preferred unit
    pub fn temperature_display(&self) -> Option<String> {
        self.snapshot
            .as_ref()
            .map(|s| format_temperature(s.temperature_celsius, self.unit))
    }

    pub fn display_condition(&self) -> Option<DisplayCondition> {
        self.snapshot.as_ref().map(WeatherSnapshot::display_condition)
    }

    pub fn background(&self) -> AssetRef {
        background::resolve_background(self.display_condition().as_ref())
    }
}
