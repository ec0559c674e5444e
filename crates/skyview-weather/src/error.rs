//! Errors raised by the provider clients.

use thiserror::Error;

/// Failure while looking up location suggestions.
///
/// Callers normally never see this: [`crate::LocationResolver::resolve`]
/// degrades it to an empty list.
#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("Geocoding request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Geocoding returned status {0}")]
    Status(u16),

    #[error("Invalid geocoding URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Failure while fetching current weather for a location
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("Forecast request failed: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Forecast returned status {status}")]
    Status { status: u16, message: String },

    #[error("Malformed forecast payload: {0}")]
    Malformed(String),

    #[error("Invalid forecast URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl RetrievalError {
    /// Status code of a non-success upstream response, if that is what failed
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for RetrievalError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            Self::Malformed(e.to_string())
        } else {
            Self::Network(e)
        }
    }
}
