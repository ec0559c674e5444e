//! Forward geocoding: turn a partial place name into location suggestions.
//! Uses the Open-Meteo geocoding API - free, no API key required.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::error::SuggestionError;
use crate::types::LocationCandidate;

pub const DEFAULT_GEOCODING_URL: &str = "https://geocoding-api.open-meteo.com/v1/search";
/// Shorter trimmed queries never reach the network
pub const MIN_QUERY_CHARS: usize = 3;
/// Upper bound on suggestions, also sent upstream as `count`
pub const MAX_CANDIDATES: usize = 5;

const USER_AGENT: &str = concat!("SkyView/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct GeocodingResponse {
    results: Option<Vec<GeocodingResult>>,
}

#[derive(Debug, Deserialize)]
struct GeocodingResult {
    name: String,
    latitude: f64,
    longitude: f64,
    country: Option<String>,
    admin1: Option<String>,
}

impl From<GeocodingResult> for LocationCandidate {
    fn from(r: GeocodingResult) -> Self {
        Self {
            name: r.name,
            country: r.country.unwrap_or_default(),
            region: r.admin1.filter(|a| !a.is_empty()),
            latitude: r.latitude,
            longitude: r.longitude,
        }
    }
}

/// Whether a query is long enough to be worth a lookup
pub fn is_searchable(query: &str) -> bool {
    query.trim().chars().count() >= MIN_QUERY_CHARS
}

/// Resolves partial place names to ranked candidates
#[derive(Debug, Clone)]
pub struct LocationResolver {
    client: Arc<Client>,
    base_url: Url,
}

impl LocationResolver {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SuggestionError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client: Arc::new(client),
            base_url: Url::parse(base_url)?,
        })
    }

    /// Suggestions for `query`, in provider order, at most [`MAX_CANDIDATES`].
    ///
    /// Never fails: short queries and any upstream failure yield an empty list.
    pub async fn resolve(&self, query: &str) -> Vec<LocationCandidate> {
        match self.try_resolve(query).await {
            Ok(candidates) => candidates,
            Err(e) => {
                tracing::debug!("Suggestion lookup degraded to empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Like [`resolve`](Self::resolve) but reports why a lookup failed.
    #[instrument(skip(self), level = "debug")]
    pub async fn try_resolve(&self, query: &str) -> Result<Vec<LocationCandidate>, SuggestionError> {
        if !is_searchable(query) {
            return Ok(Vec::new());
        }

        let count = MAX_CANDIDATES.to_string();
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("name", query.trim())
            .append_pair("count", &count);

        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(SuggestionError::Status(response.status().as_u16()));
        }

        let body: GeocodingResponse = response.json().await?;

        let mut candidates: Vec<LocationCandidate> = body
            .results
            .unwrap_or_default()
            .into_iter()
            .map(LocationCandidate::from)
            .collect();
        candidates.truncate(MAX_CANDIDATES);

        tracing::debug!("Resolved {} candidates", candidates.len());
        Ok(candidates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_searchable_trims() {
        assert!(!is_searchable(""));
        assert!(!is_searchable("  Lo  "));
        assert!(is_searchable("Lon"));
        assert!(is_searchable("  Lon "));
    }

    #[test]
    fn test_is_searchable_counts_chars_not_bytes() {
        // two characters, four bytes
        assert!(!is_searchable("Åö"));
        assert!(is_searchable("Köl"));
    }

    #[test]
    fn test_result_conversion_drops_empty_region() {
        let result = GeocodingResult {
            name: "Paris".into(),
            latitude: 48.85,
            longitude: 2.35,
            country: None,
            admin1: Some(String::new()),
        };
        let candidate = LocationCandidate::from(result);
        assert_eq!(candidate.country, "");
        assert_eq!(candidate.region, None);
    }

    #[tokio::test]
    async fn test_short_query_skips_network() {
        // Unroutable base URL: any request would error rather than return Ok
        let resolver =
            LocationResolver::new("http://127.0.0.1:9/v1/search", Duration::from_millis(50))
                .unwrap();
        let result = resolver.try_resolve("ab").await.unwrap();
        assert!(result.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_provider_degrades_to_empty() {
        let resolver =
            LocationResolver::new("http://127.0.0.1:9/v1/search", Duration::from_millis(200))
                .unwrap();
        assert!(resolver.try_resolve("London").await.is_err());
        assert!(resolver.resolve("London").await.is_empty());
    }
}
