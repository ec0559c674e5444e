//! Weather lookup for SkyView
//!
//! Location suggestions and current conditions via the Open-Meteo APIs, plus
//! the mapping from a weather condition to a background asset.

pub mod background;
pub mod error;
pub mod geocode;
pub mod provider;
pub mod types;

pub use background::{resolve_background, AssetKind, AssetRef, BackgroundEntry};
pub use error::{RetrievalError, SuggestionError};
pub use geocode::{is_searchable, LocationResolver, MAX_CANDIDATES, MIN_QUERY_CHARS};
pub use provider::WeatherProvider;
pub use types::*;
