//! Current-conditions client for the Open-Meteo forecast API.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use crate::error::RetrievalError;
use crate::types::WeatherSnapshot;

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

const USER_AGENT: &str = concat!("SkyView/", env!("CARGO_PKG_VERSION"));
const CURRENT_FIELDS: &str = "temperature_2m,relative_humidity_2m,windspeed_10m,weathercode,is_day";

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    current: Option<CurrentData>,
}

#[derive(Debug, Deserialize)]
struct CurrentData {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    #[serde(alias = "wind_speed_10m")]
    windspeed_10m: f64,
    #[serde(alias = "weather_code")]
    weathercode: i32,
    is_day: Option<u8>,
}

impl From<CurrentData> for WeatherSnapshot {
    fn from(c: CurrentData) -> Self {
        Self {
            temperature_celsius: c.temperature_2m,
            relative_humidity_percent: c.relative_humidity_2m.round().clamp(0.0, 100.0) as u8,
            wind_speed_meters_per_second: c.windspeed_10m,
            condition_code: c.weathercode,
            // Missing flag counts as daytime
            is_day: c.is_day != Some(0),
            fetched_at: Utc::now(),
        }
    }
}

/// Fetches current conditions for a coordinate pair
#[derive(Debug, Clone)]
pub struct WeatherProvider {
    client: Arc<Client>,
    base_url: Url,
}

impl WeatherProvider {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, RetrievalError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(RetrievalError::Network)?;

        Ok(Self {
            client: Arc::new(client),
            base_url: Url::parse(base_url)?,
        })
    }

    fn current_url(&self, latitude: f64, longitude: f64) -> Url {
        let mut url = self.base_url.clone();
        url.query_pairs_mut()
            .append_pair("latitude", &latitude.to_string())
            .append_pair("longitude", &longitude.to_string())
            .append_pair("current", CURRENT_FIELDS)
            .append_pair("wind_speed_unit", "ms")
            .append_pair("timezone", "auto");
        url
    }

    /// Fetch current conditions. No retry is attempted.
    ///
    /// # Errors
    /// `RetrievalError::Status` for a non-success response, `Malformed` when
    /// the body lacks a usable `current` object, `Network` for transport failures.
    #[instrument(skip(self), level = "info")]
    pub async fn fetch_current(
        &self,
        latitude: f64,
        longitude: f64,
    ) -> Result<WeatherSnapshot, RetrievalError> {
        let url = self.current_url(latitude, longitude);
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(RetrievalError::Network)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!("Forecast returned status {}", status);
            return Err(RetrievalError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let body: ForecastResponse = response.json().await?;
        let current = body
            .current
            .ok_or_else(|| RetrievalError::Malformed("response has no `current` object".into()))?;

        let snapshot = WeatherSnapshot::from(current);
        tracing::info!(
            "Fetched current weather: {:.1}°C, code {}",
            snapshot.temperature_celsius,
            snapshot.condition_code
        );
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_current_url_query() {
        let provider =
            WeatherProvider::new(DEFAULT_FORECAST_URL, Duration::from_secs(1)).unwrap();
        let url = provider.current_url(51.5, -0.12);
        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        assert!(pairs.contains(&("latitude".into(), "51.5".into())));
        assert!(pairs.contains(&("longitude".into(), "-0.12".into())));
        assert!(pairs.contains(&("current".into(), CURRENT_FIELDS.into())));
        assert!(pairs.contains(&("timezone".into(), "auto".into())));
        assert!(pairs.contains(&("wind_speed_unit".into(), "ms".into())));
    }

    #[test]
    fn test_current_data_accepts_new_field_names() {
        let json = r#"{"temperature_2m": 4.0, "relative_humidity_2m": 91,
                       "wind_speed_10m": 1.5, "weather_code": 45}"#;
        let current: CurrentData = serde_json::from_str(json).unwrap();
        let snapshot = WeatherSnapshot::from(current);
        assert_eq!(snapshot.condition_code, 45);
        assert_eq!(snapshot.relative_humidity_percent, 91);
        assert!(snapshot.is_day);
    }

    #[test]
    fn test_is_day_zero_means_night() {
        let json = r#"{"temperature_2m": 4.0, "relative_humidity_2m": 91,
                       "windspeed_10m": 1.5, "weathercode": 0, "is_day": 0}"#;
        let current: CurrentData = serde_json::from_str(json).unwrap();
        assert!(!WeatherSnapshot::from(current).is_day);
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let err = WeatherProvider::new("not a url", Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, RetrievalError::InvalidUrl(_)));
    }
}
