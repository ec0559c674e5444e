use crate::services::FetchError;
use skyview_core::{AppError, ConfigError, ReqwestErrorExt, WeatherError};
use skyview_weather::RetrievalError;

impl From<FetchError> for AppError {
    fn from(e: FetchError) -> Self {
        match e.0 {
            RetrievalError::Network(err) => AppError::Network(err.into_network_error()),
            RetrievalError::Status { status, message } => {
                AppError::Weather(WeatherError::ApiError { status, message })
            }
            RetrievalError::Malformed(s) => AppError::Weather(WeatherError::InvalidResponse(s)),
            RetrievalError::InvalidUrl(err) => {
                AppError::Config(ConfigError::Invalid(err.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_maps_to_weather_api_error() {
        let err = FetchError(RetrievalError::Status {
            status: 500,
            message: "boom".into(),
        });
        let app: AppError = err.into();
        assert!(matches!(
            app,
            AppError::Weather(WeatherError::ApiError { status: 500, .. })
        ));
        assert_eq!(
            app.user_message(),
            "Failed to fetch weather data. Please try again."
        );
    }

    #[test]
    fn malformed_maps_to_invalid_response() {
        let app: AppError = FetchError(RetrievalError::Malformed("x".into())).into();
        assert!(matches!(app, AppError::Weather(WeatherError::InvalidResponse(_))));
    }

    #[test]
    fn bad_url_maps_to_config_error() {
        let parse_err = skyview_weather::WeatherProvider::new(
            "nope",
            std::time::Duration::from_secs(1),
        )
        .unwrap_err();
        let app: AppError = FetchError(parse_err).into();
        assert!(matches!(app, AppError::Config(ConfigError::Invalid(_))));
    }
}
