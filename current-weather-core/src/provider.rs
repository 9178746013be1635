use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::{
    extract::{MissingField, extract_report},
    model::{WeatherReport, WeatherRequest},
};

pub mod openweather;

/// Failures that end the run: nothing useful can be printed for them.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Failed to send request to {endpoint}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to read response body from {endpoint}")]
    Body {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Response body is not valid JSON: {body}")]
    Parse {
        body: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Result of a fetch that reached the service and got JSON back.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Report(WeatherReport),
    /// The body parsed but did not have the expected shape, typically an
    /// error payload such as an invalid-key response.
    Unavailable(MissingField),
}

#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Perform the request and return the parsed body, whatever its shape.
    async fn fetch(&self, request: &WeatherRequest) -> Result<Value, FetchError>;
}

/// Fetch current conditions and extract the report fields.
#[instrument(
    skip_all,
    fields(
        location = %request.location.name,
        lat = request.location.latitude,
        lon = request.location.longitude,
    )
)]
pub async fn current_weather(
    provider: &dyn WeatherProvider,
    request: &WeatherRequest,
) -> Result<FetchOutcome, FetchError> {
    info!("Fetching weather data for {}...", request.location.name);

    let body = provider.fetch(request).await?;

    match extract_report(&body, &request.location) {
        Ok(report) => Ok(FetchOutcome::Report(report)),
        Err(missing) => {
            debug!(%missing, "response did not contain the expected fields");
            Ok(FetchOutcome::Unavailable(missing))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Location;
    use serde_json::json;

    #[derive(Debug)]
    struct Canned(Value);

    #[async_trait]
    impl WeatherProvider for Canned {
        async fn fetch(&self, _request: &WeatherRequest) -> Result<Value, FetchError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Debug)]
    struct NotJson;

    #[async_trait]
    impl WeatherProvider for NotJson {
        async fn fetch(&self, _request: &WeatherRequest) -> Result<Value, FetchError> {
            let source = serde_json::from_str::<Value>("<html>").unwrap_err();
            Err(FetchError::Parse { body: "<html>".into(), source })
        }
    }

    fn request() -> WeatherRequest {
        WeatherRequest::new(Location::brussels(), "KEY")
    }

    #[tokio::test]
    async fn well_formed_body_yields_report() {
        let provider =
            Canned(json!({"weather": [{"description": "clear sky"}], "main": {"temp": 15.2}}));

        let outcome = current_weather(&provider, &request()).await.expect("no transport error");

        match outcome {
            FetchOutcome::Report(report) => {
                assert_eq!(report.description, "clear sky");
                assert_eq!(report.temperature.to_string(), "15.2");
            }
            other => panic!("expected a report, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_shape_is_unavailable_not_error() {
        let provider = Canned(json!({"weather": []}));

        let outcome = current_weather(&provider, &request()).await.expect("no transport error");
        assert!(matches!(outcome, FetchOutcome::Unavailable(_)));
    }

    #[tokio::test]
    async fn parse_failure_propagates() {
        let err = current_weather(&NotJson, &request()).await.unwrap_err();
        assert!(matches!(err, FetchError::Parse { .. }));
    }
}
