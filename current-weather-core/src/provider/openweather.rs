use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use crate::{config::Config, model::WeatherRequest};

use super::{FetchError, WeatherProvider};

/// Client for the OpenWeather "current weather data" endpoint.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    endpoint: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Self::with_endpoint(&config.endpoint, config.timeout_secs)
    }

    pub fn with_endpoint(endpoint: &str, timeout_secs: Option<u64>) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build().map_err(FetchError::Client)?;

        Ok(Self { endpoint: endpoint.to_string(), http })
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn fetch(&self, request: &WeatherRequest) -> Result<Value, FetchError> {
        let res = self
            .http
            .get(&self.endpoint)
            .query(&request.query_pairs())
            .send()
            .await
            // The request URL carries `appid`; keep it out of the error chain.
            .map_err(|source| FetchError::Transport {
                endpoint: self.endpoint.clone(),
                source: source.without_url(),
            })?;

        // Status is not checked: error payloads are JSON too and are judged by their shape.
        let status = res.status();
        if !status.is_success() {
            warn!(%status, "OpenWeather returned a non-success status");
        }

        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Body {
                endpoint: self.endpoint.clone(),
                source: source.without_url(),
            })?;

        debug!(bytes = body.len(), "received OpenWeather response");

        serde_json::from_str(&body)
            .map_err(|source| FetchError::Parse { body: truncate_body(&body), source })
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() <= MAX {
        return body.to_string();
    }
    let cut = (0..=MAX).rev().find(|&i| body.is_char_boundary(i)).unwrap_or(0);
    format!("{}...", &body[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept_whole() {
        assert_eq!(truncate_body("Bad Gateway"), "Bad Gateway");
    }

    #[test]
    fn long_body_is_cut_on_char_boundary() {
        let body = "é".repeat(150);
        let cut = truncate_body(&body);

        assert!(cut.ends_with("..."));
        assert_eq!(cut.trim_end_matches("...").chars().count(), 100);
    }

    #[test]
    fn builds_from_config() {
        let cfg = Config { timeout_secs: Some(3), ..Config::default() };
        let provider = OpenWeatherProvider::new(&cfg).expect("client must build");

        assert_eq!(provider.endpoint, "http://api.openweathermap.org/data/2.5/weather");
    }
}
