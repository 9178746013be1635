use serde_json::Value;
use thiserror::Error;

use crate::model::{Location, Units, WeatherReport};

/// A response that parsed as JSON but lacks one of the fields we read.
///
/// The path is kept for logs only; user-facing output stays generic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("weather response is missing `{path}`")]
pub struct MissingField {
    pub path: &'static str,
}

const DESCRIPTION_PATH: &str = "weather[0].description";
const TEMPERATURE_PATH: &str = "main.temp";

/// Pull `weather[0].description` and `main.temp` out of a current-weather body.
///
/// A present key holding the wrong JSON type counts as missing.
pub fn extract_report(body: &Value, location: &Location) -> Result<WeatherReport, MissingField> {
    let description = body
        .get("weather")
        .and_then(|w| w.get(0))
        .and_then(|entry| entry.get("description"))
        .and_then(Value::as_str)
        .ok_or(MissingField { path: DESCRIPTION_PATH })?;

    let temperature = match body.get("main").and_then(|m| m.get("temp")) {
        Some(Value::Number(n)) => n.clone(),
        _ => return Err(MissingField { path: TEMPERATURE_PATH }),
    };

    Ok(WeatherReport {
        location_name: location.name.clone(),
        description: description.to_string(),
        temperature,
        units: Units::Metric,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extracts_description_and_temperature() {
        let body = json!({"weather": [{"description": "clear sky"}], "main": {"temp": 15.2}});
        let report = extract_report(&body, &Location::brussels()).expect("well-formed body");

        assert_eq!(report.location_name, "Brussels");
        assert_eq!(report.description, "clear sky");
        assert_eq!(report.temperature.to_string(), "15.2");
    }

    #[test]
    fn ignores_unrelated_fields_and_extra_entries() {
        let body = json!({
            "coord": {"lon": 4.3525, "lat": 50.8467},
            "weather": [
                {"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"},
                {"id": 701, "main": "Mist", "description": "mist", "icon": "50d"}
            ],
            "main": {"temp": 8, "feels_like": 5.9, "humidity": 91},
            "name": "Brussels",
            "cod": 200
        });
        let report = extract_report(&body, &Location::brussels()).expect("well-formed body");

        assert_eq!(report.description, "light rain");
        assert_eq!(report.temperature.to_string(), "8");
    }

    #[test]
    fn missing_main_is_reported() {
        let body = json!({"weather": [{"description": "clear sky"}]});
        let err = extract_report(&body, &Location::brussels()).unwrap_err();
        assert_eq!(err.path, "main.temp");
    }

    #[test]
    fn missing_weather_is_reported() {
        let body = json!({"main": {"temp": 15.2}});
        let err = extract_report(&body, &Location::brussels()).unwrap_err();
        assert_eq!(err.path, "weather[0].description");
    }

    #[test]
    fn empty_weather_array_counts_as_missing() {
        let body = json!({"weather": [], "main": {"temp": 15.2}});
        assert!(extract_report(&body, &Location::brussels()).is_err());
    }

    #[test]
    fn service_error_payload_counts_as_missing() {
        let body = json!({"cod": 401, "message": "Invalid API key. Please see https://openweathermap.org/faq#error401 for more info."});
        assert!(extract_report(&body, &Location::brussels()).is_err());
    }

    #[test]
    fn non_numeric_temperature_counts_as_missing() {
        let body = json!({"weather": [{"description": "fog"}], "main": {"temp": "cold"}});
        let err = extract_report(&body, &Location::brussels()).unwrap_err();
        assert_eq!(err.path, "main.temp");
    }

    #[test]
    fn top_level_array_counts_as_missing() {
        let body = json!([1, 2, 3]);
        assert!(extract_report(&body, &Location::brussels()).is_err());
    }
}
