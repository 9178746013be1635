use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::config::ConfigError;

/// A named point on the map, in decimal degrees.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    pub const BRUSSELS_LAT: f64 = 50.8467;
    pub const BRUSSELS_LON: f64 = 4.3525;

    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Result<Self, ConfigError> {
        let location = Self { name: name.into(), latitude, longitude };
        location.validate()?;
        Ok(location)
    }

    pub fn brussels() -> Self {
        Self {
            name: "Brussels".to_string(),
            latitude: Self::BRUSSELS_LAT,
            longitude: Self::BRUSSELS_LON,
        }
    }

    /// Reject coordinates outside the WGS84 ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(-90.0..=90.0).contains(&self.latitude) || !(-180.0..=180.0).contains(&self.longitude)
        {
            return Err(ConfigError::InvalidCoordinates {
                latitude: self.latitude,
                longitude: self.longitude,
            });
        }
        Ok(())
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::brussels()
    }
}

/// Measurement system requested from the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Metric,
}

impl Units {
    pub fn as_str(&self) -> &'static str {
        match self {
            Units::Metric => "metric",
        }
    }

    /// Suffix printed after a temperature in this unit system.
    pub fn temperature_suffix(&self) -> &'static str {
        match self {
            Units::Metric => "°C",
        }
    }
}

#[derive(Debug, Clone)]
pub struct WeatherRequest {
    pub location: Location,
    pub api_key: String,
    pub units: Units,
}

impl WeatherRequest {
    pub fn new(location: Location, api_key: impl Into<String>) -> Self {
        Self { location, api_key: api_key.into(), units: Units::Metric }
    }

    /// Query string pairs in the order the endpoint documents them.
    pub fn query_pairs(&self) -> [(&'static str, String); 4] {
        [
            ("lat", self.location.latitude.to_string()),
            ("lon", self.location.longitude.to_string()),
            ("appid", self.api_key.clone()),
            ("units", self.units.as_str().to_string()),
        ]
    }
}

/// The two fields pulled out of a current-weather response.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub location_name: String,
    pub description: String,
    /// Kept as the service's JSON number so `15` and `15.0` print as sent.
    pub temperature: Number,
    pub units: Units,
}
