//! Core library for the `current-weather` CLI.
//!
//! This crate defines:
//! - Configuration handling (location, API key, endpoint)
//! - The provider abstraction and the OpenWeather client
//! - Extraction of the report fields from the raw response
//!
//! It is used by `current-weather-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod extract;
pub mod model;
pub mod provider;

pub use config::{Config, ConfigError};
pub use extract::{MissingField, extract_report};
pub use model::{Location, Units, WeatherReport, WeatherRequest};
pub use provider::{
    FetchError, FetchOutcome, WeatherProvider, current_weather, openweather::OpenWeatherProvider,
};
