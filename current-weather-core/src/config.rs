use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf};
use thiserror::Error;

use crate::model::Location;

pub const DEFAULT_ENDPOINT: &str = "http://api.openweathermap.org/data/2.5/weather";

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error(
        "Invalid coordinates ({latitude}, {longitude}): latitude must be -90..=90, longitude -180..=180"
    )]
    InvalidCoordinates { latitude: f64, longitude: f64 },
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// timeout_secs = 10
///
/// [location]
/// name = "Brussels"
/// latitude = 50.8467
/// longitude = 4.3525
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// OpenWeather `appid`. Left blank until the user configures one.
    pub api_key: String,

    /// Current-weather endpoint, overridable to point at a proxy or mock.
    pub endpoint: String,

    /// Total request timeout. `None` waits as long as the connection stays open.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    pub location: Location,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: None,
            location: Location::default(),
        }
    }
}

impl Config {
    /// Load config from the platform config dir, or defaults if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, fall back to defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        cfg.location
            .validate()
            .with_context(|| format!("Invalid location in config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to the platform config dir, creating parent directories as needed.
    pub fn save(&self) -> Result<PathBuf> {
        let path = Self::config_file_path()?;
        self.save_to(&path)?;
        Ok(path)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "current-weather", "current-weather")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn set_location(&mut self, location: Location) -> Result<(), ConfigError> {
        location.validate()?;
        self.location = location;
        Ok(())
    }

    /// The configured location, checked against coordinate bounds.
    pub fn location(&self) -> Result<&Location, ConfigError> {
        self.location.validate()?;
        Ok(&self.location)
    }
}
