use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use current_weather_core::{
    Config, Location, OpenWeatherProvider, WeatherProvider, WeatherRequest, current_weather,
};
use inquire::{Confirm, CustomType, Password, PasswordDisplayMode, Text};
use tracing::warn;

use crate::output;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "current-weather", version, about = "Current weather for a fixed location")]
pub struct Cli {
    /// Defaults to `show` when omitted.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key (and optionally a location) in the config file.
    Configure,

    /// Fetch and print current conditions.
    Show(ShowArgs),
}

/// Per-run overrides of the config file.
#[derive(Debug, Default, Args)]
pub struct ShowArgs {
    /// Display name of the location.
    #[arg(long)]
    pub name: Option<String>,

    /// Latitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true)]
    pub lon: Option<f64>,

    /// OpenWeather API key.
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout in seconds; no timeout if unset.
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Override the current-weather endpoint URL.
    #[arg(long, hide = true)]
    pub endpoint: Option<String>,
}

impl ShowArgs {
    /// Layer the flags over values loaded from disk.
    pub fn apply_to(self, config: &mut Config) -> Result<()> {
        let location = Location {
            name: self.name.unwrap_or_else(|| config.location.name.clone()),
            latitude: self.lat.unwrap_or(config.location.latitude),
            longitude: self.lon.unwrap_or(config.location.longitude),
        };
        config.set_location(location)?;

        if let Some(key) = self.api_key {
            config.set_api_key(key);
        }
        if let Some(secs) = self.timeout {
            config.timeout_secs = Some(secs);
        }
        if let Some(endpoint) = self.endpoint {
            config.endpoint = endpoint;
        }

        Ok(())
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command.unwrap_or_else(|| Command::Show(ShowArgs::default())) {
            Command::Configure => configure(),
            Command::Show(args) => {
                let mut config = Config::load()?;
                args.apply_to(&mut config)?;

                let provider = OpenWeatherProvider::new(&config)?;
                let stdout = io::stdout();
                show(&config, &provider, &mut stdout.lock()).await
            }
        }
    }
}

async fn show<W: Write>(config: &Config, provider: &dyn WeatherProvider, out: &mut W) -> Result<()> {
    if !config.has_api_key() {
        warn!("No API key configured; run `current-weather configure` or pass --api-key");
    }

    let request = WeatherRequest::new(config.location()?.clone(), config.api_key.clone());
    let outcome = current_weather(provider, &request).await?;

    output::write_outcome(out, &request.location, &outcome).context("Failed to write report")
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .without_confirmation()
        .with_display_mode(PasswordDisplayMode::Masked)
        .prompt()?;
    config.set_api_key(api_key.trim());

    let current = format!(
        "currently {} ({}, {})",
        config.location.name, config.location.latitude, config.location.longitude
    );
    let change_location =
        Confirm::new("Change the location?").with_default(false).with_help_message(&current).prompt()?;

    if change_location {
        let name = Text::new("Location name:").with_default(&config.location.name).prompt()?;
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_default(config.location.latitude)
            .with_error_message("Please type a decimal number")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_default(config.location.longitude)
            .with_error_message("Please type a decimal number")
            .prompt()?;

        config.set_location(Location { name, latitude, longitude })?;
    }

    let path = config.save()?;
    println!("Saved configuration to {}", path.display());

    Ok(())
}
