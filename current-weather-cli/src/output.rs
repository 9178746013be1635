use std::io::{self, Write};

use current_weather_core::{FetchOutcome, Location, WeatherReport};

pub fn write_outcome<W: Write>(
    out: &mut W,
    location: &Location,
    outcome: &FetchOutcome,
) -> io::Result<()> {
    match outcome {
        FetchOutcome::Report(report) => write_report(out, report),
        FetchOutcome::Unavailable(_) => write_unavailable(out, location),
    }
}

pub fn write_report<W: Write>(out: &mut W, report: &WeatherReport) -> io::Result<()> {
    writeln!(out, "Weather in {}", report.location_name)?;
    writeln!(out, " - Description: {}", report.description)?;
    writeln!(out, " - Temperature: {} {}", report.temperature, report.units.temperature_suffix())
}

/// Single generic line; never says which field was missing.
pub fn write_unavailable<W: Write>(out: &mut W, location: &Location) -> io::Result<()> {
    writeln!(out, "Error: Could not retrieve the weather data for {}", location.name)
}
