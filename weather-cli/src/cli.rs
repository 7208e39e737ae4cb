use anyhow::{Context, anyhow, bail};
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, CustomType, Password, PasswordDisplayMode};
use weather_core::{
    Config, Coordinates, FixedLocation, RefreshOutcome, WeatherService, WeatherSession,
    endpoint::{onecall_url, redacted},
};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current, hourly and daily weather for a location")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and an optional default location.
    Configure,

    /// Fetch and show the weather.
    Show {
        #[command(flatten)]
        location: LocationArgs,

        /// Print the decoded snapshot as JSON instead of the text report.
        #[arg(long)]
        json: bool,
    },

    /// Print the request URL (API key masked).
    Url {
        #[command(flatten)]
        location: LocationArgs,
    },
}

/// Coordinates given on the command line; fall back to the configured location.
#[derive(Debug, Args)]
pub struct LocationArgs {
    /// Latitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, allow_negative_numbers = true, requires = "lat")]
    lon: Option<f64>,
}

impl LocationArgs {
    fn resolve(&self, config: &Config) -> anyhow::Result<Option<Coordinates>> {
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Some(Coordinates::new(lat, lon)?)),
            _ => Ok(config.location),
        }
    }
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, json } => show(&location, json).await,
            Command::Url { location } => url(&location),
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let set_location = Confirm::new("Set a default location?")
        .with_default(config.location.is_none())
        .prompt()?;

    if set_location {
        let latitude = CustomType::<f64>::new("Latitude:")
            .with_error_message("Please type a number, e.g. 40.7128")
            .prompt()?;
        let longitude = CustomType::<f64>::new("Longitude:")
            .with_error_message("Please type a number, e.g. -74.006")
            .prompt()?;
        config.set_default_location(Coordinates::new(latitude, longitude)?);
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

async fn show(location: &LocationArgs, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let api = config.require_api()?;
    let source = FixedLocation::from(location.resolve(&config)?);
    tracing::debug!(?source, "resolved location");

    let service = WeatherService::new(api.clone()).context("Failed to create HTTP client")?;
    let session = WeatherSession::new(service);

    let snapshot = match session.refresh(&source).await {
        RefreshOutcome::Updated(snapshot) => snapshot,
        RefreshOutcome::NoLocation(e) => {
            return Err(anyhow!(e).context(
                "No location to fetch weather for.\n\
                 Hint: pass --lat/--lon or run `weather configure` to set a default location.",
            ));
        }
        RefreshOutcome::FetchFailed(e) => {
            return Err(anyhow!(e).context("Failed to fetch weather"));
        }
        RefreshOutcome::Superseded => bail!("Weather result was superseded by a newer request"),
    };

    if json {
        let text = serde_json::to_string_pretty(snapshot.as_ref())
            .context("Failed to serialize weather snapshot")?;
        println!("{text}");
    } else {
        print!("{}", render::report(&snapshot, &chrono::Local));
    }

    Ok(())
}

fn url(location: &LocationArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let coords = location.resolve(&config)?.ok_or_else(|| {
        anyhow!("No location given.\nHint: pass --lat/--lon or set a default with `weather configure`.")
    })?;

    let url = onecall_url(&config.api, coords)?;
    println!("{}", redacted(&url));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_negative_coordinates() {
        let cli = Cli::try_parse_from(["weather", "show", "--lat", "40.7128", "--lon", "-74.006"])
            .expect("parse");

        let Command::Show { location, json } = cli.command else {
            panic!("expected show command");
        };
        assert_eq!(location.lat, Some(40.7128));
        assert_eq!(location.lon, Some(-74.006));
        assert!(!json);
    }

    #[test]
    fn lat_requires_lon() {
        assert!(Cli::try_parse_from(["weather", "url", "--lat", "1.0"]).is_err());
    }

    #[test]
    fn command_line_location_wins_over_config() {
        let mut config = Config::default();
        config.set_default_location(Coordinates::new(1.0, 2.0).unwrap());

        let args = LocationArgs { lat: Some(3.0), lon: Some(4.0) };
        assert_eq!(args.resolve(&config).unwrap(), Some(Coordinates::new(3.0, 4.0).unwrap()));

        let args = LocationArgs { lat: None, lon: None };
        assert_eq!(args.resolve(&config).unwrap(), Some(Coordinates::new(1.0, 2.0).unwrap()));
    }

    #[test]
    fn out_of_range_command_line_location_is_an_error() {
        let args = LocationArgs { lat: Some(91.0), lon: Some(0.0) };
        assert!(args.resolve(&Config::default()).is_err());
    }
}
