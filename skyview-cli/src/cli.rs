use std::convert::TryFrom;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use reqwest::Client;
use tracing::{debug, warn};

use skyview_core::{
    Config, Coordinate, UnitSystem, WeatherClient, current_weather, daily_weather, hourly_weather,
    location, reverse_geocode,
};

use crate::display;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skyview", version, about = "Weather for a chosen map point")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Args)]
pub struct LocationArgs {
    /// Latitude in decimal degrees; resolved from your IP address when omitted.
    #[arg(long, requires = "lon")]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees.
    #[arg(long, requires = "lat")]
    pub lon: Option<f64>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key in the config file.
    Configure,

    /// Show weather for a location once.
    Show {
        #[command(flatten)]
        location: LocationArgs,

        /// Unit system, "metric" or "imperial".
        #[arg(long, default_value = "metric")]
        units: String,

        /// Also show the hourly forecast.
        #[arg(long)]
        hourly: bool,

        /// Also show the daily forecast.
        #[arg(long)]
        daily: bool,
    },

    /// Keep showing current weather, re-fetching on a fixed interval.
    Watch {
        #[command(flatten)]
        location: LocationArgs,

        /// Unit system, "metric" or "imperial".
        #[arg(long, default_value = "metric")]
        units: String,

        /// Seconds between refreshes.
        #[arg(long, default_value_t = 600)]
        interval: u64,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, units, hourly, daily } => {
                show(&location, &units, hourly, daily).await
            }
            Command::Watch { location, units, interval } => {
                watch(&location, &units, interval).await
            }
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;

    let mut config = Config::load()?;
    config.set_api_key(api_key);
    config.save()?;

    println!("Saved API key to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show(location: &LocationArgs, units: &str, hourly: bool, daily: bool) -> anyhow::Result<()> {
    let units = UnitSystem::try_from(units)?;
    let api_key = Config::load()?.require_api_key()?;

    let http = http_client()?;
    let coordinate = resolve_coordinate(&http, location).await?;

    let mut client = WeatherClient::new(api_key);
    let response = client.fetch(coordinate, units).await?;

    println!("Weather for {}", place_label(&http, coordinate).await);
    display::print_reading(&current_weather(&response)?, units);

    if hourly {
        println!("\nHourly forecast:");
        for reading in hourly_weather(&response)? {
            println!("---");
            display::print_reading(&reading, units);
        }
    }

    if daily {
        println!("\nDaily forecast:");
        for reading in daily_weather(&response)? {
            println!("---");
            display::print_reading(&reading, units);
        }
    }

    Ok(())
}

async fn watch(location: &LocationArgs, units: &str, interval: u64) -> anyhow::Result<()> {
    let units = UnitSystem::try_from(units)?;
    let api_key = Config::load()?.require_api_key()?;

    let http = http_client()?;
    // Resolved once and captured: every later tick re-fetches this same spot.
    let coordinate = resolve_coordinate(&http, location).await?;
    let label = place_label(&http, coordinate).await;

    let mut client = WeatherClient::new(api_key);
    let mut ticker = tokio::time::interval(Duration::from_secs(interval.max(1)));

    loop {
        // first tick fires immediately
        ticker.tick().await;
        if let Err(err) = refresh(&mut client, coordinate, units, &label).await {
            warn!("refresh failed, keeping the last reading: {err}");
        }
    }
}

/// Single entry point for the initial fetch and every timer tick.
async fn refresh(
    client: &mut WeatherClient,
    coordinate: Coordinate,
    units: UnitSystem,
    label: &str,
) -> anyhow::Result<()> {
    let response = client.fetch(coordinate, units).await?;
    let reading = current_weather(&response)?;

    println!();
    println!(
        "[{}] Weather for {label}",
        chrono::Local::now().format("%H:%M:%S")
    );
    display::print_reading(&reading, units);

    Ok(())
}

/// Explicit `--lat/--lon` when given, otherwise the IP-resolved default.
async fn resolve_coordinate(http: &Client, args: &LocationArgs) -> anyhow::Result<Coordinate> {
    if let (Some(lat), Some(lon)) = (args.lat, args.lon) {
        return Ok(Coordinate::new(lat, lon));
    }

    match location::resolve_current_location(http).await {
        Ok(coordinate) => {
            debug!("resolved default location {coordinate}");
            Ok(coordinate)
        }
        Err(err) => Err(anyhow::anyhow!(
            "{err}.\nHint: pass --lat and --lon explicitly."
        )),
    }
}

async fn place_label(http: &Client, coordinate: Coordinate) -> String {
    reverse_geocode(http, coordinate)
        .await
        .unwrap_or_else(|| coordinate.to_string())
}

fn http_client() -> anyhow::Result<Client> {
    Client::builder()
        .user_agent(concat!("skyview/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("Failed to build HTTP client")
}
