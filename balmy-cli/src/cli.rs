use std::time::Duration;

use anyhow::{Context, bail, ensure};
use balmy_core::{Config, Coordinate, Pipeline, WeatherReport};
use chrono::Utc;
use clap::{Parser, Subcommand};
use inquire::{CustomType, Text};
use tracing::{info, warn};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "balmy", version, about = "Current conditions and forecast from api.weather.gov")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv). `RUST_LOG` overrides this.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the default location and API user agent.
    Configure,

    /// Fetch and print the weather once.
    Show {
        /// Longitude in degrees; defaults to the configured location.
        #[arg(long, allow_negative_numbers = true, requires = "lat")]
        lon: Option<f64>,

        /// Latitude in degrees; defaults to the configured location.
        #[arg(long, allow_negative_numbers = true, requires = "lon")]
        lat: Option<f64>,

        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Keep printing fresh weather until interrupted.
    Watch {
        /// How often to check whether the data is stale, in seconds.
        #[arg(long, default_value_t = 60)]
        tick_secs: u64,

        /// Print each report as JSON.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { lon, lat, json } => {
                let config = Config::load()?;
                let coordinate = match (lon, lat) {
                    (Some(lon), Some(lat)) => Coordinate::new(lon, lat),
                    (None, None) => config.coordinate(),
                    _ => bail!("--lon and --lat must be given together"),
                };
                ensure!(
                    coordinate.is_valid(),
                    "Invalid coordinates: latitude must be -90..90, longitude must be -180..180"
                );

                let pipeline = Pipeline::from_config(&config)?;
                let report = pipeline
                    .fetch_report(coordinate)
                    .await
                    .context("Failed to fetch weather")?;
                print_report(&report, json)
            }
            Command::Watch { tick_secs, json } => watch(tick_secs, json).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let longitude = CustomType::<f64>::new("Longitude:")
        .with_default(config.location.longitude)
        .with_error_message("Please type a number, e.g. -93.2054")
        .prompt()?;
    let latitude = CustomType::<f64>::new("Latitude:")
        .with_default(config.location.latitude)
        .with_error_message("Please type a number, e.g. 44.9475")
        .prompt()?;
    config.set_location(Coordinate::new(longitude, latitude))?;

    config.api.user_agent = Text::new("User-Agent (api.weather.gov asks for a contact):")
        .with_default(&config.api.user_agent)
        .prompt()?;

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());
    Ok(())
}

async fn watch(tick_secs: u64, json: bool) -> anyhow::Result<()> {
    ensure!(tick_secs > 0, "--tick-secs must be at least 1");

    let config = Config::load()?;
    let coordinate = config.coordinate();
    let pipeline = Pipeline::from_config(&config)?;
    let mut policy = config.refresh_policy();
    let mut ticker = tokio::time::interval(Duration::from_secs(tick_secs));

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            _ = tokio::signal::ctrl_c() => return Ok(()),
        }

        let now = Utc::now();
        if !policy.is_due(now) {
            continue;
        }

        match pipeline.fetch_report(coordinate).await {
            Ok(report) => {
                policy.mark_refreshed(now);
                info!(at = %now, "refreshed");
                print_report(&report, json)?;
            }
            // The previous output stays on screen; the next tick retries.
            Err(err) => warn!(error = %err, "refresh failed"),
        }
    }
}

fn print_report(report: &WeatherReport, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        println!("{}", render::report(report));
    }
    Ok(())
}
