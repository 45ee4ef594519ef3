use anyhow::{Context, anyhow};
use chrono::Local;
use clap::{Parser, Subcommand};
use forecast_core::{Config, QueryState, UnitSystem, WeatherSession, provider_from_config};
use inquire::{Password, PasswordDisplayMode, Select, Text};
use tracing::{debug, info};

use crate::render;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "forecast", version, about = "Current weather and 5-day forecast")]
pub struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv). `RUST_LOG` takes precedence.
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeatherMap API key and display preferences.
    Configure,

    /// Show current conditions and the daily forecast for a location.
    Show {
        /// City name, optionally with a country code, e.g. "Paris,FR".
        location: String,

        /// Unit system; defaults to the configured one.
        #[arg(long)]
        units: Option<UnitSystem>,

        /// Print the display model as JSON instead of text.
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show {
                location,
                units,
                json,
            } => show(&location, units, json).await,
        }
    }
}

fn configure() -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let mut key_prompt = Password::new("OpenWeatherMap API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation();
    if config.is_configured() {
        key_prompt = key_prompt.with_help_message("Leave empty to keep the current key");
    }
    let api_key = key_prompt.prompt().context("API key prompt was cancelled")?;

    let starting = UnitSystem::all()
        .iter()
        .position(|u| *u == config.units)
        .unwrap_or(0);
    let units = Select::new("Default unit system:", UnitSystem::all().to_vec())
        .with_starting_cursor(starting)
        .prompt()
        .context("Unit prompt was cancelled")?;

    let lang = Text::new("Description language:")
        .with_default(&config.lang)
        .prompt()
        .context("Language prompt was cancelled")?;

    let api_key = api_key.trim();
    if !api_key.is_empty() {
        config.set_api_key(api_key.to_string());
    } else if !config.is_configured() {
        return Err(anyhow!("An API key is required. Get one at https://openweathermap.org/api"));
    }
    config.units = units;
    config.lang = lang.trim().to_string();

    let path = config.save()?;
    info!(path = %path.display(), "Configuration saved");
    println!("Configuration saved to {}", path.display());

    Ok(())
}

async fn show(location: &str, units: Option<UnitSystem>, json: bool) -> anyhow::Result<()> {
    let config = Config::load()?;
    let units = units.unwrap_or(config.units);
    let provider = provider_from_config(&config)?;
    debug!(?provider, %units, "Provider ready");

    let session = WeatherSession::new(provider);
    match session.search(location, units).await {
        QueryState::Success(model) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&model)?);
            } else {
                print!("{}", render::render(&model, Local::now()));
            }
            Ok(())
        }
        QueryState::Failed(message) => Err(anyhow!(message)),
        state => Err(anyhow!("Query did not settle: {state:?}")),
    }
}
