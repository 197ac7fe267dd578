use anyhow::Context;
use clap::{Parser, Subcommand};

use hike_core::{Config, FormInput, HttpForecastClient};

use crate::view::{self, ForecastView};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "hike", version, about = "Hiking weather forecast CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configure the forecast service endpoint.
    Configure {
        /// Endpoint URL; prompted for interactively when omitted.
        #[arg(long)]
        endpoint: Option<String>,
    },

    /// Request a hike forecast for a location.
    Forecast {
        /// Location name, e.g. "Innsbruck".
        location: String,

        /// Minimum acceptable temperature, °C.
        #[arg(long, default_value = "10")]
        min_temp: String,

        /// Maximum acceptable temperature, °C.
        #[arg(long, default_value = "25")]
        max_temp: String,

        /// Maximum acceptable wind speed, m/s.
        #[arg(long, default_value = "8")]
        max_wind: String,

        /// Maximum acceptable precipitation chance, percent (0-100).
        #[arg(long, default_value = "20", value_name = "PCT")]
        max_precip: String,
    },

    /// Fill in the preference form interactively, one forecast per pass.
    Interactive,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { endpoint } => configure(endpoint),
            Command::Forecast { location, min_temp, max_temp, max_wind, max_precip } => {
                let input = FormInput {
                    location,
                    min_temp,
                    max_temp,
                    max_wind,
                    max_precip_pct: max_precip,
                };
                forecast_once(&input).await
            }
            Command::Interactive => interactive().await,
        }
    }
}

fn configure(endpoint: Option<String>) -> anyhow::Result<()> {
    let mut config = Config::load()?;

    let endpoint = match endpoint {
        Some(endpoint) => endpoint,
        None => inquire::Text::new("Forecast endpoint URL:")
            .with_initial_value(config.endpoint())
            .prompt()
            .context("Failed to read endpoint from prompt")?,
    };

    config.set_endpoint(endpoint);
    config.save()?;

    println!("Endpoint set to {}", config.endpoint());
    Ok(())
}

async fn forecast_once(input: &FormInput) -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing::debug!(endpoint = config.endpoint(), "Using forecast endpoint");
    let client = HttpForecastClient::new(config.endpoint().to_string());
    let mut view = ForecastView::new(std::io::stdout());

    // A rejected or failed forecast ends in the error banner, not a
    // non-zero exit: the submission itself was handled.
    view::submit(&mut view, &client, input)
        .await
        .context("Failed to write forecast output")?;

    Ok(())
}

async fn interactive() -> anyhow::Result<()> {
    let config = Config::load()?;
    tracing::debug!(endpoint = config.endpoint(), "Using forecast endpoint");
    let client = HttpForecastClient::new(config.endpoint().to_string());
    let mut view = ForecastView::new(std::io::stdout());

    println!("Hike forecast (empty location quits)");

    let mut defaults = ("10".to_string(), "25".to_string(), "8".to_string(), "20".to_string());

    loop {
        let location = inquire::Text::new("Location:")
            .prompt()
            .context("Failed to read location")?;
        if location.trim().is_empty() {
            return Ok(());
        }

        let min_temp = prompt_threshold("Min temperature (°C):", &defaults.0)?;
        let max_temp = prompt_threshold("Max temperature (°C):", &defaults.1)?;
        let max_wind = prompt_threshold("Max wind (m/s):", &defaults.2)?;
        let max_precip_pct = prompt_threshold("Max precipitation chance (%):", &defaults.3)?;

        defaults = (
            min_temp.clone(),
            max_temp.clone(),
            max_wind.clone(),
            max_precip_pct.clone(),
        );

        let input = FormInput { location, min_temp, max_temp, max_wind, max_precip_pct };

        view::submit(&mut view, &client, &input)
            .await
            .context("Failed to write forecast output")?;
    }
}

fn prompt_threshold(label: &str, default: &str) -> anyhow::Result<String> {
    inquire::Text::new(label)
        .with_default(default)
        .prompt()
        .with_context(|| format!("Failed to read '{label}'"))
}
