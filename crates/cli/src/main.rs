//! Energy Inference Service CLI
//!
//! A command-line tool for requesting forecasts, anomaly scans, and series
//! statistics from the inference server, and for checking service status.

mod client;
mod commands;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{analyze, status};

/// Energy Inference Service CLI
#[derive(Parser)]
#[command(name = "eis")]
#[command(author, version, about = "CLI for the Energy Inference Service", long_about = None)]
pub struct Cli {
    /// API endpoint URL (can also be set via EIS_API_URL env var)
    #[arg(long, env = "EIS_API_URL", default_value = "http://localhost:8001")]
    pub api_url: String,

    /// Output format
    #[arg(long, short, default_value = "table")]
    pub format: output::OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Check service health
    Health,

    /// Show information about the loaded model
    Model,

    /// Forecast future energy consumption for a machine
    Predict {
        /// Machine identifier
        #[arg(long, short)]
        machine: String,

        /// Number of future periods to forecast
        #[arg(long, short, default_value_t = 24)]
        periods: usize,

        /// Historical readings, oldest first
        values: Vec<f64>,

        /// Read the series from a file, one reading per line
        #[arg(long, conflicts_with = "values")]
        file: Option<String>,
    },

    /// Scan a series for anomalous readings
    Anomalies {
        /// Machine identifier
        #[arg(long, short)]
        machine: String,

        /// Z-score threshold; readings scoring above it are flagged
        #[arg(long, short, default_value_t = 2.0)]
        threshold: f64,

        /// Readings to scan, oldest first
        values: Vec<f64>,

        /// Read the series from a file, one reading per line
        #[arg(long, conflicts_with = "values")]
        file: Option<String>,
    },

    /// Compute descriptive statistics for a series
    Stats {
        /// Readings to summarize
        values: Vec<f64>,

        /// Read the series from a file, one reading per line
        #[arg(long, conflicts_with = "values")]
        file: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize client
    let client = client::ApiClient::new(&cli.api_url)?;

    // Execute command
    match cli.command {
        Commands::Health => {
            status::health(&client, cli.format).await?;
        }
        Commands::Model => {
            status::model_info(&client, cli.format).await?;
        }
        Commands::Predict {
            machine,
            periods,
            values,
            file,
        } => {
            let series = commands::load_series(values, file.as_deref())?;
            analyze::predict(&client, &machine, series, periods, cli.format).await?;
        }
        Commands::Anomalies {
            machine,
            threshold,
            values,
            file,
        } => {
            let series = commands::load_series(values, file.as_deref())?;
            analyze::anomalies(&client, &machine, series, threshold, cli.format).await?;
        }
        Commands::Stats { values, file } => {
            let series = commands::load_series(values, file.as_deref())?;
            analyze::stats(&client, series, cli.format).await?;
        }
    }

    Ok(())
}
