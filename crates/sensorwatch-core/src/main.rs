//! SensorWatch CLI
//!
//! Command-line interface for classifying sensor reading batches.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use sensorwatch::alerting::ATTENTION_WINDOW;
use sensorwatch::config::LoggingConfig;
use sensorwatch::ingest;
use sensorwatch::models::SensorReport;
use sensorwatch::{AlertEvaluator, AlertThresholds, Config, Verdict};

/// SensorWatch - Alert classification for field sensors
#[derive(Parser)]
#[command(name = "sensorwatch")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true, env = "SENSORWATCH_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify the sensors in a measurement batch
    Evaluate {
        /// JSON file holding an array of measurements
        #[arg(short, long)]
        input: PathBuf,

        /// Only evaluate this sensor code
        #[arg(long)]
        sensor: Option<String>,

        /// Newest readings kept per sensor (defaults to ingest.history_limit)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Show the fixed alert parameters
    Thresholds,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Serialize)]
struct BatchOutput<'a> {
    reports: &'a [SensorReport],
    highest: Verdict,
}

fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    let config = match Config::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error loading configuration: {e}");
            return ExitCode::FAILURE;
        }
    };

    init_logging(&config.logging, cli.verbose);

    let result = match cli.command {
        Commands::Evaluate {
            input,
            sensor,
            limit,
        } => run_evaluate(&config, &input, sensor.as_deref(), limit, cli.format),
        Commands::Thresholds => run_thresholds(cli.format),
        Commands::Completions { shell } => {
            generate_completions(shell);
            Ok(())
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// `RUST_LOG` wins; otherwise `--verbose` means debug, else the configured level
fn init_logging(logging: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { logging.level.as_str() };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if logging.format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn run_evaluate(
    config: &Config,
    input: &Path,
    sensor: Option<&str>,
    limit: Option<usize>,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let history_limit = limit.unwrap_or(config.ingest.history_limit);
    if history_limit < ATTENTION_WINDOW {
        warn!(
            history_limit,
            attention_window = ATTENTION_WINDOW,
            "History limit is shorter than the attention window"
        );
    }

    let mut measurements = ingest::load_batch(input)
        .with_context(|| format!("failed to load batch from {}", input.display()))?;

    if let Some(code) = sensor {
        measurements.retain(|m| m.sensor_code == code);
        if measurements.is_empty() {
            anyhow::bail!("no measurements for sensor {code}");
        }
    }

    let reports = ingest::evaluate_batch(&AlertEvaluator::new(), measurements, history_limit);
    let highest = ingest::highest_verdict(&reports);

    info!(sensors = reports.len(), highest = %highest, "Evaluation complete");

    match format {
        OutputFormat::Json => {
            let output = BatchOutput {
                reports: &reports,
                highest,
            };
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            for report in &reports {
                let mean = report
                    .window_mean
                    .map_or_else(|| "-".to_string(), |m| m.round_dp(3).to_string());
                println!(
                    "{:<24} {:<10} readings={:<4} mean={}",
                    report.sensor_code, report.verdict, report.readings_considered, mean
                );
            }
            println!("highest: {highest}");
        }
    }

    Ok(())
}

fn run_thresholds(format: OutputFormat) -> anyhow::Result<()> {
    let thresholds = AlertThresholds::DEFAULT;
    let (low_min, low_max) = thresholds.low_band();
    let (high_min, high_max) = thresholds.high_band();

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "thresholds": thresholds,
                "low_band": [low_min, low_max],
                "high_band": [high_min, high_max],
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            println!(
                "Critical:  newest {} readings all < {} or > {}",
                thresholds.critical_run_length, thresholds.low, thresholds.high
            );
            println!(
                "Attention: mean of newest {} readings in [{low_min}, {low_max}] or [{high_min}, {high_max}]",
                thresholds.attention_window
            );
        }
    }

    Ok(())
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "sensorwatch", &mut io::stdout());
}
