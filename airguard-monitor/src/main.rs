//! airguard-monitor - Main entry point
//!
//! `run` samples a simulated BME680 in real time; `replay` scores a CSV
//! recording offline. Both print the same report format.

use std::path::PathBuf;
use std::process::ExitCode;

use airguard_core::{CsvSource, MonotonicTime};
use airguard_monitor::{
    live, replay, resolve, ConfigOverrides, Reporter, SimulatedSource, SimulationConfig,
    StopReason,
};
use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Command-line arguments for airguard-monitor
#[derive(Parser, Debug)]
#[command(name = "airguard-monitor")]
#[command(about = "Gas sensor burn-in and indoor air quality reports")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// TOML configuration file with an [air_quality] table
    #[arg(short, long, global = true, env = "AIRGUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Log filter, e.g. "debug" or "airguard_core=trace" (overrides RUST_LOG)
    #[arg(long, global = true, env = "AIRGUARD_LOG")]
    log_level: Option<String>,

    #[command(flatten)]
    overrides: ConfigOverrides,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calibrate and report in real time until Ctrl+C
    Run {
        #[command(flatten)]
        simulation: SimulationConfig,
    },
    /// Score a recorded CSV session as fast as possible
    Replay {
        /// Recording with temperature,pressure,humidity,gas_resistance,heat_stable columns
        recording: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_deref());

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("fatal: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn execute(cli: Cli) -> Result<()> {
    let config = resolve(cli.config.as_deref(), &cli.overrides)
        .context("Failed to load configuration")?;

    match cli.command {
        Command::Run { simulation } => {
            info!(seed = simulation.seed, "Starting simulated sensor");
            let mut source =
                SimulatedSource::new(simulation).context("Failed to start sensor")?;
            let mut reporter = Reporter::stdout();
            reporter.banner()?;

            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .context("Failed to start runtime")?;

            let summary = runtime.block_on(live::run(
                config,
                &mut source,
                &MonotonicTime::new(),
                &mut reporter,
                shutdown_signal(),
            ))?;

            if summary.stop == StopReason::SourceExhausted {
                reporter.summary(&summary.stats)?;
            }
            info!(stats = %summary.stats, "Session finished");
        }
        Command::Replay { recording } => {
            let mut source = CsvSource::open(&recording)
                .with_context(|| format!("Failed to open {}", recording.display()))?;
            let mut reporter = Reporter::stdout();

            let stats = replay::replay(
                config,
                &mut source,
                &mut reporter,
                Local::now().naive_local(),
            )?;
            reporter.summary(&stats)?;

            let file_stats = source.stats();
            info!(
                samples = file_stats.samples_read,
                lines = file_stats.lines_processed,
                "Replay finished"
            );
            if file_stats.parse_errors > 0 {
                warn!("{} malformed lines skipped", file_stats.parse_errors);
            }
        }
    }

    Ok(())
}

/// Resolves on Ctrl+C
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to install Ctrl+C handler: {}", e);
        std::future::pending::<()>().await;
    }
}
