//! lpstake: replay staking pool scripts and inspect pool snapshots.

use anyhow::Context;
use clap::Parser;
use lpstake_cli::{inspect, parse_script, PoolConfig, Simulator};
use lpstake_utils::{init_logging, LogFormat};
use std::io::Write;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lpstake", about = "Dual-asset staking pool simulator")]
struct Cli {
    /// Log level: "trace", "debug", "info", "warn", "error".
    /// Defaults to the config file's value.
    #[arg(long, env = "LPSTAKE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json". Logs go to stderr.
    #[arg(long, env = "LPSTAKE_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    /// Path to a TOML configuration file.
    #[arg(long, env = "LPSTAKE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Run a JSON script of steps and print one JSON result per line.
    Simulate {
        /// Script file: a JSON array of steps.
        #[arg(long)]
        script: PathBuf,

        /// Write a snapshot of the final pool state here.
        #[arg(long)]
        snapshot_out: Option<PathBuf>,

        /// Stop at the first rejected step and exit with an error.
        #[arg(long)]
        strict: bool,
    },
    /// Verify a snapshot file and print its contents as JSON.
    Inspect {
        #[arg(long)]
        snapshot: PathBuf,
    },
    /// Print the effective configuration as TOML.
    Defaults,
}

#[derive(serde::Serialize)]
struct FinalSummary<'a> {
    summary: &'a lpstake_pool::PoolSummary,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => PoolConfig::from_toml_file(path)?,
        None => PoolConfig::default(),
    };
    let log_format = cli.log_format.unwrap_or(config.log_format);
    let log_level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_logging(log_format, log_level)?;

    if let Some(path) = &cli.config {
        tracing::info!("loaded config from {}", path.display());
    }

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Command::Simulate {
            script,
            snapshot_out,
            strict,
        } => {
            let json = std::fs::read_to_string(&script)
                .with_context(|| format!("reading script {}", script.display()))?;
            let steps = parse_script(&json)?;
            let mut simulator = Simulator::new(&config)?;
            tracing::info!(steps = steps.len(), "running script");

            let mut rejected = 0usize;
            for (index, step) in steps.iter().enumerate() {
                let result = simulator.execute(index, step);
                writeln!(out, "{}", serde_json::to_string(&result)?)?;
                if !result.ok {
                    rejected += 1;
                    if strict {
                        anyhow::bail!(
                            "step {index} ({}) rejected: {}",
                            result.op,
                            result.error.unwrap_or_default()
                        );
                    }
                }
            }

            let summary = simulator.pool().summary();
            writeln!(out, "{}", serde_json::to_string(&FinalSummary { summary: &summary })?)?;

            if let Some(path) = snapshot_out {
                let bytes = simulator.pool().snapshot().to_bytes()?;
                std::fs::write(&path, bytes)
                    .with_context(|| format!("writing snapshot {}", path.display()))?;
                tracing::info!("snapshot written to {}", path.display());
            }
            tracing::info!(steps = steps.len(), rejected, "script finished");
        }
        Command::Inspect { snapshot } => {
            let bytes = std::fs::read(&snapshot)
                .with_context(|| format!("reading snapshot {}", snapshot.display()))?;
            let view = inspect(&bytes)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&view)?)?;
        }
        Command::Defaults => {
            write!(out, "{}", config.to_toml_string()?)?;
        }
    }
    Ok(())
}
