//! penspace-sim: drive a stylus rig from the keyboard
//!
//! Usage:
//!   penspace-sim                       # default configuration
//!   penspace-sim --config stylus.toml  # explicit configuration file
//!   penspace-sim --tick-ms 16          # faster tick
//!
//! Logs go to a file since the terminal is taken over by the view.

use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use penspace::StylusConfig;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "penspace-sim", version, about = "Keyboard-driven 6-DOF stylus sandbox")]
struct Args {
    /// Path to a stylus configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Milliseconds per rig tick
    #[arg(long, default_value_t = 33)]
    tick_ms: u64,

    /// Where to write logs
    #[arg(long, default_value = "penspace-sim.log")]
    log_file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_file = File::create(&args.log_file)
        .with_context(|| format!("creating log file {}", args.log_file.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("penspace=info,penspace_sim=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();

    let config = match &args.config {
        Some(path) => StylusConfig::load(path)?,
        None => StylusConfig::load_or_default()?,
    };

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting tokio runtime")?;

    penspace_sim::run(
        config,
        Duration::from_millis(args.tick_ms.max(1)),
        runtime.handle().clone(),
    )
}
