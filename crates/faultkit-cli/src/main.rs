//! Faultkit CLI - Command line interface for fault diagnosis
//!
//! Usage:
//!   faultkit replay crash.txt      # Diagnose a captured traceback
//!   faultkit replay crash.json     # Replay a serialized fault record
//!   faultkit trigger name          # Synthesize a sample fault and diagnose it

mod triggers;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use faultkit::{Fault, INTERRUPTED_BANNER, LaunchConfig, Launcher, OsFs, Outcome, Supervision};
use triggers::TriggerKind;

/// Faultkit - fault diagnosis launcher for student scripts
#[derive(Parser, Debug)]
#[command(name = "faultkit")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Load launch configuration from a JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Logical name of the supervised script
    #[arg(long)]
    script: Option<String>,

    /// Directory student scripts are stored under
    #[arg(long)]
    script_dir: Option<String>,

    /// Directory bundled libraries are stored under
    #[arg(long)]
    lib_dir: Option<String>,

    /// Context lines shown on each side of the target line
    #[arg(long)]
    radius: Option<usize>,

    /// Path of the error log file
    #[arg(long)]
    log_file: Option<String>,

    /// Log size at which the next write truncates instead of appending
    #[arg(long)]
    max_log_bytes: Option<u64>,

    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Diagnose a fault captured on a device (traceback text, or a
    /// serialized fault record if the file ends in .json)
    Replay {
        /// Capture file to read
        file: PathBuf,
    },
    /// Synthesize a sample fault for a category and diagnose it
    Trigger {
        /// Which fault category to trigger
        kind: TriggerKind,
    },
}

fn load_config(args: &Args) -> Result<LaunchConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse config: {}", path.display()))?
        }
        None => LaunchConfig::default(),
    };

    if let Some(script) = &args.script {
        config.script = script.clone();
    }
    if let Some(script_dir) = &args.script_dir {
        config.script_dir = script_dir.clone();
    }
    if let Some(lib_dir) = &args.lib_dir {
        config.lib_dir = lib_dir.clone();
    }
    if let Some(radius) = args.radius {
        config.context_radius = radius;
    }
    if let Some(log_file) = &args.log_file {
        config.log_file = log_file.clone();
    }
    if let Some(max_log_bytes) = args.max_log_bytes {
        config.max_log_bytes = max_log_bytes;
    }
    Ok(config)
}

fn load_fault(path: &Path) -> Result<Fault> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read capture: {}", path.display()))?;

    if path.extension().is_some_and(|ext| ext == "json") {
        serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse fault record: {}", path.display()))
    } else {
        Fault::from_trace_text(&text)
            .with_context(|| format!("Failed to parse traceback: {}", path.display()))
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = load_config(&args)?;

    let fault = match &args.command {
        Cmd::Replay { file } => load_fault(file)?,
        Cmd::Trigger { kind } => kind.sample(&config.script),
    };

    let launcher = Launcher::builder()
        .fs(Arc::new(OsFs::new()))
        .config(config)
        .build();

    // The stop button is SIGINT on a host: one falling edge, one flag.
    let stop = launcher.stop_token();
    signal_hook::flag::register(signal_hook::consts::SIGINT, stop.flag())
        .context("Failed to register stop signal")?;

    let supervision = launcher.supervise(move |stop| {
        if stop.is_tripped() {
            return Outcome::Cancelled;
        }
        Outcome::Faulted(fault)
    });

    match supervision {
        Supervision::Completed => Ok(()),
        Supervision::Interrupted => {
            println!("{}", INTERRUPTED_BANNER);
            std::process::exit(130);
        }
        Supervision::Diagnosed(diagnosis) => {
            print!("{}", diagnosis.text);
            Ok(())
        }
    }
}
