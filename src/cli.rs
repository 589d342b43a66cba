use std::fs::File;
use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Mutex;

use clap::{ArgAction, Parser};
use tracing::debug;
use tracing_subscriber::{fmt::writer::BoxMakeWriter, EnvFilter};

use crate::cmd::Commands;
use crate::error::{AppError, Result};

/// Task list with a live wallpaper preview.
/// State lives for the session only; the login flag and config live in ~/.propaper.
#[derive(Parser)]
#[command(name = "propaper", version, about = "Task-based live wallpaper")]
pub struct Cli {
    /// Directory holding session.json, config.toml and the log file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to a config file (defaults to <data-dir>/config.toml).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Less log output (-q warn, -qq error).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub quiet: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where log lines go.
pub enum LogTarget {
    Stderr,
    /// Used while the TUI owns the terminal.
    File(File),
}

/// Pick the log level from `-v`/`-q`, falling back to `configured`.
pub fn log_level(verbose: u8, quiet: u8, configured: &str) -> String {
    let level = if quiet >= 2 {
        "error"
    } else if quiet == 1 {
        "warn"
    } else if verbose >= 3 {
        "trace"
    } else if verbose == 2 {
        "debug"
    } else if verbose == 1 {
        "info"
    } else {
        configured
    };
    level.to_string()
}

/// Install the global tracing subscriber. `RUST_LOG` wins over `level`.
pub fn init_tracing(level: &str, target: LogTarget) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| AppError::LogFilter(e.to_string()))?;

    let (writer, ansi) = match target {
        LogTarget::Stderr => (BoxMakeWriter::new(std::io::stderr), std::io::stderr().is_terminal()),
        LogTarget::File(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
    };

    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(writer)
        .with_target(true)
        .with_level(true)
        .with_ansi(ansi)
        .try_init();

    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }

    Ok(())
}
