//! Diagnostic logging
//!
//! Logs go to stderr through `tracing`, leaving stdout to the report.
//! `BENCHUTIL_LOG` (or `RUST_LOG`) overrides the level picked from the
//! command-line flags.

use crate::error::{AppError, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    /// Level implied by the global `--verbose` and `--debug` flags
    pub fn from_flags(verbose: bool, debug: bool) -> Self {
        if debug {
            LogLevel::Debug
        } else if verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        }
    }

    /// Filter directive for this level
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

fn env_filter(level: LogLevel) -> EnvFilter {
    std::env::var("BENCHUTIL_LOG")
        .or_else(|_| std::env::var("RUST_LOG"))
        .map_or_else(
            |_| EnvFilter::new(level.as_filter()),
            |value| EnvFilter::try_new(value).unwrap_or_else(|_| EnvFilter::new(level.as_filter())),
        )
}

/// Install the global subscriber; later calls keep the first one
pub fn init_logging(level: LogLevel) {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("global subscriber already installed");
    }
}
