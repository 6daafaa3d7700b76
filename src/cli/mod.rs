//! Command-line interface

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// benchutil - a small HTTP load generator
#[derive(Parser, Debug, Clone)]
#[command(name = "benchutil")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(long, global = true)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Put load on an HTTP endpoint and report how it went
    Load(LoadArgs),
    /// Print a greeting
    Meet(MeetArgs),
}

/// Flags of the `load` command; unset flags fall back to the environment and defaults
#[derive(Args, Debug, Clone, Default)]
pub struct LoadArgs {
    /// Number of requests to send
    #[arg(short = 'n', long, allow_negative_numbers = true)]
    pub requests: Option<i64>,

    /// Requests in flight at once; 0 or 1 runs them one by one
    #[arg(short, long, allow_negative_numbers = true)]
    pub concurrency: Option<i64>,

    /// Per-request timeout in seconds
    #[arg(short, long, allow_negative_numbers = true)]
    pub timeout: Option<i64>,

    /// Target URL
    #[arg(long)]
    pub host: Option<String>,

    /// HTTP method
    #[arg(short, long)]
    pub method: Option<String>,

    /// File whose content is sent as the request body
    #[arg(short, long = "body", value_name = "FILE")]
    pub body: Option<PathBuf>,

    /// JSON or YAML file with request headers
    #[arg(short = 'H', long = "headers", value_name = "FILE")]
    pub headers: Option<PathBuf>,

    /// Report format (human, json, yaml)
    #[arg(short, long)]
    pub output: Option<String>,
}

#[derive(Args, Debug, Clone)]
pub struct MeetArgs {
    /// Who to greet
    #[arg(long, default_value = crate::defaults::DEFAULT_GREETING_NAME)]
    pub name: String,
}

impl Cli {
    /// Check if colors should be enabled
    pub fn use_colors(&self) -> bool {
        !self.no_color && supports_color()
    }
}

/// Check if the terminal supports color output
fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    true
}
