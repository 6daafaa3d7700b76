//! benchutil
//!
//! A small HTTP load generator. It fires a fixed number of requests at a
//! target either one at a time or with bounded parallelism, classifies every
//! attempt as success, error or cancellation, and prints a summary report.

pub mod app;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod headers;
pub mod loader;
pub mod logging;
pub mod models;
pub mod output;
pub mod shutdown;
pub mod types;

// Re-export commonly used types
pub use error::{AppError, Result};
pub use loader::{new_loader, Loader, LoaderFactory, LoaderSettings};
pub use models::{Headers, LoadConfig, Report};
pub use output::{OutputFormatterFactory, ReportFormatter};
pub use types::OutputFormat;

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_CONCURRENCY: i64 = 0;
    pub const DEFAULT_TIMEOUT_SECS: i64 = 1;
    pub const DEFAULT_METHOD: &str = "GET";
    pub const DEFAULT_OUTPUT: &str = "human";
    pub const DEFAULT_ENABLE_COLOR: bool = true;
    pub const DEFAULT_GREETING_NAME: &str = "guest";
}
