//! Configuration data model and validation

use crate::types::{AppError, OutputFormat, Result};
use std::path::PathBuf;
use std::time::Duration;

/// Configuration of a `load` run.
///
/// Counts are signed so that negative input coming from flags or the
/// environment reaches [`LoadConfig::validate`] and gets its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// Number of requests to send
    pub requests: i64,
    /// Requests allowed in flight at once; 0 or 1 runs sequentially
    pub concurrency: i64,
    /// Per-request timeout in seconds
    pub timeout_seconds: i64,
    /// Target URL
    pub host: String,
    /// HTTP method
    pub method: String,
    /// File holding the request body
    pub body_path: Option<PathBuf>,
    /// JSON or YAML file holding request headers
    pub headers_path: Option<PathBuf>,
    /// Report output format name
    pub output: String,
    /// Enable colored terminal output for the human format
    pub enable_color: bool,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            requests: 0,
            concurrency: crate::defaults::DEFAULT_CONCURRENCY,
            timeout_seconds: crate::defaults::DEFAULT_TIMEOUT_SECS,
            host: String::new(),
            method: crate::defaults::DEFAULT_METHOD.to_string(),
            body_path: None,
            headers_path: None,
            output: crate::defaults::DEFAULT_OUTPUT.to_string(),
            enable_color: crate::defaults::DEFAULT_ENABLE_COLOR,
        }
    }
}

impl LoadConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get timeout as Duration; negative values read as zero
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(u64::try_from(self.timeout_seconds).unwrap_or(0))
    }

    /// Request count as a loop bound; negative values read as zero
    pub fn request_count(&self) -> usize {
        usize::try_from(self.requests).unwrap_or(0)
    }

    /// Parallelism handed to the loader factory; negative values read as zero
    pub fn parallelism(&self) -> usize {
        usize::try_from(self.concurrency).unwrap_or(0)
    }

    /// Parsed output format
    pub fn output_format(&self) -> Result<OutputFormat> {
        self.output.parse()
    }

    /// Validate the configuration and return the first problem found
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(AppError::config("empty host"));
        }

        if self.requests <= 0 {
            return Err(AppError::config(format!("invalid requests count value - {}", self.requests)));
        }

        if self.timeout_seconds <= 0 {
            return Err(AppError::config(format!("invalid timeout value - {}", self.timeout_seconds)));
        }

        self.output_format()?;

        if self.concurrency < 0 {
            return Err(AppError::config(format!("invalid concurrency value - {}", self.concurrency)));
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        if let Ok(requests) = std::env::var("BENCHUTIL_REQUESTS") {
            self.requests = requests.parse()
                .map_err(|e| AppError::config(format!("Invalid BENCHUTIL_REQUESTS value '{}': {}", requests, e)))?;
        }

        if let Ok(concurrency) = std::env::var("BENCHUTIL_CONCURRENCY") {
            self.concurrency = concurrency.parse()
                .map_err(|e| AppError::config(format!("Invalid BENCHUTIL_CONCURRENCY value '{}': {}", concurrency, e)))?;
        }

        if let Ok(timeout) = std::env::var("BENCHUTIL_TIMEOUT") {
            self.timeout_seconds = timeout.parse()
                .map_err(|e| AppError::config(format!("Invalid BENCHUTIL_TIMEOUT value '{}': {}", timeout, e)))?;
        }

        if let Ok(host) = std::env::var("BENCHUTIL_HOST") {
            self.host = host.trim().to_string();
        }

        if let Ok(method) = std::env::var("BENCHUTIL_METHOD") {
            self.method = method.trim().to_string();
        }

        if let Ok(output) = std::env::var("BENCHUTIL_OUTPUT") {
            self.output = output.trim().to_string();
        }

        Ok(())
    }
}
