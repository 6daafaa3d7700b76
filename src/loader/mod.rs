//! Load generation engine
//!
//! This module contains the two load strategies and the pieces they share:
//! - Sequential loader that fires one request at a time
//! - Concurrent loader bounded by a semaphore of `parallelism` permits
//! - Outcome classification and report aggregation used by both

pub mod aggregator;
pub mod concurrent;
pub mod outcome;
pub mod sequential;

#[cfg(test)]
mod integration_tests;

pub use aggregator::{average_response_time, ReportAggregator};
pub use concurrent::ConcurrentLoader;
pub use outcome::{attempt, classify, Outcome};
pub use sequential::SequentialLoader;

use crate::{
    client::{HttpTransport, ReqwestTransport},
    error::Result,
    models::{Headers, LoadConfig, Report},
};
use async_trait::async_trait;
use std::{sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;

/// Settings shared by both strategies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderSettings {
    /// Per-request timeout; zero waits indefinitely
    pub timeout: Duration,
    /// HTTP method token
    pub method: String,
    /// Number of attempts to make
    pub requests: usize,
}

impl LoaderSettings {
    pub fn new<S: Into<String>>(timeout: Duration, method: S, requests: usize) -> Self {
        Self {
            timeout,
            method: method.into(),
            requests,
        }
    }
}

impl From<&LoadConfig> for LoaderSettings {
    fn from(config: &LoadConfig) -> Self {
        Self::new(config.timeout(), config.method.clone(), config.request_count())
    }
}

/// Puts load on a host and reports how it went
#[async_trait]
pub trait Loader: Send + Sync {
    /// Send the configured number of requests to `host`.
    ///
    /// Only request construction fails the call (bad method, host or
    /// header). Transport failures, timeouts and non-200 answers are counted
    /// in the report. Cancelling `cancel` stops further attempts and still
    /// returns a report of those that ran.
    async fn load(
        &self,
        cancel: &CancellationToken,
        host: &str,
        headers: Option<&Headers>,
        body: Option<&[u8]>,
    ) -> Result<Report>;

    /// Strategy name for logs and diagnostics
    fn strategy(&self) -> &'static str;

    /// Maximum attempts in flight at once
    fn parallelism(&self) -> usize;
}

/// Factory choosing the loader strategy from the requested parallelism
pub struct LoaderFactory {
    transport: Arc<dyn HttpTransport>,
}

impl LoaderFactory {
    /// Factory backed by the shared `reqwest` transport
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new()?)))
    }

    /// Factory handing the given transport to every loader it builds
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    /// Concurrent loader when `parallelism > 1`, sequential otherwise
    pub fn create(&self, settings: LoaderSettings, parallelism: usize) -> Box<dyn Loader> {
        if parallelism > 1 {
            Box::new(ConcurrentLoader::new(settings, Arc::clone(&self.transport), parallelism))
        } else {
            Box::new(SequentialLoader::new(settings, Arc::clone(&self.transport)))
        }
    }

    /// Build the loader described by a `load` configuration
    pub fn create_for_config(&self, config: &LoadConfig) -> Box<dyn Loader> {
        self.create(LoaderSettings::from(config), config.parallelism())
    }
}

/// Convenience constructor mirroring [`LoaderFactory::create`] with the default transport
pub fn new_loader(timeout: Duration, method: &str, requests: usize, parallelism: usize) -> Result<Box<dyn Loader>> {
    Ok(LoaderFactory::new()?.create(LoaderSettings::new(timeout, method, requests), parallelism))
}
