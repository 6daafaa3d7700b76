//! Sequential loader: one request at a time

use super::aggregator::ReportAggregator;
use super::outcome::attempt;
use super::{Loader, LoaderSettings};
use crate::client::HttpTransport;
use crate::error::Result;
use crate::models::{Headers, Report, RequestSpec};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Sends requests one after another, checking the run token before each
#[derive(Clone)]
pub struct SequentialLoader {
    pub(super) settings: LoaderSettings,
    pub(super) transport: Arc<dyn HttpTransport>,
}

impl SequentialLoader {
    pub fn new(settings: LoaderSettings, transport: Arc<dyn HttpTransport>) -> Self {
        Self { settings, transport }
    }

    pub fn settings(&self) -> &LoaderSettings {
        &self.settings
    }

    /// Build the request every attempt of this run reuses
    pub(super) fn build_request(&self, host: &str, headers: Option<&Headers>, body: Option<&[u8]>) -> Result<RequestSpec> {
        RequestSpec::build(&self.settings.method, host, headers, body)
    }

    /// Per-request deadline handed to the transport; zero disables it
    pub(super) fn request_timeout(&self) -> Option<Duration> {
        (!self.settings.timeout.is_zero()).then_some(self.settings.timeout)
    }
}

#[async_trait]
impl Loader for SequentialLoader {
    async fn load(
        &self,
        cancel: &CancellationToken,
        host: &str,
        headers: Option<&Headers>,
        body: Option<&[u8]>,
    ) -> Result<Report> {
        let request = self.build_request(host, headers, body)?;
        let timeout = self.request_timeout();
        let mut aggregator = ReportAggregator::new();

        info!(host, requests = self.settings.requests, "starting sequential load");

        for index in 0..self.settings.requests {
            if cancel.is_cancelled() {
                info!(launched = index, requests = self.settings.requests, "run cancelled, stopping");
                break;
            }

            let outcome = attempt(self.transport.as_ref(), &request, timeout).await;
            debug!(attempt = index, outcome = outcome.label(), "attempt finished");
            aggregator.record(outcome);
        }

        let report = aggregator.finish();
        info!(all = report.all, success = report.success, errors = report.errors, cancelled = report.cancelled, "sequential load finished");

        Ok(report)
    }

    fn strategy(&self) -> &'static str {
        "sequential"
    }

    fn parallelism(&self) -> usize {
        1
    }
}
