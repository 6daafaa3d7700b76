//! Concurrent loader: bounded number of requests in flight

use super::aggregator::ReportAggregator;
use super::outcome::{attempt, Outcome};
use super::sequential::SequentialLoader;
use super::{Loader, LoaderSettings};
use crate::client::HttpTransport;
use crate::error::{AppError, Result};
use crate::models::{Headers, Report};
use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tokio::{sync::Semaphore, task::JoinHandle};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Runs up to `parallelism` attempts at once.
///
/// Cancelling the run token stops new launches only. Attempts already in
/// flight run to completion (or their own timeout) and are counted, so a
/// cancelled run reports fewer than `requests` attempts.
#[derive(Clone)]
pub struct ConcurrentLoader {
    base: SequentialLoader,
    parallelism: usize,
}

impl ConcurrentLoader {
    /// `parallelism` is clamped to at least one slot
    pub fn new(settings: LoaderSettings, transport: Arc<dyn HttpTransport>, parallelism: usize) -> Self {
        Self {
            base: SequentialLoader::new(settings, transport),
            parallelism: parallelism.max(1),
        }
    }

    pub fn settings(&self) -> &LoaderSettings {
        self.base.settings()
    }
}

#[async_trait]
impl Loader for ConcurrentLoader {
    async fn load(
        &self,
        cancel: &CancellationToken,
        host: &str,
        headers: Option<&Headers>,
        body: Option<&[u8]>,
    ) -> Result<Report> {
        let request = Arc::new(self.base.build_request(host, headers, body)?);
        let timeout = self.base.request_timeout();
        let requests = self.base.settings.requests;
        let throttle = Arc::new(Semaphore::new(self.parallelism));

        info!(host, requests, parallelism = self.parallelism, "starting concurrent load");

        // Handle `i` yields the outcome of attempt `i`.
        let mut slots: Vec<JoinHandle<Outcome>> = Vec::with_capacity(requests);

        for index in 0..requests {
            if cancel.is_cancelled() {
                info!(launched = index, requests, "run cancelled, waiting for in-flight requests");
                break;
            }

            let permit = Arc::clone(&throttle)
                .acquire_owned()
                .await
                .map_err(|e| AppError::internal(format!("request throttle closed: {}", e)))?;
            let transport = Arc::clone(&self.base.transport);
            let request = Arc::clone(&request);

            slots.push(tokio::spawn(async move {
                let outcome = attempt(transport.as_ref(), &request, timeout).await;
                drop(permit);
                debug!(attempt = index, outcome = outcome.label(), "attempt finished");
                outcome
            }));
        }

        let mut aggregator = ReportAggregator::new();
        for (index, joined) in join_all(slots).await.into_iter().enumerate() {
            let outcome = joined.unwrap_or_else(|e| {
                warn!(attempt = index, error = %e, "attempt task did not complete");
                Outcome::Error
            });
            aggregator.record(outcome);
        }

        let report = aggregator.finish();
        info!(all = report.all, success = report.success, errors = report.errors, cancelled = report.cancelled, "concurrent load finished");

        Ok(report)
    }

    fn strategy(&self) -> &'static str {
        "concurrent"
    }

    fn parallelism(&self) -> usize {
        self.parallelism
    }
}
