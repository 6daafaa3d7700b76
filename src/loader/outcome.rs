//! Per-attempt outcome classification shared by every loader

use crate::client::{HttpTransport, TransportError};
use crate::models::RequestSpec;
use std::time::{Duration, Instant};

/// Status code counted as a successful attempt
pub const SUCCESS_STATUS: u16 = 200;

/// Classified result of one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The server answered 200; latency is dispatch-to-completion time
    Success { latency: Duration },
    /// Non-200 answer or a transport failure other than a timeout
    Error,
    /// The per-request timeout elapsed
    Cancelled,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Short label used in logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Success { .. } => "success",
            Self::Error => "error",
            Self::Cancelled => "cancelled",
        }
    }
}

/// Turn a raw transport result into an [`Outcome`]
pub fn classify(result: Result<u16, TransportError>, elapsed: Duration) -> Outcome {
    match result {
        Ok(SUCCESS_STATUS) => Outcome::Success { latency: elapsed },
        Ok(_) => Outcome::Error,
        Err(TransportError::Timeout) => Outcome::Cancelled,
        Err(TransportError::Failed(_)) => Outcome::Error,
    }
}

/// Fire one request and classify what came back
pub async fn attempt(transport: &dyn HttpTransport, request: &RequestSpec, timeout: Option<Duration>) -> Outcome {
    let started = Instant::now();
    let result = transport.send(request, timeout).await;
    let elapsed = started.elapsed();

    if let Err(TransportError::Failed(reason)) = &result {
        tracing::debug!(%reason, "attempt failed");
    }

    classify(result, elapsed)
}
