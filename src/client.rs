//! HTTP transport used by the loaders

use crate::{error::AppError, models::RequestSpec};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// Why a single HTTP call produced no response
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The per-request deadline elapsed
    #[error("request timed out")]
    Timeout,
    /// Any other failure: connection refused, DNS, malformed request...
    #[error("request failed: {0}")]
    Failed(String),
}

/// HTTP transport abstraction; returns the response status code
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request. `timeout` of `None` waits for the server indefinitely.
    async fn send(&self, request: &RequestSpec, timeout: Option<Duration>) -> Result<u16, TransportError>;
}

/// `reqwest`-backed transport sharing one connection pool across attempts
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Create a transport with a fresh client
    pub fn new() -> crate::error::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AppError::internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: &RequestSpec, timeout: Option<Duration>) -> Result<u16, TransportError> {
        let mut builder = self
            .client
            .request(request.method.clone(), request.url.clone())
            .headers(request.headers.clone());

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        match builder.send().await {
            Ok(response) => Ok(response.status().as_u16()),
            Err(e) if e.is_timeout() => Err(TransportError::Timeout),
            Err(e) => Err(TransportError::Failed(e.to_string())),
        }
    }
}
