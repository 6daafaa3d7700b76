//! Loader integration tests against mock HTTP servers
//!
//! These tests drive both strategies through the real `reqwest` transport
//! and cover timeouts, error responses and mid-run cancellation.

use super::*;
use std::{
    sync::atomic::{AtomicUsize, Ordering},
    time::{Duration, Instant},
};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, Request, Respond, ResponseTemplate,
};

/// Mock HTTP server for controlled load scenarios
pub struct MockLoadServer {
    server: MockServer,
}

impl MockLoadServer {
    /// Create a new mock HTTP server
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// URL of the load target
    pub fn target(&self) -> String {
        format!("{}/target", self.server.uri())
    }

    /// Answer 200 to every request, optionally after a delay
    pub async fn mock_ok(&self, delay: Option<Duration>) {
        let mut template = ResponseTemplate::new(200).set_body_string("OK");
        if let Some(delay) = delay {
            template = template.set_delay(delay);
        }

        Mock::given(path("/target"))
            .respond_with(template)
            .mount(&self.server)
            .await;
    }

    /// Alternate 200 and 500 answers, starting with 200
    pub async fn mock_alternating(&self) {
        Mock::given(path("/target"))
            .respond_with(Alternating::default())
            .mount(&self.server)
            .await;
    }

    /// Number of requests the server has seen
    pub async fn hits(&self) -> usize {
        self.server
            .received_requests()
            .await
            .map(|requests| requests.len())
            .unwrap_or_default()
    }
}

#[derive(Default)]
struct Alternating {
    counter: AtomicUsize,
}

impl Respond for Alternating {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        if self.counter.fetch_add(1, Ordering::SeqCst) % 2 == 0 {
            ResponseTemplate::new(200)
        } else {
            ResponseTemplate::new(500)
        }
    }
}

fn loader(timeout: Duration, requests: usize, parallelism: usize) -> Box<dyn Loader> {
    new_loader(timeout, "GET", requests, parallelism).unwrap()
}

#[tokio::test]
async fn test_all_requests_succeed_sequentially() {
    let server = MockLoadServer::new().await;
    server.mock_ok(None).await;

    let report = loader(Duration::from_secs(5), 10, 1)
        .load(&CancellationToken::new(), &server.target(), None, None)
        .await
        .unwrap();

    assert_eq!(report, Report { all: 10, success: 10, ..Default::default() });
    assert_eq!(server.hits().await, 10);
}

#[tokio::test]
async fn test_all_requests_succeed_concurrently() {
    let server = MockLoadServer::new().await;
    server.mock_ok(None).await;

    for parallelism in [2, 5, 10, 50] {
        let report = loader(Duration::from_secs(5), 10, parallelism)
            .load(&CancellationToken::new(), &server.target(), None, None)
            .await
            .unwrap();

        assert_eq!(report, Report { all: 10, success: 10, ..Default::default() }, "parallelism {}", parallelism);
    }
}

#[tokio::test]
async fn test_zero_timeout_waits_for_response() {
    let server = MockLoadServer::new().await;
    server.mock_ok(Some(Duration::from_millis(100))).await;

    let report = loader(Duration::ZERO, 3, 1)
        .load(&CancellationToken::new(), &server.target(), None, None)
        .await
        .unwrap();

    assert_eq!(report.success, 3);
}

#[tokio::test]
async fn test_slow_server_cancels_every_sequential_request() {
    let server = MockLoadServer::new().await;
    let timeout = Duration::from_millis(150);
    server.mock_ok(Some(timeout * 2)).await;

    let report = loader(timeout, 10, 1)
        .load(&CancellationToken::new(), &server.target(), None, None)
        .await
        .unwrap();

    assert_eq!(report, Report { all: 10, cancelled: 10, ..Default::default() });
}

#[tokio::test]
async fn test_slow_server_cancels_every_concurrent_request() {
    let server = MockLoadServer::new().await;
    let timeout = Duration::from_millis(150);
    server.mock_ok(Some(timeout * 2)).await;

    let report = loader(timeout, 10, 10)
        .load(&CancellationToken::new(), &server.target(), None, None)
        .await
        .unwrap();

    assert_eq!(report, Report { all: 10, cancelled: 10, ..Default::default() });
}

#[tokio::test]
async fn test_half_of_sequential_requests_fail() {
    let server = MockLoadServer::new().await;
    server.mock_alternating().await;

    let report = loader(Duration::from_secs(5), 10, 1)
        .load(&CancellationToken::new(), &server.target(), None, None)
        .await
        .unwrap();

    assert_eq!(report, Report { all: 10, success: 5, errors: 5, ..Default::default() });
}

#[tokio::test]
async fn test_half_of_concurrent_requests_fail() {
    let server = MockLoadServer::new().await;
    server.mock_alternating().await;

    let report = loader(Duration::from_secs(5), 20, 10)
        .load(&CancellationToken::new(), &server.target(), None, None)
        .await
        .unwrap();

    assert_eq!(report, Report { all: 20, success: 10, errors: 10, ..Default::default() });
}

#[tokio::test]
async fn test_unreachable_host_counts_errors() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let report = loader(Duration::from_secs(2), 4, 2)
        .load(&CancellationToken::new(), &format!("http://{}/", addr), None, None)
        .await
        .unwrap();

    assert_eq!(report, Report { all: 4, errors: 4, ..Default::default() });
}

#[tokio::test]
async fn test_headers_and_body_reach_server() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/upload"))
        .and(wiremock::matchers::header("content-type", "application/json"))
        .and(wiremock::matchers::body_string("{\"id\":1}"))
        .respond_with(ResponseTemplate::new(200))
        .expect(3)
        .mount(&server)
        .await;

    let mut headers = crate::models::Headers::new();
    headers.insert("Content-Type".to_string(), vec!["application/json".to_string()]);

    let report = new_loader(Duration::from_secs(5), "PUT", 3, 3)
        .unwrap()
        .load(
            &CancellationToken::new(),
            &format!("{}/upload", server.uri()),
            Some(&headers),
            Some(b"{\"id\":1}"),
        )
        .await
        .unwrap();

    assert_eq!(report.success, 3);
}

#[tokio::test]
async fn test_sequential_cancellation_keeps_finished_requests() {
    let server = MockLoadServer::new().await;
    server.mock_ok(Some(Duration::from_millis(300))).await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(450)).await;
        trigger.cancel();
    });

    let report = loader(Duration::from_secs(5), 10, 1)
        .load(&cancel, &server.target(), None, None)
        .await
        .unwrap();

    assert_eq!(report, Report { all: 2, success: 2, ..Default::default() });
}

#[tokio::test]
async fn test_concurrent_cancellation_is_graceful() {
    let server = MockLoadServer::new().await;
    server.mock_ok(Some(Duration::from_millis(800))).await;

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(400)).await;
        trigger.cancel();
    });

    let started = Instant::now();
    let report = loader(Duration::from_secs(5), 20, 5)
        .load(&cancel, &server.target(), None, None)
        .await
        .unwrap();
    let elapsed = started.elapsed();

    // Five requests in flight at cancellation plus the one whose permit the
    // launcher was already waiting on.
    assert_eq!(report.all, 6);
    assert_eq!(report.success, 6);
    assert_eq!(report.avg_response_time, Duration::from_secs(1));
    assert_eq!(report.all, report.success + report.errors + report.cancelled);
    // A full run would need four waves of 800ms.
    assert!(elapsed < Duration::from_millis(2_800), "took {:?}", elapsed);
}
