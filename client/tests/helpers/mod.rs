//! Reusable test helpers for client tests.
//!
//! [`MockTransport`] records every request and replays queued responses, for
//! asserting exact request shapes without a network. [`spawn_test_server()`]
//! runs an axum router on an ephemeral port for end-to-end `HttpTransport` tests.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use ciam_client::{
    ApiRequest, ApiResponse, CiamClient, ClientConfig, Transport, TransportError,
};
use reqwest::StatusCode;
use serde_json::Value;
use tokio::task::JoinHandle;

pub const TOKEN: &str = "test-token";
pub const USER_ID: &str = "65a0f1e2d3c4b5a697887766";
pub const ROLE_ID: &str = "5f1b2c3d4e5f60718293a4b5";

// ============================================================================
// Mock transport
// ============================================================================

#[derive(Default)]
struct MockState {
    requests: Vec<ApiRequest>,
    responses: VecDeque<Result<ApiResponse, String>>,
}

/// Transport that records requests and answers from a queue.
///
/// When the queue is empty it answers `200` with an empty body.
#[derive(Clone, Default)]
pub struct MockTransport {
    state: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response with a raw text body.
    pub fn respond(&self, status: u16, body: impl Into<String>) -> &Self {
        let status = StatusCode::from_u16(status).expect("valid status");
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Ok(ApiResponse::new(status, body)));
        self
    }

    /// Queue a response with a JSON body.
    pub fn respond_json(&self, status: u16, body: Value) -> &Self {
        self.respond(status, body.to_string())
    }

    /// Queue a transport failure.
    pub fn fail(&self, message: impl Into<String>) -> &Self {
        self.state
            .lock()
            .unwrap()
            .responses
            .push_back(Err(message.into()));
        self
    }

    /// Every request sent so far, oldest first.
    pub fn requests(&self) -> Vec<ApiRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    /// The only request sent so far.
    pub fn single_request(&self) -> ApiRequest {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request: {requests:?}");
        requests.into_iter().next().unwrap()
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let next = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(request);
            state.responses.pop_front()
        };

        match next {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(TransportError::Custom(message.into())),
            None => Ok(ApiResponse::new(StatusCode::OK, "")),
        }
    }
}

/// Client over a fresh [`MockTransport`], plus a handle to inspect it.
pub fn mock_client() -> (CiamClient<MockTransport>, MockTransport) {
    let transport = MockTransport::new();
    (CiamClient::with_transport(transport.clone()), transport)
}

// ============================================================================
// Test server
// ============================================================================

/// A running test server. Aborted on drop.
pub struct TestServer {
    pub addr: SocketAddr,
    pub url: String,
    handle: JoinHandle<()>,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

impl TestServer {
    /// HTTP client pointed at `{url}{base_path}` with `token`.
    pub fn client(&self, base_path: &str, token: &str) -> CiamClient {
        let base_url = format!("{}{}", self.url, base_path)
            .parse()
            .expect("valid URL");
        CiamClient::new(ClientConfig::new(base_url, token)).expect("client builds")
    }
}

/// Serve `router` on `127.0.0.1` with an OS-assigned port.
pub async fn spawn_test_server(router: Router) -> TestServer {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test server");
    let addr = listener.local_addr().expect("Failed to get local addr");
    let url = format!("http://{addr}");

    let handle = tokio::spawn(async move {
        axum::serve(listener, router)
            .await
            .expect("Test server failed");
    });

    TestServer { addr, url, handle }
}
