//! Transport layer.
//!
//! The façade talks to the service through [`Transport`]: one request in, one
//! status plus body out. [`HttpTransport`] is the `reqwest` implementation and
//! owns the base URL and bearer token.

use std::fmt;
use std::future::Future;

use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::{debug, error};
use url::Url;

use crate::config::ClientConfig;
use crate::error::TransportError;

// ============================================================================
// Types
// ============================================================================

/// Request relative to the service root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path starting with `/`, e.g. `/role/list`.
    pub path: String,
    pub query: Vec<(String, String)>,
    /// JSON body, sent only when present.
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Value) -> Self {
        Self::new(Method::POST, path).body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    #[must_use]
    pub fn query(mut self, pairs: impl IntoIterator<Item = (String, String)>) -> Self {
        self.query.extend(pairs);
        self
    }

    #[must_use]
    pub fn body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Raw answer from the service. The body is kept as text so empty and
/// non-JSON bodies can be classified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: String,
}

impl ApiResponse {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Sends one request to the service.
pub trait Transport: Send + Sync {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, TransportError>> + Send;
}

// ============================================================================
// reqwest
// ============================================================================

/// [`Transport`] backed by a shared `reqwest` connection pool.
#[derive(Clone)]
pub struct HttpTransport {
    http: reqwest::Client,
    config: ClientConfig,
}

impl HttpTransport {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            config,
        })
    }

    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Same connection pool, different base URL or token.
    #[must_use]
    pub fn reconfigured(&self, config: ClientConfig) -> Self {
        Self {
            http: self.http.clone(),
            config,
        }
    }

    /// Resolve `request` against the base URL, keeping any base path prefix.
    pub fn url_for(&self, request: &ApiRequest) -> Url {
        let mut url = self.config.base_url.clone();
        let path = format!(
            "{}/{}",
            url.path().trim_end_matches('/'),
            request.path.trim_start_matches('/')
        );
        url.set_path(&path);
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        url
    }
}

impl fmt::Debug for HttpTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTransport")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Transport for HttpTransport {
    #[tracing::instrument(skip_all, fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let url = self.url_for(&request);

        let mut builder = self
            .http
            .request(request.method.clone(), url)
            .bearer_auth(&self.config.token);
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .inspect_err(|e| error!("Request failed: {}", e))?;

        let status = response.status();
        let body = response.text().await?;
        debug!(%status, bytes = body.len(), "Received response");

        Ok(ApiResponse { status, body })
    }
}
