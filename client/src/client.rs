//! Client handle shared by the resource APIs.

use serde::de::DeserializeOwned;
use tracing::{debug, error};
use url::Url;

use ciam_common::validation;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::response::{self, Lookup};
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Handle to one CIAM service.
///
/// Cloning is cheap and every clone shares the same connection pool. The
/// configuration never changes after construction.
#[derive(Debug, Clone)]
pub struct CiamClient<T = HttpTransport> {
    transport: T,
}

impl CiamClient<HttpTransport> {
    /// Build a client over HTTP. Fails if the token is empty.
    pub fn new(config: ClientConfig) -> ClientResult<Self> {
        validation::not_empty(&config.token, "token")?;
        let transport = HttpTransport::new(config)?;
        Ok(Self { transport })
    }

    /// Build a client from `CIAM_*` environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Self::new(ClientConfig::from_env()?)?)
    }

    pub const fn config(&self) -> &ClientConfig {
        self.transport.config()
    }

    /// A new client using `token`. `self` keeps its own token.
    pub fn with_token(&self, token: impl Into<String>) -> ClientResult<Self> {
        let token = token.into();
        validation::not_empty(&token, "token")?;

        let mut config = self.config().clone();
        config.token = token;
        Ok(Self {
            transport: self.transport.reconfigured(config),
        })
    }

    /// A new client pointed at `base_url`. `self` keeps its own base URL.
    #[must_use]
    pub fn with_base_url(&self, base_url: Url) -> Self {
        let mut config = self.config().clone();
        config.base_url = base_url;
        Self {
            transport: self.transport.reconfigured(config),
        }
    }
}

impl<T: Transport> CiamClient<T> {
    /// Build a client over a custom transport.
    pub const fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Send `request` and decode the body into a [`Lookup`].
    pub(crate) async fn execute<R: DeserializeOwned>(
        &self,
        request: ApiRequest,
    ) -> ClientResult<Lookup<R>> {
        let response = self.dispatch(request).await?;
        response::classify(response).inspect_err(log_failure)
    }

    /// Send `request` and report whether the service answered 2xx (`true`) or 404 (`false`).
    pub(crate) async fn probe(&self, request: ApiRequest) -> ClientResult<bool> {
        let response = self.dispatch(request).await?;
        response::presence(response).inspect_err(log_failure)
    }

    async fn dispatch(&self, request: ApiRequest) -> ClientResult<ApiResponse> {
        debug!("{} {}", request.method, request.path);
        self.transport.send(request).await.map_err(|e| {
            error!("Transport failed: {}", e);
            ClientError::Transport(e)
        })
    }
}

fn log_failure(err: &ClientError) {
    match err {
        ClientError::PermissionDenied { missing } => {
            debug!(?missing, "Request denied for missing permissions");
        }
        ClientError::InvalidToken => debug!("Token rejected by service"),
        other => error!("Request failed: {}", other),
    }
}
