//! Token API

use tracing::debug;

use crate::client::CiamClient;
use crate::error::{ClientError, ClientResult};
use crate::transport::{ApiRequest, Transport};

impl<T: Transport> CiamClient<T> {
    /// Whether the service accepts the configured token.
    ///
    /// A rejected token is reported as `Ok(false)` rather than
    /// [`ClientError::InvalidToken`].
    pub async fn is_token_valid(&self) -> ClientResult<bool> {
        debug!("Validating token");

        match self.probe(ApiRequest::get("/auth/valid")).await {
            Err(ClientError::InvalidToken) => Ok(false),
            other => other,
        }
    }
}
