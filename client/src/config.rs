//! Client Configuration
//!
//! Loads configuration from environment variables.

use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::{Context, Result};
use url::Url;

/// Connection settings for one CIAM service.
///
/// Immutable once a client is built. Use [`CiamClient::with_token`] or
/// [`CiamClient::with_base_url`] to derive a client with different settings.
///
/// [`CiamClient::with_token`]: crate::CiamClient::with_token
/// [`CiamClient::with_base_url`]: crate::CiamClient::with_base_url
#[derive(Clone)]
pub struct ClientConfig {
    /// Service root, e.g. `https://ciam.example.com/api`
    pub base_url: Url,

    /// Bearer token sent with every request
    pub token: String,

    /// Whole-request timeout handed to the HTTP client (default: none)
    pub timeout: Option<Duration>,

    /// `User-Agent` header value
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(base_url: Url, token: impl Into<String>) -> Self {
        Self {
            base_url,
            token: token.into(),
            timeout: None,
            user_agent: default_user_agent(),
        }
    }

    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through `lookup`, which maps variable names to values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let raw_url = lookup("CIAM_BASE_URL").context("CIAM_BASE_URL must be set")?;
        let base_url = Url::parse(&raw_url)
            .with_context(|| format!("CIAM_BASE_URL is not a valid URL: {raw_url}"))?;

        Ok(Self {
            base_url,
            token: lookup("CIAM_TOKEN").context("CIAM_TOKEN must be set")?,
            timeout: lookup("CIAM_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .map(Duration::from_secs),
            user_agent: lookup("CIAM_USER_AGENT").unwrap_or_else(default_user_agent),
        })
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"[redacted]")
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

fn default_user_agent() -> String {
    format!("ciam-client/{}", env!("CARGO_PKG_VERSION"))
}
