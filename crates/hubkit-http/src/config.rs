//! Client configuration.

use std::time::Duration;

use hubkit_core::{AccessToken, ApiUrl};

/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default `User-Agent` header.
pub const DEFAULT_USER_AGENT: &str = concat!("hubkit/", env!("CARGO_PKG_VERSION"));

/// Settings used to build an [`HttpTransport`](crate::HttpTransport).
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the content API, e.g. `https://api.example.net/v2/content`.
    pub api_url: ApiUrl,
    /// Bearer token sent with every request.
    pub token: AccessToken,
    /// Total time allowed for one request.
    pub timeout: Duration,
    pub user_agent: String,
}

impl ClientConfig {
    pub fn new(api_url: ApiUrl, token: AccessToken) -> Self {
        Self {
            api_url,
            token,
            timeout: DEFAULT_TIMEOUT,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
