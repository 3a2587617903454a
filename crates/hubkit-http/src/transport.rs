//! reqwest-backed [`Transport`].

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use tracing::{debug, instrument, trace};

use hubkit_core::error::{ApiError, TransportError};
use hubkit_core::traits::{Method, Transport};
use hubkit_core::{AccessToken, ApiUrl, Error, Result};

use crate::config::ClientConfig;

/// Sends requests to the content API over HTTPS.
///
/// Every request carries the bearer token and `Content-Type:
/// application/json`, merge patches included.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    api_url: ApiUrl,
    token: AccessToken,
}

impl HttpTransport {
    /// Build a transport from the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(transport_error)?;

        Ok(Self {
            client,
            api_url: config.api_url,
            token: config.token,
        })
    }

    /// Returns the base URL requests are sent to.
    pub fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[instrument(skip(self, body), fields(api = %self.api_url))]
    async fn send(&self, method: Method, endpoint: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>> {
        let url = self.api_url.endpoint(endpoint)?;
        debug!(%url, has_body = body.is_some(), "content API request");

        let mut request = self
            .client
            .request(reqwest_method(method), &url)
            .bearer_auth(self.token.as_str())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;
        trace!(status = %status, len = bytes.len(), "content API response");

        if status.is_success() {
            Ok(bytes.to_vec())
        } else {
            let err = ApiError::from_body(status.as_u16(), &bytes);
            debug!(error = %err, "content API returned an error");
            Err(err.into())
        }
    }
}

fn reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Patch => reqwest::Method::PATCH,
        Method::Delete => reqwest::Method::DELETE,
    }
}

/// Classify a reqwest failure.
pub(crate) fn transport_error(err: reqwest::Error) -> Error {
    let transport = if err.is_timeout() {
        TransportError::Timeout {
            message: err.to_string(),
        }
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
    };
    Error::Transport(transport)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_creation() {
        let api_url = ApiUrl::new("https://api.example.net/v2/content").unwrap();
        let transport =
            HttpTransport::new(ClientConfig::new(api_url.clone(), AccessToken::new("t"))).unwrap();

        assert_eq!(transport.api_url(), &api_url);
    }

    #[test]
    fn methods_map_one_to_one() {
        for method in [Method::Get, Method::Post, Method::Patch, Method::Delete] {
            assert_eq!(reqwest_method(method).as_str(), method.as_str());
        }
    }
}
