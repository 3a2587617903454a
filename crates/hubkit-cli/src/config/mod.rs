//! Resolving the API URL and token.
//!
//! Values come from `config.json` (see [`storage`]); the `HUBKIT_API_URL`
//! and `HUBKIT_TOKEN` environment variables take precedence.

pub mod storage;

use anyhow::{Context, Result, bail};
use tracing::debug;

use hubkit_core::{AccessToken, ApiUrl};
use hubkit_http::{ClientConfig, ContentClient};

use storage::StoredConfig;

pub const API_URL_ENV: &str = "HUBKIT_API_URL";
pub const TOKEN_ENV: &str = "HUBKIT_TOKEN";

/// Where a setting came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    File,
    Env,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::File => "config file",
            Source::Env => "environment",
        }
    }
}

/// Settings after applying environment overrides.
#[derive(Debug, Default)]
pub struct Resolved {
    pub api_url: Option<(String, Source)>,
    pub token: Option<(AccessToken, Source)>,
}

impl Resolved {
    /// Overlay the environment on the stored configuration.
    pub fn from_parts(
        stored: Option<StoredConfig>,
        env_api_url: Option<String>,
        env_token: Option<String>,
    ) -> Self {
        let stored = stored.unwrap_or_default();

        let api_url = non_empty(env_api_url)
            .map(|url| (url, Source::Env))
            .or_else(|| non_empty(stored.api_url).map(|url| (url, Source::File)));
        let token = non_empty(env_token)
            .map(|token| (AccessToken::new(token), Source::Env))
            .or_else(|| {
                non_empty(stored.token).map(|token| (AccessToken::new(token), Source::File))
            });

        Self { api_url, token }
    }

    /// Read `config.json` and the environment.
    pub fn load() -> Result<Self> {
        let stored = storage::load_config()?;
        Ok(Self::from_parts(
            stored,
            std::env::var(API_URL_ENV).ok(),
            std::env::var(TOKEN_ENV).ok(),
        ))
    }

    /// Build the client configuration; fails if a setting is missing.
    pub fn client_config(&self) -> Result<ClientConfig> {
        let Some((url, source)) = &self.api_url else {
            bail!("No API URL configured. Run 'hubkit configure' or set {API_URL_ENV}.");
        };
        let Some((token, _)) = &self.token else {
            bail!("No token configured. Run 'hubkit configure' or set {TOKEN_ENV}.");
        };

        debug!(url = %url, source = source.as_str(), "using API URL");
        let api_url = ApiUrl::new(url).context("Invalid API URL")?;

        Ok(ClientConfig::new(api_url, token.clone()))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Build a client from the active configuration.
pub fn client() -> Result<ContentClient> {
    let config = Resolved::load()
        .context("Failed to load configuration")?
        .client_config()?;
    ContentClient::new(config).context("Failed to create client")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored() -> StoredConfig {
        StoredConfig {
            api_url: Some("https://api.example.net/v2/content".into()),
            token: Some("file-token".into()),
        }
    }

    #[test]
    fn environment_overrides_file() {
        let resolved = Resolved::from_parts(
            Some(stored()),
            Some("http://localhost:8080".into()),
            None,
        );

        assert_eq!(
            resolved.api_url,
            Some(("http://localhost:8080".to_string(), Source::Env))
        );
        let (token, source) = resolved.token.unwrap();
        assert_eq!(token.as_str(), "file-token");
        assert_eq!(source, Source::File);
    }

    #[test]
    fn empty_environment_values_are_ignored() {
        let resolved = Resolved::from_parts(Some(stored()), Some(String::new()), Some("  ".into()));

        assert_eq!(resolved.api_url.unwrap().1, Source::File);
        assert_eq!(resolved.token.unwrap().1, Source::File);
    }

    #[test]
    fn missing_token_is_reported() {
        let resolved = Resolved::from_parts(
            None,
            Some("https://api.example.net".into()),
            None,
        );

        let err = resolved.client_config().unwrap_err();
        assert!(err.to_string().contains(TOKEN_ENV));
    }

    #[test]
    fn invalid_url_is_reported() {
        let resolved =
            Resolved::from_parts(None, Some("ftp://example.net".into()), Some("t".into()));

        assert!(resolved.client_config().is_err());
    }
}
