//! API base URL type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use url::Url;

use crate::error::{Error, InvalidInputError};

/// A validated base URL of the content API, e.g. `https://api.example.net/v2/content`.
///
/// The URL must use HTTPS, or HTTP for localhost. A trailing slash is
/// removed so that endpoint paths can be appended directly.
///
/// # Example
///
/// ```
/// use hubkit_core::ApiUrl;
///
/// let api = ApiUrl::new("https://api.example.net/v2/content/").unwrap();
/// assert_eq!(
///     api.endpoint("/hubs/123").unwrap(),
///     "https://api.example.net/v2/content/hubs/123"
/// );
///
/// // HAL hrefs are already absolute and pass through untouched.
/// assert_eq!(
///     api.endpoint("https://api.example.net/v2/content/hubs/456").unwrap(),
///     "https://api.example.net/v2/content/hubs/456"
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ApiUrl(Url);

impl ApiUrl {
    /// Create a new API URL from a string, validating the format.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is not valid or doesn't meet requirements.
    pub fn new(s: impl AsRef<str>) -> Result<Self, Error> {
        let s = s.as_ref();
        let url = Url::parse(s).map_err(|e| InvalidInputError::ApiUrl {
            value: s.to_string(),
            reason: e.to_string(),
        })?;

        Self::validate(&url, s)?;

        // Normalize: remove trailing slash
        let normalized = if url.path().len() > 1 && url.path().ends_with('/') {
            let mut u = url.clone();
            let path = u.path().trim_end_matches('/').to_string();
            u.set_path(&path);
            u
        } else {
            url
        };

        Ok(Self(normalized))
    }

    /// Resolve an endpoint against this base URL.
    ///
    /// Relative paths (`/hubs/123?page=0`) are appended to the base URL.
    /// Absolute URLs, as found in `_links` hrefs, are returned unchanged.
    pub fn endpoint(&self, path: &str) -> Result<String, Error> {
        if let Ok(absolute) = Url::parse(path) {
            if absolute.cannot_be_a_base() {
                return Err(InvalidInputError::Endpoint {
                    value: path.to_string(),
                    reason: "must be a path or an absolute URL".to_string(),
                }
                .into());
            }
            return Ok(path.to_string());
        }

        // The URL crate always adds a trailing slash to root paths
        let base = self.0.as_str().trim_end_matches('/');
        if path.starts_with('/') {
            Ok(format!("{}{}", base, path))
        } else {
            Ok(format!("{}/{}", base, path))
        }
    }

    /// Returns the base URL as a string.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the inner URL.
    pub fn as_url(&self) -> &Url {
        &self.0
    }

    /// Returns the host string.
    pub fn host(&self) -> Option<&str> {
        self.0.host_str()
    }

    fn validate(url: &Url, original: &str) -> Result<(), Error> {
        if url.cannot_be_a_base() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must be an absolute URL".to_string(),
            }
            .into());
        }

        // Must be HTTPS (or HTTP for localhost)
        let scheme = url.scheme();
        let is_localhost = url
            .host_str()
            .is_some_and(|h| h == "localhost" || h == "127.0.0.1" || h == "[::1]");

        if scheme != "https" && !(scheme == "http" && is_localhost) {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must use HTTPS (HTTP allowed only for localhost)".to_string(),
            }
            .into());
        }

        if url.host_str().is_none() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must have a host".to_string(),
            }
            .into());
        }

        if url.query().is_some() || url.fragment().is_some() {
            return Err(InvalidInputError::ApiUrl {
                value: original.to_string(),
                reason: "must not carry a query or fragment".to_string(),
            }
            .into());
        }

        Ok(())
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApiUrl {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Serialize for ApiUrl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.0.as_str())
    }
}

impl<'de> Deserialize<'de> for ApiUrl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        ApiUrl::new(&s).map_err(serde::de::Error::custom)
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_https_url() {
        let api = ApiUrl::new("https://api.example.net/v2/content").unwrap();
        assert_eq!(api.host(), Some("api.example.net"));
    }

    #[test]
    fn valid_localhost_http() {
        let api = ApiUrl::new("http://localhost:8080").unwrap();
        assert_eq!(api.host(), Some("localhost"));
    }

    #[test]
    fn endpoint_construction() {
        let api = ApiUrl::new("https://api.example.net/v2/content").unwrap();
        assert_eq!(
            api.endpoint("/hubs/abc/webhooks?page=0").unwrap(),
            "https://api.example.net/v2/content/hubs/abc/webhooks?page=0"
        );
        assert_eq!(
            api.endpoint("folders/1").unwrap(),
            "https://api.example.net/v2/content/folders/1"
        );
    }

    #[test]
    fn normalizes_trailing_slash() {
        let api = ApiUrl::new("https://api.example.net/v2/content/").unwrap();
        assert_eq!(api.as_str(), "https://api.example.net/v2/content");

        let root = ApiUrl::new("https://api.example.net/").unwrap();
        assert_eq!(
            root.endpoint("/hubs").unwrap(),
            "https://api.example.net/hubs"
        );
    }

    #[test]
    fn absolute_hrefs_pass_through() {
        let api = ApiUrl::new("https://api.example.net/v2/content").unwrap();
        let href = "https://api.example.net/v2/content/hubs/1";
        assert_eq!(api.endpoint(href).unwrap(), href);
    }

    #[test]
    fn invalid_http_non_localhost() {
        assert!(ApiUrl::new("http://api.example.net").is_err());
    }

    #[test]
    fn invalid_relative_url() {
        assert!(ApiUrl::new("/v2/content").is_err());
    }

    #[test]
    fn invalid_url_with_query() {
        assert!(ApiUrl::new("https://api.example.net/v2?x=1").is_err());
    }
}
