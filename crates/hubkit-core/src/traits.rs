//! Seams between the core and the transport.

use async_trait::async_trait;
use futures_core::Stream;

use crate::Result;

/// HTTP methods used by the content API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

/// Moves raw JSON bodies to and from the API.
///
/// Implementations resolve `endpoint` (a path relative to the API base URL,
/// or an absolute `_links` href), attach credentials, and map non-success
/// statuses to [`crate::error::ApiError`]. Bodies are handed back raw so that
/// decoding stays in the core.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send a request and return the raw response body.
    ///
    /// An empty response (e.g. `204 No Content`) yields an empty vector.
    async fn send(&self, method: Method, endpoint: &str, body: Option<Vec<u8>>) -> Result<Vec<u8>>;

    /// Fetch a resource or a page of an envelope.
    async fn get(&self, endpoint: &str) -> Result<Vec<u8>> {
        self.send(Method::Get, endpoint, None).await
    }
}

/// A lazily paginated stream of items.
pub trait ItemStream<T>: Stream<Item = Result<T>> + Send {}

impl<T, S> ItemStream<T> for S where S: Stream<Item = Result<T>> + Send {}
