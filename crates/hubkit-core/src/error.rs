//! Error types for hubkit.
//!
//! This module provides a unified error type with explicit variants for
//! transport, API, decoding, patch and input validation errors.

use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// The unified error type for hubkit operations.
///
/// Callers that need to react to specific server responses (not found,
/// validation failed, conflict) match on [`Error::Api`] and inspect the
/// [`ApiError`].
#[derive(Debug, Error)]
pub enum Error {
    /// Network transport errors (connection, timeout, TLS).
    #[error("transport error: {0}")]
    Transport(#[from] TransportError),

    /// Non-success HTTP status returned by the API.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A response body could not be decoded into the expected shape.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// An update patch could not be computed.
    #[error("patch error: {0}")]
    Patch(#[from] PatchError),

    /// Input validation errors (base URL, endpoint paths).
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInputError),
}

impl Error {
    /// Returns the API error if this is one.
    pub fn as_api(&self) -> Option<&ApiError> {
        match self {
            Error::Api(err) => Some(err),
            _ => None,
        }
    }
}

/// Transport-level errors.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Network connection failed.
    #[error("connection failed: {message}")]
    Connection { message: String },

    /// Request timed out.
    #[error("request timed out: {message}")]
    Timeout { message: String },

    /// Generic HTTP error.
    #[error("HTTP error: {message}")]
    Http { message: String },
}

/// A single entry of an API error body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErrorObject {
    pub entity: Option<String>,
    pub property: Option<String>,
    pub invalid_value: Option<Value>,
    pub message: String,
}

/// A non-success response from the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    /// HTTP status code.
    pub status: u16,
    /// Error entries reported by the server, possibly empty.
    pub errors: Vec<ErrorObject>,
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<ErrorObject>,
    #[serde(default)]
    message: Option<String>,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(status: u16, errors: Vec<ErrorObject>) -> Self {
        Self { status, errors }
    }

    /// Build an API error from a status and a raw response body.
    ///
    /// The server answers either `{"errors": [...]}` or a bare `{"message": ...}`.
    /// Anything else yields an error with no entries.
    pub fn from_body(status: u16, body: &[u8]) -> Self {
        let errors = match serde_json::from_slice::<ErrorBody>(body) {
            Ok(ErrorBody { errors, .. }) if !errors.is_empty() => errors,
            Ok(ErrorBody {
                message: Some(message),
                ..
            }) => vec![ErrorObject {
                message,
                ..ErrorObject::default()
            }],
            _ => Vec::new(),
        };

        Self { status, errors }
    }

    /// All messages reported by the server.
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.iter().map(|e| e.message.as_str())
    }

    pub fn is_not_found(&self) -> bool {
        self.status == 404
    }

    pub fn is_validation_failed(&self) -> bool {
        self.status == 400 || self.status == 422
    }

    pub fn is_conflict(&self) -> bool {
        self.status == 409
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HTTP {}", self.status)?;
        let mut messages = self.messages().filter(|m| !m.is_empty());
        if let Some(first) = messages.next() {
            write!(f, ": {}", first)?;
            for message in messages {
                write!(f, "; {}", message)?;
            }
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Errors raised while decoding API responses.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The outer envelope is not valid JSON of the expected shape.
    #[error("malformed envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    /// The requested collection is not present under `_embedded`.
    #[error("embedded collection '{collection}' is missing")]
    MissingCollection { collection: String },

    /// The requested collection is present but is not an array.
    #[error("embedded collection '{collection}' is not an array")]
    CollectionNotArray { collection: String },

    /// A timestamp field is neither an RFC 3339 string nor epoch milliseconds.
    #[error("malformed timestamp in '{field}': {value}")]
    MalformedTimestamp { field: String, value: Value },

    /// A filter has no string `type` discriminator.
    #[error("filter has no 'type' discriminator")]
    MissingDiscriminator,

    /// A filter's `arguments` are absent or malformed.
    #[error("invalid filter arguments: {reason}")]
    InvalidArguments { reason: String },

    /// A filter `type` that this client does not know.
    #[error("unknown filter type '{filter_type}'")]
    UnknownFilterType { filter_type: String },

    /// A record could not be mapped onto its typed struct.
    #[error("cannot decode {collection} record at index {index}: {source}")]
    Record {
        collection: String,
        index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// Any other failure of a single item of a collection.
    #[error("cannot decode {collection} item at index {index}: {source}")]
    Item {
        collection: String,
        index: usize,
        #[source]
        source: Box<DecodeError>,
    },
}

impl DecodeError {
    /// The underlying error, without the collection position of [`DecodeError::Item`].
    pub fn root(&self) -> &DecodeError {
        match self {
            DecodeError::Item { source, .. } => source.root(),
            other => other,
        }
    }
}

/// Errors raised while computing an update patch.
#[derive(Debug, Error)]
pub enum PatchError {
    /// A snapshot could not be serialized to JSON.
    #[error("cannot serialize snapshot: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Input validation errors.
#[derive(Debug, Error)]
pub enum InvalidInputError {
    /// Invalid API base URL.
    #[error("invalid API URL '{value}': {reason}")]
    ApiUrl { value: String, reason: String },

    /// Invalid endpoint path or href.
    #[error("invalid endpoint '{value}': {reason}")]
    Endpoint { value: String, reason: String },

    /// A link relation that the record does not carry.
    #[error("record has no '{relation}' link")]
    MissingLink { relation: String },

    /// Generic invalid input.
    #[error("invalid input: {message}")]
    Other { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_from_errors_body() {
        let body = br#"{"errors":[{"entity":"Webhook","property":"label","invalidValue":"","message":"label is required"}]}"#;
        let err = ApiError::from_body(422, body);

        assert!(err.is_validation_failed());
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].property.as_deref(), Some("label"));
        assert_eq!(err.to_string(), "HTTP 422: label is required");
    }

    #[test]
    fn api_error_from_bare_message() {
        let err = ApiError::from_body(404, br#"{"message":"Not Found"}"#);

        assert!(err.is_not_found());
        assert_eq!(err.messages().collect::<Vec<_>>(), vec!["Not Found"]);
    }

    #[test]
    fn api_error_from_unparsable_body() {
        let err = ApiError::from_body(409, b"<html>conflict</html>");

        assert!(err.is_conflict());
        assert!(err.errors.is_empty());
        assert_eq!(err.to_string(), "HTTP 409");
    }
}
