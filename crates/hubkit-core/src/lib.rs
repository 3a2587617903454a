//! hubkit-core - Core types and mechanisms for the hubkit content API client.
//!
//! This crate holds everything that is independent of the HTTP transport:
//!
//! - [`envelope`]: unwrapping HAL list envelopes into typed [`Collection`]s
//! - [`timestamp`]: the timestamp normalization hook used while decoding
//! - [`patch`]: merge-patch computation for partial updates
//! - [`filter`]: the webhook filter codec
//! - [`pagination`]: the page walker that drains a paginated endpoint
//! - [`resources`]: the typed resource records and their update projections
//!
//! # Example
//!
//! ```
//! use hubkit_core::envelope::{decode_collection, DecodeOptions};
//! use hubkit_core::resources::Hub;
//!
//! let body = br#"{
//!     "_embedded": { "hubs": [ { "id": "h1", "name": "main", "createdDate": 1600000000000 } ] },
//!     "_links": {},
//!     "page": { "size": 20, "number": 0, "totalElements": 1, "totalPages": 1 }
//! }"#;
//!
//! let hubs = decode_collection::<Hub>(body, &DecodeOptions::default()).unwrap();
//! assert_eq!(hubs.items[0].name, "main");
//! ```

pub mod envelope;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod patch;
pub mod resources;
pub mod timestamp;
pub mod traits;
pub mod types;

pub use envelope::{Collection, DecodeOptions, Envelope, Link, Links, PageInfo};
pub use error::Error;
pub use filter::WebhookFilter;
pub use pagination::{ListQuery, PaginationError};
pub use patch::PatchResult;
pub use resources::{Resource, Updatable};
pub use traits::{ItemStream, Method, Transport};
pub use types::{AccessToken, ApiUrl};

/// Result type alias using the crate's Error type.
pub type Result<T> = std::result::Result<T, Error>;
