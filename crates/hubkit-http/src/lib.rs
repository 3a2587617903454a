//! hubkit-http - HTTP client for the content API.
//!
//! [`ContentClient`] exposes the typed operations of every resource on top
//! of a [`Transport`](hubkit_core::Transport). [`HttpTransport`] is the
//! reqwest implementation used outside of tests.
//!
//! # Example
//!
//! ```no_run
//! use hubkit_core::{AccessToken, ApiUrl};
//! use hubkit_http::{ClientConfig, ContentClient};
//!
//! # async fn example() -> Result<(), hubkit_core::Error> {
//! let config = ClientConfig::new(
//!     ApiUrl::new("https://api.example.net/v2/content")?,
//!     AccessToken::new("token"),
//! );
//! let client = ContentClient::new(config)?;
//!
//! let hubs = client.hub_list_all().await.map_err(|e| e.into_source())?;
//! for hub in hubs {
//!     let hooks = client.webhook_list_all(&hub.id).await.map_err(|e| e.into_source())?;
//!     println!("{}: {} webhooks", hub.name, hooks.len());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
pub mod endpoints;
mod stream;
mod transport;

pub use client::{ContentClient, ListAllResult, UpdateOutcome};
pub use config::{ClientConfig, DEFAULT_TIMEOUT, DEFAULT_USER_AGENT};
pub use stream::{ItemPages, stream_all};
pub use transport::HttpTransport;
