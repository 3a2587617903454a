//! Configuration value types.
//!
//! These types enforce their invariants at construction time.

mod api_url;
mod token;

pub use api_url::ApiUrl;
pub use token::AccessToken;
