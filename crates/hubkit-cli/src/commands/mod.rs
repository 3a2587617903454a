//! Subcommand implementations.

pub mod configure;
pub mod content_type;
pub mod folder;
pub mod hub;
pub mod index;
pub mod item;
pub mod repository;
pub mod schema;
pub mod webhook;

use anyhow::{Context, Result};
use serde::Serialize;

use hubkit_http::ListAllResult;

use crate::output;

/// Print every item of a drained listing.
///
/// If the walk failed part way, the items fetched so far are still printed
/// before the error is returned.
pub(crate) fn print_all<T: Serialize>(
    result: ListAllResult<T>,
    what: &str,
    pretty: bool,
) -> Result<()> {
    match result {
        Ok(items) if items.is_empty() => {
            output::note(&format!("No {what} found."));
            Ok(())
        }
        Ok(items) => output::records(&items, pretty),
        Err(err) => {
            output::records(&err.partial, pretty)?;
            let fetched = err.partial.len();
            Err(err.source).with_context(|| format!("Failed to list {what} after {fetched} items"))
        }
    }
}
