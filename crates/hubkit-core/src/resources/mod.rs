//! Typed resource records.
//!
//! Records are read-only snapshots. They are never changed in place: an
//! update is expressed as a desired `*Input` value, diffed against the
//! record's own projection (see [`Updatable`] and [`crate::patch`]).

mod content_type;
mod folder;
mod hub;
mod item;
mod repository;
mod schema;
mod search_index;
mod webhook;

pub use content_type::{
    ContentType, ContentTypeIcon, ContentTypeInput, ContentTypeSettings, ContentTypeVisualization,
};
pub use folder::{Folder, FolderInput};
pub use hub::Hub;
pub use item::{ContentItem, ContentItemInput};
pub use repository::{ContentRepository, ContentTypeReference};
pub use schema::{ContentTypeSchema, ContentTypeSchemaInput};
pub use search_index::{
    AssignedContentType, AssignedContentTypeInput, SearchIndex, SearchIndexInput,
    SearchIndexSettings,
};
pub use webhook::{
    Notification, Webhook, WebhookCustomPayload, WebhookHeader, WebhookInput, events,
};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::envelope::DecodeOptions;
use crate::error::DecodeError;
use crate::timestamp;

/// Timestamp fields carried by most records.
pub(crate) const AUDIT_TIMESTAMPS: &[&str] = &["createdDate", "lastModifiedDate"];

/// A record type that the API returns inside list envelopes.
pub trait Resource: DeserializeOwned {
    /// The `_embedded` key holding this resource's items.
    const COLLECTION: &'static str;

    /// Fields that hold timestamps in one of the API's encodings.
    const TIMESTAMP_FIELDS: &'static [&'static str] = AUDIT_TIMESTAMPS;

    /// Convert one raw record.
    ///
    /// The default normalizes [`Self::TIMESTAMP_FIELDS`] and maps the rest by
    /// field name. Records with tagged-union fields override this to decode
    /// them afterwards.
    fn from_raw(raw: Value, options: &DecodeOptions) -> Result<Self, DecodeError> {
        let _ = options;
        structural_decode(raw, Self::COLLECTION, Self::TIMESTAMP_FIELDS)
    }
}

/// A record that can be updated with a merge patch.
pub trait Updatable: Resource {
    /// The fields eligible for update.
    type Input: Serialize;

    /// The record's current state, projected onto the update fields.
    fn to_input(&self) -> Self::Input;
}

/// Normalize timestamps, then map fields by name.
///
/// Errors carry index 0; the envelope decoder fills in the real position.
pub(crate) fn structural_decode<T: DeserializeOwned>(
    mut raw: Value,
    collection: &str,
    timestamp_fields: &[&str],
) -> Result<T, DecodeError> {
    if let Value::Object(record) = &mut raw {
        timestamp::normalize_fields(record, timestamp_fields)?;
    }

    serde_json::from_value(raw).map_err(|source| DecodeError::Record {
        collection: collection.to_string(),
        index: 0,
        source,
    })
}
