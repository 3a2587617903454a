//! Content items.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::envelope::Links;
use crate::timestamp;

use super::{Resource, Updatable};

/// A content item. The body is schema-specific and kept untyped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentItem {
    pub id: String,
    pub content_repository_id: String,
    pub folder_id: Option<String>,
    pub body: Map<String, Value>,
    pub version: u32,
    pub label: String,
    pub status: String,
    pub locale: Option<String>,
    pub created_by: String,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_by: String,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
    pub last_published_version: Option<u32>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub last_published_date: Option<DateTime<Utc>>,
    pub delivery_id: String,
    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

/// Creation body and update projection of a content item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentItemInput {
    pub label: String,
    pub body: Map<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

impl Resource for ContentItem {
    const COLLECTION: &'static str = "content-items";
    const TIMESTAMP_FIELDS: &'static [&'static str] =
        &["createdDate", "lastModifiedDate", "lastPublishedDate"];
}

impl Updatable for ContentItem {
    type Input = ContentItemInput;

    fn to_input(&self) -> ContentItemInput {
        ContentItemInput {
            label: self.label.clone(),
            body: self.body.clone(),
            folder_id: self.folder_id.clone(),
            locale: self.locale.clone(),
        }
    }
}
