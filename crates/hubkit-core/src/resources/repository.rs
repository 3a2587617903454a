//! Content repositories.

use serde::{Deserialize, Serialize};

use crate::envelope::Links;

use super::Resource;

/// A content type made available in a repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentTypeReference {
    pub hub_content_type_id: String,
    pub content_type_uri: String,
}

/// A content repository.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentRepository {
    pub id: String,
    pub name: String,
    pub label: String,
    pub status: String,
    #[serde(rename = "type")]
    pub repository_type: String,
    pub hub_id: String,
    pub content_types: Vec<ContentTypeReference>,
    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl ContentRepository {
    /// Returns true if a content type with this schema URI is assigned.
    pub fn has_content_type(&self, content_type_uri: &str) -> bool {
        self.content_types
            .iter()
            .any(|t| t.content_type_uri == content_type_uri)
    }
}

impl Resource for ContentRepository {
    const COLLECTION: &'static str = "content-repositories";
    const TIMESTAMP_FIELDS: &'static [&'static str] = &[];
}
