//! Content types: registrations of a schema URI within a hub.

use serde::{Deserialize, Serialize};

use crate::envelope::Links;

use super::{Resource, Updatable};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentTypeIcon {
    pub size: u32,
    pub url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentTypeVisualization {
    pub label: String,
    pub templated_uri: String,
    pub default: bool,
}

/// Presentation settings of a content type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentTypeSettings {
    pub label: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub icons: Vec<ContentTypeIcon>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub visualizations: Vec<ContentTypeVisualization>,
}

/// A content type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentType {
    pub id: String,
    pub content_type_uri: String,
    pub status: String,
    pub settings: ContentTypeSettings,
    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

/// Creation body and update projection of a content type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentTypeInput {
    pub content_type_uri: String,
    pub settings: ContentTypeSettings,
}

impl Resource for ContentType {
    const COLLECTION: &'static str = "content-types";
    const TIMESTAMP_FIELDS: &'static [&'static str] = &[];
}

impl Updatable for ContentType {
    type Input = ContentTypeInput;

    fn to_input(&self) -> ContentTypeInput {
        ContentTypeInput {
            content_type_uri: self.content_type_uri.clone(),
            settings: self.settings.clone(),
        }
    }
}
