//! Content type schemas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::Links;
use crate::timestamp;

use super::{Resource, Updatable};

/// A JSON schema registered in a hub.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentTypeSchema {
    pub id: String,
    /// The schema document, as a JSON string.
    pub body: String,
    pub version: u32,
    pub status: String,
    pub created_by: String,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_by: String,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    pub links: Links,
    pub schema_id: String,
    pub validation_level: String,
}

/// Creation body and update projection of a schema.
///
/// Empty fields are omitted from the JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ContentTypeSchemaInput {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub schema_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub body: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub validation_level: String,
}

impl Resource for ContentTypeSchema {
    const COLLECTION: &'static str = "content-type-schemas";
}

impl Updatable for ContentTypeSchema {
    type Input = ContentTypeSchemaInput;

    fn to_input(&self) -> ContentTypeSchemaInput {
        ContentTypeSchemaInput {
            schema_id: self.schema_id.clone(),
            body: self.body.clone(),
            validation_level: self.validation_level.clone(),
        }
    }
}
