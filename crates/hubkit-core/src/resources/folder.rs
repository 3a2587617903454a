//! Folders inside a content repository.

use serde::{Deserialize, Serialize};

use crate::envelope::Links;

use super::Resource;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Folder {
    pub id: String,
    pub name: String,
    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FolderInput {
    pub name: String,
}

impl Resource for Folder {
    const COLLECTION: &'static str = "folders";
    const TIMESTAMP_FIELDS: &'static [&'static str] = &[];
}
