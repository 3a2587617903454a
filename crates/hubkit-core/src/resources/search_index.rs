//! Search indexes attached to a hub, and their settings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::Links;
use crate::timestamp;

use super::{Resource, Updatable};

/// A search index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchIndex {
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub parent_id: String,
    pub label: String,
    pub name: String,
    /// `PRODUCTION` or `STAGING`.
    #[serde(rename = "type")]
    pub index_type: String,
    pub suffix: String,
    pub replica_count: u32,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

/// A content type whose items feed a search index.
///
/// The `webhook` link points at the webhook that keeps the index in sync.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignedContentType {
    pub id: String,
    pub content_type_uri: String,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AssignedContentTypeInput {
    pub content_type_uri: String,
}

/// Creation body and update projection of a search index.
///
/// Assigned content types can only be set on creation; see
/// [`SearchIndexInput::for_update`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchIndexInput {
    pub suffix: String,
    pub label: String,
    #[serde(rename = "type")]
    pub index_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assigned_content_types: Option<Vec<AssignedContentTypeInput>>,
}

impl SearchIndexInput {
    /// This input without the creation-only assigned content types.
    pub fn for_update(&self) -> SearchIndexInput {
        SearchIndexInput {
            assigned_content_types: None,
            ..self.clone()
        }
    }
}

impl Resource for SearchIndex {
    const COLLECTION: &'static str = "indexes";
}

impl Resource for AssignedContentType {
    const COLLECTION: &'static str = "assigned-content-types";
}

impl Updatable for SearchIndex {
    type Input = SearchIndexInput;

    fn to_input(&self) -> SearchIndexInput {
        SearchIndexInput {
            suffix: self.suffix.clone(),
            label: self.label.clone(),
            index_type: self.index_type.clone(),
            assigned_content_types: None,
        }
    }
}

/// Engine settings of a search index.
///
/// Every field is optional; unset fields are left out of the JSON so that
/// a merge patch only touches what the caller set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchIndexSettings {
    #[serde(rename = "minWordSizefor1Typo", skip_serializing_if = "Option::is_none")]
    pub min_word_size_for_1_typo: Option<u32>,
    #[serde(rename = "minWordSizefor2Typos", skip_serializing_if = "Option::is_none")]
    pub min_word_size_for_2_typos: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hits_per_page: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_values_per_facet: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchable_attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_retrieve: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unretrievable_attributes: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub optional_words: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_for_faceting: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_snippet: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes_to_highlight: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination_limited_to: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_for_distinct: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exact_on_single_word_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ranking: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_ranking: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub separators_to_index: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_words_if_no_results: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_pre_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight_post_tag: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub snippet_ellipsis_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternatives_as_exact: Option<Vec<String>>,
}
