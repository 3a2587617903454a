//! Endpoint paths and small request bodies.
//!
//! Paths are relative to the API base URL.

use serde::Serialize;

pub const HUBS: &str = "/hubs";

pub fn hub(id: &str) -> String {
    format!("/hubs/{id}")
}

pub fn hub_repositories(hub_id: &str) -> String {
    format!("/hubs/{hub_id}/content-repositories")
}

pub fn hub_content_types(hub_id: &str) -> String {
    format!("/hubs/{hub_id}/content-types")
}

pub fn hub_schemas(hub_id: &str) -> String {
    format!("/hubs/{hub_id}/content-type-schemas")
}

pub fn hub_webhooks(hub_id: &str) -> String {
    format!("/hubs/{hub_id}/webhooks")
}

pub fn webhook(hub_id: &str, id: &str) -> String {
    format!("/hubs/{hub_id}/webhooks/{id}")
}

pub fn repository(id: &str) -> String {
    format!("/content-repositories/{id}")
}

pub fn repository_content_types(repository_id: &str) -> String {
    format!("/content-repositories/{repository_id}/content-types")
}

pub fn repository_content_type(repository_id: &str, content_type_id: &str) -> String {
    format!("/content-repositories/{repository_id}/content-types/{content_type_id}")
}

pub fn repository_items(repository_id: &str) -> String {
    format!("/content-repositories/{repository_id}/content-items")
}

pub fn repository_folders(repository_id: &str) -> String {
    format!("/content-repositories/{repository_id}/folders")
}

pub fn content_type(id: &str) -> String {
    format!("/content-types/{id}")
}

pub fn schema(id: &str) -> String {
    format!("/content-type-schemas/{id}")
}

pub fn item(id: &str) -> String {
    format!("/content-items/{id}")
}

pub fn folder(id: &str) -> String {
    format!("/folders/{id}")
}

pub fn search_indexes(hub_id: &str) -> String {
    format!("/algolia-search/{hub_id}/indexes")
}

pub fn search_index(hub_id: &str, id: &str) -> String {
    format!("/algolia-search/{hub_id}/indexes/{id}")
}

pub fn search_index_settings(hub_id: &str, id: &str) -> String {
    format!("/algolia-search/{hub_id}/indexes/{id}/settings")
}

pub fn search_index_assigned_content_types(hub_id: &str, id: &str) -> String {
    format!("/algolia-search/{hub_id}/indexes/{id}/assigned-content-types")
}

/// `{resource}/archive`
pub fn archive(resource: &str) -> String {
    format!("{resource}/archive")
}

/// `{resource}/unarchive`
pub fn unarchive(resource: &str) -> String {
    format!("{resource}/unarchive")
}

/// Append an encoded query string, if there is one.
pub fn with_query(endpoint: &str, query: &str) -> String {
    if query.is_empty() {
        endpoint.to_string()
    } else {
        format!("{endpoint}?{query}")
    }
}

/// Body of archive and unarchive requests.
#[derive(Debug, Serialize)]
pub struct ArchiveRequest {
    pub version: u32,
}

/// Body of a content type assignment.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignContentTypeRequest<'a> {
    pub content_type_id: &'a str,
}
