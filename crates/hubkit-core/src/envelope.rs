//! HAL list envelopes and their decoding into typed collections.
//!
//! Every list endpoint answers with the same wrapper:
//!
//! ```json
//! {
//!   "_embedded": { "webhooks": [ ... ] },
//!   "_links": { "self": { "href": "..." } },
//!   "page": { "size": 20, "number": 0, "totalElements": 1, "totalPages": 1 }
//! }
//! ```
//!
//! The embedded key is fixed per resource kind ([`Resource::COLLECTION`]).
//! An empty list is an empty array under that key; a missing key means the
//! response is not the collection the caller asked for and is reported as
//! [`DecodeError::MissingCollection`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::filter::UnknownFilterPolicy;
use crate::resources::Resource;

/// A navigation link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub href: String,
}

/// Links keyed by relation name.
pub type Links = BTreeMap<String, Link>;

/// Page metadata of a list response.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PageInfo {
    /// Requested page size.
    pub size: u32,
    /// Zero-based index of this page.
    pub number: u32,
    /// Number of elements across all pages.
    pub total_elements: u64,
    /// Number of pages.
    pub total_pages: u32,
}

/// The raw list envelope, before a collection is selected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Envelope {
    #[serde(rename = "_embedded", default)]
    pub embedded: Option<Map<String, Value>>,
    #[serde(rename = "_links", default)]
    pub links: Links,
    #[serde(default)]
    pub page: PageInfo,
}

impl Envelope {
    /// Parse the outer envelope from a response body.
    pub fn from_slice(body: &[u8]) -> Result<Self, DecodeError> {
        serde_json::from_slice(body).map_err(DecodeError::Envelope)
    }

    /// Remove and return the raw items of the named collection.
    pub fn take_collection(&mut self, collection: &str) -> Result<Vec<Value>, DecodeError> {
        let raw = self
            .embedded
            .as_mut()
            .and_then(|embedded| embedded.remove(collection))
            .ok_or_else(|| DecodeError::MissingCollection {
                collection: collection.to_string(),
            })?;

        match raw {
            Value::Array(items) => Ok(items),
            _ => Err(DecodeError::CollectionNotArray {
                collection: collection.to_string(),
            }),
        }
    }

    /// Select the resource's collection and convert every item.
    pub fn into_collection<T: Resource>(
        mut self,
        options: &DecodeOptions,
    ) -> Result<Collection<T>, DecodeError> {
        let items = self
            .take_collection(T::COLLECTION)?
            .into_iter()
            .enumerate()
            .map(|(index, raw)| {
                T::from_raw(raw, options).map_err(|e| at_index(e, T::COLLECTION, index))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Collection {
            links: self.links,
            page: self.page,
            items,
        })
    }
}

fn at_index(err: DecodeError, collection: &str, index: usize) -> DecodeError {
    match err {
        DecodeError::Record {
            collection, source, ..
        } => DecodeError::Record {
            collection,
            index,
            source,
        },
        other => DecodeError::Item {
            collection: collection.to_string(),
            index,
            source: Box::new(other),
        },
    }
}

/// A decoded page of a resource collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collection<T> {
    /// Links of the page itself (`self`, `next`, ...).
    pub links: Links,
    /// Page metadata.
    pub page: PageInfo,
    /// The items, in server order.
    pub items: Vec<T>,
}

impl<T> Collection<T> {
    /// Returns true if the server reports a page after this one.
    pub fn has_next(&self) -> bool {
        self.page.number.saturating_add(1) < self.page.total_pages
    }
}

/// Knobs for decoding that cannot be expressed in the records' types.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// What to do with webhook filters of an unknown `type`.
    pub unknown_filters: UnknownFilterPolicy,
}

impl DecodeOptions {
    pub fn with_unknown_filters(mut self, policy: UnknownFilterPolicy) -> Self {
        self.unknown_filters = policy;
        self
    }
}

/// Decode a list response body into a typed collection.
pub fn decode_collection<T: Resource>(
    body: &[u8],
    options: &DecodeOptions,
) -> Result<Collection<T>, DecodeError> {
    Envelope::from_slice(body)?.into_collection(options)
}

/// Decode a single-resource response body.
pub fn decode_record<T: Resource>(body: &[u8], options: &DecodeOptions) -> Result<T, DecodeError> {
    let raw: Value = serde_json::from_slice(body).map_err(DecodeError::Envelope)?;
    T::from_raw(raw, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Folder, Hub};
    use chrono::{DateTime, Utc};
    use serde_json::json;

    fn envelope(collection: &str, items: Value, total_pages: u32) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "_embedded": { collection: items },
            "_links": { "self": { "href": "https://api.example.net/v2/content/hubs?page=0" } },
            "page": { "size": 20, "number": 0, "totalElements": 3, "totalPages": total_pages }
        }))
        .unwrap()
    }

    #[test]
    fn decodes_items_in_order_with_links_and_page() {
        let body = envelope(
            "folders",
            json!([
                { "id": "f1", "name": "first" },
                { "id": "f2", "name": "second" },
                { "id": "f3", "name": "third" }
            ]),
            1,
        );

        let folders = decode_collection::<Folder>(&body, &DecodeOptions::default()).unwrap();

        let ids: Vec<_> = folders.items.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, vec!["f1", "f2", "f3"]);
        assert_eq!(folders.page.total_elements, 3);
        assert_eq!(
            folders.links["self"].href,
            "https://api.example.net/v2/content/hubs?page=0"
        );
        assert!(!folders.has_next());
    }

    #[test]
    fn all_timestamp_encodings_decode_to_the_same_instant() {
        let body = envelope(
            "hubs",
            json!([
                { "id": "a", "name": "a", "createdDate": "2020-09-13T12:26:40.123Z" },
                { "id": "b", "name": "b", "createdDate": 1_600_000_000_123_i64 },
                { "id": "c", "name": "c", "createdDate": 1_600_000_000_123.0_f64 }
            ]),
            1,
        );

        let hubs = decode_collection::<Hub>(&body, &DecodeOptions::default()).unwrap();

        let expected: DateTime<Utc> = DateTime::from_timestamp_millis(1_600_000_000_123).unwrap();
        for hub in &hubs.items {
            assert_eq!(hub.created_date, Some(expected), "hub {}", hub.id);
        }
    }

    #[test]
    fn round_trips_typed_items_through_an_envelope() {
        let original = vec![
            Hub {
                id: "h1".into(),
                name: "main".into(),
                label: "Main".into(),
                created_date: DateTime::from_timestamp_millis(1_600_000_000_123),
                ..Hub::default()
            },
            Hub {
                id: "h2".into(),
                name: "staging".into(),
                ..Hub::default()
            },
        ];
        let body = envelope("hubs", serde_json::to_value(&original).unwrap(), 1);

        let decoded = decode_collection::<Hub>(&body, &DecodeOptions::default()).unwrap();

        assert_eq!(decoded.items, original);
    }

    #[test]
    fn empty_array_is_an_empty_collection() {
        let body = envelope("hubs", json!([]), 0);
        let hubs = decode_collection::<Hub>(&body, &DecodeOptions::default()).unwrap();
        assert!(hubs.items.is_empty());
    }

    #[test]
    fn missing_collection_fails() {
        let body = envelope("content-repositories", json!([{ "id": "r1" }]), 1);

        let err = decode_collection::<Hub>(&body, &DecodeOptions::default()).unwrap_err();

        assert!(matches!(
            err,
            DecodeError::MissingCollection { ref collection } if collection == "hubs"
        ));
    }

    #[test]
    fn missing_embedded_map_fails() {
        let body = br#"{"_links":{},"page":{"size":20,"number":0,"totalElements":0,"totalPages":0}}"#;

        let err = decode_collection::<Hub>(body, &DecodeOptions::default()).unwrap_err();

        assert!(matches!(err, DecodeError::MissingCollection { .. }));
    }

    #[test]
    fn non_array_collection_fails() {
        let body = envelope("hubs", json!({ "id": "h1" }), 1);

        let err = decode_collection::<Hub>(&body, &DecodeOptions::default()).unwrap_err();

        assert!(matches!(err, DecodeError::CollectionNotArray { .. }));
    }

    #[test]
    fn malformed_timestamp_fails_the_decode() {
        let body = envelope(
            "hubs",
            json!([{ "id": "h1" }, { "id": "h2", "createdDate": true }]),
            1,
        );

        let err = decode_collection::<Hub>(&body, &DecodeOptions::default()).unwrap_err();

        assert!(matches!(
            err,
            DecodeError::Item { index: 1, ref collection, .. } if collection == "hubs"
        ));
        assert!(matches!(
            err.root(),
            DecodeError::MalformedTimestamp { field, .. } if field == "createdDate"
        ));
        assert!(err.to_string().contains("index 1"));
    }

    #[test]
    fn single_records_are_not_wrapped() {
        let body = br#"{"id":"h1","createdDate":true}"#;

        let err = decode_record::<Hub>(body, &DecodeOptions::default()).unwrap_err();

        assert!(matches!(err, DecodeError::MalformedTimestamp { .. }));
    }

    #[test]
    fn record_errors_carry_the_item_index() {
        let body = envelope(
            "folders",
            json!([{ "id": "f1", "name": "ok" }, { "id": 42, "name": "bad id" }]),
            1,
        );

        let err = decode_collection::<Folder>(&body, &DecodeOptions::default()).unwrap_err();

        assert!(matches!(
            err,
            DecodeError::Record { index: 1, ref collection, .. } if collection == "folders"
        ));
    }

    #[test]
    fn garbage_body_is_an_envelope_error() {
        let err = decode_collection::<Hub>(b"not json", &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err, DecodeError::Envelope(_)));
    }

    #[test]
    fn has_next_follows_page_metadata() {
        let collection = Collection::<Hub> {
            links: Links::new(),
            page: PageInfo {
                size: 2,
                number: 0,
                total_elements: 3,
                total_pages: 2,
            },
            items: Vec::new(),
        };
        assert!(collection.has_next());
    }
}
