//! Webhooks.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::envelope::{DecodeOptions, Links};
use crate::error::DecodeError;
use crate::filter::{self, WebhookFilter};
use crate::timestamp;

use super::{Resource, Updatable, structural_decode};

/// Event names a webhook can subscribe to.
pub mod events {
    pub const CONTENT_ITEM_ASSIGNED: &str = "dynamic-content.content-item.assigned";
    pub const CONTENT_ITEM_CREATED: &str = "dynamic-content.content-item.created";
    pub const CONTENT_ITEM_UPDATED: &str = "dynamic-content.content-item.updated";
    pub const CONTENT_ITEM_WORKFLOW_UPDATED: &str = "dynamic-content.content-item.workflow.updated";
    pub const EDITION_PUBLISHED: &str = "dynamic-content.edition.published";
    pub const EDITION_SCHEDULED: &str = "dynamic-content.edition.scheduled";
    pub const EDITION_UNSCHEDULED: &str = "dynamic-content.edition.unscheduled";
    pub const SNAPSHOT_PUBLISHED: &str = "dynamic-content.snapshot.published";
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Notification {
    pub email: String,
}

/// An extra header sent with every delivery.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookHeader {
    pub key: String,
    pub value: String,
    pub secret: bool,
}

/// A templated payload replacing the default delivery body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookCustomPayload {
    #[serde(rename = "type")]
    pub payload_type: String,
    pub value: String,
}

/// A webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Webhook {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub label: String,
    pub events: Vec<String>,
    pub handlers: Vec<String>,
    pub active: bool,
    pub notifications: Vec<Notification>,
    pub secret: String,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<WebhookHeader>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<WebhookFilter>,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_payload: Option<WebhookCustomPayload>,
    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

/// Creation body and update projection of a webhook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WebhookInput {
    pub label: String,
    pub events: Vec<String>,
    pub handlers: Vec<String>,
    pub active: bool,
    pub notifications: Vec<Notification>,
    pub secret: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub headers: Vec<WebhookHeader>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<WebhookFilter>,
    pub method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_payload: Option<WebhookCustomPayload>,
}

impl Resource for Webhook {
    const COLLECTION: &'static str = "webhooks";

    /// Filters are a tagged union, decoded separately so that the caller's
    /// [`UnknownFilterPolicy`](crate::filter::UnknownFilterPolicy) applies.
    fn from_raw(mut raw: Value, options: &DecodeOptions) -> Result<Self, DecodeError> {
        let raw_filters = raw
            .as_object_mut()
            .and_then(|record| record.remove("filters"));

        let mut webhook: Webhook =
            structural_decode(raw, Self::COLLECTION, Self::TIMESTAMP_FIELDS)?;

        webhook.filters = match raw_filters {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(raw_filters)) => {
                filter::decode_all(&raw_filters, options.unknown_filters)?
            }
            Some(_) => {
                return Err(DecodeError::InvalidArguments {
                    reason: "'filters' must be an array".to_string(),
                });
            }
        };

        Ok(webhook)
    }
}

impl Updatable for Webhook {
    type Input = WebhookInput;

    fn to_input(&self) -> WebhookInput {
        WebhookInput {
            label: self.label.clone(),
            events: self.events.clone(),
            handlers: self.handlers.clone(),
            active: self.active,
            notifications: self.notifications.clone(),
            secret: self.secret.clone(),
            headers: self.headers.clone(),
            filters: self.filters.clone(),
            method: self.method.clone(),
            custom_payload: self.custom_payload.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::decode_collection;
    use crate::filter::UnknownFilterPolicy;
    use crate::patch::{PatchResult, compute_update};
    use serde_json::json;

    fn input() -> WebhookInput {
        WebhookInput {
            label: "unittest".into(),
            events: vec![events::EDITION_PUBLISHED.into()],
            handlers: vec!["http://example.org/foobar".into()],
            active: true,
            secret: "my-secret".into(),
            filters: vec![
                WebhookFilter::equal("$.payload.id", "1234"),
                WebhookFilter::is_in("$.payload.id", ["1234", "bar"]),
            ],
            method: "POST".into(),
            ..WebhookInput::default()
        }
    }

    #[test]
    fn input_serializes_filters_in_wire_form() {
        let encoded = serde_json::to_value(input()).unwrap();

        assert_eq!(
            encoded,
            json!({
                "label": "unittest",
                "events": ["dynamic-content.edition.published"],
                "handlers": ["http://example.org/foobar"],
                "active": true,
                "notifications": [],
                "secret": "my-secret",
                "filters": [
                    { "type": "equal", "arguments": [{ "jsonPath": "$.payload.id" }, { "value": "1234" }] },
                    { "type": "in", "arguments": [{ "jsonPath": "$.payload.id" }, { "value": ["1234", "bar"] }] }
                ],
                "method": "POST"
            })
        );

        let decoded: WebhookInput = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, input());
    }

    fn webhooks_envelope(filters: Value) -> Vec<u8> {
        serde_json::to_vec(&json!({
            "_embedded": {
                "webhooks": [{
                    "id": "w1",
                    "label": "publish hook",
                    "events": ["dynamic-content.edition.published"],
                    "handlers": ["https://hooks.example.com/publish"],
                    "active": true,
                    "notifications": [{ "email": "ops@example.com" }],
                    "secret": "s",
                    "createdDate": 1_600_000_000_000_i64,
                    "filters": filters,
                    "method": "POST"
                }]
            },
            "_links": {},
            "page": { "size": 20, "number": 0, "totalElements": 1, "totalPages": 1 }
        }))
        .unwrap()
    }

    #[test]
    fn filters_are_decoded_after_the_record() {
        let body = webhooks_envelope(json!([
            { "type": "in", "arguments": [{ "jsonPath": "$.payload.id" }, { "value": ["1234", "bar"] }] }
        ]));

        let hooks = decode_collection::<Webhook>(&body, &DecodeOptions::default()).unwrap();
        let hook = &hooks.items[0];

        assert_eq!(
            hook.filters,
            vec![WebhookFilter::is_in("$.payload.id", ["1234", "bar"])]
        );
        assert_eq!(hook.notifications[0].email, "ops@example.com");
        assert!(hook.created_date.is_some());
    }

    #[test]
    fn unknown_filters_follow_the_decode_options() {
        let body = webhooks_envelope(json!([
            { "type": "regex", "arguments": [] },
            { "type": "equal", "arguments": [{ "jsonPath": "$.a" }, { "value": "b" }] }
        ]));

        let err = decode_collection::<Webhook>(&body, &DecodeOptions::default()).unwrap_err();
        assert!(matches!(err.root(), DecodeError::UnknownFilterType { .. }));

        let options = DecodeOptions::default().with_unknown_filters(UnknownFilterPolicy::Skip);
        let hooks = decode_collection::<Webhook>(&body, &options).unwrap();
        assert_eq!(hooks.items[0].filters, vec![WebhookFilter::equal("$.a", "b")]);
    }

    #[test]
    fn malformed_filter_aborts_the_webhook() {
        let body = webhooks_envelope(json!([{ "type": "equal" }]));

        let err = decode_collection::<Webhook>(&body, &DecodeOptions::default()).unwrap_err();

        assert!(matches!(err, DecodeError::Item { index: 0, .. }));
        assert!(matches!(err.root(), DecodeError::InvalidArguments { .. }));
    }

    #[test]
    fn non_array_in_value_keeps_the_listing() {
        let hook = |id: &str, filters: Value| {
            json!({
                "id": id,
                "label": id,
                "events": [],
                "handlers": [],
                "active": true,
                "filters": filters,
                "method": "POST"
            })
        };
        let body = serde_json::to_vec(&json!({
            "_embedded": { "webhooks": [
                hook("w1", json!([{ "type": "in", "arguments": [{ "jsonPath": "$.a" }, { "value": "x" }] }])),
                hook("w2", json!([])),
            ] },
            "page": { "size": 20, "number": 0, "totalElements": 2, "totalPages": 1 }
        }))
        .unwrap();

        let options = DecodeOptions::default().with_unknown_filters(UnknownFilterPolicy::Skip);
        let hooks = decode_collection::<Webhook>(&body, &options).unwrap();

        assert_eq!(hooks.items.len(), 2);
        assert_eq!(
            hooks.items[0].filters,
            vec![WebhookFilter::In {
                json_path: "$.a".into(),
                values: vec![]
            }]
        );
    }

    #[test]
    fn null_filters_are_empty() {
        let body = webhooks_envelope(Value::Null);
        let hooks = decode_collection::<Webhook>(&body, &DecodeOptions::default()).unwrap();
        assert!(hooks.items[0].filters.is_empty());
    }

    #[test]
    fn projection_covers_every_updatable_field() {
        let hook = Webhook {
            id: "w1".into(),
            headers: vec![WebhookHeader {
                key: "X-Token".into(),
                value: "abc".into(),
                secret: true,
            }],
            custom_payload: Some(WebhookCustomPayload {
                payload_type: "text/x-handlebars-template".into(),
                value: "{{payload.id}}".into(),
            }),
            ..Webhook::default()
        };

        // Unchanged headers and payload must not show up as a diff.
        let desired = hook.to_input();
        assert_eq!(compute_update(&hook, &desired).unwrap(), PatchResult::NoChange);

        let desired = WebhookInput {
            custom_payload: None,
            ..hook.to_input()
        };
        let PatchResult::Patch(body) = compute_update(&hook, &desired).unwrap() else {
            panic!("expected a patch");
        };
        let patch: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(patch, json!({ "customPayload": null }));
    }

    #[test]
    fn filter_change_replaces_the_whole_array() {
        let hook = Webhook {
            filters: vec![WebhookFilter::equal("$.a", "1")],
            ..Webhook::default()
        };
        let desired = WebhookInput {
            filters: vec![
                WebhookFilter::equal("$.a", "1"),
                WebhookFilter::is_in("$.b", ["x"]),
            ],
            ..hook.to_input()
        };

        let PatchResult::Patch(body) = compute_update(&hook, &desired).unwrap() else {
            panic!("expected a patch");
        };
        let patch: Value = serde_json::from_slice(&body).unwrap();

        assert_eq!(
            patch,
            json!({
                "filters": [
                    { "type": "equal", "arguments": [{ "jsonPath": "$.a" }, { "value": "1" }] },
                    { "type": "in", "arguments": [{ "jsonPath": "$.b" }, { "value": ["x"] }] }
                ]
            })
        );
    }
}
