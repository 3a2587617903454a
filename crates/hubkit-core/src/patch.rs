//! Merge-patch computation for partial updates.
//!
//! Updates are sent as JSON Merge Patch documents (RFC 7396) holding only
//! the fields that changed between a current and a desired snapshot. Both
//! snapshots must have the same shape; the [`Updatable`] trait ties every
//! record to the projection type used for both sides, so the diffed field
//! set cannot drift.
//!
//! Merge patch has two known limits, both inherent to RFC 7396:
//!
//! - arrays are replaced wholesale, never merged element-wise;
//! - an explicit `null` in the desired snapshot reads as "remove the key".

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::PatchError;
use crate::resources::Updatable;

/// Result of comparing two snapshots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchResult {
    /// The snapshots are structurally equal; there is nothing to send.
    NoChange,
    /// The serialized merge patch to send.
    Patch(Vec<u8>),
}

impl PatchResult {
    pub fn is_no_change(&self) -> bool {
        matches!(self, PatchResult::NoChange)
    }

    /// The patch body, if there is one.
    pub fn body(&self) -> Option<&[u8]> {
        match self {
            PatchResult::NoChange => None,
            PatchResult::Patch(body) => Some(body),
        }
    }
}

/// Compute the merge patch turning `current` into `desired`.
pub fn compute_patch<T>(current: &T, desired: &T) -> Result<PatchResult, PatchError>
where
    T: Serialize + ?Sized,
{
    let current = serde_json::to_value(current).map_err(PatchError::Serialize)?;
    let desired = serde_json::to_value(desired).map_err(PatchError::Serialize)?;

    match diff(&current, &desired) {
        None => Ok(PatchResult::NoChange),
        Some(patch) => serde_json::to_vec(&patch)
            .map(PatchResult::Patch)
            .map_err(PatchError::Serialize),
    }
}

/// Compute the merge patch updating `record` to `desired`.
///
/// The current side is the record's own update projection.
pub fn compute_update<R: Updatable>(
    record: &R,
    desired: &R::Input,
) -> Result<PatchResult, PatchError> {
    compute_patch(&record.to_input(), desired)
}

/// Diff two JSON trees into a merge patch; `None` if they are equal.
pub fn diff(current: &Value, desired: &Value) -> Option<Value> {
    match (current, desired) {
        (Value::Object(current), Value::Object(desired)) => {
            let mut patch = Map::new();

            for (key, wanted) in desired {
                match current.get(key) {
                    None => {
                        patch.insert(key.clone(), wanted.clone());
                    }
                    Some(existing) => {
                        if let Some(change) = diff(existing, wanted) {
                            patch.insert(key.clone(), change);
                        }
                    }
                }
            }

            for key in current.keys() {
                if !desired.contains_key(key) {
                    patch.insert(key.clone(), Value::Null);
                }
            }

            if patch.is_empty() {
                None
            } else {
                Some(Value::Object(patch))
            }
        }
        (current, desired) if current == desired => None,
        (_, desired) => Some(desired.clone()),
    }
}

/// Apply a merge patch to `target` (RFC 7396, section 2).
pub fn apply_merge_patch(target: &mut Value, patch: &Value) {
    let Value::Object(patch) = patch else {
        *target = patch.clone();
        return;
    };

    if !target.is_object() {
        *target = Value::Object(Map::new());
    }

    if let Value::Object(target) = target {
        for (key, value) in patch {
            if value.is_null() {
                target.remove(key);
            } else {
                apply_merge_patch(target.entry(key.clone()).or_insert(Value::Null), value);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn patch_of(result: PatchResult) -> Value {
        match result {
            PatchResult::Patch(body) => serde_json::from_slice(&body).unwrap(),
            PatchResult::NoChange => panic!("expected a patch"),
        }
    }

    #[test]
    fn identical_snapshots_are_no_change() {
        let x = json!({ "label": "a", "events": ["e1", "e2"], "nested": { "k": 1 } });
        assert_eq!(compute_patch(&x, &x).unwrap(), PatchResult::NoChange);
    }

    #[test]
    fn key_order_is_insignificant() {
        let a: Value = serde_json::from_str(r#"{"a":1,"b":2}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
        assert!(compute_patch(&a, &b).unwrap().is_no_change());
    }

    #[test]
    fn array_order_is_significant_and_arrays_are_atomic() {
        let current = json!({ "events": ["a", "b"], "label": "x" });
        let desired = json!({ "events": ["b", "a"], "label": "x" });

        let patch = patch_of(compute_patch(&current, &desired).unwrap());

        assert_eq!(patch, json!({ "events": ["b", "a"] }));
    }

    #[test]
    fn only_changed_fields_are_sent() {
        let current = json!({ "label": "old", "active": true, "secret": "s" });
        let desired = json!({ "label": "new", "active": false, "secret": "s" });

        let patch = patch_of(compute_patch(&current, &desired).unwrap());

        assert_eq!(patch, json!({ "label": "new", "active": false }));
    }

    #[test]
    fn removed_keys_map_to_null() {
        let current = json!({ "label": "x", "customPayload": { "type": "t" } });
        let desired = json!({ "label": "x" });

        let patch = patch_of(compute_patch(&current, &desired).unwrap());

        assert_eq!(patch, json!({ "customPayload": null }));
    }

    #[test]
    fn nested_objects_recurse() {
        let current = json!({ "settings": { "label": "a", "icons": [] } });
        let desired = json!({ "settings": { "label": "b", "icons": [] } });

        let patch = patch_of(compute_patch(&current, &desired).unwrap());

        assert_eq!(patch, json!({ "settings": { "label": "b" } }));
    }

    #[test]
    fn apply_follows_rfc7396_examples() {
        let mut target = json!({ "a": "b", "c": { "d": "e", "f": "g" } });
        apply_merge_patch(&mut target, &json!({ "a": "z", "c": { "f": null } }));
        assert_eq!(target, json!({ "a": "z", "c": { "d": "e" } }));

        let mut target = json!({ "a": [{ "b": "c" }] });
        apply_merge_patch(&mut target, &json!({ "a": [1] }));
        assert_eq!(target, json!({ "a": [1] }));

        let mut target = json!(["a", "b"]);
        apply_merge_patch(&mut target, &json!({ "a": "b" }));
        assert_eq!(target, json!({ "a": "b" }));
    }

    #[test]
    fn typed_snapshots_are_diffed_by_field() {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct Input {
            label: String,
            validation_level: Option<String>,
        }

        let current = Input {
            label: "a".into(),
            validation_level: Some("CONTENT_TYPE".into()),
        };
        let desired = Input {
            label: "a".into(),
            validation_level: Some("SLOT".into()),
        };

        let patch = patch_of(compute_patch(&current, &desired).unwrap());
        assert_eq!(patch, json!({ "validationLevel": "SLOT" }));
    }

    /// Arbitrary JSON without nulls, which merge patch cannot express.
    fn json_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| Value::Number(n.into())),
            "[a-z]{0,6}".prop_map(Value::String),
        ];

        leaf.prop_recursive(4, 48, 6, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
                prop::collection::btree_map("[a-e]", inner, 0..5)
                    .prop_map(|m| Value::Object(m.into_iter().collect())),
            ]
        })
    }

    fn json_object() -> impl Strategy<Value = Value> {
        prop::collection::btree_map("[a-e]", json_value(), 0..6)
            .prop_map(|m| Value::Object(m.into_iter().collect()))
    }

    proptest! {
        #[test]
        fn patch_is_reflexive(x in json_object()) {
            prop_assert_eq!(compute_patch(&x, &x).unwrap(), PatchResult::NoChange);
        }

        #[test]
        fn applying_the_patch_yields_desired(current in json_object(), desired in json_object()) {
            let result = compute_patch(&current, &desired).unwrap();

            let mut patched = current.clone();
            if let PatchResult::Patch(body) = &result {
                let patch: Value = serde_json::from_slice(body).unwrap();
                apply_merge_patch(&mut patched, &patch);
            }

            prop_assert_eq!(patched, desired.clone());
            prop_assert_eq!(result.is_no_change(), current == desired);
        }

        #[test]
        fn removed_keys_appear_as_null(current in json_object(), desired in json_object()) {
            if let PatchResult::Patch(body) = compute_patch(&current, &desired).unwrap() {
                let patch: Value = serde_json::from_slice(&body).unwrap();
                for key in current.as_object().unwrap().keys() {
                    if !desired.as_object().unwrap().contains_key(key) {
                        prop_assert_eq!(&patch[key], &Value::Null);
                        prop_assert!(patch.as_object().unwrap().contains_key(key));
                    }
                }
            }
        }
    }
}
