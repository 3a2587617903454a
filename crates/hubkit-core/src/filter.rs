//! Webhook filter codec.
//!
//! Filters are a tagged union on the wire. The discriminator is `type`, and
//! the arguments are an array of single-key objects rather than a flat
//! object:
//!
//! ```json
//! { "type": "in", "arguments": [ { "jsonPath": "$.payload.id" }, { "value": ["1234", "bar"] } ] }
//! ```
//!
//! The key of the second argument is `value` for every variant, including
//! `in` where it holds a list.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};

use crate::error::DecodeError;

/// A webhook filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookFilter {
    /// Matches when the value at `json_path` equals `value`.
    Equal { json_path: String, value: String },
    /// Matches when the value at `json_path` is one of `values`.
    In {
        json_path: String,
        values: Vec<String>,
    },
}

impl WebhookFilter {
    pub fn equal(json_path: impl Into<String>, value: impl Into<String>) -> Self {
        WebhookFilter::Equal {
            json_path: json_path.into(),
            value: value.into(),
        }
    }

    pub fn is_in<I, S>(json_path: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        WebhookFilter::In {
            json_path: json_path.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// The wire discriminator of this filter.
    pub fn filter_type(&self) -> &'static str {
        match self {
            WebhookFilter::Equal { .. } => "equal",
            WebhookFilter::In { .. } => "in",
        }
    }

    pub fn json_path(&self) -> &str {
        match self {
            WebhookFilter::Equal { json_path, .. } | WebhookFilter::In { json_path, .. } => {
                json_path
            }
        }
    }
}

/// Outcome of decoding a single raw filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    Filter(WebhookFilter),
    /// A well-formed filter whose `type` this client does not know.
    Unrecognized { filter_type: String },
}

/// What to do with filters whose `type` is not recognized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UnknownFilterPolicy {
    /// Fail the decode with [`DecodeError::UnknownFilterType`].
    #[default]
    Reject,
    /// Drop the filter and keep decoding.
    Skip,
}

/// Encode a filter into its wire form.
pub fn encode(filter: &WebhookFilter) -> Value {
    let value = match filter {
        WebhookFilter::Equal { value, .. } => json!(value),
        WebhookFilter::In { values, .. } => json!(values),
    };

    json!({
        "type": filter.filter_type(),
        "arguments": [
            { "jsonPath": filter.json_path() },
            { "value": value },
        ],
    })
}

/// Decode a filter from its wire form.
///
/// Missing `jsonPath` or `value` arguments leave the field empty; only a
/// malformed container shape is an error.
pub fn decode(raw: &Value) -> Result<Decoded, DecodeError> {
    let object = raw.as_object().ok_or(DecodeError::MissingDiscriminator)?;

    let filter_type = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or(DecodeError::MissingDiscriminator)?;

    let arguments = object
        .get("arguments")
        .and_then(Value::as_array)
        .ok_or_else(|| invalid("'arguments' must be an array"))?;

    match filter_type {
        "equal" => {
            let mut json_path = String::new();
            let mut value = String::new();
            for argument in arguments {
                let argument = argument_object(argument)?;
                if let Some(path) = argument.get("jsonPath") {
                    json_path = string_argument("jsonPath", path)?;
                }
                if let Some(v) = argument.get("value") {
                    value = string_argument("value", v)?;
                }
            }
            Ok(Decoded::Filter(WebhookFilter::Equal { json_path, value }))
        }
        "in" => {
            let mut json_path = String::new();
            let mut values = Vec::new();
            for argument in arguments {
                let argument = argument_object(argument)?;
                if let Some(path) = argument.get("jsonPath") {
                    json_path = string_argument("jsonPath", path)?;
                }
                // A non-array `value` is treated as absent.
                if let Some(items) = argument.get("value").and_then(Value::as_array) {
                    values = items
                        .iter()
                        .map(|item| string_argument("value", item))
                        .collect::<Result<_, _>>()?;
                }
            }
            Ok(Decoded::Filter(WebhookFilter::In { json_path, values }))
        }
        other => Ok(Decoded::Unrecognized {
            filter_type: other.to_string(),
        }),
    }
}

/// Decode a list of raw filters, applying `policy` to unrecognized types.
pub fn decode_all(
    raw: &[Value],
    policy: UnknownFilterPolicy,
) -> Result<Vec<WebhookFilter>, DecodeError> {
    let mut filters = Vec::with_capacity(raw.len());
    for item in raw {
        match decode(item)? {
            Decoded::Filter(filter) => filters.push(filter),
            Decoded::Unrecognized { filter_type } => match policy {
                UnknownFilterPolicy::Reject => {
                    return Err(DecodeError::UnknownFilterType { filter_type });
                }
                UnknownFilterPolicy::Skip => {}
            },
        }
    }
    Ok(filters)
}

fn invalid(reason: &str) -> DecodeError {
    DecodeError::InvalidArguments {
        reason: reason.to_string(),
    }
}

fn argument_object(argument: &Value) -> Result<&Map<String, Value>, DecodeError> {
    argument
        .as_object()
        .ok_or_else(|| invalid("each argument must be an object"))
}

fn string_argument(key: &str, value: &Value) -> Result<String, DecodeError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| invalid(&format!("'{}' must be a string", key)))
}

impl Serialize for WebhookFilter {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        encode(self).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for WebhookFilter {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        match decode(&raw).map_err(serde::de::Error::custom)? {
            Decoded::Filter(filter) => Ok(filter),
            Decoded::Unrecognized { filter_type } => Err(serde::de::Error::custom(
                DecodeError::UnknownFilterType { filter_type },
            )),
        }
    }
}
