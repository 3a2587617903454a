//! Timestamp normalization.
//!
//! The API is inconsistent about timestamps: the same field may arrive as an
//! RFC 3339 string, as integer epoch milliseconds, or as floating-point
//! epoch milliseconds. All three are normalized to a [`DateTime<Utc>`].
//!
//! Two entry points share the same conversion:
//!
//! - [`normalize_fields`] rewrites the declared timestamp fields of a raw
//!   record in place, before the record is mapped onto its struct. This is
//!   where malformed values are reported as
//!   [`DecodeError::MalformedTimestamp`].
//! - [`option`] is a serde `with` module for `Option<DateTime<Utc>>` fields,
//!   so that records also deserialize directly from any of the encodings.

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::error::DecodeError;

/// Convert a raw JSON timestamp.
///
/// `null` means "no timestamp". Float milliseconds are truncated to whole
/// milliseconds.
pub fn from_json(field: &str, value: &Value) -> Result<Option<DateTime<Utc>>, DecodeError> {
    let malformed = || DecodeError::MalformedTimestamp {
        field: field.to_string(),
        value: value.clone(),
    };

    match value {
        Value::Null => Ok(None),
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .map(|dt| Some(dt.with_timezone(&Utc)))
            .map_err(|_| malformed()),
        Value::Number(n) => {
            let millis = if let Some(i) = n.as_i64() {
                i
            } else if n.is_u64() {
                // Larger than i64::MAX, far outside chrono's range anyway.
                return Err(malformed());
            } else {
                let f = n.as_f64().ok_or_else(malformed)?;
                if !f.is_finite() || f < i64::MIN as f64 || f > i64::MAX as f64 {
                    return Err(malformed());
                }
                f.trunc() as i64
            };
            DateTime::from_timestamp_millis(millis)
                .map(Some)
                .ok_or_else(malformed)
        }
        _ => Err(malformed()),
    }
}

/// Format a timestamp the way hubkit writes it back: RFC 3339, UTC, with
/// only as much sub-second precision as needed.
pub fn to_rfc3339(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Rewrite the named timestamp fields of a raw record to RFC 3339 strings.
///
/// Absent fields are left absent; `null` stays `null`.
pub fn normalize_fields(
    record: &mut Map<String, Value>,
    fields: &[&str],
) -> Result<(), DecodeError> {
    for field in fields {
        let Some(raw) = record.get_mut(*field) else {
            continue;
        };
        if let Some(dt) = from_json(field, raw)? {
            *raw = Value::String(to_rfc3339(&dt));
        }
    }
    Ok(())
}

/// serde `with` module for `Option<DateTime<Utc>>` accepting every
/// encoding the API uses.
pub mod option {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_str(&super::to_rfc3339(dt)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        super::from_json("timestamp", &raw).map_err(serde::de::Error::custom)
    }
}
