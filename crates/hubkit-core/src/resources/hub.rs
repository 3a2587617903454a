//! Hubs, the root of the resource tree.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::envelope::Links;
use crate::timestamp;

use super::Resource;

/// A hub.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Hub {
    pub id: String,
    pub name: String,
    pub label: String,
    pub description: String,
    pub status: String,

    pub created_by: String,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub created_date: Option<DateTime<Utc>>,
    pub last_modified_by: String,
    #[serde(with = "timestamp::option", skip_serializing_if = "Option::is_none")]
    pub last_modified_date: Option<DateTime<Utc>>,

    #[serde(rename = "_links", skip_serializing_if = "Links::is_empty")]
    pub links: Links,
}

impl Resource for Hub {
    const COLLECTION: &'static str = "hubs";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{DecodeOptions, decode_record};

    #[test]
    fn decodes_a_single_hub() {
        let body = br#"{
            "id": "5b32377e4cedfd01c45036d8",
            "name": "anyafinn",
            "label": "Anya Finn",
            "description": "",
            "status": "ACTIVE",
            "createdBy": "user",
            "createdDate": "2018-06-26T12:54:54.000Z",
            "lastModifiedBy": "user",
            "lastModifiedDate": 1530017694000,
            "_links": { "self": { "href": "https://api.example.net/v2/content/hubs/5b32377e4cedfd01c45036d8" } }
        }"#;

        let hub = decode_record::<Hub>(body, &DecodeOptions::default()).unwrap();

        assert_eq!(hub.name, "anyafinn");
        assert_eq!(hub.created_date, hub.last_modified_date);
        assert!(hub.links.contains_key("self"));
    }

    #[test]
    fn serde_accepts_epoch_millis_directly() {
        let hub: Hub = serde_json::from_str(r#"{"id":"h","createdDate":1530017694000.0}"#).unwrap();
        assert_eq!(
            hub.created_date,
            DateTime::from_timestamp_millis(1_530_017_694_000)
        );
    }
}
