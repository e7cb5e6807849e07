//! JSON decoder
//!
//! The server answers in snake_case, which matches Rust field names, so keys
//! reach serde untouched. Types following another convention say so with
//! `#[serde(rename_all = ...)]`. Dates are expected in RFC 3339 form and
//! decode through chrono's serde support.

use courier_core::Decoder;
use courier_domain::{CourierError, Result};
use serde::de::DeserializeOwned;

/// serde_json-backed [`Decoder`].
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDecoder;

impl JsonDecoder {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Decoder for JsonDecoder {
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T> {
        // An empty body stands for JSON `null`, so `()` and `Option<T>` decode.
        let bytes: &[u8] = if bytes.iter().all(u8::is_ascii_whitespace) { b"null" } else { bytes };

        serde_json::from_slice(bytes).map_err(|e| CourierError::Decoding(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::{DateTime, TimeZone, Utc};
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Ad {
        ad_id: u32,
        title: String,
        created_at: DateTime<Utc>,
        owner: Owner,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Owner {
        user_id: String,
        display_name: String,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Profile {
        display_name: String,
        avatar_url: Option<String>,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    enum Event {
        Created { id: u32 },
        Deleted { id: u32 },
    }

    #[test]
    fn decodes_snake_case_payload_with_dates() {
        let body = br#"{
            "ad_id": 7,
            "title": "Bike",
            "created_at": "2024-03-01T12:30:00Z",
            "owner": { "user_id": "u1", "display_name": "Alice" }
        }"#;

        let ad: Ad = JsonDecoder.decode(body).unwrap();
        assert_eq!(ad.ad_id, 7);
        assert_eq!(ad.created_at, Utc.with_ymd_and_hms(2024, 3, 1, 12, 30, 0).unwrap());
        assert_eq!(ad.owner.display_name, "Alice");
    }

    #[test]
    fn honors_rename_all() {
        let profile: Profile =
            JsonDecoder.decode(br#"{"displayName":"Alice","avatarUrl":null}"#).unwrap();
        assert_eq!(profile, Profile { display_name: "Alice".into(), avatar_url: None });
    }

    #[test]
    fn decodes_externally_tagged_enum() {
        let event: Event = JsonDecoder.decode(br#"{"Created":{"id":1}}"#).unwrap();
        assert_eq!(event, Event::Created { id: 1 });
    }

    #[test]
    fn map_keys_are_preserved() {
        let counts: HashMap<String, u32> = JsonDecoder.decode(br#"{"enUS":1,"deDE":2}"#).unwrap();
        assert_eq!(counts.get("enUS"), Some(&1));
        assert_eq!(counts.get("deDE"), Some(&2));
        assert!(!counts.contains_key("en_us"));
    }

    #[test]
    fn empty_body_decodes_as_null() {
        JsonDecoder.decode::<()>(b"").unwrap();
        let missing: Option<Owner> = JsonDecoder.decode(b"  \n").unwrap();
        assert_eq!(missing, None);
    }

    #[test]
    fn shape_mismatch_is_decoding_error() {
        let result: Result<Owner> = JsonDecoder.decode(br#"{"user_id": 5}"#);
        assert!(matches!(result, Err(CourierError::Decoding(_))));

        let result: Result<Owner> = JsonDecoder.decode(b"<html>");
        assert!(matches!(result, Err(CourierError::Decoding(_))));
    }

    #[test]
    fn error_payload_decodes() {
        let payload: courier_domain::ErrorResponse =
            JsonDecoder.decode(br#"{"error":true,"reason":"Ad not found"}"#).unwrap();
        assert_eq!(payload.reason, "Ad not found");
    }
}
