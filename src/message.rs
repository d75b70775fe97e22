//! Captured message record
//!
//! [`CapturedMessage`] is the immutable value describing one captured
//! publish. It is minted by the protocol adapter at ingest and never
//! mutated afterwards; any "update" happens as eviction plus re-insertion
//! inside the store. The JSON encoding is the one the verification API
//! serves: optional fields are omitted when absent and binary values are
//! base64.

use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single typed attribute attached to a published message.
///
/// `string_value` and `binary_value` are mutually exclusive in presence,
/// but either may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageAttribute {
    /// Attribute name, unique within a message
    pub name: String,
    /// Attribute data type (`String`, `Number`, `Binary`, or array forms)
    pub data_type: String,
    /// Textual value, if the attribute carries one
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub string_value: Option<String>,
    /// Binary value, base64 in the JSON encoding
    #[serde(
        skip_serializing_if = "Option::is_none",
        default,
        with = "opt_base64"
    )]
    pub binary_value: Option<Vec<u8>>,
}

/// One captured publish, immutable after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapturedMessage {
    /// Opaque id, unique among live records, minted at insert
    pub id: String,
    /// Destination topic (ARN-shaped in practice, opaque here)
    pub topic: String,
    /// Message payload; may itself be JSON but is not parsed
    pub body: String,
    /// Optional subject line
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub subject: Option<String>,
    /// Optional structure tag (e.g. multi-protocol JSON payloads)
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub structure: Option<String>,
    /// FIFO deduplication id
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub dedup_id: Option<String>,
    /// FIFO ordering group; stored, not enforced
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub group_id: Option<String>,
    /// Message attributes in the order they appeared on the wire
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub attributes: Vec<MessageAttribute>,
    /// Capture instant, millisecond resolution or better
    pub timestamp: DateTime<Utc>,
    /// Verbatim request body bytes, retained for forensic inspection;
    /// base64 in the JSON encoding
    #[serde(with = "base64_bytes")]
    pub raw_payload: Bytes,
}

impl CapturedMessage {
    /// Create a record from its required fields; optional fields start
    /// absent.
    pub fn new(
        id: impl Into<String>,
        topic: impl Into<String>,
        body: impl Into<String>,
        timestamp: DateTime<Utc>,
        raw_payload: impl Into<Bytes>,
    ) -> Self {
        Self {
            id: id.into(),
            topic: topic.into(),
            body: body.into(),
            subject: None,
            structure: None,
            dedup_id: None,
            group_id: None,
            attributes: Vec::new(),
            timestamp,
            raw_payload: raw_payload.into(),
        }
    }
}

/// Serde adapter encoding `Bytes` as a base64 string.
mod base64_bytes {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map(Bytes::from)
            .map_err(serde::de::Error::custom)
    }
}

/// Serde adapter encoding `Option<Vec<u8>>` as an optional base64 string.
mod opt_base64 {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_str(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        let encoded = Option::<String>::deserialize(deserializer)?;
        encoded
            .map(|encoded| STANDARD.decode(encoded.as_bytes()))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> CapturedMessage {
        let mut record = CapturedMessage::new(
            "m-1",
            "arn:aws:sns:us-east-1:123456789012:orders",
            "hello",
            Utc::now(),
            Bytes::from_static(b"Action=Publish&Message=hello"),
        );
        record.subject = Some("greeting".to_string());
        record.attributes.push(MessageAttribute {
            name: "trace-id".to_string(),
            data_type: "String".to_string(),
            string_value: Some("abc123".to_string()),
            binary_value: None,
        });
        record.attributes.push(MessageAttribute {
            name: "sig".to_string(),
            data_type: "Binary".to_string(),
            string_value: None,
            binary_value: Some(vec![0xde, 0xad, 0xbe, 0xef]),
        });
        record
    }

    #[test]
    fn test_json_round_trip_is_identity() {
        let record = sample_message();
        let json = serde_json::to_string(&record).expect("serialize");
        let back: CapturedMessage = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, record);
    }

    #[test]
    fn test_absent_optionals_are_omitted() {
        let record = CapturedMessage::new("m-2", "t", "x", Utc::now(), Bytes::new());
        let json = serde_json::to_value(&record).expect("serialize");
        let object = json.as_object().expect("object");
        assert!(!object.contains_key("subject"));
        assert!(!object.contains_key("structure"));
        assert!(!object.contains_key("dedup_id"));
        assert!(!object.contains_key("group_id"));
        assert!(!object.contains_key("attributes"));
    }

    #[test]
    fn test_binary_fields_encode_as_base64() {
        let record = sample_message();
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            json["attributes"][1]["binary_value"],
            serde_json::json!("3q2+7w==")
        );
        assert_eq!(
            json["raw_payload"],
            serde_json::json!("QWN0aW9uPVB1Ymxpc2gmTWVzc2FnZT1oZWxsbw==")
        );
    }
}
