//! Parsing for AWS query-style form-encoded request bodies
//!
//! The SDK posts `application/x-www-form-urlencoded` bodies where message
//! attributes arrive as repeated keys with dotted index suffixes
//! (`MessageAttributes.entry.1.Name`, `MessageAttributes.entry.1.Value.DataType`,
//! ...). Indexing starts at 1 and stops at the first index with no `Name`.

use crate::error::{Result, SnsLiteError};
use crate::message::MessageAttribute;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use std::collections::HashMap;

/// Decoded `application/x-www-form-urlencoded` body.
#[derive(Debug, Default)]
pub struct FormBody {
    fields: HashMap<String, String>,
}

impl FormBody {
    /// Parse a form-encoded body into key-value pairs.
    ///
    /// Malformed escapes degrade to the raw text rather than failing the
    /// whole request; missing required fields are diagnosed downstream.
    pub fn parse(body: &[u8]) -> Self {
        let text = String::from_utf8_lossy(body);
        let fields = text
            .split('&')
            .filter(|pair| !pair.is_empty())
            .filter_map(|pair| {
                let mut parts = pair.splitn(2, '=');
                let key = parts.next()?;
                let value = parts.next().unwrap_or("");
                Some((decode_component(key), decode_component(value)))
            })
            .collect();
        Self { fields }
    }

    /// Raw field accessor.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Field accessor treating an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|value| !value.is_empty())
    }

    /// Extract the indexed message attribute tuples.
    ///
    /// `BinaryValue` is base64 on the wire; an undecodable value is an
    /// `InvalidParameter` naming the offending key.
    pub fn message_attributes(&self) -> Result<Vec<MessageAttribute>> {
        let mut attributes = Vec::new();
        for n in 1.. {
            let Some(name) = self.get_non_empty(&format!("MessageAttributes.entry.{n}.Name"))
            else {
                break;
            };
            let data_type = self
                .get_non_empty(&format!("MessageAttributes.entry.{n}.Value.DataType"))
                .unwrap_or("String")
                .to_string();
            let string_value = self
                .get(&format!("MessageAttributes.entry.{n}.Value.StringValue"))
                .map(str::to_string);
            let binary_value = match self.get(&format!("MessageAttributes.entry.{n}.Value.BinaryValue"))
            {
                Some(encoded) => Some(STANDARD.decode(encoded.as_bytes()).map_err(|_| {
                    SnsLiteError::InvalidParameter(format!(
                        "MessageAttributes.entry.{n}.Value.BinaryValue"
                    ))
                })?),
                None => None,
            };
            attributes.push(MessageAttribute {
                name: name.to_string(),
                data_type,
                string_value,
                binary_value,
            });
        }
        Ok(attributes)
    }
}

/// Decode one form component: `+` is a space, then percent-decoding.
fn decode_component(raw: &str) -> String {
    let plus_decoded = raw.replace('+', " ");
    match urlencoding::decode(&plus_decoded) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => plus_decoded,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_fields() {
        let form = FormBody::parse(b"Action=Publish&TopicArn=arn%3Aaws%3Asns%3Aus-east-1%3A1%3At&Message=hello+world");
        assert_eq!(form.get("Action"), Some("Publish"));
        assert_eq!(form.get("TopicArn"), Some("arn:aws:sns:us-east-1:1:t"));
        assert_eq!(form.get("Message"), Some("hello world"));
        assert_eq!(form.get("Subject"), None);
    }

    #[test]
    fn test_percent_decoding() {
        let form = FormBody::parse(b"Message=a%20b%26c%3Dd");
        assert_eq!(form.get("Message"), Some("a b&c=d"));
    }

    #[test]
    fn test_empty_value_is_present_but_not_non_empty() {
        let form = FormBody::parse(b"Action=Publish&Subject=");
        assert_eq!(form.get("Subject"), Some(""));
        assert_eq!(form.get_non_empty("Subject"), None);
    }

    #[test]
    fn test_attributes_iterate_from_one() {
        let form = FormBody::parse(
            b"Action=Publish\
              &MessageAttributes.entry.1.Name=trace-id\
              &MessageAttributes.entry.1.Value.DataType=String\
              &MessageAttributes.entry.1.Value.StringValue=abc\
              &MessageAttributes.entry.2.Name=count\
              &MessageAttributes.entry.2.Value.DataType=Number\
              &MessageAttributes.entry.2.Value.StringValue=7",
        );
        let attributes = form.message_attributes().expect("attributes");
        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes[0].name, "trace-id");
        assert_eq!(attributes[0].data_type, "String");
        assert_eq!(attributes[0].string_value.as_deref(), Some("abc"));
        assert_eq!(attributes[1].name, "count");
        assert_eq!(attributes[1].string_value.as_deref(), Some("7"));
    }

    #[test]
    fn test_attributes_stop_at_first_gap() {
        let form = FormBody::parse(
            b"MessageAttributes.entry.1.Name=a\
              &MessageAttributes.entry.1.Value.DataType=String\
              &MessageAttributes.entry.3.Name=skipped\
              &MessageAttributes.entry.3.Value.DataType=String",
        );
        let attributes = form.message_attributes().expect("attributes");
        assert_eq!(attributes.len(), 1);
        assert_eq!(attributes[0].name, "a");
    }

    #[test]
    fn test_binary_attribute_decodes_base64() {
        let form = FormBody::parse(
            b"MessageAttributes.entry.1.Name=sig\
              &MessageAttributes.entry.1.Value.DataType=Binary\
              &MessageAttributes.entry.1.Value.BinaryValue=3q2%2B7w%3D%3D",
        );
        let attributes = form.message_attributes().expect("attributes");
        assert_eq!(
            attributes[0].binary_value.as_deref(),
            Some(&[0xde, 0xad, 0xbe, 0xef][..])
        );
    }

    #[test]
    fn test_invalid_binary_attribute_names_the_key() {
        let form = FormBody::parse(
            b"MessageAttributes.entry.1.Name=sig\
              &MessageAttributes.entry.1.Value.BinaryValue=%2A%2Anot-base64%2A%2A",
        );
        let err = form.message_attributes().expect_err("must fail");
        assert!(matches!(err, SnsLiteError::InvalidParameter(_)));
        assert!(err
            .to_string()
            .contains("MessageAttributes.entry.1.Value.BinaryValue"));
    }

    #[test]
    fn test_missing_datatype_defaults_to_string() {
        let form = FormBody::parse(b"MessageAttributes.entry.1.Name=a");
        let attributes = form.message_attributes().expect("attributes");
        assert_eq!(attributes[0].data_type, "String");
    }
}
