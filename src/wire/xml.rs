//! XML response envelopes for the SNS wire protocol
//!
//! The three envelope shapes are fixed; SDK parsers are strict about the
//! element layout and the namespace, so the emitters build them verbatim
//! with only the text content interpolated (escaped). Every response
//! carries a freshly generated `RequestId`.

use uuid::Uuid;

/// Namespace stamped on every SNS response envelope.
pub const SNS_XMLNS: &str = "http://sns.amazonaws.com/doc/2010-03-31/";

/// Content type of every SNS wire response.
pub const CONTENT_TYPE_XML: &str = "text/xml";

/// Success envelope for `Publish`.
pub fn publish_success(message_id: &str) -> String {
    format!(
        "<PublishResponse xmlns=\"{SNS_XMLNS}\">\
         <PublishResult><MessageId>{}</MessageId></PublishResult>\
         <ResponseMetadata><RequestId>{}</RequestId></ResponseMetadata>\
         </PublishResponse>",
        escape(message_id),
        new_request_id()
    )
}

/// Success envelope for `CreateTopic`.
pub fn create_topic_success(topic_arn: &str) -> String {
    format!(
        "<CreateTopicResponse xmlns=\"{SNS_XMLNS}\">\
         <CreateTopicResult><TopicArn>{}</TopicArn></CreateTopicResult>\
         <ResponseMetadata><RequestId>{}</RequestId></ResponseMetadata>\
         </CreateTopicResponse>",
        escape(topic_arn),
        new_request_id()
    )
}

/// Error envelope shared by every failure response.
pub fn error_envelope(code: &str, message: &str) -> String {
    format!(
        "<ErrorResponse xmlns=\"{SNS_XMLNS}\">\
         <Error><Type>Sender</Type><Code>{}</Code><Message>{}</Message></Error>\
         <RequestId>{}</RequestId>\
         </ErrorResponse>",
        escape(code),
        escape(message),
        new_request_id()
    )
}

fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Minimal XML text escaping for interpolated values.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publish_success_shape() {
        let envelope = publish_success("m-123");
        assert!(envelope.starts_with(&format!("<PublishResponse xmlns=\"{SNS_XMLNS}\">")));
        assert!(envelope.contains("<PublishResult><MessageId>m-123</MessageId></PublishResult>"));
        assert!(envelope.contains("<RequestId>"));
        assert!(envelope.ends_with("</PublishResponse>"));
    }

    #[test]
    fn test_create_topic_success_shape() {
        let envelope = create_topic_success("arn:aws:sns:us-east-1:000000000000:orders");
        assert!(envelope.contains(
            "<TopicArn>arn:aws:sns:us-east-1:000000000000:orders</TopicArn>"
        ));
        assert!(envelope.ends_with("</CreateTopicResponse>"));
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope = error_envelope("InvalidParameter", "Invalid parameter: TopicArn");
        assert!(envelope.contains("<Type>Sender</Type>"));
        assert!(envelope.contains("<Code>InvalidParameter</Code>"));
        assert!(envelope.contains("<Message>Invalid parameter: TopicArn</Message>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let envelope = error_envelope("InvalidAction", "<Publish&Co>");
        assert!(envelope.contains("<Message>&lt;Publish&amp;Co&gt;</Message>"));
    }

    #[test]
    fn test_request_ids_are_fresh() {
        let first = publish_success("m");
        let second = publish_success("m");
        assert_ne!(first, second);
    }
}
