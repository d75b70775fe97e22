//! SNS wire protocol endpoint
//!
//! This module is the protocol adapter that unmodified SDK clients talk
//! to once their endpoint is overridden. It accepts the AWS query-style
//! `POST /` request, dispatches on the action, captures publishes into
//! the store, and answers with the XML envelopes the SDK expects.
//!
//! ## Supported actions
//!
//! - `Publish` - validate, deduplicate, mint a message id, capture
//! - `CreateTopic` - validate and synthesize a stub topic ARN
//!
//! Anything else is answered with a `400 InvalidAction` envelope; a
//! request with neither an `Action` field nor an `X-Amz-Target` header is
//! `400 MissingAction`. Every request yields a response.

use crate::error::SnsLiteError;
use crate::message::CapturedMessage;
use crate::store::MessageStore;
use crate::wire::form::FormBody;
use crate::wire::xml;
use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use bytes::Bytes;
use chrono::Utc;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

/// Region baked into synthesized topic ARNs. The shape matters to SDK
/// parsers; the value does not.
const STUB_REGION: &str = "us-east-1";

/// Account id baked into synthesized topic ARNs.
const STUB_ACCOUNT: &str = "000000000000";

/// Shared state for the SNS wire endpoint
#[derive(Clone)]
pub struct SnsApiState {
    /// Capture store all publishes land in
    pub store: Arc<MessageStore>,
}

/// Create the SNS wire protocol router.
pub fn create_sns_router(state: SnsApiState) -> Router {
    Router::new().route("/", post(handle_action)).with_state(state)
}

/// Entry point for every SDK request: parse, dispatch, respond.
async fn handle_action(
    State(state): State<SnsApiState>,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let form = FormBody::parse(&body);

    let Some(action) = resolve_action(&form, &headers) else {
        warn!("Request carried no Action field and no X-Amz-Target header");
        return error_response(&SnsLiteError::MissingAction);
    };

    match action.as_str() {
        "Publish" => publish(&state, &form, body),
        "CreateTopic" => create_topic(&form),
        other => {
            warn!(action = %other, "Unsupported action");
            error_response(&SnsLiteError::InvalidAction(other.to_string()))
        }
    }
}

/// Determine the requested action: the `Action` form field, else the
/// last `.`-separated segment of the `X-Amz-Target` header.
fn resolve_action(form: &FormBody, headers: &HeaderMap) -> Option<String> {
    if let Some(action) = form.get_non_empty("Action") {
        return Some(action.to_string());
    }
    headers
        .get("x-amz-target")
        .and_then(|value| value.to_str().ok())
        .and_then(|target| target.rsplit('.').next())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}

/// `Action=Publish`: validate, apply deduplication, capture, respond.
fn publish(state: &SnsApiState, form: &FormBody, raw_payload: Bytes) -> Response {
    let Some(topic) = form.get_non_empty("TopicArn") else {
        return error_response(&SnsLiteError::InvalidParameter("TopicArn".to_string()));
    };
    let Some(body) = form.get_non_empty("Message") else {
        return error_response(&SnsLiteError::InvalidParameter("Message".to_string()));
    };

    // A colliding (topic, dedup id) replays the canonical message id and
    // performs no insert.
    let dedup_id = form.get_non_empty("MessageDeduplicationId");
    if let Some(dedup_id) = dedup_id {
        if let Some(existing) = state.store.find_by_dedup(topic, dedup_id) {
            debug!(
                topic = %topic,
                dedup_id = %dedup_id,
                message_id = %existing.id,
                "Deduplicated publish"
            );
            return xml_response(StatusCode::OK, xml::publish_success(&existing.id));
        }
    }

    let attributes = match form.message_attributes() {
        Ok(attributes) => attributes,
        Err(e) => {
            warn!(error = %e, "Rejected malformed message attributes");
            return error_response(&e);
        }
    };

    let record = CapturedMessage {
        id: Uuid::new_v4().to_string(),
        topic: topic.to_string(),
        body: body.to_string(),
        subject: form.get_non_empty("Subject").map(str::to_string),
        structure: form.get_non_empty("MessageStructure").map(str::to_string),
        dedup_id: dedup_id.map(str::to_string),
        group_id: form.get_non_empty("MessageGroupId").map(str::to_string),
        attributes,
        timestamp: Utc::now(),
        raw_payload,
    };
    let message_id = record.id.clone();
    let topic = record.topic.clone();

    if let Err(e) = state.store.add(record) {
        warn!(error = %e, "Failed to store captured message");
        return error_response(&SnsLiteError::Internal(e.to_string()));
    }

    debug!(topic = %topic, message_id = %message_id, "Captured publish");
    xml_response(StatusCode::OK, xml::publish_success(&message_id))
}

/// `Action=CreateTopic`: validate the name and synthesize a deterministic
/// stub ARN. No store state changes.
fn create_topic(form: &FormBody) -> Response {
    let Some(name) = form.get_non_empty("Name") else {
        return error_response(&SnsLiteError::InvalidParameter("Name".to_string()));
    };
    let topic_arn = format!("arn:aws:sns:{STUB_REGION}:{STUB_ACCOUNT}:{name}");
    debug!(topic_arn = %topic_arn, "Synthesized topic");
    xml_response(StatusCode::OK, xml::create_topic_success(&topic_arn))
}

fn error_response(error: &SnsLiteError) -> Response {
    xml_response(
        error.http_status(),
        xml::error_envelope(error.wire_code(), &error.to_string()),
    )
}

fn xml_response(status: StatusCode, body: String) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, xml::CONTENT_TYPE_XML)],
        body,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_resolve_action_prefers_form_field() {
        let form = FormBody::parse(b"Action=Publish");
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-amz-target",
            HeaderValue::from_static("com.example.sns.CreateTopic"),
        );
        assert_eq!(resolve_action(&form, &headers).as_deref(), Some("Publish"));
    }

    #[test]
    fn test_resolve_action_falls_back_to_target_header() {
        let form = FormBody::parse(b"Message=x");
        let mut headers = HeaderMap::new();
        headers.insert(
            "x-amz-target",
            HeaderValue::from_static("com.example.sns.Publish"),
        );
        assert_eq!(resolve_action(&form, &headers).as_deref(), Some("Publish"));
    }

    #[test]
    fn test_resolve_action_none_when_both_absent() {
        let form = FormBody::parse(b"Message=x");
        assert_eq!(resolve_action(&form, &HeaderMap::new()), None);
    }

    #[test]
    fn test_resolve_action_ignores_trailing_dot() {
        let form = FormBody::parse(b"");
        let mut headers = HeaderMap::new();
        headers.insert("x-amz-target", HeaderValue::from_static("com.example.sns."));
        assert_eq!(resolve_action(&form, &headers), None);
    }
}
