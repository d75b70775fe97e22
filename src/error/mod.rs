//! Error types for snslite
//!
//! One closed error enum covers the whole crate: store contract errors,
//! wire-protocol validation failures, and configuration problems. Errors are
//! values returned from fallible operations; the protocol adapter maps them
//! onto HTTP statuses and SNS error codes, and the store never logs or
//! panics on its own.

use axum::http::StatusCode;
use thiserror::Error;

/// Result type alias for snslite operations
pub type Result<T> = std::result::Result<T, SnsLiteError>;

/// Main error type for snslite
#[derive(Error, Debug)]
pub enum SnsLiteError {
    /// A record handed to the store was missing its id or topic.
    #[error("message must carry a non-empty id and topic")]
    NullMessage,

    /// Query-by-topic was called with an empty topic.
    #[error("topic must not be empty")]
    NullTopic,

    /// Query-by-id was called with an empty id.
    #[error("message id must not be empty")]
    NullMessageId,

    /// Query-by-id found no live record.
    #[error("no message found with id: {0}")]
    NotFound(String),

    /// Neither an `Action` field nor an `X-Amz-Target` header was present.
    #[error("Could not find operation to perform.")]
    MissingAction,

    /// The requested action is not one the mock reproduces.
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// A required field of a supported action was missing or malformed.
    /// Carries the offending field name.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SnsLiteError {
    /// SNS error `Code` emitted in the XML error envelope.
    pub fn wire_code(&self) -> &'static str {
        match self {
            SnsLiteError::MissingAction => "MissingAction",
            SnsLiteError::InvalidAction(_) => "InvalidAction",
            SnsLiteError::InvalidParameter(_) => "InvalidParameter",
            SnsLiteError::NotFound(_) => "NotFound",
            _ => "InternalError",
        }
    }

    /// HTTP status the protocol adapter answers with.
    pub fn http_status(&self) -> StatusCode {
        match self {
            SnsLiteError::MissingAction
            | SnsLiteError::InvalidAction(_)
            | SnsLiteError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
            SnsLiteError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_codes() {
        assert_eq!(SnsLiteError::MissingAction.wire_code(), "MissingAction");
        assert_eq!(
            SnsLiteError::InvalidAction("ListTopics".into()).wire_code(),
            "InvalidAction"
        );
        assert_eq!(
            SnsLiteError::InvalidParameter("TopicArn".into()).wire_code(),
            "InvalidParameter"
        );
        assert_eq!(
            SnsLiteError::Internal("boom".into()).wire_code(),
            "InternalError"
        );
    }

    #[test]
    fn test_http_statuses() {
        assert_eq!(
            SnsLiteError::MissingAction.http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SnsLiteError::InvalidParameter("Message".into()).http_status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            SnsLiteError::NotFound("m-1".into()).http_status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            SnsLiteError::Internal("boom".into()).http_status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_message_names_offending_field() {
        let err = SnsLiteError::InvalidParameter("TopicArn".into());
        assert!(err.to_string().contains("TopicArn"));
    }
}
