//! Verification API
//!
//! Read-only JSON query surface consumed by tests and developers to
//! assert what was published. This is not part of the mocked wire
//! protocol; errors here are JSON, not XML.
//!
//! ## Endpoints (default prefix `/messages`)
//!
//! - `GET {prefix}?topic=...&since=...&until=...&contains=...` - list
//!   captured messages with optional filters
//! - `GET {prefix}/stats` - live record count and configured capacity
//! - `GET {prefix}/:id` - one captured message by id
//! - `DELETE {prefix}` - drop every captured message
//!
//! `since` and `until` accept epoch milliseconds or an RFC 3339 instant
//! and are inclusive on both bounds.

use crate::error::SnsLiteError;
use crate::store::MessageStore;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// Shared state for the verification API
#[derive(Clone)]
pub struct VerifyApiState {
    /// Capture store being queried
    pub store: Arc<MessageStore>,
}

/// Query parameters for listing captured messages
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Only messages published to this topic
    pub topic: Option<String>,
    /// Only messages captured at or after this instant
    pub since: Option<String>,
    /// Only messages captured at or before this instant
    pub until: Option<String>,
    /// Only messages whose body contains this substring
    pub contains: Option<String>,
}

/// Error body for the verification API
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Machine-readable error code
    pub error: String,
    /// Human-readable error message
    pub message: String,
}

impl ErrorResponse {
    fn from_error(error: &SnsLiteError) -> Self {
        Self {
            error: error.wire_code().to_string(),
            message: error.to_string(),
        }
    }
}

/// Store occupancy snapshot
#[derive(Debug, Serialize)]
pub struct StoreStats {
    /// Live record count
    pub count: usize,
    /// Configured capacity
    pub capacity: usize,
}

/// Create the verification API router under the given path prefix.
pub fn create_verify_router(prefix: &str, state: VerifyApiState) -> Router {
    let prefix = prefix.trim_end_matches('/');
    Router::new()
        .route(prefix, get(list_messages).delete(clear_messages))
        .route(&format!("{prefix}/stats"), get(store_stats))
        .route(&format!("{prefix}/:id"), get(get_message))
        .with_state(state)
}

/// List captured messages, applying the optional filters.
async fn list_messages(
    State(state): State<VerifyApiState>,
    Query(query): Query<ListQuery>,
) -> Response {
    let records = match query.topic.as_deref() {
        Some(topic) => match state.store.get_by_topic(topic) {
            Ok(records) => records,
            Err(e) => {
                return (StatusCode::BAD_REQUEST, Json(ErrorResponse::from_error(&e)))
                    .into_response()
            }
        },
        None => state.store.get_all(),
    };

    let since = match parse_instant(query.since.as_deref(), "since") {
        Ok(instant) => instant,
        Err(response) => return response,
    };
    let until = match parse_instant(query.until.as_deref(), "until") {
        Ok(instant) => instant,
        Err(response) => return response,
    };

    let records: Vec<_> = records
        .into_iter()
        .filter(|record| since.map_or(true, |instant| record.timestamp >= instant))
        .filter(|record| until.map_or(true, |instant| record.timestamp <= instant))
        .filter(|record| {
            query
                .contains
                .as_deref()
                .map_or(true, |needle| record.body.contains(needle))
        })
        .collect();

    (StatusCode::OK, Json(records)).into_response()
}

/// Get one captured message by id.
async fn get_message(State(state): State<VerifyApiState>, Path(id): Path<String>) -> Response {
    match state.store.get_by_id(&id) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(e @ SnsLiteError::NotFound(_)) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::from_error(&e))).into_response()
        }
        Err(e) => (StatusCode::BAD_REQUEST, Json(ErrorResponse::from_error(&e))).into_response(),
    }
}

/// Drop every captured message.
async fn clear_messages(State(state): State<VerifyApiState>) -> Response {
    let dropped = state.store.len();
    state.store.clear();
    debug!(dropped, "Cleared capture store");
    StatusCode::NO_CONTENT.into_response()
}

/// Report store occupancy.
async fn store_stats(State(state): State<VerifyApiState>) -> Json<StoreStats> {
    Json(StoreStats {
        count: state.store.len(),
        capacity: state.store.capacity(),
    })
}

/// Parse an instant given as epoch milliseconds or RFC 3339.
fn parse_instant(
    raw: Option<&str>,
    param: &str,
) -> std::result::Result<Option<DateTime<Utc>>, Response> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    if let Ok(millis) = raw.parse::<i64>() {
        if let Some(instant) = Utc.timestamp_millis_opt(millis).single() {
            return Ok(Some(instant));
        }
    }
    match DateTime::parse_from_rfc3339(raw) {
        Ok(instant) => Ok(Some(instant.with_timezone(&Utc))),
        Err(_) => {
            let error = SnsLiteError::InvalidParameter(format!("{param}: {raw}"));
            Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::from_error(&error))).into_response())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_instant_accepts_millis_and_rfc3339() {
        let from_millis = parse_instant(Some("1700000000000"), "since")
            .ok()
            .flatten()
            .expect("millis");
        let from_rfc = parse_instant(Some("2023-11-14T22:13:20Z"), "since")
            .ok()
            .flatten()
            .expect("rfc3339");
        assert_eq!(from_millis, from_rfc);
    }

    #[test]
    fn test_parse_instant_absent_is_none() {
        assert!(parse_instant(None, "since").expect("ok").is_none());
    }

    #[test]
    fn test_parse_instant_rejects_garbage() {
        assert!(parse_instant(Some("tomorrow"), "until").is_err());
    }
}
