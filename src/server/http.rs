//! HTTP server wiring
//!
//! Builds the combined router (SNS wire endpoint, verification API,
//! health probe) and serves it on the configured listener.

use crate::config::ServerConfig;
use crate::error::{Result, SnsLiteError};
use crate::server::sns_api::{create_sns_router, SnsApiState};
use crate::server::verify_api::{create_verify_router, VerifyApiState};
use crate::store::MessageStore;
use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::info;

/// Build the full application router over a shared store.
pub fn build_router(config: &ServerConfig, store: Arc<MessageStore>) -> Router {
    Router::new()
        .merge(create_sns_router(SnsApiState {
            store: store.clone(),
        }))
        .merge(create_verify_router(
            &config.verification_prefix,
            VerifyApiState { store },
        ))
        .route("/health", get(health))
}

/// Liveness probe.
async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// Bind the listener and serve until the process exits.
pub async fn start_http_server(config: ServerConfig, store: Arc<MessageStore>) -> Result<()> {
    let addr = config.listen_addr;
    let app = build_router(&config, store);

    info!(
        addr = %addr,
        verification_prefix = %config.verification_prefix,
        "Starting snslite HTTP server (SNS wire endpoint, verification API)"
    );

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::AddrInUse {
            SnsLiteError::Config(format!(
                "Listen address {addr} is already in use. \
                 Fix: pass --listen-addr with a free port, \
                 or stop the existing process."
            ))
        } else {
            SnsLiteError::Io(e)
        }
    })?;
    axum::serve(listener, app).await?;

    Ok(())
}
