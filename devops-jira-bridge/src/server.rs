//! HTTP server for Azure DevOps service hooks.

use crate::bridge::{Bridge, BridgeError, WebhookOutcome};
use axum::{
    body::Bytes,
    extract::State,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{debug, info, info_span, Instrument};

/// Path the service hook posts to.
pub const WEBHOOK_PATH: &str = "/webhook";

/// Health check path.
pub const HEALTH_PATH: &str = "/health";

/// Builds the HTTP router.
///
/// The webhook endpoint always answers `200 OK`; the body reports what
/// happened. Azure DevOps treats other statuses as delivery failures and
/// retries or alerts on them.
pub fn build_router(bridge: Arc<Bridge>) -> Router {
    Router::new()
        .route(WEBHOOK_PATH, post(webhook_handler))
        .route(HEALTH_PATH, get(health_check))
        .with_state(bridge)
}

/// Binds `address` and serves the bridge until the process exits.
///
/// # Errors
///
/// Returns [`BridgeError::Io`] if the address cannot be bound or the server
/// stops with an I/O error.
pub async fn serve(address: SocketAddr, bridge: Bridge) -> Result<(), BridgeError> {
    let listener = TcpListener::bind(address).await?;
    info!(
        address = %listener.local_addr()?,
        locale = %bridge.locale(),
        "Listening for Azure DevOps service hooks"
    );

    axum::serve(listener, build_router(Arc::new(bridge))).await?;
    Ok(())
}

/// Handles an Azure DevOps service hook delivery.
async fn webhook_handler(State(bridge): State<Arc<Bridge>>, body: Bytes) -> Json<WebhookOutcome> {
    let span = info_span!("delivery", bytes = body.len());
    let outcome = bridge.handle_payload(&body).instrument(span).await;
    debug!(failed = outcome.is_failure(), "Acknowledging delivery");
    Json(outcome)
}

/// Health check endpoint.
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}
