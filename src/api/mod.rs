//! API module
//!
//! HTTP API endpoints and middleware.

pub mod middleware;
pub mod routes;

use std::sync::Arc;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::WalletHandler;
use crate::store::BalanceStore;

pub use routes::{create_router, LedgerState};

/// Build the full application: health check, versioned API and middleware
pub fn build_app<S: BalanceStore + 'static>(ledger: Arc<WalletHandler<S>>) -> Router {
    // Axum layers run in reverse order of addition:
    // request id -> trace -> propagate -> context -> logging -> handler
    Router::new()
        .route("/health", get(health_check))
        .nest("/api/v1", create_router::<S>())
        .layer(axum::middleware::from_fn(middleware::logging_middleware))
        .layer(axum::middleware::from_fn(middleware::context_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(ledger)
}

/// Health check endpoint
async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
