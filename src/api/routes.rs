//! Route table for the gateway

use axum::{routing::any, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::AppState;

/// Build the gateway router.
///
/// `/data` forwards to the upstream for any method; `/` and every other path
/// fall through to the greeting.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", any(handlers::greeting))
        .route("/data", any(handlers::fetch_data))
        .fallback(handlers::greeting)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
