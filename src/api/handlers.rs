//! Gateway request handlers

use axum::{
    body::Body,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::Result;
use crate::AppState;

/// Body served on `/` and every path without its own route
pub const GREETING: &str = "we will fetch data from github.";

/// Static greeting. Never contacts the upstream.
pub async fn greeting() -> &'static str {
    GREETING
}

/// Relay the upstream body verbatim, whatever status the upstream answered with
pub async fn fetch_data(State(state): State<Arc<AppState>>) -> Result<Response> {
    let body = state.upstream.fetch().await?;
    let (name, value) = state.relay_header.clone();

    // `Body` carries no content-type of its own, the relay header is the only one.
    // Sniffing servers would add `text/plain; charset=utf-8` here; this one does not.
    Ok((StatusCode::OK, [(name, value)], Body::from(body)).into_response())
}
