//! Route table for the search service

use axum::{extract::State, routing::any, Json, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::error::Result;
use crate::fetcher::github::{Repository, RepositorySearch};

/// Build the search service router. Only `/data` is served.
pub fn create_router(search: Arc<RepositorySearch>) -> Router {
    Router::new()
        .route("/data", any(search_repositories))
        .layer(TraceLayer::new_for_http())
        .with_state(search)
}

async fn search_repositories(
    State(search): State<Arc<RepositorySearch>>,
) -> Result<Json<Vec<Repository>>> {
    let repositories = search.fetch_repositories().await?;
    Ok(Json(repositories))
}
