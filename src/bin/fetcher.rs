//! Repository search service the gateway relays from

use data_gateway::{
    config::Settings,
    fetcher::{routes::create_router, RepositorySearch},
    lifecycle::shutdown_signal,
    telemetry,
};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init(&settings.logging);
    settings.fetcher.validate()?;

    info!(
        search_url = %settings.fetcher.search_url,
        pages = settings.fetcher.pages,
        "Starting repository search service"
    );

    let search = Arc::new(RepositorySearch::new(&settings.fetcher)?);
    let app = create_router(search);

    let addr = settings.fetcher.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await.map_err(|e| {
        error!(address = %addr, error = %e, "Failed to bind listener");
        e
    })?;

    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}
