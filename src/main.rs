//! Main entry point for the data gateway

use data_gateway::{api, config::Settings, lifecycle::shutdown_signal, telemetry, AppState};
use std::sync::Arc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    telemetry::init(&settings.logging);
    settings.validate()?;

    info!("Starting data gateway");
    info!(upstream = %settings.upstream.url, "Relaying /data");

    let state = Arc::new(AppState::from_settings(&settings)?);
    let app = api::routes::create_router(state);

    let addr = settings.server.bind_address();
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
