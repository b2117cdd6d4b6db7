use orion_backend::config::BackendConfig;
use orion_backend::http::{create_router, AppState};
use orion_backend::model::nasa::NasaClient;
use orion_backend::module::neo::SystemClock;

use anyhow::{Context, Result};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = BackendConfig::load()?;

    // Initialize logging
    let _logging_guard = orion_backend::logging::init_logging(
        &config.log_dir,
        "orion-backend",
        &config.log_level,
    )?;

    tracing::info!("Orion backend starting...");
    tracing::info!(
        "NASA endpoints: apod={} neo={}",
        config.nasa.apod_base_url,
        config.nasa.neo_base_url
    );
    if config.nasa.api_key == "DEMO_KEY" {
        tracing::warn!("Using NASA DEMO_KEY, requests are heavily rate limited");
    }
    tracing::info!(
        "Risk policy: high above {}% hazardous",
        config.risk.high_above_percent
    );

    let client = Arc::new(NasaClient::new(&config.nasa)?);
    let state = AppState::new(client.clone(), client, Arc::new(SystemClock), &config);
    let app = create_router(state, config.enable_cors);

    let address = config.server_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    tracing::info!("HTTP server listening on http://{}", address);

    axum::serve(listener, app).await?;

    Ok(())
}
