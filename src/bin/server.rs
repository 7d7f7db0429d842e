use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use recap::api::{AppState, create_router};
use recap::core::config::AppConfig;
use recap::device::Accelerator;
use recap::janitor::Janitor;
use recap::model::{ModelSlot, spawn_load};
use recap::pipeline::HfEndpointPipeline;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    recap::setup_logging();

    let config = AppConfig::from_env().map_err(|e| anyhow::anyhow!("Config error: {e}"))?;
    let accelerator = Accelerator::detect();
    info!(
        compute_mode = accelerator.label(),
        chunk_size = accelerator.chunk_size(),
        workers = accelerator.worker_count(),
        model = %config.model_id,
        "Starting recap server"
    );

    let janitor = Janitor::new(&config.cache_dir, &config.temp_dir);
    let slot = Arc::new(ModelSlot::new());

    let pipeline = HfEndpointPipeline::new(&config)
        .map_err(|e| anyhow::anyhow!("Failed to build pipeline client: {e}"))?;
    spawn_load(slot.clone(), janitor.clone(), pipeline);

    let state = AppState::new(accelerator, slot, janitor);
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!(addr = %config.bind_addr, "Listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install shutdown handler");
    }
}
