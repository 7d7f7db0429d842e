//! HTTP API for the summarization service.
//!
//! ## Endpoints
//!
//! - `GET /health` - raw lifecycle state; always 200, never blocks on load
//! - `GET /ready` - 200 once the model serves traffic, 503 otherwise
//! - `POST /summarize` - chunk, fan out, and join; 503 until the model is
//!   ready

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;
use uuid::Uuid;

use crate::core::models::{HealthResponse, ReadyResponse, SummarizeRequest, SummarizeResponse};
use crate::device::Accelerator;
use crate::dispatch;
use crate::errors::RecapError;
use crate::janitor::Janitor;
use crate::model::{ModelSlot, not_ready};
use crate::{VERSION, chunker};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    accelerator: Accelerator,
    slot: Arc<ModelSlot>,
    janitor: Janitor,
}

impl AppState {
    #[must_use]
    pub fn new(accelerator: Accelerator, slot: Arc<ModelSlot>, janitor: Janitor) -> Self {
        Self {
            accelerator,
            slot,
            janitor,
        }
    }
}

/// Create the API router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route("/summarize", post(summarize_handler))
        .with_state(state)
}

/// Health check handler. Reports the raw lifecycle state unconditionally.
async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, detail) = state.slot.snapshot().await;

    Json(HealthResponse {
        status: status.to_string(),
        detail,
        version: VERSION.to_string(),
        compute_mode: state.accelerator.label().to_string(),
    })
}

/// Readiness gate: 200 once the model serves traffic.
async fn ready_handler(State(state): State<AppState>) -> Result<Json<ReadyResponse>, RecapError> {
    if state.slot.pipeline().await.is_some() {
        return Ok(Json(ReadyResponse { ready: true }));
    }

    let (label, detail) = state.slot.snapshot().await;
    Err(not_ready(label, detail.as_deref()))
}

/// Synchronous summarize endpoint: blocks until every chunk is processed.
#[tracing::instrument(level = "info", skip_all)]
async fn summarize_handler(
    State(state): State<AppState>,
    Json(request): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>, RecapError> {
    let Some(pipeline) = state.slot.pipeline().await else {
        let (label, detail) = state.slot.snapshot().await;
        return Err(not_ready(label, detail.as_deref()));
    };

    let request_id = Uuid::new_v4();
    let start = Instant::now();
    let input_chars = request.text.chars().count();

    // Bound scratch use around the inference pass; sweeps run off the
    // request path and are safe concurrently.
    let janitor = state.janitor.clone();
    tokio::task::spawn_blocking(move || janitor.sweep());

    let chunks = chunker::chunk_text(&request.text, state.accelerator.chunk_size());
    info!(
        request_id = %request_id,
        input_chars,
        chunks = chunks.len(),
        workers = state.accelerator.worker_count(),
        "Dispatching summarize request"
    );

    let outcome =
        dispatch::summarize_chunks(pipeline, chunks, state.accelerator.worker_count()).await;

    let processing_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
    info!(
        request_id = %request_id,
        chunks = outcome.dispatched,
        failed_chunks = outcome.failed,
        processing_ms,
        "Summarize request finished"
    );

    let janitor = state.janitor.clone();
    tokio::task::spawn_blocking(move || janitor.sweep());

    Ok(Json(SummarizeResponse {
        summary: outcome.summary,
        chunks: outcome.dispatched,
        failed_chunks: outcome.failed,
        processing_ms,
        input_chars,
    }))
}
