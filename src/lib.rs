//! Recap - a small web service that summarizes long text with a pretrained
//! summarization model.
//!
//! A client posts raw text to `/summarize`. The service splits the text into
//! fixed-size character chunks, fans the chunks out to the model over a
//! bounded worker pool, and joins the per-chunk summaries back together in
//! the original chunk order.
//!
//! # Architecture
//!
//! The system uses:
//! - axum for the HTTP layer
//! - a background model-initialization task gated behind a lifecycle state
//!   (`/summarize` answers 503 until the pipeline is warm)
//! - reqwest for the Hugging Face inference protocol the pipeline speaks
//! - Tokio for async runtime
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use recap::api::{AppState, create_router};
//! use recap::core::config::AppConfig;
//! use recap::device::Accelerator;
//! use recap::janitor::Janitor;
//! use recap::model::ModelSlot;
//! use recap::pipeline::HfEndpointPipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Set up structured logging
//!     recap::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let accelerator = Accelerator::detect();
//!     let janitor = Janitor::new(&config.cache_dir, &config.temp_dir);
//!     let slot = Arc::new(ModelSlot::new());
//!
//!     let pipeline = HfEndpointPipeline::new(&config)?;
//!     recap::model::spawn_load(slot.clone(), janitor.clone(), pipeline);
//!
//!     let state = AppState::new(accelerator, slot, janitor);
//!     let app = create_router(state);
//!
//!     let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod chunker;
pub mod core;
pub mod device;
pub mod dispatch;
pub mod errors;
pub mod janitor;
pub mod model;
pub mod pipeline;

/// Current crate version, reported by the health endpoint.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Configure structured logging with JSON format.
///
/// This function sets up tracing-subscriber with a JSON formatter suitable
/// for log aggregation. It should be called once at process start.
///
/// # Example
///
/// ```
/// // Initialize structured logging at the start of your binary
/// recap::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::prelude::*;
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    tracing_subscriber::registry().with(fmt_layer).init();
}
