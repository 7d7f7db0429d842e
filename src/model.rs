//! Model lifecycle: background initialization with health-check gating.
//!
//! The pipeline loads once, on a background task spawned at process start.
//! Inference endpoints serve traffic only in the `Ready` state; a failed
//! load stays failed until an operator restarts the process.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use crate::errors::RecapError;
use crate::janitor::Janitor;
use crate::pipeline::{HfEndpointPipeline, SummaryPipeline};

/// Lifecycle state of the summarization pipeline.
#[derive(Clone)]
pub enum ModelState {
    Uninitialized,
    Initializing,
    Ready(Arc<dyn SummaryPipeline>),
    Failed(String),
}

impl ModelState {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            ModelState::Uninitialized => "uninitialized",
            ModelState::Initializing => "initializing",
            ModelState::Ready(_) => "ready",
            ModelState::Failed(_) => "failed",
        }
    }
}

impl std::fmt::Debug for ModelState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelState::Failed(reason) => f.debug_tuple("Failed").field(reason).finish(),
            other => f.write_str(other.label()),
        }
    }
}

/// Shared slot holding the lifecycle state.
///
/// Writers hold the lock only to swap the state; the slow warmup happens
/// outside the lock so `/health` reads never block on initialization.
pub struct ModelSlot {
    state: RwLock<ModelState>,
}

impl ModelSlot {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: RwLock::new(ModelState::Uninitialized),
        }
    }

    /// Current state label plus the failure reason, if any.
    pub async fn snapshot(&self) -> (&'static str, Option<String>) {
        let state = self.state.read().await;
        let detail = match &*state {
            ModelState::Failed(reason) => Some(reason.clone()),
            _ => None,
        };
        (state.label(), detail)
    }

    /// The pipeline, if the model has reached `Ready`.
    pub async fn pipeline(&self) -> Option<Arc<dyn SummaryPipeline>> {
        match &*self.state.read().await {
            ModelState::Ready(pipeline) => Some(pipeline.clone()),
            _ => None,
        }
    }

    pub async fn set(&self, next: ModelState) {
        let mut state = self.state.write().await;
        info!(from = state.label(), to = next.label(), "Model state transition");
        *state = next;
    }
}

impl Default for ModelSlot {
    fn default() -> Self {
        Self::new()
    }
}

/// Begin loading the pipeline on a background task.
///
/// Transitions the slot to `Initializing` immediately, sweeps the workspace,
/// warms the pipeline, and flips to `Ready` or `Failed`. There is no retry
/// after `Failed`; the process must be restarted.
pub fn spawn_load(slot: Arc<ModelSlot>, janitor: Janitor, pipeline: HfEndpointPipeline) {
    tokio::spawn(async move {
        slot.set(ModelState::Initializing).await;
        janitor.sweep();

        let result = pipeline.warmup().await;
        janitor.sweep();

        match result {
            Ok(()) => {
                info!("Summarization pipeline is ready");
                slot.set(ModelState::Ready(Arc::new(pipeline))).await;
            }
            Err(e) => {
                error!(error = %e, "Failed to load summarization pipeline");
                slot.set(ModelState::Failed(e.to_string())).await;
            }
        }
    });
}

/// Error used by handlers when the model is not serving yet.
#[must_use]
pub fn not_ready(label: &str, detail: Option<&str>) -> RecapError {
    let message = match detail {
        Some(reason) => format!(
            "model state is '{label}' ({reason}); restart the service to retry the load"
        ),
        None => format!("model state is '{label}'; try again once loading completes"),
    };
    RecapError::NotReady(message)
}
