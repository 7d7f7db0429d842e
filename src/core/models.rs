use serde::{Deserialize, Serialize};

/// Body of `POST /summarize`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeRequest {
    pub text: String,
}

/// Response of `POST /summarize`.
#[derive(Debug, Serialize, Deserialize)]
pub struct SummarizeResponse {
    /// Per-chunk summaries joined with single spaces, in chunk order.
    pub summary: String,
    /// Number of chunks dispatched to the model.
    pub chunks: usize,
    /// Chunks that failed and were dropped from the joined summary.
    pub failed_chunks: usize,
    pub processing_ms: u64,
    pub input_chars: usize,
}

/// Response of `GET /health`. Reports the raw lifecycle state unconditionally.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Lifecycle state: `uninitialized`, `initializing`, `ready`, or `failed`.
    pub status: String,
    /// Failure reason when the state is `failed`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub version: String,
    pub compute_mode: String,
}

/// Response of `GET /ready` once the model is serving.
#[derive(Debug, Serialize, Deserialize)]
pub struct ReadyResponse {
    pub ready: bool,
}
