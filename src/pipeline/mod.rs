//! Summarization pipeline seam.
//!
//! The model itself is externally supplied; everything behind
//! [`SummaryPipeline`] is delegated. The service only decides what text to
//! send and what generation bounds to request.

mod hf;

pub use hf::HfEndpointPipeline;

use async_trait::async_trait;

use crate::errors::RecapError;

const MAX_LENGTH_FLOOR: usize = 30;
const MAX_LENGTH_CEIL: usize = 130;
const MIN_LENGTH_FLOOR: usize = 10;
const MIN_LENGTH_CEIL: usize = 30;

/// Output-length bounds for one summarization call.
///
/// Derived from chunk length so that a short chunk never requests an output
/// longer than it can justify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub max_length: usize,
    pub min_length: usize,
}

impl GenerationParams {
    /// Derive bounds from a chunk's character count:
    /// `max_length = clamp(len/3, 30, 130)`, `min_length = clamp(len/4, 10, 30)`.
    #[must_use]
    pub fn for_chunk_len(chunk_len: usize) -> Self {
        Self {
            max_length: (chunk_len / 3).clamp(MAX_LENGTH_FLOOR, MAX_LENGTH_CEIL),
            min_length: (chunk_len / 4).clamp(MIN_LENGTH_FLOOR, MIN_LENGTH_CEIL),
        }
    }
}

/// A pretrained summarization model interface: text in, summary out.
#[async_trait]
pub trait SummaryPipeline: Send + Sync {
    /// Summarize one chunk of text.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying model call fails; the dispatcher
    /// maps per-chunk failures to empty output rather than aborting.
    async fn summarize(&self, text: &str, params: GenerationParams) -> Result<String, RecapError>;
}
