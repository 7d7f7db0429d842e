//! Bounded fan-out of chunks to the summarization pipeline.
//!
//! Chunks are processed concurrently by a small fixed-width pool and the
//! results are collected in original chunk order, not completion order. A
//! failing chunk is logged and contributes nothing to the joined summary;
//! it never aborts the request.

use std::sync::Arc;

use futures::StreamExt;
use futures::stream;
use tracing::warn;

use crate::chunker::Chunk;
use crate::pipeline::SummaryPipeline;

/// Result of one fan-out pass over a chunk list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchOutcome {
    /// Non-empty chunk summaries joined with single spaces, in chunk order.
    pub summary: String,
    /// Number of chunks sent to the pipeline.
    pub dispatched: usize,
    /// Chunks whose summarization failed and was dropped.
    pub failed: usize,
}

/// Summarize every chunk with at most `concurrency` calls in flight.
pub async fn summarize_chunks(
    pipeline: Arc<dyn SummaryPipeline>,
    chunks: Vec<Chunk>,
    concurrency: usize,
) -> DispatchOutcome {
    let dispatched = chunks.len();

    // `buffered` bounds the in-flight calls and yields results in input
    // order regardless of which call finishes first.
    let results: Vec<Result<String, ()>> = stream::iter(chunks)
        .map(|chunk| {
            let pipeline = pipeline.clone();
            async move {
                match pipeline.summarize(&chunk.text, chunk.params).await {
                    Ok(summary) => Ok(summary),
                    Err(e) => {
                        warn!(
                            chunk_index = chunk.index,
                            error = %e,
                            "Chunk summarization failed; dropping it from the summary"
                        );
                        Err(())
                    }
                }
            }
        })
        .buffered(concurrency.max(1))
        .collect()
        .await;

    let failed = results.iter().filter(|r| r.is_err()).count();
    let summary = results
        .into_iter()
        .filter_map(Result::ok)
        .filter(|s| !s.trim().is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    DispatchOutcome {
        summary,
        dispatched,
        failed,
    }
}
