//! Hugging Face inference endpoint client.
//!
//! Speaks the hosted-inference protocol for summarization pipelines:
//! `POST {base}/models/{model}` with the chunk text and generation
//! parameters, answered by `[{"summary_text": "..."}]`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{AUTHORIZATION, HeaderMap};
use serde::Deserialize;
use serde_json::json;
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::info;
use url::Url;

use super::{GenerationParams, SummaryPipeline};
use crate::core::config::AppConfig;
use crate::errors::RecapError;

/// Decoding settings are fixed; only the length bounds vary per chunk.
const NUM_BEAMS: usize = 4;

const WARMUP_TEXT: &str =
    "The quick brown fox jumps over the lazy dog while the dog keeps sleeping in the sun.";
const WARMUP_RETRY_BASE_MS: u64 = 500;
const WARMUP_RETRY_ATTEMPTS: usize = 4;

#[derive(Debug, Deserialize)]
struct SummaryOutput {
    summary_text: String,
}

/// Summarization pipeline backed by a Hugging Face inference endpoint.
pub struct HfEndpointPipeline {
    client: Client,
    model_url: Url,
    model_id: String,
}

impl HfEndpointPipeline {
    /// Build a pipeline client from the application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, RecapError> {
        Self::from_parts(
            &config.endpoint_url,
            config.api_token.as_deref(),
            &config.model_id,
            config.request_timeout,
        )
    }

    /// # Errors
    ///
    /// Returns an error if the endpoint URL is invalid or the HTTP client
    /// cannot be constructed.
    pub fn from_parts(
        endpoint_url: &str,
        api_token: Option<&str>,
        model_id: &str,
        timeout: Duration,
    ) -> Result<Self, RecapError> {
        let mut headers = HeaderMap::new();
        if let Some(token) = api_token {
            let auth_value = format!("Bearer {token}")
                .parse()
                .map_err(|e| RecapError::ConfigError(format!("Invalid API token: {e}")))?;
            headers.insert(AUTHORIZATION, auth_value);
        }

        let client = Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| {
                RecapError::HttpError(format!("Failed to build inference HTTP client: {e}"))
            })?;

        // Url::join drops the last path segment of a slash-less base.
        let base = if endpoint_url.ends_with('/') {
            endpoint_url.to_string()
        } else {
            format!("{endpoint_url}/")
        };
        let model_url = Url::parse(&base)?.join(&format!("models/{model_id}"))?;

        Ok(Self {
            client,
            model_url,
            model_id: model_id.to_string(),
        })
    }

    /// One small summarization call that forces the endpoint to load model
    /// weights. Transient upstream errors are retried with exponential
    /// backoff before the load is declared failed.
    ///
    /// # Errors
    ///
    /// Returns the last upstream error once the retry budget is exhausted.
    pub async fn warmup(&self) -> Result<(), RecapError> {
        let strategy = ExponentialBackoff::from_millis(WARMUP_RETRY_BASE_MS)
            .map(jitter)
            .take(WARMUP_RETRY_ATTEMPTS);

        info!(model = %self.model_id, "Warming up summarization pipeline");

        let params = GenerationParams::for_chunk_len(WARMUP_TEXT.chars().count());
        Retry::spawn(strategy, || self.summarize(WARMUP_TEXT, params))
            .await
            .map(|_| ())
    }
}

#[async_trait]
impl SummaryPipeline for HfEndpointPipeline {
    async fn summarize(&self, text: &str, params: GenerationParams) -> Result<String, RecapError> {
        #[cfg(feature = "debug-logs")]
        info!("Summarizing chunk:\n{text}");

        #[cfg(not(feature = "debug-logs"))]
        info!(chars = text.chars().count(), "Summarizing chunk");

        let request_body = json!({
            "inputs": text,
            "parameters": {
                "max_length": params.max_length,
                "min_length": params.min_length,
                "do_sample": false,
                "num_beams": NUM_BEAMS,
            },
            "options": {
                "wait_for_model": true,
                "use_cache": true,
            },
        });

        let response = self
            .client
            .post(self.model_url.clone())
            .json(&request_body)
            .send()
            .await
            .map_err(|e| RecapError::HttpError(format!("Inference request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_else(|e| {
                format!("Failed to read error response body (status {status}): {e}")
            });
            return Err(RecapError::UpstreamError(format!(
                "Inference endpoint error (status {status}): {error_text}"
            )));
        }

        let outputs: Vec<SummaryOutput> = response.json().await.map_err(|e| {
            RecapError::UpstreamError(format!("Failed to parse inference response: {e}"))
        })?;

        outputs
            .into_iter()
            .next()
            .map(|o| o.summary_text)
            .ok_or_else(|| RecapError::UpstreamError("No summary in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pipeline_for(server: &MockServer) -> HfEndpointPipeline {
        HfEndpointPipeline::from_parts(
            &server.uri(),
            Some("test-token"),
            "facebook/bart-large-cnn",
            Duration::from_secs(5),
        )
        .expect("pipeline should build")
    }

    #[tokio::test]
    async fn summarize_parses_summary_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/facebook/bart-large-cnn"))
            .and(body_partial_json(serde_json::json!({
                "parameters": { "max_length": 100, "min_length": 30, "do_sample": false }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{ "summary_text": "short version" }])),
            )
            .mount(&server)
            .await;

        let pipeline = pipeline_for(&server);
        let summary = pipeline
            .summarize(&"a".repeat(300), GenerationParams::for_chunk_len(300))
            .await
            .expect("summarize should succeed");

        assert_eq!(summary, "short version");
    }

    #[tokio::test]
    async fn summarize_surfaces_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("model exploded"))
            .mount(&server)
            .await;

        let pipeline = pipeline_for(&server);
        let err = pipeline
            .summarize("some text", GenerationParams::for_chunk_len(9))
            .await
            .expect_err("error status should fail");

        assert!(err.to_string().contains("status 500"));
        assert!(err.to_string().contains("model exploded"));
    }

    #[tokio::test]
    async fn summarize_rejects_empty_output_array() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let pipeline = pipeline_for(&server);
        let err = pipeline
            .summarize("some text", GenerationParams::for_chunk_len(9))
            .await
            .expect_err("empty output should fail");

        assert!(err.to_string().contains("No summary in response"));
    }

    #[tokio::test]
    async fn warmup_retries_transient_errors() {
        let server = MockServer::start().await;

        // First attempt: the endpoint is still loading weights.
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(serde_json::json!({ "error": "Model is currently loading" })),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{ "summary_text": "warm" }])),
            )
            .mount(&server)
            .await;

        let pipeline = pipeline_for(&server);
        pipeline.warmup().await.expect("warmup should retry to success");
    }

    #[test]
    fn from_parts_rejects_invalid_endpoint() {
        let result = HfEndpointPipeline::from_parts(
            "not a url",
            None,
            "facebook/bart-large-cnn",
            Duration::from_secs(5),
        );
        assert!(result.is_err());
    }
}
