use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecapError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Summarization model is not ready: {0}")]
    NotReady(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to access inference endpoint: {0}")]
    UpstreamError(String),
}

impl From<reqwest::Error> for RecapError {
    fn from(error: reqwest::Error) -> Self {
        RecapError::HttpError(error.to_string())
    }
}

impl From<url::ParseError> for RecapError {
    fn from(error: url::ParseError) -> Self {
        RecapError::ConfigError(error.to_string())
    }
}

impl From<anyhow::Error> for RecapError {
    fn from(error: anyhow::Error) -> Self {
        RecapError::UpstreamError(error.to_string())
    }
}

impl RecapError {
    /// HTTP status the error maps to when it escapes a handler.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            RecapError::NotReady(_) => StatusCode::SERVICE_UNAVAILABLE,
            RecapError::HttpError(_) | RecapError::UpstreamError(_) => StatusCode::BAD_GATEWAY,
            RecapError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RecapError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
