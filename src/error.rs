use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use tracing::warn;

/// Errors surfaced to HTTP callers. All of them answer 500 with
/// `{"error": message}` so existing dashboard clients keep working.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        warn!("Rejecting request: {}", message);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": message })),
        )
            .into_response()
    }
}

/// Failures talking to the GRID match-data API. Never reach the client:
/// the draft handler falls back to simulation mode instead.
#[derive(Error, Debug)]
pub enum GridError {
    #[error("GRID request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("GRID returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("GRID GraphQL error: {0}")]
    GraphQl(String),

    #[error("Series {0} not found or has no draft data")]
    NotFound(String),

    #[error("Unexpected GRID payload: {0}")]
    Decode(String),
}

impl GridError {
    /// Whether a retry has a chance of succeeding.
    pub fn is_transient(&self) -> bool {
        match self {
            GridError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            GridError::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
