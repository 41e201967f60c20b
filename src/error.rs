//! Common error type and alias for the service.
//!
//! `AppError` implements `IntoResponse` so handlers can return
//! `AppResult<T>` directly: validation problems map to 400, everything
//! else to 500, both as a JSON `{"error": ...}` body.
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The request body is missing a field or has the wrong shape.
    #[error("{0}")]
    BadRequest(String),

    /// Transport-level failure talking to the Stability API.
    #[error(transparent)]
    HttpClient(#[from] reqwest::Error),

    /// The Stability API answered with a non-success status, or a poll
    /// sequence ran out of attempts.
    #[error("{0}")]
    Stability(String),

    /// Local filesystem failure.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Decode/encode failure in the resizer.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request failed");
        }
        let body = json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}
