use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::{ChatServiceError, TranscriptionServiceError};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub message: String,
    pub r#type: String,
}

/// Errors surfaced to HTTP clients.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    UnsupportedFormat(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("{0}")]
    EngineNotReady(String),
    #[error("{0}")]
    UpstreamFailure(String),
}

impl ApiError {
    fn status_and_type(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::InvalidRequest(_) => (StatusCode::BAD_REQUEST, "invalid_request_error"),
            ApiError::UnsupportedFormat(_) => (StatusCode::BAD_REQUEST, "unsupported_format"),
            ApiError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, "payload_too_large"),
            ApiError::EngineNotReady(_) => (StatusCode::SERVICE_UNAVAILABLE, "engine_not_ready"),
            ApiError::UpstreamFailure(_) => (StatusCode::INTERNAL_SERVER_ERROR, "api_error"),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = self.status_and_type();
        (
            status,
            Json(ErrorResponse {
                error: ErrorBody {
                    message: self.to_string(),
                    r#type: error_type.to_string(),
                },
            }),
        )
            .into_response()
    }
}

impl From<TranscriptionServiceError> for ApiError {
    fn from(e: TranscriptionServiceError) -> Self {
        match e {
            TranscriptionServiceError::UnsupportedFormat { .. } => {
                ApiError::UnsupportedFormat(e.to_string())
            }
            TranscriptionServiceError::PayloadTooLarge { .. } => {
                ApiError::PayloadTooLarge(e.to_string())
            }
            TranscriptionServiceError::EngineNotReady => ApiError::EngineNotReady(e.to_string()),
            TranscriptionServiceError::Staging(_) | TranscriptionServiceError::Engine(_) => {
                ApiError::UpstreamFailure(format!("Transcription failed: {}", e))
            }
        }
    }
}

impl From<ChatServiceError> for ApiError {
    fn from(e: ChatServiceError) -> Self {
        match e {
            ChatServiceError::InvalidRequest(msg) => ApiError::InvalidRequest(msg),
        }
    }
}
