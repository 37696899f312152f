//! Unified API error handling
//!
//! Every endpoint error renders as `{ "error": <message>, "kind", "request_id" }`.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::service::report::ReportError;

/// Standard error response format
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// User-facing message
    pub error: String,
    /// Error type/code
    pub kind: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Bad request / validation error (400)
    #[error("{0}")]
    BadRequest(String),

    /// Request body over the configured limit (413)
    #[error("{0}")]
    PayloadTooLarge(String),

    /// Server misconfiguration (500)
    #[error("{0}")]
    Configuration(String),

    /// Report generation failed (500)
    #[error("{0}")]
    Generation(String),

    /// Request abandoned before completion (503)
    #[error("{0}")]
    Unavailable(String),
}

impl ApiError {
    fn kind(&self) -> &'static str {
        match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::PayloadTooLarge(_) => "payload_too_large",
            ApiError::Configuration(_) => "configuration_error",
            ApiError::Generation(_) => "generation_error",
            ApiError::Unavailable(_) => "unavailable",
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Configuration(_) | ApiError::Generation(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let request_id = Uuid::new_v4().to_string();

        tracing::error!(
            error_type = self.kind(),
            status = status.as_u16(),
            request_id = %request_id,
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: self.to_string(),
            kind: self.kind().to_string(),
            request_id,
        })
    }
}

impl From<ReportError> for ApiError {
    fn from(err: ReportError) -> Self {
        match err {
            ReportError::MissingFields(ref fields) => {
                tracing::debug!(missing = ?fields, "Report request rejected");
                ApiError::BadRequest(err.to_string())
            }
            ReportError::MissingCredential => ApiError::Configuration(err.to_string()),
            ReportError::EmptyResponse | ReportError::GenerationFailed(_) => {
                ApiError::Generation(err.to_string())
            }
            ReportError::Cancelled => ApiError::Unavailable(err.to_string()),
        }
    }
}
