//! HTTP error types for the Omni embed demo server.
//!
//! Maps domain errors from `omni-embed-core` into the structured error
//! response every route shares: `{success:false, error:{code, message}}`.
//! No raw exception text ever reaches the client — configuration and
//! internal failures are logged server-side and replaced with generic
//! messages.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{error, warn};

use omni_embed_core::{SignerError, ValidationError};

/// Application-level error returned from HTTP handlers.
#[derive(Debug)]
pub enum ApiError {
    /// Wrong HTTP verb on the route.
    MethodNotAllowed,
    /// Client-supplied data failed shape or required-field checks.
    InvalidRequest(String),
    /// Server is missing required secret/organization configuration.
    Configuration,
    /// Catch-all for any other signer or handler failure.
    Internal,
}

/// JSON error envelope: `{success:false, error:{code, message}}`.
#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            Self::MethodNotAllowed => (
                StatusCode::METHOD_NOT_ALLOWED,
                "METHOD_NOT_ALLOWED",
                "Only POST requests are allowed".to_owned(),
            ),
            Self::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, "INVALID_REQUEST", msg),
            Self::Configuration => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "CONFIGURATION_ERROR",
                "Server configuration error. Please contact support.".to_owned(),
            ),
            Self::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An unexpected error occurred".to_owned(),
            ),
        };

        let body = ErrorBody {
            success: false,
            error: ErrorDetail { code, message },
        };

        (status, axum::Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<SignerError> for ApiError {
    fn from(err: SignerError) -> Self {
        match err {
            SignerError::Configuration { ref reason } => {
                warn!(reason = %reason, "embed signer is misconfigured");
                Self::Configuration
            }
            SignerError::Signing { ref reason } => {
                error!(reason = %reason, "embed URL signing failed");
                Self::Internal
            }
        }
    }
}
