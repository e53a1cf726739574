//! HTTP error mapping for the sign/verify surface

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use macseal_canonical::CanonicalError;
use macseal_kms::BackendError;
use serde::Serialize;
use thiserror::Error;

/// Request-scoped failures of the sign and verify operations
///
/// Backend variants mean the collaborator call itself failed; a MAC mismatch
/// is not an error and never reaches this type.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),

    #[error("payload must be a JSON object")]
    PayloadNotObject,

    #[error("invalid base64 signature: {0}")]
    InvalidSignatureEncoding(String),

    #[error("method not allowed")]
    MethodNotAllowed,

    #[error("signing failed: {0}")]
    SigningBackend(#[source] BackendError),

    #[error("verification failed: {0}")]
    VerificationBackend(#[source] BackendError),

    #[error("failed to serialize payload: {0}")]
    Canonical(#[from] CanonicalError),
}

/// Error response body: `{"error": <message>}`
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidJson(_)
            | ApiError::PayloadNotObject
            | ApiError::InvalidSignatureEncoding(_) => StatusCode::BAD_REQUEST,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::SigningBackend(_)
            | ApiError::VerificationBackend(_)
            | ApiError::Canonical(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }

        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}
