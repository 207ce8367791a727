use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use pancheck_core::error::CoreError;
use pancheck_core::preprocess::PreprocessError;
use pancheck_core::scan::ScanError;
use pancheck_kyc::KycApiError;
use pancheck_store::StoreError;
use serde_json::{json, Value};

/// Message shown to clients for any 500.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// Message shown when an uploaded card image cannot be processed.
pub const IMAGE_PROCESSING_MESSAGE: &str = "Failed to process the image. Please try again.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `pancheck_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error from the account store.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The card image could not be run through the scan pipeline.
    #[error("Image processing failed: {0}")]
    Processing(String),

    /// A response from the KYC provider, relayed as-is.
    #[error("Upstream responded with status {status}")]
    Upstream { status: u16, body: Value },

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<KycApiError> for AppError {
    fn from(err: KycApiError) -> Self {
        match err {
            KycApiError::Rejected { status, body } => AppError::Upstream { status, body },
            other => AppError::InternalError(format!("KYC provider error: {other}")),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<ScanError> for AppError {
    fn from(err: ScanError) -> Self {
        match err {
            ScanError::Preprocess(PreprocessError::Decode(e)) => {
                tracing::debug!(error = %e, "Uploaded image could not be decoded");
                AppError::BadRequest(IMAGE_PROCESSING_MESSAGE.to_string())
            }
            other => AppError::Processing(other.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        INTERNAL_ERROR_MESSAGE.to_string(),
                    )
                }
            },

            // --- Store errors ---
            AppError::Store(StoreError::DuplicateEmail(_)) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                "User with this email already exists".to_string(),
            ),

            // --- Relayed upstream response ---
            AppError::Upstream { status, body } => {
                let status = StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY);
                return (status, axum::Json(body.clone())).into_response();
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::Processing(msg) => {
                tracing::error!(error = %msg, "Image processing error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "PROCESSING_ERROR",
                    IMAGE_PROCESSING_MESSAGE.to_string(),
                )
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        // Auth clients read `message`, OCR and verify clients read `error`.
        let body = json!({
            "error": message,
            "message": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
