//! Handlers for the `/ocr` resource: card image uploads.

use std::time::Duration;

use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError, MultipartRejection};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pancheck_core::demo_scan::pick_demo_scan;
use pancheck_core::extraction::ExtractedPanData;
use pancheck_core::scan::scan_pan_card;

use crate::error::{AppError, AppResult};
use crate::response::SuccessResponse;
use crate::state::AppState;

/// Multipart field carrying the card image.
pub const IMAGE_FIELD: &str = "image";

pub const EXTRACTED_MESSAGE: &str = "PAN card details extracted successfully";

const NO_IMAGE_MESSAGE: &str = "No image file provided";
const INVALID_TYPE_MESSAGE: &str = "Invalid file type. Please upload an image.";
const TOO_LARGE_MESSAGE: &str = "File size too large. Please upload an image smaller than 5MB.";

/// POST /api/ocr/extract-pan
///
/// Demonstration endpoint. Validates the upload, waits to simulate
/// processing, then returns one of the canned results. The image itself is
/// never read.
pub async fn extract_pan(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<SuccessResponse<ExtractedPanData>>> {
    let image = read_image_upload(multipart, state.config.max_upload_bytes).await?;
    tracing::debug!(bytes = image.len(), "Accepted card image for demo extraction");

    tokio::time::sleep(Duration::from_millis(state.config.demo_scan_delay_ms)).await;

    let data = pick_demo_scan(&mut rand::rng()).map_err(|e| AppError::Processing(e.to_string()))?;

    Ok(Json(SuccessResponse::new(data, EXTRACTED_MESSAGE)))
}

/// POST /api/ocr/scan-pan
///
/// Runs the uploaded image through preprocessing, OCR and field extraction.
/// Fields that cannot be read come back as `NOT_FOUND`.
pub async fn scan_pan(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<SuccessResponse<ExtractedPanData>>> {
    let image = read_image_upload(multipart, state.config.max_upload_bytes).await?;

    let data = scan_pan_card(state.ocr.as_ref(), &image, state.config.ocr.contrast).await?;
    tracing::info!(
        engine = state.ocr.name(),
        complete = data.is_complete(),
        confidence = data.confidence.unwrap_or_default(),
        "Scanned PAN card"
    );

    Ok(Json(SuccessResponse::new(data, EXTRACTED_MESSAGE)))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Pull the `image` field out of a multipart upload.
///
/// Checks run in order: field present, `image/*` content type, size.
async fn read_image_upload(
    multipart: Result<Multipart, MultipartRejection>,
    max_bytes: usize,
) -> AppResult<Bytes> {
    let mut multipart = multipart.map_err(|e| AppError::BadRequest(e.body_text()))?;

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        if field.name() != Some(IMAGE_FIELD) {
            continue;
        }

        let is_image = field
            .content_type()
            .is_some_and(|ct| ct.starts_with("image/"));
        if !is_image {
            return Err(AppError::BadRequest(INVALID_TYPE_MESSAGE.into()));
        }

        let bytes = field.bytes().await.map_err(upload_error)?;
        if bytes.len() > max_bytes {
            return Err(AppError::BadRequest(TOO_LARGE_MESSAGE.into()));
        }
        return Ok(bytes);
    }

    Err(AppError::BadRequest(NO_IMAGE_MESSAGE.into()))
}

/// Map a multipart read error. Hitting the body limit is reported the same
/// way as an oversized field.
fn upload_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::BadRequest(TOO_LARGE_MESSAGE.into())
    } else {
        AppError::BadRequest(err.body_text())
    }
}
