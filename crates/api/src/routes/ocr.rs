//! Route definitions for the `/ocr` resource.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::ocr;
use crate::state::AppState;

/// Room for multipart boundaries and part headers on top of the image.
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Routes mounted at `/ocr`.
///
/// ```text
/// POST /extract-pan  -> extract_pan
/// POST /scan-pan     -> scan_pan
/// ```
///
/// The body limit lets an image slightly over `max_upload_bytes` through so
/// the handler can answer with its own size message.
pub fn router(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/extract-pan", post(ocr::extract_pan))
        .route("/scan-pan", post(ocr::scan_pan))
        .layer(DefaultBodyLimit::max(
            max_upload_bytes.saturating_add(MULTIPART_OVERHEAD_BYTES),
        ))
}
