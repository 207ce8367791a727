pub mod auth;
pub mod health;
pub mod ocr;
pub mod verify;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /auth/login                 login (public)
/// /auth/register              register (public)
/// /auth/me                    current user (requires auth)
///
/// /ocr/extract-pan            demo extraction (multipart `image`)
/// /ocr/scan-pan               real scan pipeline (multipart `image`)
///
/// /verify-pan                 relay to the KYC provider
/// ```
pub fn api_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/ocr", ocr::router(max_upload_bytes))
        .merge(verify::router())
}
