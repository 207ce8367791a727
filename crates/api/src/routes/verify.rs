use axum::routing::post;
use axum::Router;

use crate::handlers::verify;
use crate::state::AppState;

/// `POST /verify-pan -> verify_pan`
pub fn router() -> Router<AppState> {
    Router::new().route("/verify-pan", post(verify::verify_pan))
}
