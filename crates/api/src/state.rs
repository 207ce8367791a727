use std::sync::Arc;

use pancheck_core::ocr::OcrEngine;
use pancheck_kyc::PanVerifier;
use pancheck_store::repositories::UserRepo;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: everything is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Account store.
    pub users: Arc<dyn UserRepo>,
    /// OCR backend used by the scan endpoint.
    pub ocr: Arc<dyn OcrEngine>,
    /// KYC provider used by the verify endpoint.
    pub verifier: Arc<dyn PanVerifier>,
}
