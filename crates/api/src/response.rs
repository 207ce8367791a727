//! Shared response envelope types for API handlers.

use serde::Serialize;

/// `{ "success": true, "data": T, "message": ".." }` envelope used by the
/// OCR endpoints.
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    pub message: &'static str,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T, message: &'static str) -> Self {
        Self {
            success: true,
            data,
            message,
        }
    }
}
