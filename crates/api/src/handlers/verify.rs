//! Handler for `POST /verify-pan`.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use pancheck_core::accounts::required;
use pancheck_kyc::PanVerificationRequest;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Request body for `POST /verify-pan`. `dob` is `YYYY-MM-DD`.
#[derive(Debug, Deserialize)]
pub struct VerifyPanRequest {
    pub pan: Option<String>,
    pub dob: Option<String>,
    pub name_as_per_pan: Option<String>,
    pub reason: Option<String>,
}

/// POST /api/verify-pan
///
/// Authenticates with the KYC provider and submits the PAN. The provider's
/// status and body are relayed unchanged, including failures.
pub async fn verify_pan(
    State(state): State<AppState>,
    payload: Result<Json<VerifyPanRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Value>)> {
    let Json(input) = payload?;

    let (Some(pan), Some(dob), Some(name), Some(reason)) = (
        required(input.pan.as_deref()),
        required(input.dob.as_deref()),
        required(input.name_as_per_pan.as_deref()),
        required(input.reason.as_deref()),
    ) else {
        return Err(AppError::BadRequest(
            "PAN, DOB, Name and Reason are required".into(),
        ));
    };

    let request = PanVerificationRequest::from_form(pan, dob, name, reason)?;

    let response = state.verifier.verify(&request).await?;
    tracing::info!(status = response.status, "Relaying PAN verification result");

    let status = StatusCode::from_u16(response.status).unwrap_or(StatusCode::BAD_GATEWAY);
    Ok((status, Json(response.body)))
}
