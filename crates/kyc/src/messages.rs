//! Request and response shapes for the sandbox KYC API.

use pancheck_core::error::CoreError;
use pancheck_core::pan::iso_to_provider_date;
use serde::Serialize;
use serde_json::Value;

/// `@entity` tag the verify endpoint expects.
pub const PAN_VERIFICATION_ENTITY: &str = "in.co.sandbox.kyc.pan_verification.request";

/// The holder's consent flag. Submitting the form implies consent.
pub const CONSENT_GIVEN: &str = "Y";

/// A PAN verification request, ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PanVerificationRequest {
    pub pan: String,
    pub name_as_per_pan: String,
    /// `DD/MM/YYYY`.
    pub date_of_birth: String,
    pub reason: String,
}

impl PanVerificationRequest {
    /// Build a request from form values, converting the ISO `YYYY-MM-DD`
    /// birth date to the provider's `DD/MM/YYYY`.
    pub fn from_form(pan: &str, dob_iso: &str, name_as_per_pan: &str, reason: &str) -> Result<Self, CoreError> {
        Ok(Self {
            pan: pan.trim().to_string(),
            name_as_per_pan: name_as_per_pan.trim().to_string(),
            date_of_birth: iso_to_provider_date(dob_iso)?,
            reason: reason.trim().to_string(),
        })
    }
}

/// Wire body for `POST /kyc/pan/verify`.
#[derive(Debug, Serialize)]
pub(crate) struct VerifyPayload<'a> {
    #[serde(rename = "@entity")]
    entity: &'static str,
    pan: &'a str,
    name_as_per_pan: &'a str,
    date_of_birth: &'a str,
    consent: &'static str,
    reason: &'a str,
}

impl<'a> From<&'a PanVerificationRequest> for VerifyPayload<'a> {
    fn from(request: &'a PanVerificationRequest) -> Self {
        Self {
            entity: PAN_VERIFICATION_ENTITY,
            pan: &request.pan,
            name_as_per_pan: &request.name_as_per_pan,
            date_of_birth: &request.date_of_birth,
            consent: CONSENT_GIVEN,
            reason: &request.reason,
        }
    }
}

/// An upstream response relayed as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Value,
}

/// Pull the access token out of an authenticate response.
///
/// Accepts both `{"access_token": ..}` and `{"data": {"access_token": ..}}`.
pub fn extract_access_token(body: &Value) -> Option<String> {
    body.get("access_token")
        .or_else(|| body.get("data").and_then(|data| data.get("access_token")))
        .and_then(Value::as_str)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}
