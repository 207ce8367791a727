use async_trait::async_trait;

use crate::api::{KycApiError, SandboxApi};
use crate::messages::{PanVerificationRequest, UpstreamResponse};

/// Something that can verify a PAN against the tax authority's records.
#[async_trait]
pub trait PanVerifier: Send + Sync {
    async fn verify(&self, request: &PanVerificationRequest) -> Result<UpstreamResponse, KycApiError>;
}

#[async_trait]
impl PanVerifier for SandboxApi {
    /// Authenticate, then verify. A fresh token is fetched per call.
    async fn verify(&self, request: &PanVerificationRequest) -> Result<UpstreamResponse, KycApiError> {
        let token = self.authenticate().await?;
        tracing::debug!("Sandbox authentication succeeded");

        let response = self.verify_pan(&token, request).await?;
        tracing::info!(status = response.status, "Sandbox PAN verification completed");

        Ok(response)
    }
}
