//! REST client for the sandbox KYC endpoints.
//!
//! Wraps `POST /authenticate` and `POST /kyc/pan/verify` using [`reqwest`].

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use serde_json::Value;

use crate::config::SandboxConfig;
use crate::messages::{extract_access_token, PanVerificationRequest, UpstreamResponse, VerifyPayload};

/// HTTP client for the sandbox API.
pub struct SandboxApi {
    client: reqwest::Client,
    config: SandboxConfig,
}

/// Errors from the sandbox API layer.
#[derive(Debug, thiserror::Error)]
pub enum KycApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Authentication returned a non-2xx status code.
    #[error("Sandbox API rejected the request ({status})")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Response body, relayed to the caller.
        body: Value,
    },

    /// Authentication succeeded but carried no access token.
    #[error("Failed to get access token from Sandbox API")]
    MissingToken,

    /// A response body was not JSON.
    #[error("Malformed response body: {0}")]
    MalformedBody(String),
}

impl SandboxApi {
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: SandboxConfig) -> Self {
        Self { client, config }
    }

    /// Exchange the API key and secret for an access token.
    ///
    /// A non-2xx answer becomes [`KycApiError::Rejected`] carrying the
    /// upstream status and body unchanged.
    pub async fn authenticate(&self) -> Result<String, KycApiError> {
        let response = self
            .client
            .post(format!("{}/authenticate", self.config.base_url))
            .header("x-api-key", &self.config.api_key)
            .header("x-api-secret", &self.config.api_secret)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = Self::read_json(response).await?;

        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "Sandbox authentication rejected");
            return Err(KycApiError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        extract_access_token(&body).ok_or(KycApiError::MissingToken)
    }

    /// Submit a PAN verification with a token from [`Self::authenticate`].
    ///
    /// Any status, success or not, is returned as an [`UpstreamResponse`].
    pub async fn verify_pan(
        &self,
        access_token: &str,
        request: &PanVerificationRequest,
    ) -> Result<UpstreamResponse, KycApiError> {
        let response = self
            .client
            .post(format!("{}/kyc/pan/verify", self.config.base_url))
            .header(AUTHORIZATION, access_token)
            .header("x-api-key", &self.config.api_key)
            .header("x-accept-cache", "true")
            .json(&VerifyPayload::from(request))
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = Self::read_json(response).await?;

        Ok(UpstreamResponse { status, body })
    }

    // ---- private helpers ----

    /// Read a response body as JSON. An empty body reads as `null`.
    async fn read_json(response: reqwest::Response) -> Result<Value, KycApiError> {
        let text = response.text().await?;
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| KycApiError::MalformedBody(e.to_string()))
    }
}
