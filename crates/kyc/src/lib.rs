//! Client for the sandbox.co.in KYC API.
//!
//! PAN verification is a two-step exchange: authenticate with the API key
//! and secret to get an access token, then post the PAN payload with that
//! token. The verification response is never interpreted here. Its status
//! and body are handed back for the caller to relay.

pub mod api;
pub mod config;
pub mod messages;
pub mod verifier;

pub use api::{KycApiError, SandboxApi};
pub use config::SandboxConfig;
pub use messages::{PanVerificationRequest, UpstreamResponse};
pub use verifier::PanVerifier;
