use std::fmt;

/// Default API host.
pub const DEFAULT_BASE_URL: &str = "https://api.sandbox.co.in";

/// Credentials and endpoint for the sandbox KYC API.
#[derive(Clone)]
pub struct SandboxConfig {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
}

impl SandboxConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var              | Required | Default                       |
    /// |----------------------|----------|-------------------------------|
    /// | `SANDBOX_BASE_URL`   | no       | `https://api.sandbox.co.in`   |
    /// | `SANDBOX_API_KEY`    | **yes**  | --                            |
    /// | `SANDBOX_API_SECRET` | **yes**  | --                            |
    ///
    /// # Panics
    ///
    /// Panics if the key or secret is missing or empty.
    pub fn from_env() -> Self {
        let base_url = std::env::var("SANDBOX_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let api_key =
            std::env::var("SANDBOX_API_KEY").expect("SANDBOX_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "SANDBOX_API_KEY must not be empty");

        let api_secret = std::env::var("SANDBOX_API_SECRET")
            .expect("SANDBOX_API_SECRET must be set in the environment");
        assert!(!api_secret.is_empty(), "SANDBOX_API_SECRET must not be empty");

        Self {
            base_url,
            api_key,
            api_secret,
        }
    }
}

impl fmt::Debug for SandboxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SandboxConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}
