use pancheck_core::preprocess::{DEFAULT_CONTRAST, MAX_CONTRAST};
use pancheck_core::tesseract::{DEFAULT_BINARY, DEFAULT_LANGUAGE};

use crate::auth::jwt::JwtConfig;

/// Default upload cap: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Server configuration loaded from environment variables.
///
/// All fields except the JWT secret have defaults suitable for local
/// development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `60`).
    pub request_timeout_secs: u64,
    /// Largest accepted card image, in bytes.
    pub max_upload_bytes: usize,
    /// Simulated processing time of the demo extraction endpoint.
    pub demo_scan_delay_ms: u64,
    pub ocr: OcrConfig,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
}

/// Settings for the real scan pipeline.
#[derive(Debug, Clone)]
pub struct OcrConfig {
    /// Contrast applied during preprocessing.
    pub contrast: f64,
    /// Tesseract language code.
    pub language: String,
    /// Path or name of the `tesseract` executable.
    pub tesseract_bin: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:3000`    |
    /// | `REQUEST_TIMEOUT_SECS` | `60`                       |
    /// | `MAX_UPLOAD_BYTES`     | `5242880`                  |
    /// | `DEMO_SCAN_DELAY_MS`   | `2000`                     |
    /// | `OCR_CONTRAST`         | `40`                       |
    /// | `OCR_LANGUAGE`         | `eng`                      |
    /// | `TESSERACT_BIN`        | `tesseract`                |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| DEFAULT_MAX_UPLOAD_BYTES.to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let demo_scan_delay_ms: u64 = std::env::var("DEMO_SCAN_DELAY_MS")
            .unwrap_or_else(|_| "2000".into())
            .parse()
            .expect("DEMO_SCAN_DELAY_MS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            demo_scan_delay_ms,
            ocr: OcrConfig::from_env(),
            jwt: JwtConfig::from_env(),
        }
    }
}

impl OcrConfig {
    pub fn from_env() -> Self {
        let contrast: f64 = std::env::var("OCR_CONTRAST")
            .unwrap_or_else(|_| DEFAULT_CONTRAST.to_string())
            .parse()
            .expect("OCR_CONTRAST must be a number");
        assert!(
            (0.0..=MAX_CONTRAST).contains(&contrast),
            "OCR_CONTRAST must be between 0 and {MAX_CONTRAST}"
        );

        Self {
            contrast,
            language: std::env::var("OCR_LANGUAGE").unwrap_or_else(|_| DEFAULT_LANGUAGE.into()),
            tesseract_bin: std::env::var("TESSERACT_BIN").unwrap_or_else(|_| DEFAULT_BINARY.into()),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            contrast: DEFAULT_CONTRAST,
            language: DEFAULT_LANGUAGE.to_string(),
            tesseract_bin: DEFAULT_BINARY.to_string(),
        }
    }
}
