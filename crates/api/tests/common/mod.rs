//! Shared fixtures for the API integration tests.
#![allow(dead_code)]

use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use pancheck_api::auth::jwt::JwtConfig;
use pancheck_api::auth::password::hash_password;
use pancheck_api::config::{OcrConfig, ServerConfig, DEFAULT_MAX_UPLOAD_BYTES};
use pancheck_api::router::build_app_router;
use pancheck_api::state::AppState;
use pancheck_core::ocr::{OcrEngine, OcrError, OcrLine, OcrOutput};
use pancheck_kyc::{KycApiError, PanVerificationRequest, PanVerifier, UpstreamResponse};
use pancheck_store::models::user::CreateUser;
use pancheck_store::repositories::{InMemoryUserRepo, UserRepo};
use pancheck_store::seed::DEMO_ACCOUNTS;
use serde_json::{json, Value};
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Password shared by the seeded demo accounts.
pub const DEMO_PASSWORD: &str = "password123";

/// Argon2 is slow; hash the demo password once per test binary.
static DEMO_PASSWORD_HASH: LazyLock<String> =
    LazyLock::new(|| hash_password(DEMO_PASSWORD).expect("hashing should succeed"));

// ---------------------------------------------------------------------------
// Fakes
// ---------------------------------------------------------------------------

/// OCR engine that returns a fixed reading regardless of the image.
pub struct FakeOcr {
    pub output: OcrOutput,
}

impl FakeOcr {
    pub fn with_lines(lines: &[(&str, f64)]) -> Self {
        Self {
            output: OcrOutput::from_lines(
                lines
                    .iter()
                    .map(|(text, confidence)| OcrLine {
                        text: text.to_string(),
                        confidence: *confidence,
                    })
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl OcrEngine for FakeOcr {
    fn name(&self) -> &'static str {
        "fake"
    }

    async fn recognize(&self, _image: &[u8]) -> Result<OcrOutput, OcrError> {
        Ok(self.output.clone())
    }
}

/// How [`FakeVerifier`] answers.
pub enum FakeVerdict {
    /// The verify call returns this status and body.
    Respond(u16, Value),
    /// Authentication is rejected with this status and body.
    AuthRejected(u16, Value),
    /// The provider cannot be reached.
    Unreachable,
}

/// KYC provider stand-in that records what it was asked.
pub struct FakeVerifier {
    verdict: FakeVerdict,
    calls: AtomicUsize,
    last_request: Mutex<Option<PanVerificationRequest>>,
}

impl FakeVerifier {
    pub fn new(verdict: FakeVerdict) -> Self {
        Self {
            verdict,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<PanVerificationRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

impl Default for FakeVerifier {
    fn default() -> Self {
        Self::new(FakeVerdict::Respond(
            200,
            json!({ "code": 200, "data": { "status": "valid" } }),
        ))
    }
}

#[async_trait]
impl PanVerifier for FakeVerifier {
    async fn verify(&self, request: &PanVerificationRequest) -> Result<UpstreamResponse, KycApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.verdict {
            FakeVerdict::Respond(status, body) => Ok(UpstreamResponse {
                status: *status,
                body: body.clone(),
            }),
            FakeVerdict::AuthRejected(status, body) => Err(KycApiError::Rejected {
                status: *status,
                body: body.clone(),
            }),
            FakeVerdict::Unreachable => Err(KycApiError::MissingToken),
        }
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults and no demo delay.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        demo_scan_delay_ms: 0,
        ocr: OcrConfig::default(),
        jwt: JwtConfig {
            secret: TEST_JWT_SECRET.to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// A store holding the two demo accounts.
pub async fn seeded_users() -> Arc<InMemoryUserRepo> {
    let users = Arc::new(InMemoryUserRepo::new());
    for account in DEMO_ACCOUNTS {
        users
            .create(CreateUser {
                name: account.name.to_string(),
                email: account.email.to_string(),
                password_hash: DEMO_PASSWORD_HASH.clone(),
            })
            .await
            .expect("seeding should succeed");
    }
    users
}

/// Build the full application router with the given fakes.
pub async fn build_app(
    config: ServerConfig,
    ocr: Arc<dyn OcrEngine>,
    verifier: Arc<dyn PanVerifier>,
) -> Router {
    let state = AppState {
        config: Arc::new(config.clone()),
        users: seeded_users().await,
        ocr,
        verifier,
    };
    build_app_router(state, &config)
}

/// Build the application with default fakes.
pub async fn build_test_app() -> Router {
    build_app(
        test_config(),
        Arc::new(FakeOcr::with_lines(&[])),
        Arc::new(FakeVerifier::default()),
    )
    .await
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header(AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    post_raw(app, uri, "application/json", body.to_string().into_bytes()).await
}

pub async fn post_raw(app: Router, uri: &str, content_type: &str, body: Vec<u8>) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Multipart
// ---------------------------------------------------------------------------

const BOUNDARY: &str = "pancheck-test-boundary";

/// One part of a multipart form.
pub struct Part<'a> {
    pub name: &'a str,
    pub filename: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: Vec<u8>,
}

impl<'a> Part<'a> {
    /// A file part named `image`.
    pub fn image(content_type: &'a str, data: Vec<u8>) -> Self {
        Self {
            name: "image",
            filename: Some("card.png"),
            content_type: Some(content_type),
            data,
        }
    }
}

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        let mut disposition = format!("Content-Disposition: form-data; name=\"{}\"", part.name);
        if let Some(filename) = part.filename {
            disposition.push_str(&format!("; filename=\"{filename}\""));
        }
        body.extend_from_slice(disposition.as_bytes());
        body.extend_from_slice(b"\r\n");
        if let Some(content_type) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {content_type}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    body
}

pub async fn post_multipart(app: Router, uri: &str, parts: &[Part<'_>]) -> Response<Body> {
    post_raw(
        app,
        uri,
        &format!("multipart/form-data; boundary={BOUNDARY}"),
        multipart_body(parts),
    )
    .await
}

/// A small valid PNG.
pub fn sample_png() -> Vec<u8> {
    let image = RgbaImage::from_pixel(8, 8, Rgba([200, 200, 200, 255]));
    let mut out = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .unwrap();
    out
}

/// Log in through the API and return the access token.
pub async fn login_token(app: Router, email: &str, password: &str) -> String {
    let response = post_json(
        app,
        "/api/auth/login",
        json!({ "email": email, "password": password }),
    )
    .await;
    let json = body_json(response).await;
    json["token"].as_str().expect("login should return a token").to_string()
}
