//! HTTP-level integration tests for the card upload endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, post_multipart, sample_png, FakeOcr, FakeVerifier, Part};
use pancheck_core::demo_scan::DEMO_SCANS;

const EXTRACT: &str = "/api/ocr/extract-pan";
const SCAN: &str = "/api/ocr/scan-pan";

async fn scan_app(ocr: FakeOcr) -> axum::Router {
    common::build_app(
        common::test_config(),
        Arc::new(ocr),
        Arc::new(FakeVerifier::default()),
    )
    .await
}

// ---------------------------------------------------------------------------
// Demo extraction
// ---------------------------------------------------------------------------

#[tokio::test]
async fn extract_returns_a_canned_result() {
    let app = common::build_test_app().await;

    let response = post_multipart(app, EXTRACT, &[Part::image("image/png", sample_png())]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["message"], "PAN card details extracted successfully");

    let data = &json["data"];
    let scan = DEMO_SCANS
        .iter()
        .find(|s| data["panNumber"] == s.pan_number)
        .expect("result should be one of the demo scans");
    assert_eq!(data["name"], scan.name);
    assert_eq!(data["dateOfBirth"], scan.date_of_birth);
    assert_eq!(data["confidence"], scan.confidence);
}

#[tokio::test]
async fn extract_does_not_decode_the_image() {
    let app = common::build_test_app().await;

    let part = Part::image("image/jpeg", b"definitely not a jpeg".to_vec());
    let response = post_multipart(app, EXTRACT, &[part]).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn missing_image_field_is_400() {
    let app = common::build_test_app().await;

    let part = Part {
        name: "photo",
        filename: Some("card.png"),
        content_type: Some("image/png"),
        data: sample_png(),
    };
    let response = post_multipart(app, EXTRACT, &[part]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "No image file provided");
}

#[tokio::test]
async fn non_image_upload_is_400() {
    let app = common::build_test_app().await;

    let part = Part::image("application/pdf", b"%PDF-1.4".to_vec());
    let response = post_multipart(app, EXTRACT, &[part]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid file type. Please upload an image."
    );
}

#[tokio::test]
async fn upload_without_content_type_is_400() {
    let app = common::build_test_app().await;

    let part = Part {
        name: "image",
        filename: None,
        content_type: None,
        data: b"ABCDE1234F".to_vec(),
    };
    let response = post_multipart(app, EXTRACT, &[part]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid file type. Please upload an image."
    );
}

#[tokio::test]
async fn upload_just_over_the_limit_is_400() {
    let mut config = common::test_config();
    config.max_upload_bytes = 1024;
    let app = common::build_app(
        config,
        Arc::new(FakeOcr::with_lines(&[])),
        Arc::new(FakeVerifier::default()),
    )
    .await;

    let response = post_multipart(app, EXTRACT, &[Part::image("image/png", vec![0; 1025])]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "File size too large. Please upload an image smaller than 5MB."
    );
}

/// A body past the transport limit is reported like an oversized image.
#[tokio::test]
async fn upload_far_over_the_limit_is_400() {
    let mut config = common::test_config();
    config.max_upload_bytes = 1024;
    let app = common::build_app(
        config,
        Arc::new(FakeOcr::with_lines(&[])),
        Arc::new(FakeVerifier::default()),
    )
    .await;

    let response =
        post_multipart(app, EXTRACT, &[Part::image("image/png", vec![0; 256 * 1024])]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "File size too large. Please upload an image smaller than 5MB."
    );
}

#[tokio::test]
async fn upload_at_the_limit_is_accepted() {
    let mut config = common::test_config();
    config.max_upload_bytes = 1024;
    let app = common::build_app(
        config,
        Arc::new(FakeOcr::with_lines(&[])),
        Arc::new(FakeVerifier::default()),
    )
    .await;

    let response = post_multipart(app, EXTRACT, &[Part::image("image/png", vec![0; 1024])]).await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn non_multipart_request_is_400() {
    let app = common::build_test_app().await;

    let response = common::post_json(app, EXTRACT, serde_json::json!({ "image": "abc" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Real scan pipeline
// ---------------------------------------------------------------------------

#[tokio::test]
async fn scan_extracts_fields_from_recognized_text() {
    let app = scan_app(FakeOcr::with_lines(&[
        ("INCOME TAX DEPARTMENT", 90.0),
        ("RAHUL KUMAR SHARMA", 80.0),
        ("DATE OF BIRTH: 15/08/1985", 85.0),
        ("ABCDE1234F", 95.0),
    ]))
    .await;

    let response = post_multipart(app, SCAN, &[Part::image("image/png", sample_png())]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["panNumber"], "ABCDE1234F");
    assert_eq!(json["data"]["name"], "RAHUL KUMAR SHARMA");
    assert_eq!(json["data"]["dateOfBirth"], "1985-08-15");
    assert_eq!(json["data"]["confidence"], 87.5);
}

#[tokio::test]
async fn scan_of_unreadable_card_reports_not_found() {
    let app = scan_app(FakeOcr::with_lines(&[])).await;

    let response = post_multipart(app, SCAN, &[Part::image("image/png", sample_png())]).await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["panNumber"], "NOT_FOUND");
    assert_eq!(json["data"]["name"], "NOT_FOUND");
    assert_eq!(json["data"]["dateOfBirth"], "NOT_FOUND");
    assert_eq!(json["data"]["confidence"], 0.0);
}

#[tokio::test]
async fn scan_of_undecodable_image_is_400() {
    let app = scan_app(FakeOcr::with_lines(&[("ABCDE1234F", 95.0)])).await;

    let part = Part::image("image/png", b"not a png at all".to_vec());
    let response = post_multipart(app, SCAN, &[part]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Failed to process the image. Please try again."
    );
}

#[tokio::test]
async fn scan_applies_the_same_upload_rules() {
    let app = scan_app(FakeOcr::with_lines(&[])).await;

    let part = Part::image("text/plain", b"hello".to_vec());
    let response = post_multipart(app, SCAN, &[part]).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Invalid file type. Please upload an image."
    );
}
