//! Integration tests for the conversion endpoint in mock mode.

mod helpers;

use axum::http::StatusCode;
use axum_test::multipart::{MultipartForm, Part};
use helpers::fixtures::{create_padded_pdf, create_test_pdf};
use helpers::{setup_test_app, TEST_MOCK_AUDIO_URL};
use serde_json::Value;

fn pdf_part(data: Vec<u8>) -> Part {
    Part::bytes(data)
        .file_name("paper.pdf")
        .mime_type("application/pdf")
}

#[tokio::test]
async fn convert_returns_audio_and_transcript_in_mock_mode() {
    let server = setup_test_app();

    let form = MultipartForm::new()
        .add_text("style", "academic")
        .add_text("speed", "0.8")
        .add_part("file", pdf_part(create_test_pdf()));

    let response = server.post("/api/convert").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["audioUrl"], TEST_MOCK_AUDIO_URL);
    assert!(body["transcript"].as_str().unwrap().contains("paper.pdf"));

    let metadata = &body["metadata"];
    assert_eq!(metadata["source"], "mock");
    assert_eq!(metadata["style"], "academic");
    let rate = metadata["speaking_rate"].as_f64().unwrap();
    assert!((rate - 0.8).abs() < 1e-6, "got speaking_rate {}", rate);
}

#[tokio::test]
async fn convert_defaults_style_and_speed_when_absent() {
    let server = setup_test_app();

    let form = MultipartForm::new().add_part("file", pdf_part(create_test_pdf()));

    let response = server.post("/api/convert").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["metadata"]["style"], "conversational");
    let rate = body["metadata"]["speaking_rate"].as_f64().unwrap();
    assert!((rate - 1.0).abs() < 1e-6, "got speaking_rate {}", rate);
}

#[tokio::test]
async fn convert_without_file_returns_400() {
    let server = setup_test_app();

    let form = MultipartForm::new().add_text("style", "conversational");

    let response = server.post("/api/convert").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "MISSING_FILE");
    assert_eq!(body["error"], "No file provided");
}

#[tokio::test]
async fn convert_rejects_non_pdf_uploads() {
    let server = setup_test_app();

    let part = Part::bytes(b"just some notes".to_vec())
        .file_name("notes.txt")
        .mime_type("text/plain");
    let form = MultipartForm::new().add_part("file", part);

    let response = server.post("/api/convert").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "UNSUPPORTED_TYPE");
    assert_eq!(body["error"], "Please upload a PDF file");
}

#[tokio::test]
async fn convert_accepts_pdf_extension_with_generic_content_type() {
    let server = setup_test_app();

    let part = Part::bytes(create_test_pdf())
        .file_name("paper.pdf")
        .mime_type("application/octet-stream");
    let form = MultipartForm::new().add_part("file", part);

    let response = server.post("/api/convert").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::OK);
}

#[tokio::test]
async fn convert_rejects_oversized_pdf_and_names_the_limit() {
    let server = setup_test_app();

    // One and a half times the 1MB test ceiling.
    let form = MultipartForm::new().add_part("file", pdf_part(create_padded_pdf(1_572_864)));

    let response = server.post("/api/convert").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::PAYLOAD_TOO_LARGE);

    let body: Value = response.json();
    assert_eq!(body["code"], "TOO_LARGE");
    assert!(
        body["error"].as_str().unwrap().contains("1MB"),
        "got: {}",
        body["error"]
    );
}

#[tokio::test]
async fn convert_checks_type_before_size() {
    let server = setup_test_app();

    // Oversized and not a PDF; the type failure must win.
    let part = Part::bytes(vec![b'x'; 1_572_864])
        .file_name("notes.txt")
        .mime_type("text/plain");
    let form = MultipartForm::new().add_part("file", part);

    let response = server.post("/api/convert").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "UNSUPPORTED_TYPE");
}

#[tokio::test]
async fn convert_rejects_unknown_style() {
    let server = setup_test_app();

    let form = MultipartForm::new()
        .add_text("style", "operatic")
        .add_part("file", pdf_part(create_test_pdf()));

    let response = server.post("/api/convert").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"].as_str().unwrap().contains("operatic"));
}

#[tokio::test]
async fn convert_accepts_legacy_simplified_style() {
    let server = setup_test_app();

    let form = MultipartForm::new()
        .add_text("style", "simplified")
        .add_part("file", pdf_part(create_test_pdf()));

    let response = server.post("/api/convert").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["metadata"]["style"], "simple");
}

#[tokio::test]
async fn convert_clamps_out_of_range_speed() {
    let server = setup_test_app();

    let form = MultipartForm::new()
        .add_text("speed", "9")
        .add_part("file", pdf_part(create_test_pdf()));

    let response = server.post("/api/convert").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    let rate = body["metadata"]["speaking_rate"].as_f64().unwrap();
    assert!((rate - 1.3).abs() < 1e-6, "got speaking_rate {}", rate);
}

#[tokio::test]
async fn convert_rejects_duplicate_file_fields() {
    let server = setup_test_app();

    let form = MultipartForm::new()
        .add_part("file", pdf_part(create_test_pdf()))
        .add_part("file", pdf_part(create_test_pdf()));

    let response = server.post("/api/convert").multipart(form).await;
    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);

    let body: Value = response.json();
    assert_eq!(body["code"], "INVALID_INPUT");
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("exactly one field named 'file'"));
}

#[tokio::test]
async fn convert_status_reports_ok_in_mock_mode() {
    let server = setup_test_app();

    let response = server.get("/api/convert").await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["mode"], "mock");
}
