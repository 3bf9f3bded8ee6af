//! Integration tests for the health endpoint.

mod common;

use axum::http::StatusCode;
use common::TestApp;
use serde_json::json;

#[tokio::test]
async fn health_reports_directory_up() {
    let app = TestApp::spawn().await;

    let (status, body) = app.get("/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], json!("healthy"));
    assert_eq!(body["service"], json!("admin-gateway-test"));
    assert_eq!(body["checks"]["directory"], json!("up"));
}

#[tokio::test]
async fn health_fails_when_directory_is_down() {
    let app = TestApp::spawn().await;
    app.directory.set_failing(true);

    let (status, body) = app.get("/health", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], json!("internal"));
}
