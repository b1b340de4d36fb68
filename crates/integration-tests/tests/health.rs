//! Banner and health endpoint tests.

use axum::http::StatusCode;

use caps_store_integration_tests::{TestApp, read_json};

#[tokio::test]
async fn banner_greets_on_the_root_path() {
    let app = TestApp::spawn().await;

    let response = app.get("/").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["message"], "Sleven Caps Store API");
    assert_eq!(body["status"], "active");
}

#[tokio::test]
async fn liveness_and_readiness_respond_ok() {
    let app = TestApp::spawn().await;

    assert_eq!(app.get("/health").await.status(), StatusCode::OK);
    assert_eq!(app.get("/health/ready").await.status(), StatusCode::OK);
}
