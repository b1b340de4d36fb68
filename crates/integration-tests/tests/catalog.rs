//! Catalog browsing tests.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;

use caps_store_integration_tests::{TestApp, read_json};

async fn seed_six(app: &TestApp) -> Vec<i64> {
    let mut ids = Vec::new();
    ids.push(app.seed_cap("Classic Baseball Cap", "45.99", 50, true).await);
    ids.push(
        app.seed_cap_in_category("Luxury Leather Cap", "129.99", 25, true, "luxury")
            .await,
    );
    ids.push(
        app.seed_cap_in_category("Snapback Cap", "39.99", 75, false, "snapback")
            .await,
    );
    ids.push(
        app.seed_cap_in_category("Trucker Hat", "32.99", 60, false, "trucker")
            .await,
    );
    ids.push(
        app.seed_cap_in_category("Beanie Cap", "24.99", 100, true, "beanie")
            .await,
    );
    ids.push(
        app.seed_cap_in_category("Bucket Hat", "35.99", 40, false, "bucket")
            .await,
    );
    ids
}

#[tokio::test]
async fn listing_is_stable_and_pages_are_disjoint() {
    let app = TestApp::spawn().await;
    let ids = seed_six(&app).await;

    let first = read_json(app.get("/api/caps?skip=0&limit=2").await).await;
    let second = read_json(app.get("/api/caps?skip=2&limit=2").await).await;

    let first_ids: Vec<i64> = first
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();
    let second_ids: Vec<i64> = second
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_i64().unwrap())
        .collect();

    assert_eq!(first_ids, ids[0..2]);
    assert_eq!(second_ids, ids[2..4]);
}

#[tokio::test]
async fn listing_defaults_apply_without_parameters() {
    let app = TestApp::spawn().await;
    seed_six(&app).await;

    let response = app.get("/api/caps").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 6);
}

#[tokio::test]
async fn explicit_zero_limit_returns_an_empty_page() {
    let app = TestApp::spawn().await;
    seed_six(&app).await;

    let response = app.get("/api/caps?limit=0").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn category_filter_matches_exactly() {
    let app = TestApp::spawn().await;
    seed_six(&app).await;

    let body = read_json(app.get("/api/caps?category=luxury").await).await;
    let caps = body.as_array().unwrap();

    assert_eq!(caps.len(), 1);
    assert_eq!(caps[0]["name"], "Luxury Leather Cap");

    let body = read_json(app.get("/api/caps?category=sombrero").await).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn featured_returns_only_featured_caps() {
    let app = TestApp::spawn().await;
    seed_six(&app).await;

    let body = read_json(app.get("/api/caps/featured").await).await;
    let caps = body.as_array().unwrap();

    assert_eq!(caps.len(), 3);
    for cap in caps {
        assert_eq!(cap["is_featured"], true);
    }
}

#[tokio::test]
async fn cap_detail_includes_price_as_number() {
    let app = TestApp::spawn().await;
    let id = app.seed_cap("Classic Baseball Cap", "45.99", 50, true).await;

    let response = app.get(&format!("/api/caps/{id}")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["name"], "Classic Baseball Cap");
    assert!((body["price"].as_f64().unwrap() - 45.99).abs() < 1e-9);
    assert_eq!(body["stock_quantity"], 50);
}

#[tokio::test]
async fn unknown_cap_returns_404() {
    let app = TestApp::spawn().await;

    let response = app.get("/api/caps/9999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = read_json(response).await;
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn catalog_does_not_require_authentication() {
    let app = TestApp::spawn().await;
    seed_six(&app).await;

    assert_eq!(app.get("/api/caps").await.status(), StatusCode::OK);
    assert_eq!(app.get("/api/caps/featured").await.status(), StatusCode::OK);
}
