//! Order placement and history tests.

#![allow(clippy::unwrap_used)]

use axum::http::StatusCode;
use serde_json::json;

use caps_store_integration_tests::{TestApp, read_json};

#[tokio::test]
async fn placing_an_order_totals_lines_and_decrements_stock() {
    let app = TestApp::spawn().await;
    let cap_id = app.seed_cap("Classic Baseball Cap", "45.99", 50, true).await;
    let token = app
        .register_and_login("amira@example.com", "hunter2hunter2")
        .await;

    let response = app
        .post_json_authed(
            "/api/orders",
            &json!({
                "shipping_address": "12 Hamra Street, Beirut",
                "phone": "+96170123456",
                "items": [{ "cap_id": cap_id, "quantity": 2 }],
            }),
            &token,
        )
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert!((body["total_amount"].as_f64().unwrap() - 91.98).abs() < 1e-9);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["items"].as_array().unwrap().len(), 1);
    assert_eq!(body["items"][0]["quantity"], 2);
    assert!((body["items"][0]["price"].as_f64().unwrap() - 45.99).abs() < 1e-9);

    assert_eq!(app.stock_of(cap_id).await, 48);
}

#[tokio::test]
async fn order_keeps_the_price_paid_after_a_catalog_price_change() {
    let app = TestApp::spawn().await;
    let cap_id = app.seed_cap("Classic Baseball Cap", "45.99", 50, true).await;
    let token = app
        .register_and_login("amira@example.com", "hunter2hunter2")
        .await;

    let response = app
        .post_json_authed(
            "/api/orders",
            &json!({
                "shipping_address": "12 Hamra Street, Beirut",
                "phone": "+96170123456",
                "items": [{ "cap_id": cap_id, "quantity": 1 }],
            }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    sqlx::query("UPDATE caps SET price = '99.99' WHERE id = ?")
        .bind(cap_id)
        .execute(&app.pool)
        .await
        .unwrap();

    let body = read_json(app.get_authed("/api/orders", &token).await).await;
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 1);
    assert!((orders[0]["items"][0]["price"].as_f64().unwrap() - 45.99).abs() < 1e-9);
    assert!((orders[0]["total_amount"].as_f64().unwrap() - 45.99).abs() < 1e-9);
}

#[tokio::test]
async fn failed_multi_line_order_leaves_all_stock_unchanged() {
    let app = TestApp::spawn().await;
    let plenty = app.seed_cap("Classic Baseball Cap", "45.99", 50, true).await;
    let scarce = app.seed_cap("Luxury Leather Cap", "129.99", 1, true).await;
    let token = app
        .register_and_login("amira@example.com", "hunter2hunter2")
        .await;

    let response = app
        .post_json_authed(
            "/api/orders",
            &json!({
                "shipping_address": "12 Hamra Street, Beirut",
                "phone": "+96170123456",
                "items": [
                    { "cap_id": plenty, "quantity": 3 },
                    { "cap_id": scarce, "quantity": 5 },
                ],
            }),
            &token,
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(app.stock_of(plenty).await, 50);
    assert_eq!(app.stock_of(scarce).await, 1);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn concurrent_orders_for_the_last_unit_sell_it_exactly_once() {
    let app = TestApp::spawn().await;
    let cap_id = app.seed_cap("Luxury Leather Cap", "129.99", 1, true).await;
    let token_a = app
        .register_and_login("amira@example.com", "hunter2hunter2")
        .await;
    let token_b = app
        .register_and_login("bassel@example.com", "hunter2hunter2")
        .await;

    let payload = json!({
        "shipping_address": "12 Hamra Street, Beirut",
        "phone": "+96170123456",
        "items": [{ "cap_id": cap_id, "quantity": 1 }],
    });

    let (first, second) = tokio::join!(
        app.post_json_authed("/api/orders", &payload, &token_a),
        app.post_json_authed("/api/orders", &payload, &token_b),
    );

    let mut statuses = [first.status(), second.status()];
    statuses.sort();
    assert_eq!(statuses, [StatusCode::CREATED, StatusCode::BAD_REQUEST]);

    assert_eq!(app.stock_of(cap_id).await, 0);

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM orders")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn empty_and_non_positive_orders_are_rejected() {
    let app = TestApp::spawn().await;
    let cap_id = app.seed_cap("Classic Baseball Cap", "45.99", 50, true).await;
    let token = app
        .register_and_login("amira@example.com", "hunter2hunter2")
        .await;

    let response = app
        .post_json_authed(
            "/api/orders",
            &json!({
                "shipping_address": "12 Hamra Street, Beirut",
                "phone": "+96170123456",
                "items": [],
            }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .post_json_authed(
            "/api/orders",
            &json!({
                "shipping_address": "12 Hamra Street, Beirut",
                "phone": "+96170123456",
                "items": [{ "cap_id": cap_id, "quantity": 0 }],
            }),
            &token,
        )
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(app.stock_of(cap_id).await, 50);
}

#[tokio::test]
async fn ordering_an_unknown_cap_returns_404() {
    let app = TestApp::spawn().await;
    let token = app
        .register_and_login("amira@example.com", "hunter2hunter2")
        .await;

    let response = app
        .post_json_authed(
            "/api/orders",
            &json!({
                "shipping_address": "12 Hamra Street, Beirut",
                "phone": "+96170123456",
                "items": [{ "cap_id": 9999, "quantity": 1 }],
            }),
            &token,
        )
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn orders_require_authentication() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/api/orders",
            &json!({
                "shipping_address": "12 Hamra Street, Beirut",
                "phone": "+96170123456",
                "items": [{ "cap_id": 1, "quantity": 1 }],
            }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app.get("/api/orders").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn history_is_scoped_to_the_user_and_newest_first() {
    let app = TestApp::spawn().await;
    let cap_id = app.seed_cap("Classic Baseball Cap", "45.99", 50, true).await;
    let token_a = app
        .register_and_login("amira@example.com", "hunter2hunter2")
        .await;
    let token_b = app
        .register_and_login("bassel@example.com", "hunter2hunter2")
        .await;

    for quantity in [1, 2] {
        let response = app
            .post_json_authed(
                "/api/orders",
                &json!({
                    "shipping_address": "12 Hamra Street, Beirut",
                    "phone": "+96170123456",
                    "items": [{ "cap_id": cap_id, "quantity": quantity }],
                }),
                &token_a,
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let body = read_json(app.get_authed("/api/orders", &token_a).await).await;
    let orders = body.as_array().unwrap();
    assert_eq!(orders.len(), 2);
    // Newest first: the quantity-2 order was placed last.
    assert_eq!(orders[0]["items"][0]["quantity"], 2);
    assert_eq!(orders[1]["items"][0]["quantity"], 1);

    let body = read_json(app.get_authed("/api/orders", &token_b).await).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}
