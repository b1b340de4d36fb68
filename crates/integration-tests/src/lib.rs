//! Test harness for the caps store API.
//!
//! Builds a fully wired router backed by a throwaway `SQLite` database
//! file, so tests exercise the real HTTP surface via `tower::ServiceExt`
//! without binding a socket.

// Test support code, panicking on setup failure is the right behavior.
#![allow(clippy::unwrap_used, clippy::expect_used, clippy::missing_panics_doc)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use rust_decimal::Decimal;
use secrecy::SecretString;
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;
use uuid::Uuid;

use caps_store_api::config::AppConfig;
use caps_store_api::db::{self, CapRepository};
use caps_store_api::models::NewCap;
use caps_store_api::routes;
use caps_store_api::state::AppState;

/// A wired application with its backing pool.
pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    /// Spawn an app backed by a fresh throwaway database.
    pub async fn spawn() -> Self {
        Self::spawn_with_token_ttl(30).await
    }

    /// Spawn an app with a specific token lifetime in minutes.
    ///
    /// A negative lifetime makes every issued token already expired,
    /// which is how the expiry tests drive rejection.
    pub async fn spawn_with_token_ttl(token_ttl_minutes: i64) -> Self {
        let db_path = std::env::temp_dir().join(format!("caps-store-test-{}.db", Uuid::new_v4()));
        let database_url = SecretString::from(format!("sqlite://{}", db_path.display()));

        let pool = db::create_pool(&database_url)
            .await
            .expect("failed to create test pool");

        db::MIGRATOR
            .run(&pool)
            .await
            .expect("failed to run migrations");

        let config = AppConfig {
            database_url,
            host: "127.0.0.1".parse().expect("valid host"),
            port: 0,
            token_secret: SecretString::from("fJ8#mQ2$xL9@pW4!nR7&vB1*kD5^sG3z"),
            token_ttl_minutes,
            frontend_url: None,
        };

        let state = AppState::new(config, pool.clone());
        let app = routes::app(state);

        Self { app, pool }
    }

    /// Send a GET request.
    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("valid request");

        self.app.clone().oneshot(request).await.expect("app error")
    }

    /// Send a GET request with a bearer token.
    pub async fn get_authed(&self, uri: &str, token: &str) -> Response<Body> {
        let request = Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::empty())
            .expect("valid request");

        self.app.clone().oneshot(request).await.expect("app error")
    }

    /// Send a POST request with a JSON body.
    pub async fn post_json(&self, uri: &str, body: &Value) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("valid request");

        self.app.clone().oneshot(request).await.expect("app error")
    }

    /// Send a POST request with a JSON body and a bearer token.
    pub async fn post_json_authed(&self, uri: &str, body: &Value, token: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::AUTHORIZATION, format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .expect("valid request");

        self.app.clone().oneshot(request).await.expect("app error")
    }

    /// Register an account and return its login token.
    pub async fn register_and_login(&self, email: &str, password: &str) -> String {
        let response = self
            .post_json(
                "/api/auth/register",
                &json!({
                    "email": email,
                    "password": password,
                    "full_name": "Test User",
                }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = self
            .post_json(
                "/api/auth/login",
                &json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        body["access_token"]
            .as_str()
            .expect("access_token in login response")
            .to_owned()
    }

    /// Insert a cap directly and return its ID.
    pub async fn seed_cap(&self, name: &str, price: &str, stock: i64, featured: bool) -> i64 {
        self.seed_cap_in_category(name, price, stock, featured, "baseball")
            .await
    }

    /// Insert a cap in a specific category and return its ID.
    pub async fn seed_cap_in_category(
        &self,
        name: &str,
        price: &str,
        stock: i64,
        featured: bool,
        category: &str,
    ) -> i64 {
        let caps = CapRepository::new(&self.pool);

        let cap = caps
            .create(&NewCap {
                name: name.to_owned(),
                name_ar: format!("{name} (ar)"),
                description: format!("{name} description"),
                description_ar: format!("{name} description (ar)"),
                price: price.parse::<Decimal>().expect("valid price"),
                image_url: "https://example.com/cap.jpg".to_owned(),
                category: category.to_owned(),
                brand: "Sleven".to_owned(),
                color: "Navy Blue".to_owned(),
                size: "Adjustable".to_owned(),
                stock_quantity: stock,
                is_featured: featured,
            })
            .await
            .expect("failed to seed cap");

        cap.id.as_i64()
    }

    /// Read a cap's current stock.
    pub async fn stock_of(&self, cap_id: i64) -> i64 {
        let (stock,): (i64,) = sqlx::query_as("SELECT stock_quantity FROM caps WHERE id = ?")
            .bind(cap_id)
            .fetch_one(&self.pool)
            .await
            .expect("cap exists");
        stock
    }
}

/// Read a response body as JSON.
pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body read");
    serde_json::from_slice(&bytes).expect("json body")
}
