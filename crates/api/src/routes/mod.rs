//! HTTP route handlers for the caps store API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - API banner
//! GET  /health                 - Liveness check
//! GET  /health/ready           - Readiness check (verifies database)
//!
//! # Auth
//! POST /api/auth/register      - Register a new account
//! POST /api/auth/login         - Login, returns a bearer token
//!
//! # Catalog
//! GET  /api/caps               - Cap listing (skip/limit/category)
//! GET  /api/caps/featured      - Featured caps
//! GET  /api/caps/{id}          - Cap detail
//!
//! # Orders (requires auth)
//! POST /api/orders             - Place an order
//! GET  /api/orders             - Order history, newest first
//!
//! # Account (requires auth)
//! GET  /api/me                 - Current user profile
//! ```

pub mod account;
pub mod auth;
pub mod caps;
pub mod health;
pub mod orders;

use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::get,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    use axum::routing::post;

    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
}

/// Create the catalog routes router.
pub fn cap_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(caps::index))
        .route("/featured", get(caps::featured))
        .route("/{id}", get(caps::show))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new().route("/", get(orders::index).post(orders::create))
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::banner))
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .nest("/api/auth", auth_routes())
        .nest("/api/caps", cap_routes())
        .nest("/api/orders", order_routes())
        .route("/api/me", get(account::me))
}

/// Build the full application router with middleware layers applied.
#[must_use]
pub fn app(state: AppState) -> Router {
    let cors = match state.config().frontend_url.as_deref() {
        Some(origin) => match origin.parse::<HeaderValue>() {
            Ok(value) => CorsLayer::new()
                .allow_origin(value)
                .allow_methods([Method::GET, Method::POST])
                .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
            Err(_) => {
                tracing::warn!(origin, "invalid FRONTEND_URL, falling back to permissive CORS");
                CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any)
            }
        },
        None => CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any),
    };

    routes()
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
