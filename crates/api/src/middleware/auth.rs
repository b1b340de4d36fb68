//! Bearer token authentication extractor.
//!
//! Provides an extractor for requiring a valid bearer token in route
//! handlers.

use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::error::AppError;
use crate::models::User;
use crate::state::AppState;

/// Extractor that requires a valid `Authorization: Bearer` token.
///
/// The token is verified against the signing key and resolved to its
/// user; a missing, malformed, expired, or tampered token rejects the
/// request with 401 before the handler runs. Rejections go through
/// [`AppError`], so a storage failure during the user lookup surfaces
/// as 500, not as a credential problem.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     CurrentUser(user): CurrentUser,
/// ) -> impl IntoResponse {
///     format!("Hello, {}!", user.full_name)
/// }
/// ```
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts)
            .ok_or_else(|| AppError::Unauthenticated("Not authenticated".to_owned()))?;

        let auth = crate::services::AuthService::new(state.pool(), state.tokens());
        let user = auth.authenticate(token).await.map_err(|e| {
            tracing::debug!(error = %e, "bearer authentication failed");
            AppError::Auth(e)
        })?;

        Ok(Self(user))
    }
}

/// Pull the token out of the `Authorization: Bearer <token>` header.
fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::Request;

    use super::*;

    fn parts_with_header(value: &str) -> Parts {
        let (parts, ()) = Request::builder()
            .header(header::AUTHORIZATION, value)
            .body(())
            .map(Request::into_parts)
            .unwrap();
        parts
    }

    #[test]
    fn test_bearer_token_extracted() {
        let parts = parts_with_header("Bearer abc.def.ghi");
        assert_eq!(bearer_token(&parts), Some("abc.def.ghi"));
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let parts = parts_with_header("Basic dXNlcjpwYXNz");
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let (parts, ()) = Request::builder().body(()).map(Request::into_parts).unwrap();
        assert_eq!(bearer_token(&parts), None);
    }
}
