//! Account handlers.

use axum::Json;

use crate::middleware::CurrentUser;
use crate::routes::auth::UserResponse;

/// `GET /api/me` - Profile of the authenticated user.
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserResponse> {
    Json(user.into())
}
