/**
 * Current User Handler
 *
 * GET /auth/me - returns the acting user's profile. The token only proves
 * identity; the user row may have been deleted since it was issued, in
 * which case this handler returns 404.
 */

use axum::extract::State;
use axum::response::Json;
use sqlx::PgPool;

use crate::auth::handlers::types::UserResponse;
use crate::auth::users::get_user_by_id;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;

/// Current user handler
pub async fn me(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserResponse>, AppError> {
    let user = get_user_by_id(&pool, user.user_id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    Ok(Json(UserResponse {
        id: user.id,
        name: user.name,
        email: user.email,
    }))
}
