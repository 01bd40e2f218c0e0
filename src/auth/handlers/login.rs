/**
 * Login Handler
 *
 * This module implements the user authentication handler for POST /auth/login.
 *
 * # Security
 *
 * - Unknown email and wrong password return the identical error message and
 *   status code, so the response does not reveal which case occurred
 * - Password verification uses bcrypt
 * - Tokens expire after 24 hours
 */

use axum::extract::State;
use axum::response::Json;
use bcrypt::verify;
use sqlx::PgPool;

use crate::auth::handlers::types::{AuthResponse, LoginRequest, UserResponse};
use crate::auth::sessions::create_token;
use crate::auth::users::get_user_by_email;
use crate::error::AppError;

/// Constant-shape failure for both unknown email and wrong password
fn invalid_credentials() -> AppError {
    AppError::unauthenticated("Invalid credentials")
}

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - user not found or password incorrect (same shape)
/// * `500 Internal Server Error` - database or token generation failure
pub async fn login(
    State(pool): State<PgPool>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>, AppError> {
    tracing::info!("Login request for: {}", request.email);

    let user = get_user_by_email(&pool, &request.email)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Login failed, unknown email: {}", request.email);
            invalid_credentials()
        })?;

    let valid = verify(&request.password, &user.password_hash)?;
    if !valid {
        tracing::warn!("Login failed, wrong password for: {}", request.email);
        return Err(invalid_credentials());
    }

    let token = create_token(user.id)?;

    tracing::info!("Login successful for: {}", user.email);

    Ok(Json(AuthResponse {
        token,
        user: UserResponse {
            id: user.id,
            name: user.name,
            email: user.email,
        },
    }))
}
