/**
 * Registration Handler
 *
 * This module implements the user registration handler for POST /auth/register.
 *
 * # Registration Process
 *
 * 1. Validate email format and password strength
 * 2. Check if a user with the email already exists
 * 3. Hash password using bcrypt
 * 4. Create user in database
 *
 * # Security
 *
 * - Passwords are hashed using bcrypt with DEFAULT_COST
 * - Passwords are never stored or returned in plaintext
 */

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use bcrypt::{hash, DEFAULT_COST};
use sqlx::PgPool;

use crate::auth::handlers::types::{RegisterRequest, RegisterResponse, UserResponse};
use crate::auth::users::{create_user, get_user_by_email};
use crate::error::AppError;

/// Validate email format
///
/// Accepts `local@domain` where both parts are non-empty and the domain
/// contains a dot. Deliberately loose; the mailer is the real arbiter.
pub(crate) fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or("");
    let domain = parts.next().unwrap_or("");

    !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace)
}

/// Validate password strength
///
/// Requires at least 8 characters with one lowercase letter, one uppercase
/// letter, one digit, and one symbol.
pub(crate) fn is_strong_password(password: &str) -> bool {
    password.len() >= 8
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_alphanumeric())
}

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - invalid email format, weak password, empty name
/// * `409 Conflict` - a user with this email already exists
/// * `500 Internal Server Error` - hashing or database failure
pub async fn register(
    State(pool): State<PgPool>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    tracing::info!("Registration request for email: {}", request.email);

    if request.name.trim().is_empty() {
        return Err(AppError::validation("Name is required"));
    }

    if !is_valid_email(&request.email) {
        tracing::warn!("Invalid email format: {}", request.email);
        return Err(AppError::validation("Invalid email format"));
    }

    if !is_strong_password(&request.password) {
        return Err(AppError::validation(
            "Password must be at least 8 characters long and include uppercase, lowercase, number, and special character",
        ));
    }

    if get_user_by_email(&pool, &request.email).await?.is_some() {
        tracing::warn!("Email already registered: {}", request.email);
        return Err(AppError::conflict("User already exists"));
    }

    let password_hash = hash(&request.password, DEFAULT_COST)?;

    let user = create_user(&pool, request.name, request.email, password_hash).await?;

    tracing::info!("User registered: {} ({})", user.name, user.email);

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
            user: UserResponse {
                id: user.id,
                name: user.name,
                email: user.email,
            },
        }),
    ))
}
