/**
 * Authentication Middleware
 *
 * This module provides middleware for protecting routes that require
 * user authentication. It extracts and verifies JWT tokens from the
 * Authorization header and provides the user ID to handlers.
 *
 * No database lookup happens here; a valid token is taken as proof of
 * identity and per-handler logic may still 404 if the user row has since
 * been deleted.
 */

use axum::extract::Request;
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;
use uuid::Uuid;

use crate::auth::sessions::verify_token;
use crate::error::AppError;

/// Authenticated user data extracted from the JWT token
#[derive(Clone, Debug)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

/// Authentication middleware
///
/// This middleware:
/// 1. Extracts the JWT token from the Authorization header (`Bearer <token>`)
/// 2. Verifies signature and expiry
/// 3. Attaches `AuthenticatedUser` to request extensions for handlers
///
/// Returns 401 Unauthorized if the token is missing, malformed, or invalid.
pub async fn auth_middleware(mut request: Request, next: Next) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            AppError::unauthenticated("Missing Authorization header")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        AppError::unauthenticated("Invalid Authorization header format")
    })?;

    let claims = verify_token(token).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        AppError::unauthenticated("Invalid or expired token")
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::error!("Invalid user ID in token: {:?}", e);
        AppError::unauthenticated("Invalid token")
    })?;

    request.extensions_mut().insert(AuthenticatedUser { user_id });

    Ok(next.run(request).await)
}

/// Axum extractor for the authenticated user
///
/// Used as a handler parameter to read the identity attached by
/// `auth_middleware`.
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S: Send + Sync> axum::extract::FromRequestParts<S> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let user = parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                AppError::unauthenticated("Not authenticated")
            })?;

        Ok(AuthUser(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::FromRequestParts;
    use axum::http::Request as HttpRequest;

    #[tokio::test]
    async fn test_extractor_with_user() {
        let mut request = HttpRequest::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();
        let user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
        };
        request.extensions_mut().insert(user.clone());

        let (mut parts, _) = request.into_parts();
        let extracted = AuthUser::from_request_parts(&mut parts, &()).await;
        assert_eq!(extracted.unwrap().0.user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_extractor_without_user() {
        let request = HttpRequest::builder()
            .uri("http://example.com")
            .body(())
            .unwrap();
        let (mut parts, _) = request.into_parts();
        let extracted = AuthUser::from_request_parts(&mut parts, &()).await;
        assert!(matches!(
            extracted,
            Err(AppError::Unauthenticated { .. })
        ));
    }
}
