/**
 * Error Conversions
 *
 * Conversions from library errors into `AppError`, plus the axum
 * `IntoResponse` impl that renders errors as JSON.
 */

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use super::types::AppError;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(json!({ "message": self.message() }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            // Unique-constraint races (e.g. concurrent duplicate invites)
            // surface as conflicts rather than server errors.
            if db_err.is_unique_violation() {
                tracing::warn!("Unique constraint violation: {:?}", db_err);
                return AppError::conflict("Resource already exists");
            }
        }
        tracing::error!("Database error: {:?}", err);
        AppError::Internal
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        tracing::error!("Password hashing error: {:?}", err);
        AppError::Internal
    }
}

impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        tracing::error!("Token error: {:?}", err);
        AppError::Internal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_response_status() {
        let response = AppError::not_found("Task not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_sqlx_row_not_found_is_internal() {
        // RowNotFound means a handler used fetch_one where it should have
        // used fetch_optional; treat it as a server bug, not a 404.
        let err: AppError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, AppError::Internal));
    }
}
