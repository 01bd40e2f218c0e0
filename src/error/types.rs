/**
 * Application Error Types
 *
 * This module defines the error type returned by all HTTP handlers.
 * Each variant corresponds to one class of the error taxonomy and maps
 * to a single HTTP status code.
 */

use axum::http::StatusCode;
use thiserror::Error;

/// Application-wide error type
///
/// Every handler and guard produces one of these variants. The message is
/// what the client sees; for `Internal` the original cause is logged and
/// the client only receives a generic message.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing, malformed, expired or otherwise invalid credentials
    #[error("{message}")]
    Unauthenticated {
        /// Human-readable error message
        message: String,
    },

    /// Authenticated but not permitted to perform the operation
    #[error("{message}")]
    Forbidden {
        /// Human-readable error message
        message: String,
    },

    /// Missing or malformed input
    #[error("{message}")]
    Validation {
        /// Human-readable error message
        message: String,
    },

    /// Referenced entity does not exist
    #[error("{message}")]
    NotFound {
        /// Human-readable error message
        message: String,
    },

    /// Duplicate unique key (existing email, existing membership)
    #[error("{message}")]
    Conflict {
        /// Human-readable error message
        message: String,
    },

    /// Unexpected failure; detail lives in the logs, not the response
    #[error("Server error")]
    Internal,
}

impl AppError {
    /// Create an `Unauthenticated` error
    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    /// Create a `Forbidden` error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a `Validation` error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create a `NotFound` error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a `Conflict` error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the client-facing error message
    pub fn message(&self) -> String {
        self.to_string()
    }
}
