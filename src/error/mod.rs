//! Backend error types
//!
//! This module defines the error taxonomy used by every HTTP handler:
//!
//! - `Unauthenticated` - missing/malformed/invalid bearer token (401)
//! - `Forbidden` - authenticated but lacking membership or role (403)
//! - `Validation` - missing or malformed input (400)
//! - `NotFound` - referenced entity absent (404)
//! - `Conflict` - duplicate unique key, e.g. existing membership (409)
//! - `Internal` - storage or other unexpected failures (500)
//!
//! Handlers return `Result<_, AppError>`; the `IntoResponse` impl in
//! `conversion` renders the error as a JSON body with the mapped status.
//! Raw storage errors are logged and collapsed into a generic 500 so
//! internal detail never reaches the client.

pub mod conversion;
pub mod types;

pub use types::AppError;
