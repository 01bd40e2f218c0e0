//! Authentication and user management
//!
//! JWT session tokens, user database operations, and the register/login/me
//! HTTP handlers.

pub mod handlers;
pub mod sessions;
pub mod users;

pub use handlers::{login, me, register};
