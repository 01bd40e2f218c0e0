//! Authentication HTTP handlers
//!
//! - `POST /auth/register` - create account
//! - `POST /auth/login` - obtain token
//! - `GET /auth/me` - current user

pub mod login;
pub mod me;
pub mod register;
pub mod types;

pub use login::login;
pub use me::me;
pub use register::register;
