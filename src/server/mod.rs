//! Server setup and configuration
//!
//! - **`state`** - `AppState` and `FromRef` implementations
//! - **`config`** - environment configuration (database pool, mailer)
//! - **`init`** - application assembly

pub mod config;
pub mod init;
pub mod state;

pub use init::create_app;
pub use state::AppState;
