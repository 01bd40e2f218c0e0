//! Activity log
//!
//! Append-only audit trail. Every successful mutating operation writes
//! exactly one entry, inside the same transaction as its primary mutation.

pub mod db;
pub mod handlers;

pub use db::{actions, entities, NewActivity};
pub use handlers::workspace_activity;
