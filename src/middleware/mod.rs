//! Request processing middleware and guards
//!
//! - `auth` - bearer-token authentication middleware + `AuthUser` extractor
//! - `workspace_role` - per-workspace role checks used inside handlers

pub mod auth;
pub mod workspace_role;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use workspace_role::{require_membership, require_workspace_role, ADMIN_ROLES};
