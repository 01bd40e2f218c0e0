//! Workspaces and memberships
//!
//! Workspace creation (with atomic owner enrollment), the caller's
//! workspace list, member invitations, and the dashboard statistics
//! snapshot.

pub mod db;
pub mod handlers;

pub use db::Role;
pub use handlers::{create_workspace, dashboard, invite_user, my_workspaces};
