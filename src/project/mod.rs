//! Projects
//!
//! Workspace-scoped project CRUD with soft delete.

pub mod db;
pub mod handlers;

pub use handlers::{create_project, delete_project, list_projects, update_project};
