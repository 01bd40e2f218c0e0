//! Tasks
//!
//! The most stateful module: task CRUD, status transitions with derived
//! `completed_at`, reassignment, soft delete/restore, and the paginated,
//! filterable project task listing.

pub mod db;
pub mod handlers;
pub mod types;

pub use handlers::{
    create_task, delete_task, list_tasks, reassign_task, restore_task, update_task,
    update_task_status,
};
pub use types::{DeadlineFilter, TaskPriority, TaskStatus};
