/**
 * Task Types
 *
 * Status/priority enums, deadline filters, and the request/response types
 * for the task handlers.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::users::UserSummary;
use crate::serde_helpers::double_option;

/// Task state. Transitions are free-form in both directions; `completed_at`
/// is derived from entering or leaving `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "TODO",
            TaskStatus::InProgress => "IN_PROGRESS",
            TaskStatus::Done => "DONE",
        }
    }

    pub fn from_str(s: &str) -> Option<TaskStatus> {
        match s {
            "TODO" => Some(TaskStatus::Todo),
            "IN_PROGRESS" => Some(TaskStatus::InProgress),
            "DONE" => Some(TaskStatus::Done),
            _ => None,
        }
    }
}

/// Task priority, defaulting to `Medium`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "LOW",
            TaskPriority::Medium => "MEDIUM",
            TaskPriority::High => "HIGH",
        }
    }

    pub fn from_str(s: &str) -> Option<TaskPriority> {
        match s {
            "LOW" => Some(TaskPriority::Low),
            "MEDIUM" => Some(TaskPriority::Medium),
            "HIGH" => Some(TaskPriority::High),
            _ => None,
        }
    }
}

/// Deadline filter layered on top of the exact-match task filters
///
/// - `Overdue`: deadline strictly before now AND status != DONE
/// - `DueToday`: deadline within today's bounds
/// - `Upcoming`: deadline strictly after now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineFilter {
    Overdue,
    DueToday,
    Upcoming,
}

impl DeadlineFilter {
    pub fn from_str(s: &str) -> Option<DeadlineFilter> {
        match s {
            "overdue" => Some(DeadlineFilter::Overdue),
            "due_today" => Some(DeadlineFilter::DueToday),
            "upcoming" => Some(DeadlineFilter::Upcoming),
            _ => None,
        }
    }
}

/// Project projection embedded in task expansions
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectSummary {
    pub id: Uuid,
    pub name: String,
    pub workspace_id: Uuid,
    pub created_by: Option<UserSummary>,
}

/// A task with its creator, assignee, and project expanded
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetails {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub project_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub created_by_id: Uuid,
    pub deadline: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: UserSummary,
    pub assignee: Option<UserSummary>,
    pub project: ProjectSummary,
}

/// Create-task request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub title: String,
    pub description: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    pub assignee_id: Option<Uuid>,
    pub deadline: Option<DateTime<Utc>>,
}

/// Partial task update; `description`/`deadline` accept explicit null to
/// clear the value.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "double_option")]
    pub deadline: Option<Option<DateTime<Utc>>>,
}

/// Status-transition request body; validated against the closed status set
/// in the handler so a bad value yields a 400 rather than a decode error.
#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// Reassignment request body
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReassignTaskRequest {
    pub assignee_id: Uuid,
}

/// Query parameters for the project task listing
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub status: Option<String>,
    pub assignee_id: Option<Uuid>,
    pub sort: Option<String>,
    pub order: Option<String>,
    pub filter: Option<String>,
}

/// Task mutation response
#[derive(Debug, Serialize)]
pub struct TaskResponse {
    pub message: String,
    pub task: TaskDetails,
}

/// Paginated task listing response
#[derive(Debug, Serialize)]
pub struct TaskListResponse {
    pub page: u32,
    pub limit: u32,
    pub total: i64,
    pub tasks: Vec<TaskDetails>,
}
