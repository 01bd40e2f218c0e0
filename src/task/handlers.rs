/**
 * Task Handlers
 *
 * - `POST /projects/{projectId}/tasks` - create (OWNER/ADMIN)
 * - `GET /projects/{projectId}/tasks` - paginated listing (any member)
 * - `PATCH /tasks/{taskId}/status` - transition (assignee or OWNER/ADMIN)
 * - `PATCH /tasks/{taskId}` - partial update (OWNER/ADMIN)
 * - `PATCH /tasks/{taskId}/assignee` - reassign (OWNER/ADMIN)
 * - `PATCH /tasks/{taskId}/delete` - soft delete (OWNER/ADMIN)
 * - `PATCH /tasks/{taskId}/restore` - restore (OWNER/ADMIN)
 *
 * Every task-scoped operation resolves task -> project -> workspace and
 * returns 404 when the task row is absent. Mutations write their activity
 * record in the same transaction.
 */

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::activity::db::{self as activity_db, actions, entities, NewActivity};
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::middleware::workspace_role::{require_membership, require_workspace_role, ADMIN_ROLES};
use crate::project::db::get_project;
use crate::project::handlers::MessageResponse;
use crate::task::db::{self, ListOptions, NewTask, TaskFilters, TaskRecord};
use crate::task::types::{
    CreateTaskRequest, DeadlineFilter, ReassignTaskRequest, TaskDetails, TaskListQuery,
    TaskListResponse, TaskResponse, TaskStatus, UpdateStatusRequest, UpdateTaskRequest,
};
use crate::workspace::db::get_membership;

const DEFAULT_PAGE: u32 = 1;
const DEFAULT_LIMIT: u32 = 10;
const MAX_LIMIT: u32 = 100;

/// Resolve a task and its workspace or fail with 404
async fn resolve_task(pool: &PgPool, task_id: Uuid) -> Result<TaskRecord, AppError> {
    db::get_task(pool, task_id)
        .await?
        .ok_or_else(|| AppError::not_found("Task not found"))
}

/// Fetch the expanded representation after a mutation
async fn fetch_details(pool: &PgPool, task_id: Uuid) -> Result<TaskDetails, AppError> {
    db::get_task_details(pool, task_id)
        .await?
        .ok_or(AppError::Internal)
}

/// Verify that a prospective assignee belongs to the workspace
async fn require_assignee_in_workspace(
    pool: &PgPool,
    assignee_id: Uuid,
    workspace_id: Uuid,
) -> Result<(), AppError> {
    get_membership(pool, assignee_id, workspace_id)
        .await?
        .ok_or_else(|| AppError::validation("Assignee does not belong to this workspace"))?;
    Ok(())
}

/// Create task handler (OWNER/ADMIN in the project's workspace)
pub async fn create_task(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(project_id): Path<Uuid>,
    Json(request): Json<CreateTaskRequest>,
) -> Result<(StatusCode, Json<TaskResponse>), AppError> {
    let project = get_project(&pool, project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))?;

    require_workspace_role(&pool, user.user_id, project.workspace_id, ADMIN_ROLES).await?;

    let title = request.title.trim();
    if title.is_empty() {
        return Err(AppError::validation("Task title is required"));
    }

    if let Some(assignee_id) = request.assignee_id {
        require_assignee_in_workspace(&pool, assignee_id, project.workspace_id).await?;
    }

    let mut tx = pool.begin().await?;

    let task_id = db::insert_task(
        &mut *tx,
        NewTask {
            title,
            description: request.description.as_deref(),
            priority: request.priority,
            project_id,
            assignee_id: request.assignee_id,
            created_by_id: user.user_id,
            deadline: request.deadline,
        },
    )
    .await?;
    activity_db::record(
        &mut *tx,
        NewActivity {
            action: actions::TASK_CREATED,
            entity_type: entities::TASK,
            entity_id: task_id,
            message: format!("Task \"{}\" created", title),
            user_id: user.user_id,
            workspace_id: project.workspace_id,
        },
    )
    .await?;

    tx.commit().await?;

    let task = fetch_details(&pool, task_id).await?;

    Ok((
        StatusCode::CREATED,
        Json(TaskResponse {
            message: "Task created successfully".to_string(),
            task,
        }),
    ))
}

/// List tasks handler (any member)
///
/// Page/limit pagination with exact-match status/assignee filters and the
/// deadline filter enum; the total is computed against the same filters.
pub async fn list_tasks(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(project_id): Path<Uuid>,
    Query(query): Query<TaskListQuery>,
) -> Result<Json<TaskListResponse>, AppError> {
    let project = get_project(&pool, project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))?;

    require_membership(&pool, user.user_id, project.workspace_id).await?;

    let status = match query.status.as_deref() {
        Some(s) => Some(
            TaskStatus::from_str(s).ok_or_else(|| AppError::validation("Invalid status value"))?,
        ),
        None => None,
    };
    let deadline = match query.filter.as_deref() {
        Some(f) => Some(
            DeadlineFilter::from_str(f)
                .ok_or_else(|| AppError::validation("Invalid filter value"))?,
        ),
        None => None,
    };

    let filters = TaskFilters {
        status,
        assignee_id: query.assignee_id,
        deadline,
    };

    let page = query.page.unwrap_or(DEFAULT_PAGE).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    // Widen before multiplying; page is client-supplied and u32 arithmetic
    // would overflow for large page numbers.
    let options = ListOptions {
        sort_column: db::sort_column(query.sort.as_deref().unwrap_or("createdAt")),
        ascending: query.order.as_deref() == Some("asc"),
        limit: i64::from(limit),
        offset: (i64::from(page) - 1) * i64::from(limit),
    };

    let tasks = db::list_tasks(&pool, project_id, &filters, &options).await?;
    let total = db::count_tasks(&pool, project_id, &filters).await?;

    Ok(Json(TaskListResponse {
        page,
        limit,
        total,
        tasks,
    }))
}

/// Status transition handler (assignee or OWNER/ADMIN)
pub async fn update_task_status(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(task_id): Path<Uuid>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let status = TaskStatus::from_str(&request.status)
        .ok_or_else(|| AppError::validation("Invalid status value"))?;

    let task = resolve_task(&pool, task_id).await?;

    let membership = require_membership(&pool, user.user_id, task.workspace_id).await?;
    let is_assignee = task.assignee_id == Some(user.user_id);
    let is_admin = ADMIN_ROLES.contains(&membership.role);
    if !is_assignee && !is_admin {
        return Err(AppError::forbidden("Not allowed to update task"));
    }

    let mut tx = pool.begin().await?;

    db::update_status(&mut *tx, task_id, status).await?;
    activity_db::record(
        &mut *tx,
        NewActivity {
            action: actions::TASK_STATUS_UPDATED,
            entity_type: entities::TASK,
            entity_id: task_id,
            message: format!("Task status changed to {}", status.as_str()),
            user_id: user.user_id,
            workspace_id: task.workspace_id,
        },
    )
    .await?;

    tx.commit().await?;

    let task = fetch_details(&pool, task_id).await?;

    Ok(Json(TaskResponse {
        message: "Task status updated".to_string(),
        task,
    }))
}

/// Field update handler (OWNER/ADMIN)
pub async fn update_task(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(task_id): Path<Uuid>,
    Json(request): Json<UpdateTaskRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let task = resolve_task(&pool, task_id).await?;

    require_workspace_role(&pool, user.user_id, task.workspace_id, ADMIN_ROLES).await?;

    let title = match request.title {
        Some(title) => {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(AppError::validation("Task title cannot be empty"));
            }
            title
        }
        None => task.title,
    };
    let description = match request.description {
        Some(description) => description,
        None => task.description,
    };
    let priority = request.priority.unwrap_or(task.priority);
    let deadline = match request.deadline {
        Some(deadline) => deadline,
        None => task.deadline,
    };

    let mut tx = pool.begin().await?;

    db::update_fields(
        &mut *tx,
        task_id,
        &title,
        description.as_deref(),
        priority,
        deadline,
    )
    .await?;
    activity_db::record(
        &mut *tx,
        NewActivity {
            action: actions::TASK_UPDATED,
            entity_type: entities::TASK,
            entity_id: task_id,
            message: format!("Task \"{}\" updated", title),
            user_id: user.user_id,
            workspace_id: task.workspace_id,
        },
    )
    .await?;

    tx.commit().await?;

    let task = fetch_details(&pool, task_id).await?;

    Ok(Json(TaskResponse {
        message: "Task updated successfully".to_string(),
        task,
    }))
}

/// Reassignment handler (OWNER/ADMIN); the target must belong to the
/// task's workspace.
pub async fn reassign_task(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(task_id): Path<Uuid>,
    Json(request): Json<ReassignTaskRequest>,
) -> Result<Json<TaskResponse>, AppError> {
    let task = resolve_task(&pool, task_id).await?;

    require_workspace_role(&pool, user.user_id, task.workspace_id, ADMIN_ROLES).await?;
    require_assignee_in_workspace(&pool, request.assignee_id, task.workspace_id).await?;

    let mut tx = pool.begin().await?;

    db::set_assignee(&mut *tx, task_id, request.assignee_id).await?;
    activity_db::record(
        &mut *tx,
        NewActivity {
            action: actions::TASK_REASSIGNED,
            entity_type: entities::TASK,
            entity_id: task_id,
            message: format!("Task reassigned to user {}", request.assignee_id),
            user_id: user.user_id,
            workspace_id: task.workspace_id,
        },
    )
    .await?;

    tx.commit().await?;

    let task = fetch_details(&pool, task_id).await?;

    Ok(Json(TaskResponse {
        message: "Task reassigned successfully".to_string(),
        task,
    }))
}

/// Soft-delete handler (OWNER/ADMIN)
pub async fn delete_task(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(task_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let task = resolve_task(&pool, task_id).await?;

    require_workspace_role(&pool, user.user_id, task.workspace_id, ADMIN_ROLES).await?;

    let mut tx = pool.begin().await?;

    db::set_deleted_at(&mut *tx, task_id, Some(Utc::now())).await?;
    activity_db::record(
        &mut *tx,
        NewActivity {
            action: actions::TASK_DELETED,
            entity_type: entities::TASK,
            entity_id: task_id,
            message: format!("Task \"{}\" deleted", task.title),
            user_id: user.user_id,
            workspace_id: task.workspace_id,
        },
    )
    .await?;

    tx.commit().await?;

    Ok(Json(MessageResponse {
        message: "Task deleted successfully".to_string(),
    }))
}

/// Restore handler (OWNER/ADMIN); clears the soft-delete timestamp
pub async fn restore_task(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(task_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let task = resolve_task(&pool, task_id).await?;

    require_workspace_role(&pool, user.user_id, task.workspace_id, ADMIN_ROLES).await?;

    let mut tx = pool.begin().await?;

    db::set_deleted_at(&mut *tx, task_id, None).await?;
    activity_db::record(
        &mut *tx,
        NewActivity {
            action: actions::TASK_RESTORED,
            entity_type: entities::TASK,
            entity_id: task_id,
            message: format!("Task \"{}\" restored", task.title),
            user_id: user.user_id,
            workspace_id: task.workspace_id,
        },
    )
    .await?;

    tx.commit().await?;

    Ok(Json(MessageResponse {
        message: "Task restored successfully".to_string(),
    }))
}
