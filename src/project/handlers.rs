/**
 * Project Handlers
 *
 * - `POST /workspaces/{workspaceId}/projects` - create (OWNER/ADMIN)
 * - `GET /workspaces/{workspaceId}/projects` - list (any member)
 * - `PATCH /projects/{projectId}` - partial update (OWNER/ADMIN)
 * - `PATCH /projects/{projectId}/delete` - soft delete (OWNER/ADMIN)
 *
 * Operations addressed by project id resolve the owning workspace first
 * and 404 when the project does not exist. Soft-deleting a project does
 * not cascade to its tasks.
 */

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::activity::db::{self as activity_db, actions, entities, NewActivity};
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::middleware::workspace_role::{require_membership, require_workspace_role, ADMIN_ROLES};
use crate::project::db::{self, Project};
use crate::serde_helpers::double_option;

#[derive(Debug, Deserialize)]
pub struct CreateProjectRequest {
    pub name: String,
    pub description: Option<String>,
}

/// Partial update: absent fields stay unchanged; `description: null`
/// clears the description.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateProjectRequest {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub message: String,
    pub project: Project,
}

#[derive(Debug, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<Project>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Create project handler (OWNER/ADMIN)
pub async fn create_project(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(workspace_id): Path<Uuid>,
    Json(request): Json<CreateProjectRequest>,
) -> Result<(StatusCode, Json<ProjectResponse>), AppError> {
    require_workspace_role(&pool, user.user_id, workspace_id, ADMIN_ROLES).await?;

    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Project name is required"));
    }

    let mut tx = pool.begin().await?;

    let project = db::insert_project(
        &mut *tx,
        name,
        request.description.as_deref(),
        workspace_id,
        user.user_id,
    )
    .await?;
    activity_db::record(
        &mut *tx,
        NewActivity {
            action: actions::PROJECT_CREATED,
            entity_type: entities::PROJECT,
            entity_id: project.id,
            message: format!("Project \"{}\" created", project.name),
            user_id: user.user_id,
            workspace_id,
        },
    )
    .await?;

    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(ProjectResponse {
            message: "Project created successfully".to_string(),
            project,
        }),
    ))
}

/// List projects handler (any member); excludes soft-deleted projects
pub async fn list_projects(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(workspace_id): Path<Uuid>,
) -> Result<Json<ProjectListResponse>, AppError> {
    require_membership(&pool, user.user_id, workspace_id).await?;

    let projects = db::list_projects(&pool, workspace_id).await?;
    Ok(Json(ProjectListResponse { projects }))
}

/// Update project handler (OWNER/ADMIN in the project's workspace)
pub async fn update_project(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(project_id): Path<Uuid>,
    Json(request): Json<UpdateProjectRequest>,
) -> Result<Json<ProjectResponse>, AppError> {
    let project = db::get_project(&pool, project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))?;

    require_workspace_role(&pool, user.user_id, project.workspace_id, ADMIN_ROLES).await?;

    let name = match request.name {
        Some(name) => {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(AppError::validation("Project name cannot be empty"));
            }
            name
        }
        None => project.name,
    };
    let description = match request.description {
        Some(description) => description,
        None => project.description,
    };

    let mut tx = pool.begin().await?;

    let updated = db::update_project(&mut *tx, project_id, &name, description.as_deref()).await?;
    activity_db::record(
        &mut *tx,
        NewActivity {
            action: actions::PROJECT_UPDATED,
            entity_type: entities::PROJECT,
            entity_id: updated.id,
            message: format!("Project \"{}\" updated", updated.name),
            user_id: user.user_id,
            workspace_id: updated.workspace_id,
        },
    )
    .await?;

    tx.commit().await?;

    Ok(Json(ProjectResponse {
        message: "Project updated successfully".to_string(),
        project: updated,
    }))
}

/// Soft-delete project handler (OWNER/ADMIN)
pub async fn delete_project(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(project_id): Path<Uuid>,
) -> Result<Json<MessageResponse>, AppError> {
    let project = db::get_project(&pool, project_id)
        .await?
        .ok_or_else(|| AppError::not_found("Project not found"))?;

    require_workspace_role(&pool, user.user_id, project.workspace_id, ADMIN_ROLES).await?;

    let mut tx = pool.begin().await?;

    db::set_deleted_at(&mut *tx, project_id, Some(Utc::now())).await?;
    activity_db::record(
        &mut *tx,
        NewActivity {
            action: actions::PROJECT_DELETED,
            entity_type: entities::PROJECT,
            entity_id: project.id,
            message: format!("Project \"{}\" deleted", project.name),
            user_id: user.user_id,
            workspace_id: project.workspace_id,
        },
    )
    .await?;

    tx.commit().await?;

    Ok(Json(MessageResponse {
        message: "Project deleted successfully".to_string(),
    }))
}
