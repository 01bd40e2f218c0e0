/**
 * Workspace Handlers
 *
 * - `POST /workspaces` - create workspace, enrolling the creator as OWNER
 * - `GET /workspaces/my` - list the caller's workspaces with roles
 * - `POST /workspaces/{workspaceId}/invite` - invite a member (OWNER/ADMIN)
 * - `GET /workspaces/{workspaceId}/dashboard` - statistics snapshot
 *
 * Workspace creation and invitations are transactional: the workspace and
 * its OWNER membership (or the membership check and insert) succeed or
 * fail together, with the activity record in the same transaction. The
 * invitation email is sent after commit, best effort.
 */

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::activity::db::{self as activity_db, actions, entities, NewActivity};
use crate::auth::users::get_user_by_email;
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::middleware::workspace_role::{require_membership, require_workspace_role, ADMIN_ROLES};
use crate::server::state::AppState;
use crate::workspace::db::{
    self, count_members, count_projects, count_tasks, get_membership, task_status_overview, Role,
    StatusOverview, Workspace, WorkspaceWithRole,
};

#[derive(Debug, Deserialize)]
pub struct CreateWorkspaceRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CreateWorkspaceResponse {
    pub message: String,
    pub workspace: Workspace,
}

#[derive(Debug, Serialize)]
pub struct MyWorkspacesResponse {
    pub workspaces: Vec<WorkspaceWithRole>,
}

/// Invite request body
///
/// The role arrives as a string and is validated against the closed role
/// set in the handler, so a bad value yields a 400 rather than a decode
/// error.
#[derive(Debug, Deserialize)]
pub struct InviteRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub role: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteResponse {
    pub message: String,
    /// False when the invitation email could not be sent; the membership
    /// still stands.
    pub email_sent: bool,
}

/// Dashboard headline counters
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub projects: i64,
    pub tasks: i64,
    pub members: i64,
    pub completion_rate: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub stats: DashboardStats,
    pub overview: StatusOverview,
}

/// Completion rate as a rounded percentage; 0 for an empty task set
pub(crate) fn completion_rate(done: i64, total: i64) -> i64 {
    if total == 0 {
        0
    } else {
        ((done as f64 / total as f64) * 100.0).round() as i64
    }
}

/// Create workspace handler
///
/// Requires only authentication. The workspace row and the creator's OWNER
/// membership are inserted in one transaction.
pub async fn create_workspace(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Json(request): Json<CreateWorkspaceRequest>,
) -> Result<(StatusCode, Json<CreateWorkspaceResponse>), AppError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Err(AppError::validation("Workspace name is required"));
    }

    let mut tx = pool.begin().await?;

    let workspace = db::insert_workspace(&mut *tx, name).await?;
    db::insert_membership(&mut *tx, user.user_id, workspace.id, Role::Owner).await?;
    activity_db::record(
        &mut *tx,
        NewActivity {
            action: actions::WORKSPACE_CREATED,
            entity_type: entities::WORKSPACE,
            entity_id: workspace.id,
            message: format!("Workspace \"{}\" created", workspace.name),
            user_id: user.user_id,
            workspace_id: workspace.id,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(
        "Workspace {} created by user {}",
        workspace.id,
        user.user_id
    );

    Ok((
        StatusCode::CREATED,
        Json(CreateWorkspaceResponse {
            message: "Workspace created successfully".to_string(),
            workspace,
        }),
    ))
}

/// List the caller's workspaces, oldest first, annotated with their role
pub async fn my_workspaces(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
) -> Result<Json<MyWorkspacesResponse>, AppError> {
    let workspaces = db::list_workspaces_for_user(&pool, user.user_id).await?;
    Ok(Json(MyWorkspacesResponse { workspaces }))
}

/// Invite a user to a workspace
///
/// Requires OWNER or ADMIN. The membership insert is transactional with a
/// duplicate check; concurrent duplicate invites are resolved by the
/// unique index on (user_id, workspace_id). The invitation email is sent
/// after commit and its failure does not fail the request.
pub async fn invite_user(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(workspace_id): Path<Uuid>,
    Json(request): Json<InviteRequest>,
) -> Result<Json<InviteResponse>, AppError> {
    let pool = &state.pool;

    require_workspace_role(pool, user.user_id, workspace_id, ADMIN_ROLES).await?;

    if request.email.trim().is_empty() || request.role.trim().is_empty() {
        return Err(AppError::validation("Email and role are required"));
    }
    let role =
        Role::from_str(&request.role).ok_or_else(|| AppError::validation("Invalid role value"))?;

    let invitee = get_user_by_email(pool, &request.email)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    // Email content needs the workspace and inviter names; fetched up
    // front so that once the membership commits, nothing can fail the
    // request anymore.
    let workspace = db::get_workspace(pool, workspace_id).await?;
    let inviter = crate::auth::users::get_user_by_id(pool, user.user_id).await?;

    let mut tx = pool.begin().await?;

    if get_membership(&mut *tx, invitee.id, workspace_id)
        .await?
        .is_some()
    {
        return Err(AppError::conflict(
            "User is already a member of this workspace",
        ));
    }

    let membership = db::insert_membership(&mut *tx, invitee.id, workspace_id, role).await?;
    activity_db::record(
        &mut *tx,
        NewActivity {
            action: actions::MEMBER_INVITED,
            entity_type: entities::MEMBER,
            entity_id: membership.id,
            message: format!("{} invited as {}", invitee.email, role.as_str()),
            user_id: user.user_id,
            workspace_id,
        },
    )
    .await?;

    tx.commit().await?;

    // Delivery is best effort; the membership stands even when the email
    // cannot be sent.
    let email_sent = match (&state.mailer, workspace, inviter) {
        (Some(mailer), Some(workspace), Some(inviter)) => {
            match mailer
                .send_invitation(&invitee.email, &inviter.name, &inviter.email, &workspace.name)
                .await
            {
                Ok(()) => true,
                Err(e) => {
                    tracing::warn!("Invitation email to {} failed: {:?}", invitee.email, e);
                    false
                }
            }
        }
        (None, _, _) => {
            tracing::debug!("No mailer configured, skipping invitation email");
            false
        }
        _ => false,
    };

    Ok(Json(InviteResponse {
        message: "User invited successfully".to_string(),
        email_sent,
    }))
}

/// Dashboard handler
///
/// Any member may view. Returns a single snapshot of project/task/member
/// counts, the per-status task distribution, and the completion rate.
pub async fn dashboard(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(workspace_id): Path<Uuid>,
) -> Result<Json<DashboardResponse>, AppError> {
    require_membership(&pool, user.user_id, workspace_id).await?;

    let projects = count_projects(&pool, workspace_id).await?;
    let tasks = count_tasks(&pool, workspace_id).await?;
    let members = count_members(&pool, workspace_id).await?;
    let overview = task_status_overview(&pool, workspace_id).await?;

    Ok(Json(DashboardResponse {
        stats: DashboardStats {
            projects,
            tasks,
            members,
            completion_rate: completion_rate(overview.done, tasks),
        },
        overview,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_rate_empty() {
        assert_eq!(completion_rate(0, 0), 0);
    }

    #[test]
    fn test_completion_rate_half() {
        assert_eq!(completion_rate(2, 4), 50);
    }

    #[test]
    fn test_completion_rate_rounds() {
        assert_eq!(completion_rate(1, 3), 33);
        assert_eq!(completion_rate(2, 3), 67);
        assert_eq!(completion_rate(3, 3), 100);
    }
}
