/**
 * Workspace Role Guard
 *
 * Per-workspace authorization checks, parameterized by an allow-list of
 * roles. Handlers call these after authentication to verify the caller's
 * membership and role before touching workspace-scoped resources.
 */

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;
use crate::workspace::db::{get_membership, Role, WorkspaceMember};

/// Roles allowed to perform administrative operations
pub const ADMIN_ROLES: &[Role] = &[Role::Owner, Role::Admin];

/// Require that the user is a member of the workspace, with any role
///
/// # Errors
///
/// * `403 Forbidden` - caller is not a member of the workspace
pub async fn require_membership(
    pool: &PgPool,
    user_id: Uuid,
    workspace_id: Uuid,
) -> Result<WorkspaceMember, AppError> {
    get_membership(pool, user_id, workspace_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!(
                "User {} is not a member of workspace {}",
                user_id,
                workspace_id
            );
            AppError::forbidden("You are not a member of this workspace")
        })
}

/// Require that the user holds one of the allowed roles in the workspace
///
/// On success returns the membership so handlers can apply further
/// branching (e.g. assignee-or-admin rules).
///
/// # Errors
///
/// * `403 Forbidden` - not a member, or member with an insufficient role
pub async fn require_workspace_role(
    pool: &PgPool,
    user_id: Uuid,
    workspace_id: Uuid,
    allowed: &[Role],
) -> Result<WorkspaceMember, AppError> {
    let membership = require_membership(pool, user_id, workspace_id).await?;

    if !allowed.contains(&membership.role) {
        tracing::warn!(
            "User {} has role {} in workspace {}, required one of {:?}",
            user_id,
            membership.role.as_str(),
            workspace_id,
            allowed
        );
        return Err(AppError::forbidden(format!(
            "Insufficient permissions: your role is {}, required one of {}",
            membership.role.as_str(),
            allowed
                .iter()
                .map(|r| r.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        )));
    }

    Ok(membership)
}
