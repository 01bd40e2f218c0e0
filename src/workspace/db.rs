/**
 * Workspace and Membership Database Operations
 *
 * This module contains database operations for workspaces, workspace
 * memberships, and the dashboard aggregation queries.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool, Row};
use uuid::Uuid;

/// Workspace-scoped role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Owner,
    Admin,
    Member,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "OWNER",
            Role::Admin => "ADMIN",
            Role::Member => "MEMBER",
        }
    }

    pub fn from_str(s: &str) -> Option<Role> {
        match s {
            "OWNER" => Some(Role::Owner),
            "ADMIN" => Some(Role::Admin),
            "MEMBER" => Some(Role::Member),
            _ => None,
        }
    }
}

/// Workspace row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Membership row joining a user to a workspace with a role
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceMember {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workspace_id: Uuid,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// A workspace annotated with the caller's role, for the "my workspaces"
/// listing
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceWithRole {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub joined_at: DateTime<Utc>,
}

/// Per-status task counts for the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusOverview {
    #[serde(rename = "TODO")]
    pub todo: i64,
    #[serde(rename = "IN_PROGRESS")]
    pub in_progress: i64,
    #[serde(rename = "DONE")]
    pub done: i64,
}

fn member_from_row(row: &sqlx::postgres::PgRow) -> WorkspaceMember {
    WorkspaceMember {
        id: row.get("id"),
        user_id: row.get("user_id"),
        workspace_id: row.get("workspace_id"),
        role: Role::from_str(row.get::<String, _>("role").as_str()).unwrap_or(Role::Member),
        created_at: row.get("created_at"),
    }
}

/// Insert a new workspace
pub async fn insert_workspace<'e>(
    executor: impl PgExecutor<'e>,
    name: &str,
) -> Result<Workspace, sqlx::Error> {
    let workspace = sqlx::query_as::<_, Workspace>(
        r#"
        INSERT INTO workspaces (id, name, created_at)
        VALUES ($1, $2, $3)
        RETURNING id, name, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

    Ok(workspace)
}

/// Get a workspace by ID
pub async fn get_workspace(pool: &PgPool, id: Uuid) -> Result<Option<Workspace>, sqlx::Error> {
    sqlx::query_as::<_, Workspace>(
        r#"
        SELECT id, name, created_at
        FROM workspaces
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Insert a membership row
///
/// Fails with a unique violation if the (user, workspace) pair already
/// exists; callers translate that into a Conflict.
pub async fn insert_membership<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    workspace_id: Uuid,
    role: Role,
) -> Result<WorkspaceMember, sqlx::Error> {
    let row = sqlx::query(
        r#"
        INSERT INTO workspace_users (id, user_id, workspace_id, role, created_at)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, user_id, workspace_id, role, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(workspace_id)
    .bind(role.as_str())
    .bind(Utc::now())
    .fetch_one(executor)
    .await?;

    Ok(member_from_row(&row))
}

/// Look up the unique membership row for (user, workspace)
pub async fn get_membership<'e>(
    executor: impl PgExecutor<'e>,
    user_id: Uuid,
    workspace_id: Uuid,
) -> Result<Option<WorkspaceMember>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT id, user_id, workspace_id, role, created_at
        FROM workspace_users
        WHERE user_id = $1 AND workspace_id = $2
        "#,
    )
    .bind(user_id)
    .bind(workspace_id)
    .fetch_optional(executor)
    .await?;

    Ok(row.as_ref().map(member_from_row))
}

/// List the workspaces a user belongs to, oldest first, annotated with the
/// user's role
pub async fn list_workspaces_for_user(
    pool: &PgPool,
    user_id: Uuid,
) -> Result<Vec<WorkspaceWithRole>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT w.id, w.name, w.created_at, wu.role, wu.created_at AS joined_at
        FROM workspaces w
        JOIN workspace_users wu ON wu.workspace_id = w.id
        WHERE wu.user_id = $1
        ORDER BY w.created_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| WorkspaceWithRole {
            id: row.get("id"),
            name: row.get("name"),
            role: Role::from_str(row.get::<String, _>("role").as_str()).unwrap_or(Role::Member),
            created_at: row.get("created_at"),
            joined_at: row.get("joined_at"),
        })
        .collect())
}

/// Count non-deleted projects in a workspace
pub async fn count_projects(pool: &PgPool, workspace_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM projects
        WHERE workspace_id = $1 AND deleted_at IS NULL
        "#,
    )
    .bind(workspace_id)
    .fetch_one(pool)
    .await
}

/// Count non-deleted tasks belonging to a workspace's projects
pub async fn count_tasks(pool: &PgPool, workspace_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM tasks t
        JOIN projects p ON p.id = t.project_id
        WHERE p.workspace_id = $1 AND t.deleted_at IS NULL
        "#,
    )
    .bind(workspace_id)
    .fetch_one(pool)
    .await
}

/// Count workspace members
pub async fn count_members(pool: &PgPool, workspace_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM workspace_users
        WHERE workspace_id = $1
        "#,
    )
    .bind(workspace_id)
    .fetch_one(pool)
    .await
}

/// Per-status counts of a workspace's non-deleted tasks
///
/// Statuses with no tasks default to 0.
pub async fn task_status_overview(
    pool: &PgPool,
    workspace_id: Uuid,
) -> Result<StatusOverview, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT t.status, COUNT(*) AS count
        FROM tasks t
        JOIN projects p ON p.id = t.project_id
        WHERE p.workspace_id = $1 AND t.deleted_at IS NULL
        GROUP BY t.status
        "#,
    )
    .bind(workspace_id)
    .fetch_all(pool)
    .await?;

    let mut overview = StatusOverview::default();
    for row in rows {
        let count: i64 = row.get("count");
        match row.get::<String, _>("status").as_str() {
            "TODO" => overview.todo = count,
            "IN_PROGRESS" => overview.in_progress = count,
            "DONE" => overview.done = count,
            other => tracing::warn!("Unknown task status in database: {}", other),
        }
    }

    Ok(overview)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [Role::Owner, Role::Admin, Role::Member] {
            assert_eq!(Role::from_str(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_str("SUPERUSER"), None);
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Owner).unwrap(), "\"OWNER\"");
        let role: Role = serde_json::from_str("\"IN\"").unwrap_or(Role::Member);
        assert_eq!(role, Role::Member);
    }

    #[test]
    fn test_status_overview_defaults() {
        let overview = StatusOverview::default();
        assert_eq!(overview.todo, 0);
        assert_eq!(overview.in_progress, 0);
        assert_eq!(overview.done, 0);
    }
}
