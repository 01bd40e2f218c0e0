/**
 * Activity Log Database Operations
 *
 * Append-only audit records. Rows are inserted alongside each mutation
 * (sharing its transaction) and are never updated or deleted.
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool, Row};
use uuid::Uuid;

use crate::auth::users::UserSummary;

/// Action codes recorded in the audit trail
pub mod actions {
    pub const WORKSPACE_CREATED: &str = "WORKSPACE_CREATED";
    pub const MEMBER_INVITED: &str = "MEMBER_INVITED";
    pub const PROJECT_CREATED: &str = "PROJECT_CREATED";
    pub const PROJECT_UPDATED: &str = "PROJECT_UPDATED";
    pub const PROJECT_DELETED: &str = "PROJECT_DELETED";
    pub const TASK_CREATED: &str = "TASK_CREATED";
    pub const TASK_STATUS_UPDATED: &str = "TASK_STATUS_UPDATED";
    pub const TASK_UPDATED: &str = "TASK_UPDATED";
    pub const TASK_REASSIGNED: &str = "TASK_REASSIGNED";
    pub const TASK_DELETED: &str = "TASK_DELETED";
    pub const TASK_RESTORED: &str = "TASK_RESTORED";
}

/// Entity types recorded in the audit trail
pub mod entities {
    pub const WORKSPACE: &str = "WORKSPACE";
    pub const MEMBER: &str = "MEMBER";
    pub const PROJECT: &str = "PROJECT";
    pub const TASK: &str = "TASK";
}

/// A new audit record to append
#[derive(Debug, Clone)]
pub struct NewActivity {
    pub action: &'static str,
    pub entity_type: &'static str,
    pub entity_id: Uuid,
    pub message: String,
    pub user_id: Uuid,
    pub workspace_id: Uuid,
}

/// An audit entry with the acting user expanded, as returned by listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityEntry {
    pub id: Uuid,
    pub action: String,
    pub entity_type: String,
    pub entity_id: Uuid,
    pub message: String,
    pub user_id: Uuid,
    pub workspace_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub user: UserSummary,
}

/// Append an audit record
///
/// Takes any executor so it can join the caller's transaction.
pub async fn record<'e>(
    executor: impl PgExecutor<'e>,
    entry: NewActivity,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO activity_logs (id, action, entity_type, entity_id, message, user_id, workspace_id, created_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(entry.action)
    .bind(entry.entity_type)
    .bind(entry.entity_id)
    .bind(&entry.message)
    .bind(entry.user_id)
    .bind(entry.workspace_id)
    .bind(Utc::now())
    .execute(executor)
    .await?;

    Ok(())
}

/// List the most recent audit entries for a workspace, newest first, with
/// the acting user's id and name expanded
pub async fn list_for_workspace(
    pool: &PgPool,
    workspace_id: Uuid,
    limit: i64,
) -> Result<Vec<ActivityEntry>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT a.id, a.action, a.entity_type, a.entity_id, a.message,
               a.user_id, a.workspace_id, a.created_at, u.name AS user_name
        FROM activity_logs a
        JOIN users u ON u.id = a.user_id
        WHERE a.workspace_id = $1
        ORDER BY a.created_at DESC
        LIMIT $2
        "#,
    )
    .bind(workspace_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| ActivityEntry {
            id: row.get("id"),
            action: row.get("action"),
            entity_type: row.get("entity_type"),
            entity_id: row.get("entity_id"),
            message: row.get("message"),
            user_id: row.get("user_id"),
            workspace_id: row.get("workspace_id"),
            created_at: row.get("created_at"),
            user: UserSummary {
                id: row.get("user_id"),
                name: row.get("user_name"),
            },
        })
        .collect())
}

/// Count audit entries for a workspace (used by tests to assert the
/// one-row-per-mutation invariant)
pub async fn count_for_workspace(pool: &PgPool, workspace_id: Uuid) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        r#"
        SELECT COUNT(*) FROM activity_logs WHERE workspace_id = $1
        "#,
    )
    .bind(workspace_id)
    .fetch_one(pool)
    .await
}
