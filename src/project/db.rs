/**
 * Project Database Operations
 */

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

/// Project row
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub workspace_id: Uuid,
    pub created_by_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

const PROJECT_COLUMNS: &str =
    "id, name, description, workspace_id, created_by_id, created_at, updated_at, deleted_at";

/// Insert a new project
pub async fn insert_project<'e>(
    executor: impl PgExecutor<'e>,
    name: &str,
    description: Option<&str>,
    workspace_id: Uuid,
    created_by_id: Uuid,
) -> Result<Project, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, Project>(&format!(
        r#"
        INSERT INTO projects (id, name, description, workspace_id, created_by_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING {PROJECT_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .bind(workspace_id)
    .bind(created_by_id)
    .bind(now)
    .bind(now)
    .fetch_one(executor)
    .await
}

/// Get a project by ID (including soft-deleted projects)
pub async fn get_project(pool: &PgPool, id: Uuid) -> Result<Option<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(&format!(
        r#"
        SELECT {PROJECT_COLUMNS} FROM projects WHERE id = $1
        "#
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// List a workspace's non-deleted projects, newest first
pub async fn list_projects(
    pool: &PgPool,
    workspace_id: Uuid,
) -> Result<Vec<Project>, sqlx::Error> {
    sqlx::query_as::<_, Project>(&format!(
        r#"
        SELECT {PROJECT_COLUMNS} FROM projects
        WHERE workspace_id = $1 AND deleted_at IS NULL
        ORDER BY created_at DESC
        "#
    ))
    .bind(workspace_id)
    .fetch_all(pool)
    .await
}

/// Update a project's name and description
pub async fn update_project<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    name: &str,
    description: Option<&str>,
) -> Result<Project, sqlx::Error> {
    sqlx::query_as::<_, Project>(&format!(
        r#"
        UPDATE projects
        SET name = $1, description = $2, updated_at = $3
        WHERE id = $4
        RETURNING {PROJECT_COLUMNS}
        "#
    ))
    .bind(name)
    .bind(description)
    .bind(Utc::now())
    .bind(id)
    .fetch_one(executor)
    .await
}

/// Set or clear a project's soft-delete timestamp
pub async fn set_deleted_at<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    deleted_at: Option<DateTime<Utc>>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE projects SET deleted_at = $1, updated_at = $2 WHERE id = $3
        "#,
    )
    .bind(deleted_at)
    .bind(Utc::now())
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}
