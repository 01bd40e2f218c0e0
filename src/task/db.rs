/**
 * Task Database Operations
 *
 * Inserts, lookups with workspace resolution, the dynamic filtered listing
 * (pagination + exact-match + deadline filters), and the field/status/
 * assignee/soft-delete updates.
 */

use chrono::{DateTime, Duration, NaiveTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgExecutor, PgPool, Postgres, QueryBuilder, Row};
use uuid::Uuid;

use crate::auth::users::UserSummary;
use crate::task::types::{DeadlineFilter, ProjectSummary, TaskDetails, TaskPriority, TaskStatus};

/// A task row joined with its project's workspace id, used for
/// authorization and state checks before mutating.
#[derive(Debug, Clone)]
pub struct TaskRecord {
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
    pub workspace_id: Uuid,
}

/// Fields for a new task
#[derive(Debug)]
pub struct NewTask<'a> {
    pub title: &'a str,
    pub description: Option<&'a str>,
    pub priority: TaskPriority,
    pub project_id: Uuid,
    pub assignee_id: Option<Uuid>,
    pub created_by_id: Uuid,
    pub deadline: Option<DateTime<Utc>>,
}

/// Filters applied to the task listing; `deleted_at IS NULL` always holds.
#[derive(Debug, Default)]
pub struct TaskFilters {
    pub status: Option<TaskStatus>,
    pub assignee_id: Option<Uuid>,
    pub deadline: Option<DeadlineFilter>,
}

/// Sort/pagination options for the task listing
#[derive(Debug)]
pub struct ListOptions {
    pub sort_column: &'static str,
    pub ascending: bool,
    pub limit: i64,
    pub offset: i64,
}

/// Map a client sort key to a whitelisted column; unknown keys fall back
/// to creation time.
pub fn sort_column(sort: &str) -> &'static str {
    match sort {
        "createdAt" => "t.created_at",
        "updatedAt" => "t.updated_at",
        "deadline" => "t.deadline",
        "priority" => "t.priority",
        "title" => "t.title",
        "status" => "t.status",
        _ => "t.created_at",
    }
}

const DETAILS_SELECT: &str = r#"
SELECT t.id, t.title, t.description, t.status, t.priority,
       t.project_id, t.assignee_id, t.created_by_id,
       t.deadline, t.completed_at, t.deleted_at, t.created_at, t.updated_at,
       cb.name AS created_by_name,
       a.name AS assignee_name,
       p.name AS project_name,
       p.workspace_id AS project_workspace_id,
       p.created_by_id AS project_created_by_id,
       pc.name AS project_created_by_name
FROM tasks t
JOIN projects p ON p.id = t.project_id
JOIN users cb ON cb.id = t.created_by_id
LEFT JOIN users a ON a.id = t.assignee_id
LEFT JOIN users pc ON pc.id = p.created_by_id
"#;

fn details_from_row(row: &PgRow) -> TaskDetails {
    let created_by_id: Uuid = row.get("created_by_id");
    let assignee_id: Option<Uuid> = row.get("assignee_id");
    let project_created_by_id: Option<Uuid> = row.get("project_created_by_id");
    let project_created_by_name: Option<String> = row.get("project_created_by_name");

    TaskDetails {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        status: TaskStatus::from_str(row.get::<String, _>("status").as_str())
            .unwrap_or(TaskStatus::Todo),
        priority: TaskPriority::from_str(row.get::<String, _>("priority").as_str())
            .unwrap_or(TaskPriority::Medium),
        project_id: row.get("project_id"),
        assignee_id,
        created_by_id,
        deadline: row.get("deadline"),
        completed_at: row.get("completed_at"),
        deleted_at: row.get("deleted_at"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
        created_by: UserSummary {
            id: created_by_id,
            name: row.get("created_by_name"),
        },
        assignee: assignee_id.map(|id| UserSummary {
            id,
            name: row.get::<Option<String>, _>("assignee_name").unwrap_or_default(),
        }),
        project: ProjectSummary {
            id: row.get("project_id"),
            name: row.get("project_name"),
            workspace_id: row.get("project_workspace_id"),
            created_by: project_created_by_id.zip(project_created_by_name).map(
                |(id, name)| UserSummary { id, name },
            ),
        },
    }
}

fn record_from_row(row: &PgRow) -> TaskRecord {
    TaskRecord {
        id: row.get("id"),
        title: row.get("title"),
        description: row.get("description"),
        status: TaskStatus::from_str(row.get::<String, _>("status").as_str())
            .unwrap_or(TaskStatus::Todo),
        priority: TaskPriority::from_str(row.get::<String, _>("priority").as_str())
            .unwrap_or(TaskPriority::Medium),
        project_id: row.get("project_id"),
        assignee_id: row.get("assignee_id"),
        created_by_id: row.get("created_by_id"),
        deadline: row.get("deadline"),
        completed_at: row.get("completed_at"),
        deleted_at: row.get("deleted_at"),
        workspace_id: row.get("workspace_id"),
    }
}

/// Insert a new task, returning its id
pub async fn insert_task<'e>(
    executor: impl PgExecutor<'e>,
    task: NewTask<'_>,
) -> Result<Uuid, sqlx::Error> {
    let id = Uuid::new_v4();
    let now = Utc::now();

    sqlx::query(
        r#"
        INSERT INTO tasks (id, title, description, status, priority, project_id,
                           assignee_id, created_by_id, deadline, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        "#,
    )
    .bind(id)
    .bind(task.title)
    .bind(task.description)
    .bind(TaskStatus::Todo.as_str())
    .bind(task.priority.as_str())
    .bind(task.project_id)
    .bind(task.assignee_id)
    .bind(task.created_by_id)
    .bind(task.deadline)
    .bind(now)
    .bind(now)
    .execute(executor)
    .await?;

    Ok(id)
}

/// Resolve a task and its workspace (task -> project -> workspace)
///
/// Returns soft-deleted tasks too; direct id lookup keeps working after a
/// soft delete.
pub async fn get_task(pool: &PgPool, id: Uuid) -> Result<Option<TaskRecord>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT t.id, t.title, t.description, t.status, t.priority, t.project_id,
               t.assignee_id, t.created_by_id, t.deadline, t.completed_at,
               t.deleted_at, p.workspace_id
        FROM tasks t
        JOIN projects p ON p.id = t.project_id
        WHERE t.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.as_ref().map(record_from_row))
}

/// Fetch a task with creator/assignee/project expansions
pub async fn get_task_details(
    pool: &PgPool,
    id: Uuid,
) -> Result<Option<TaskDetails>, sqlx::Error> {
    let row = sqlx::query(&format!("{DETAILS_SELECT} WHERE t.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    Ok(row.as_ref().map(details_from_row))
}

/// Push the shared WHERE conditions for the listing and its count query
fn push_filters(
    builder: &mut QueryBuilder<'_, Postgres>,
    project_id: Uuid,
    filters: &TaskFilters,
    now: DateTime<Utc>,
) {
    builder.push(" WHERE t.project_id = ");
    builder.push_bind(project_id);
    builder.push(" AND t.deleted_at IS NULL");

    if let Some(status) = filters.status {
        builder.push(" AND t.status = ");
        builder.push_bind(status.as_str());
    }

    if let Some(assignee_id) = filters.assignee_id {
        builder.push(" AND t.assignee_id = ");
        builder.push_bind(assignee_id);
    }

    match filters.deadline {
        Some(DeadlineFilter::Overdue) => {
            builder.push(" AND t.deadline < ");
            builder.push_bind(now);
            builder.push(" AND t.status <> 'DONE'");
        }
        Some(DeadlineFilter::DueToday) => {
            let start_of_day = now.date_naive().and_time(NaiveTime::MIN).and_utc();
            let end_of_day = start_of_day + Duration::days(1);
            builder.push(" AND t.deadline >= ");
            builder.push_bind(start_of_day);
            builder.push(" AND t.deadline < ");
            builder.push_bind(end_of_day);
        }
        Some(DeadlineFilter::Upcoming) => {
            builder.push(" AND t.deadline > ");
            builder.push_bind(now);
        }
        None => {}
    }
}

/// List a project's tasks with filters, sorting, and pagination
pub async fn list_tasks(
    pool: &PgPool,
    project_id: Uuid,
    filters: &TaskFilters,
    options: &ListOptions,
) -> Result<Vec<TaskDetails>, sqlx::Error> {
    let now = Utc::now();

    let mut builder: QueryBuilder<'_, Postgres> = QueryBuilder::new(DETAILS_SELECT);
    push_filters(&mut builder, project_id, filters, now);

    builder.push(format!(
        " ORDER BY {} {}",
        options.sort_column,
        if options.ascending { "ASC" } else { "DESC" }
    ));
    builder.push(" LIMIT ");
    builder.push_bind(options.limit);
    builder.push(" OFFSET ");
    builder.push_bind(options.offset);

    let rows = builder.build().fetch_all(pool).await?;

    Ok(rows.iter().map(details_from_row).collect())
}

/// Total count matching the same filter set, independent of the page slice
pub async fn count_tasks(
    pool: &PgPool,
    project_id: Uuid,
    filters: &TaskFilters,
) -> Result<i64, sqlx::Error> {
    let now = Utc::now();

    let mut builder: QueryBuilder<'_, Postgres> =
        QueryBuilder::new("SELECT COUNT(*) FROM tasks t");
    push_filters(&mut builder, project_id, filters, now);

    builder.build_query_scalar::<i64>().fetch_one(pool).await
}

/// Update a task's status, stamping or clearing `completed_at`
pub async fn update_status<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    status: TaskStatus,
) -> Result<(), sqlx::Error> {
    let completed_at = match status {
        TaskStatus::Done => Some(Utc::now()),
        _ => None,
    };

    sqlx::query(
        r#"
        UPDATE tasks SET status = $1, completed_at = $2, updated_at = $3 WHERE id = $4
        "#,
    )
    .bind(status.as_str())
    .bind(completed_at)
    .bind(Utc::now())
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}

/// Update a task's editable fields (title, description, priority, deadline)
pub async fn update_fields<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    title: &str,
    description: Option<&str>,
    priority: TaskPriority,
    deadline: Option<DateTime<Utc>>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE tasks
        SET title = $1, description = $2, priority = $3, deadline = $4, updated_at = $5
        WHERE id = $6
        "#,
    )
    .bind(title)
    .bind(description)
    .bind(priority.as_str())
    .bind(deadline)
    .bind(Utc::now())
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}

/// Set a task's assignee
pub async fn set_assignee<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    assignee_id: Uuid,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE tasks SET assignee_id = $1, updated_at = $2 WHERE id = $3
        "#,
    )
    .bind(assignee_id)
    .bind(Utc::now())
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}

/// Set or clear a task's soft-delete timestamp
pub async fn set_deleted_at<'e>(
    executor: impl PgExecutor<'e>,
    id: Uuid,
    deleted_at: Option<DateTime<Utc>>,
) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        UPDATE tasks SET deleted_at = $1, updated_at = $2 WHERE id = $3
        "#,
    )
    .bind(deleted_at)
    .bind(Utc::now())
    .bind(id)
    .execute(executor)
    .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_column_whitelist() {
        assert_eq!(sort_column("createdAt"), "t.created_at");
        assert_eq!(sort_column("deadline"), "t.deadline");
        assert_eq!(sort_column("title"), "t.title");
        // unknown keys never reach the SQL string
        assert_eq!(sort_column("password_hash; DROP TABLE tasks"), "t.created_at");
    }
}
