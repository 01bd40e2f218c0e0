/**
 * Activity Handler
 *
 * GET /workspaces/{workspaceId}/activity - workspace audit trail, visible
 * to any member, newest first, bounded by a clamped limit.
 */

use axum::extract::{Path, Query, State};
use axum::response::Json;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use crate::activity::db::{list_for_workspace, ActivityEntry};
use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::middleware::workspace_role::require_membership;

const DEFAULT_LIMIT: i64 = 10;
const MAX_LIMIT: i64 = 100;

#[derive(Debug, Deserialize)]
pub struct ActivityQuery {
    pub limit: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ActivityResponse {
    pub logs: Vec<ActivityEntry>,
}

/// Workspace activity handler
pub async fn workspace_activity(
    State(pool): State<PgPool>,
    AuthUser(user): AuthUser,
    Path(workspace_id): Path<Uuid>,
    Query(query): Query<ActivityQuery>,
) -> Result<Json<ActivityResponse>, AppError> {
    require_membership(&pool, user.user_id, workspace_id).await?;

    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let logs = list_for_workspace(&pool, workspace_id, limit).await?;

    Ok(Json(ActivityResponse { logs }))
}
