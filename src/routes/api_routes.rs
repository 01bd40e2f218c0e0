/**
 * API Route Configuration
 *
 * # Routes
 *
 * ## Public
 * - `POST /auth/register` - create account
 * - `POST /auth/login` - obtain token
 *
 * ## Authenticated (bearer token)
 * - `GET /auth/me` - current user
 * - `POST /workspaces` - create workspace
 * - `GET /workspaces/my` - list my workspaces
 * - `POST /workspaces/{workspaceId}/invite` - invite member (OWNER/ADMIN)
 * - `GET /workspaces/{workspaceId}/dashboard` - stats snapshot (member)
 * - `GET|POST /workspaces/{workspaceId}/projects` - list/create projects
 * - `GET /workspaces/{workspaceId}/activity` - audit log (member)
 * - `PATCH /projects/{projectId}` - update project (OWNER/ADMIN)
 * - `PATCH /projects/{projectId}/delete` - soft delete (OWNER/ADMIN)
 * - `POST|GET /projects/{projectId}/tasks` - create/list tasks
 * - `PATCH /tasks/{taskId}/status` - transition (assignee or admin)
 * - `PATCH /tasks/{taskId}` - update fields (OWNER/ADMIN)
 * - `PATCH /tasks/{taskId}/assignee` - reassign (OWNER/ADMIN)
 * - `PATCH /tasks/{taskId}/delete` / `/restore` - soft delete/restore
 *
 * Workspace-role checks happen inside the handlers; the route layer only
 * enforces authentication.
 */

use axum::routing::{get, patch, post};
use axum::Router;

use crate::activity::workspace_activity;
use crate::auth::{login, me, register};
use crate::middleware::auth::auth_middleware;
use crate::project::{create_project, delete_project, list_projects, update_project};
use crate::server::state::AppState;
use crate::task::{
    create_task, delete_task, list_tasks, reassign_task, restore_task, update_task,
    update_task_status,
};
use crate::workspace::{create_workspace, dashboard, invite_user, my_workspaces};

/// Public routes (no token required)
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

/// Routes behind the authentication middleware
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/me", get(me))
        .route("/workspaces", post(create_workspace))
        .route("/workspaces/my", get(my_workspaces))
        .route("/workspaces/{workspace_id}/invite", post(invite_user))
        .route("/workspaces/{workspace_id}/dashboard", get(dashboard))
        .route(
            "/workspaces/{workspace_id}/projects",
            get(list_projects).post(create_project),
        )
        .route("/workspaces/{workspace_id}/activity", get(workspace_activity))
        .route("/projects/{project_id}", patch(update_project))
        .route("/projects/{project_id}/delete", patch(delete_project))
        .route(
            "/projects/{project_id}/tasks",
            post(create_task).get(list_tasks),
        )
        .route("/tasks/{task_id}/status", patch(update_task_status))
        .route("/tasks/{task_id}", patch(update_task))
        .route("/tasks/{task_id}/assignee", patch(reassign_task))
        .route("/tasks/{task_id}/delete", patch(delete_task))
        .route("/tasks/{task_id}/restore", patch(restore_task))
        .route_layer(axum::middleware::from_fn(auth_middleware))
}
