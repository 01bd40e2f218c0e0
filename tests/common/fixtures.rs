//! API fixtures
//!
//! Helpers that drive the public API to build up workspaces, projects,
//! and tasks for a test, returning the created ids.

use axum_test::TestServer;
use serde_json::{json, Value};
use uuid::Uuid;

fn id_at<'a>(body: &'a Value, path: &[&str]) -> Uuid {
    let mut value = body;
    for key in path {
        value = &value[key];
    }
    value
        .as_str()
        .and_then(|s| Uuid::parse_str(s).ok())
        .unwrap_or_else(|| panic!("Missing id at {:?} in {}", path, body))
}

/// Create a workspace through the API, returning its id
pub async fn create_workspace(server: &TestServer, token: &str, name: &str) -> Uuid {
    let response = server
        .post("/workspaces")
        .authorization_bearer(token)
        .json(&json!({ "name": name }))
        .await;
    assert_eq!(response.status_code(), 201, "{}", response.text());
    id_at(&response.json::<Value>(), &["workspace", "id"])
}

/// Create a project through the API, returning its id
pub async fn create_project(
    server: &TestServer,
    token: &str,
    workspace_id: Uuid,
    name: &str,
) -> Uuid {
    let response = server
        .post(&format!("/workspaces/{}/projects", workspace_id))
        .authorization_bearer(token)
        .json(&json!({ "name": name, "description": "fixture project" }))
        .await;
    assert_eq!(response.status_code(), 201, "{}", response.text());
    id_at(&response.json::<Value>(), &["project", "id"])
}

/// Create a task through the API from an arbitrary request body,
/// returning its id
pub async fn create_task(
    server: &TestServer,
    token: &str,
    project_id: Uuid,
    body: Value,
) -> Uuid {
    let response = server
        .post(&format!("/projects/{}/tasks", project_id))
        .authorization_bearer(token)
        .json(&body)
        .await;
    assert_eq!(response.status_code(), 201, "{}", response.text());
    id_at(&response.json::<Value>(), &["task", "id"])
}

/// Set a task's status through the API
pub async fn set_task_status(server: &TestServer, token: &str, task_id: Uuid, status: &str) {
    let response = server
        .patch(&format!("/tasks/{}/status", task_id))
        .authorization_bearer(token)
        .json(&json!({ "status": status }))
        .await;
    assert_eq!(response.status_code(), 200, "{}", response.text());
}
