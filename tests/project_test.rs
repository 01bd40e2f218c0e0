//! Project API integration tests
//!
//! Project creation, partial updates, and soft deletion. Skipped when
//! DATABASE_URL is not set.

mod common;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{
    create_project, create_unique_test_user, create_workspace, test_server, TestDatabase,
};

#[tokio::test]
async fn test_create_project() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);
    let user = create_unique_test_user(db.pool()).await;
    let workspace_id = create_workspace(&server, &user.token, "Product").await;

    let response = server
        .post(&format!("/workspaces/{}/projects", workspace_id))
        .authorization_bearer(&user.token)
        .json(&json!({ "name": "Website", "description": "Public site" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["project"]["name"], "Website");
    assert_eq!(body["project"]["description"], "Public site");
    assert_eq!(
        body["project"]["workspaceId"],
        workspace_id.to_string().as_str()
    );
    assert!(body["project"]["deletedAt"].is_null());
}

#[tokio::test]
async fn test_create_project_requires_admin() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);
    let owner = create_unique_test_user(db.pool()).await;
    let member = create_unique_test_user(db.pool()).await;
    let workspace_id = create_workspace(&server, &owner.token, "Restricted").await;

    let invite = server
        .post(&format!("/workspaces/{}/invite", workspace_id))
        .authorization_bearer(&owner.token)
        .json(&json!({ "email": member.email, "role": "MEMBER" }))
        .await;
    assert_eq!(invite.status_code(), StatusCode::OK);

    let response = server
        .post(&format!("/workspaces/{}/projects", workspace_id))
        .authorization_bearer(&member.token)
        .json(&json!({ "name": "Forbidden" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_project_partial() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);
    let user = create_unique_test_user(db.pool()).await;
    let workspace_id = create_workspace(&server, &user.token, "Partial").await;
    let project_id = create_project(&server, &user.token, workspace_id, "Old Name").await;

    // Only the name is sent; the description must survive
    let response = server
        .patch(&format!("/projects/{}", project_id))
        .authorization_bearer(&user.token)
        .json(&json!({ "name": "New Name" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["project"]["name"], "New Name");
    assert_eq!(body["project"]["description"], "fixture project");
}

#[tokio::test]
async fn test_update_project_clears_description_with_null() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);
    let user = create_unique_test_user(db.pool()).await;
    let workspace_id = create_workspace(&server, &user.token, "Nullable").await;
    let project_id = create_project(&server, &user.token, workspace_id, "Described").await;

    // An explicit null clears the field, unlike omitting it
    let response = server
        .patch(&format!("/projects/{}", project_id))
        .authorization_bearer(&user.token)
        .json(&json!({ "description": null }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["project"]["name"], "Described");
    assert!(body["project"]["description"].is_null());
}

#[tokio::test]
async fn test_update_project_rejects_empty_name() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);
    let user = create_unique_test_user(db.pool()).await;
    let workspace_id = create_workspace(&server, &user.token, "Naming").await;
    let project_id = create_project(&server, &user.token, workspace_id, "Named").await;

    let response = server
        .patch(&format!("/projects/{}", project_id))
        .authorization_bearer(&user.token)
        .json(&json!({ "name": "  " }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_missing_project() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);
    let user = create_unique_test_user(db.pool()).await;

    let response = server
        .patch(&format!("/projects/{}", Uuid::new_v4()))
        .authorization_bearer(&user.token)
        .json(&json!({ "name": "Ghost" }))
        .await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["message"], "Project not found");
}

#[tokio::test]
async fn test_soft_deleted_project_excluded_from_listing() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);
    let user = create_unique_test_user(db.pool()).await;
    let workspace_id = create_workspace(&server, &user.token, "Pruning").await;
    let keep_id = create_project(&server, &user.token, workspace_id, "Keep").await;
    let drop_id = create_project(&server, &user.token, workspace_id, "Drop").await;

    let response = server
        .patch(&format!("/projects/{}/delete", drop_id))
        .authorization_bearer(&user.token)
        .await;
    assert_eq!(response.status_code(), StatusCode::OK);

    let response = server
        .get(&format!("/workspaces/{}/projects", workspace_id))
        .authorization_bearer(&user.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    let projects = body["projects"].as_array().unwrap();
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0]["id"], keep_id.to_string().as_str());
    assert!(!projects
        .iter()
        .any(|p| p["id"] == drop_id.to_string().as_str()));
}
