//! Authentication API integration tests
//!
//! Registration, login, and the current-user endpoint. Skipped when
//! DATABASE_URL is not set.

mod common;

use axum::http::StatusCode;
use pretty_assertions::{assert_eq, assert_ne};
use serde_json::{json, Value};

use common::{create_unique_test_user, test_server, unique_email, TestDatabase, STRONG_PASSWORD};

#[tokio::test]
async fn test_register_success() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);
    let email = unique_email();

    let response = server
        .post("/auth/register")
        .json(&json!({
            "name": "Ada",
            "email": email,
            "password": STRONG_PASSWORD
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CREATED);
    let body: Value = response.json();
    assert_eq!(body["user"]["email"], email.as_str());
    assert_eq!(body["user"]["name"], "Ada");
    // The password hash must never leave the server
    assert!(body["user"].get("passwordHash").is_none());
    assert!(body["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);
    let user = create_unique_test_user(db.pool()).await;

    let response = server
        .post("/auth/register")
        .json(&json!({
            "name": "Duplicate",
            "email": user.email,
            "password": STRONG_PASSWORD
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::CONFLICT);
    let body: Value = response.json();
    assert_eq!(body["message"], "User already exists");
}

#[tokio::test]
async fn test_register_weak_password() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);

    for password in ["short1!", "alllowercase1!", "NoDigits!", "NoSymbols123"] {
        let response = server
            .post("/auth/register")
            .json(&json!({
                "name": "Weak",
                "email": unique_email(),
                "password": password
            }))
            .await;

        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "password {:?} should be rejected",
            password
        );
    }
}

#[tokio::test]
async fn test_register_invalid_email() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);

    let response = server
        .post("/auth/register")
        .json(&json!({
            "name": "Bad Email",
            "email": "not-an-email",
            "password": STRONG_PASSWORD
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);
    let user = create_unique_test_user(db.pool()).await;

    let response = server
        .post("/auth/login")
        .json(&json!({
            "email": user.email,
            "password": user.password
        }))
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert!(body["token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(body["user"]["email"], user.email.as_str());
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);
    let user = create_unique_test_user(db.pool()).await;

    let wrong_password = server
        .post("/auth/login")
        .json(&json!({
            "email": user.email,
            "password": "WrongPassword1!"
        }))
        .await;

    let unknown_email = server
        .post("/auth/login")
        .json(&json!({
            "email": unique_email(),
            "password": STRONG_PASSWORD
        }))
        .await;

    // Same status and same body either way, so a caller cannot probe
    // which emails are registered
    assert_eq!(wrong_password.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status_code(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.json::<Value>(),
        unknown_email.json::<Value>()
    );
}

#[tokio::test]
async fn test_me_with_valid_token() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);
    let user = create_unique_test_user(db.pool()).await;

    let response = server
        .get("/auth/me")
        .authorization_bearer(&user.token)
        .await;

    assert_eq!(response.status_code(), StatusCode::OK);
    let body: Value = response.json();
    assert_eq!(body["email"], user.email.as_str());
}

#[tokio::test]
async fn test_me_without_token() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);

    let response = server.get("/auth/me").await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let server = test_server(&db);

    let response = server
        .get("/auth/me")
        .authorization_bearer("not.a.token")
        .await;

    assert_eq!(response.status_code(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_stored_password_is_hashed() {
    let Some(db) = TestDatabase::try_new().await else {
        return;
    };
    let user = create_unique_test_user(db.pool()).await;

    let stored = taskhive::auth::users::get_user_by_email(db.pool(), &user.email)
        .await
        .unwrap()
        .unwrap();

    assert_ne!(stored.password_hash, user.password);
    assert!(bcrypt::verify(&user.password, &stored.password_hash).unwrap());
}
