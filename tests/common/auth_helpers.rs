//! Authentication test helpers
//!
//! Utilities for creating test users directly in the database and
//! generating bearer tokens for them.

use sqlx::PgPool;
use taskhive::auth::sessions::create_token;
use taskhive::auth::users::create_user;
use uuid::Uuid;

/// A password that satisfies the registration strength rules
pub const STRONG_PASSWORD: &str = "Sup3rSecret!";

/// Test user credentials
pub struct TestUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub token: String,
}

/// Create a test user in the database with a valid session token
pub async fn create_test_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password: &str,
) -> TestUser {
    let password_hash =
        bcrypt::hash(password, bcrypt::DEFAULT_COST).expect("Failed to hash test password");

    let user = create_user(pool, name.to_string(), email.to_string(), password_hash)
        .await
        .expect("Failed to create test user");

    let token = create_token(user.id).expect("Failed to create test token");

    TestUser {
        id: user.id,
        name: user.name,
        email: user.email,
        password: password.to_string(),
        token,
    }
}

/// Create a test user with a unique email
pub async fn create_unique_test_user(pool: &PgPool) -> TestUser {
    let email = format!("test_{}@example.com", Uuid::new_v4());
    create_test_user(pool, "Test User", &email, STRONG_PASSWORD).await
}

/// A unique email for registration tests
pub fn unique_email() -> String {
    format!("test_{}@example.com", Uuid::new_v4())
}
