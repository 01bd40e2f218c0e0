//! Database test fixtures and utilities
//!
//! Provides the test database fixture and a test server bound to it. The
//! integration tests need a running Postgres instance; when DATABASE_URL
//! is not set they skip themselves instead of failing.

use axum_test::TestServer;
use sqlx::PgPool;
use taskhive::routes::create_router;
use taskhive::server::state::AppState;

/// Test database fixture
///
/// Connects to the database named by DATABASE_URL and runs migrations.
/// Tests share the database, so every fixture they create uses unique
/// names and emails rather than relying on a clean slate.
pub struct TestDatabase {
    pool: PgPool,
}

impl TestDatabase {
    /// Connect to the test database, or `None` when DATABASE_URL is unset
    pub async fn try_new() -> Option<Self> {
        let database_url = std::env::var("DATABASE_URL").ok()?;

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to create test database pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self { pool })
    }

    /// Get the database pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Build a test server over the full application router
///
/// The mailer is left unconfigured, so invitation responses always report
/// `emailSent: false`.
pub fn test_server(db: &TestDatabase) -> TestServer {
    let state = AppState {
        pool: db.pool().clone(),
        mailer: None,
    };
    TestServer::new(create_router(state)).expect("Failed to start test server")
}
