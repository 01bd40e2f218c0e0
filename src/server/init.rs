/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the axum HTTP
 * server: database pool, optional mailer, application state, and router.
 */

use axum::Router;

use crate::routes::router::create_router;
use crate::server::config::{load_database, load_mailer};
use crate::server::state::AppState;

/// Create and configure the axum application
///
/// 1. Connect the database pool and run migrations
/// 2. Configure the optional SMTP mailer
/// 3. Assemble the router with all routes and middleware
pub async fn create_app() -> Result<Router, sqlx::Error> {
    tracing::info!("Initializing backend server");

    let pool = load_database().await?;
    let mailer = load_mailer();

    let app_state = AppState { pool, mailer };

    Ok(create_router(app_state))
}
