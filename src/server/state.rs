/**
 * Application State Management
 *
 * This module defines the application state structure and implements the
 * `FromRef` traits for axum state extraction. Handlers are stateless;
 * the state only carries the shared collaborators (connection pool,
 * optional mailer).
 */

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::mailer::Mailer;

/// Application state shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub pool: PgPool,

    /// Optional SMTP mailer for invitation emails
    ///
    /// `None` when SMTP is not configured; invitation emails are then
    /// skipped (the invite itself still succeeds).
    pub mailer: Option<Mailer>,
}

/// Allow handlers that only need the pool to extract `State<PgPool>`
impl FromRef<AppState> for PgPool {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.pool.clone()
    }
}

/// Allow handlers to extract the optional mailer directly
impl FromRef<AppState> for Option<Mailer> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.mailer.clone()
    }
}
