/**
 * Router Assembly
 *
 * Combines the public and authenticated route groups into the final
 * application router with request tracing and a JSON 404 fallback.
 */

use axum::Router;
use tower_http::trace::TraceLayer;

use crate::error::AppError;
use crate::routes::api_routes::{protected_routes, public_routes};
use crate::server::state::AppState;

/// Create the axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .merge(public_routes())
        .merge(protected_routes())
        .fallback(|| async { AppError::not_found("Route not found") })
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
