//! Route configuration
//!
//! `api_routes` registers the public and authenticated API routes;
//! `router` assembles them with the trace layer and fallback.

pub mod api_routes;
pub mod router;

pub use router::create_router;
