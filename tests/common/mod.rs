//! Common test utilities and helpers
//!
//! Shared fixtures for the integration tests:
//! - Database fixtures (skipped when DATABASE_URL is not set)
//! - Authentication helpers for creating users and tokens
//! - API fixtures for building workspaces, projects, and tasks

#![allow(dead_code)]

pub mod auth_helpers;
pub mod database;
pub mod fixtures;

pub use auth_helpers::*;
pub use database::*;
pub use fixtures::*;
