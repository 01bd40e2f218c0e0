//! TaskHive - Multi-tenant Project/Task Management Backend
//!
//! TaskHive is a workspace-based task management service: workspaces own
//! projects, projects own tasks, and every member holds a workspace-scoped
//! role (OWNER, ADMIN, MEMBER) that gates what they may do.
//!
//! # Architecture
//!
//! The crate is organized into focused modules:
//!
//! - **`server`** - configuration, application state, app assembly
//! - **`routes`** - HTTP route configuration
//! - **`middleware`** - bearer-token authentication, workspace role guards
//! - **`auth`** - JWT sessions, user storage, register/login/me handlers
//! - **`workspace`** - workspaces, memberships, invitations, dashboard
//! - **`project`** - project CRUD with soft delete
//! - **`task`** - task CRUD, status transitions, filtered listings
//! - **`activity`** - append-only audit trail
//! - **`mailer`** - best-effort SMTP invitation delivery
//! - **`error`** - the error taxonomy shared by all handlers
//!
//! # Request flow
//!
//! Every request passes through the authentication middleware, then a
//! workspace-role guard where the resource is workspace-scoped, then the
//! handler, which performs its reads and writes through `sqlx` with an
//! activity record appended in the same transaction as each mutation.

pub mod activity;
pub mod auth;
pub mod error;
pub mod mailer;
pub mod middleware;
pub mod project;
pub mod routes;
pub mod serde_helpers;
pub mod server;
pub mod task;
pub mod workspace;

pub use error::AppError;
pub use server::create_app;
