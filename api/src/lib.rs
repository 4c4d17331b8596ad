//! # Keystone API
//!
//! actix-web transport for Keystone: the identity gate middleware, request
//! extractors, DTOs, route handlers and the application factory used by the
//! binary and by the HTTP tests.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{create_app, AppState};
