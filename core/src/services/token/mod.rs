//! Token service module for session JWT management
//!
//! This module handles:
//! - Signing session tokens carrying subject, email and role (HS256)
//! - Validating tokens, collapsing every failure cause into one result

mod config;
mod service;


pub use config::TokenServiceConfig;
pub use service::TokenService;
