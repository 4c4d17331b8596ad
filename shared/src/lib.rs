//! Shared utilities and common types for the Keystone server
//!
//! This crate provides common functionality used across all server modules:
//! - Configuration types and loading
//! - Error response structures and error codes
//! - Utility functions (email and field validation)
//! - Response wrappers

pub mod config;
pub mod errors;
pub mod types;
pub mod utils;

// Re-export commonly used items at crate root
pub use config::{
    AppConfig, AuthConfig, ConfigError, Environment, JwtConfig, LoggingConfig, PasswordConfig,
    RetryConfig, RetrySettings, ServerConfig, SessionConfig, StoreBackend, StoreConfig,
    MAX_TOKEN_EXPIRY_DAYS,
};
pub use errors::{error_codes, ApiResult, ErrorResponse, IntoErrorResponse};
pub use types::{ApiResponse, HealthResponse, HealthStatus};
pub use utils::{email, validation};
