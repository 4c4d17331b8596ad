//! Configuration module with business-specific sub-modules
//!
//! This module organizes configuration into logical areas:
//! - `auth` - Session token signing, session cookie and password hashing
//! - `environment` - Environment detection and logging configuration
//! - `retry` - Retry/backoff presets for store operations
//! - `server` - HTTP server configuration
//! - `store` - Document store backend and connection pool
//!
//! Configuration is resolved once by the binary's entry point and handed to
//! the rest of the application as plain values.

pub mod auth;
pub mod environment;
pub mod retry;
pub mod server;
pub mod store;

use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export commonly used types
pub use auth::{AuthConfig, JwtConfig, PasswordConfig, SessionConfig, MAX_TOKEN_EXPIRY_DAYS};
pub use environment::{Environment, LogFormat, LoggingConfig};
pub use retry::{RetryConfig, RetrySettings};
pub use server::ServerConfig;
pub use store::{StoreBackend, StoreConfig};

/// Environment variable prefix for structured overrides, e.g. `KEYSTONE__SERVER__PORT`
pub const ENV_PREFIX: &str = "KEYSTONE";

/// Environment variable holding the token signing secret
pub const JWT_SECRET_VAR: &str = "JWT_SECRET";

/// Configuration errors that must stop the process from starting
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT signing secret is not configured; set {JWT_SECRET_VAR}")]
    MissingSecret,

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
}

/// Complete application configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Server configuration
    pub server: ServerConfig,

    /// Authentication configuration
    pub auth: AuthConfig,

    /// Document store configuration
    pub store: StoreConfig,

    /// Retry presets
    pub retry: RetryConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for the environment named by `ENVIRONMENT`
    ///
    /// Sources, lowest precedence first: built-in defaults, the optional
    /// `config.<environment>.toml` file, `KEYSTONE__*` variables, and finally
    /// `JWT_SECRET` for the signing secret. The result is validated.
    pub fn load() -> Result<Self, ConfigError> {
        let environment = Environment::from_env();
        let settings = config::Config::builder()
            .add_source(config::File::with_name(environment.config_file()).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override("environment", environment.to_string())?
            .build()?;

        let logging_configured = settings.get_table("logging").is_ok();
        let mut app: AppConfig = settings.try_deserialize()?;
        if !logging_configured {
            app.logging = LoggingConfig::for_environment(environment);
        }
        if let Ok(secret) = std::env::var(JWT_SECRET_VAR) {
            app.auth.jwt.secret = secret;
        }

        app.validate()?;
        Ok(app)
    }

    /// Build a configuration around an explicit signing secret, defaults elsewhere
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            auth: AuthConfig::with_secret(secret),
            ..Default::default()
        }
    }

    /// Check every section that can make startup unsafe
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.auth.validate()?;
        if self.store.backend == StoreBackend::Mysql && self.store.url.trim().is_empty() {
            return Err(ConfigError::Invalid("store.url is required for the mysql backend".into()));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must be non-zero".into()));
        }
        Ok(())
    }
}
