//! Authentication and authorization configuration

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ConfigError;

/// Secrets shorter than this are accepted but flagged at startup
pub const MIN_RECOMMENDED_SECRET_LENGTH: usize = 32;

/// Longest session token validity window accepted, in days
pub const MAX_TOKEN_EXPIRY_DAYS: i64 = 365;

/// JWT session token configuration
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    /// HMAC secret for signing tokens; must be provided, there is no fallback
    pub secret: String,

    /// Session token validity window in days
    pub token_expiry_days: i64,

    /// JWT issuer claim
    pub issuer: String,

    /// JWT audience claim
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            token_expiry_days: 7,
            issuer: String::from("keystone"),
            audience: String::from("keystone-api"),
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"[redacted]")
            .field("token_expiry_days", &self.token_expiry_days)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

impl JwtConfig {
    /// Create a new JWT configuration with secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ..Default::default()
        }
    }

    /// Set token expiry in days
    pub fn with_expiry_days(mut self, days: i64) -> Self {
        self.token_expiry_days = days;
        self
    }

    /// Whether a signing secret has been provided at all
    pub fn has_secret(&self) -> bool {
        !self.secret.trim().is_empty()
    }

    /// Whether the secret is shorter than recommended
    pub fn is_weak_secret(&self) -> bool {
        self.secret.len() < MIN_RECOMMENDED_SECRET_LENGTH
    }
}

/// Session cookie configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session token
    pub cookie_name: String,

    /// Session cookie secure flag (HTTPS only)
    pub secure: bool,

    /// Session cookie SameSite attribute
    pub same_site: String,

    /// Session cookie HttpOnly flag
    pub http_only: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: String::from("auth-token"),
            secure: false, // Set to true in production
            same_site: String::from("Lax"),
            http_only: true,
        }
    }
}

/// Password hashing configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PasswordConfig {
    /// bcrypt cost factor
    pub bcrypt_cost: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { bcrypt_cost: 12 }
    }
}

/// Complete authentication configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    /// JWT configuration
    pub jwt: JwtConfig,

    /// Session cookie configuration
    pub session: SessionConfig,

    /// Password hashing configuration
    pub password: PasswordConfig,
}

impl AuthConfig {
    /// Create with the given signing secret and defaults elsewhere
    pub fn with_secret(secret: impl Into<String>) -> Self {
        Self {
            jwt: JwtConfig::new(secret),
            ..Default::default()
        }
    }

    /// Reject configurations the server must not start with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.jwt.has_secret() {
            return Err(ConfigError::MissingSecret);
        }
        if !(1..=MAX_TOKEN_EXPIRY_DAYS).contains(&self.jwt.token_expiry_days) {
            return Err(ConfigError::Invalid(format!(
                "auth.jwt.token_expiry_days must be between 1 and {}, got {}",
                MAX_TOKEN_EXPIRY_DAYS, self.jwt.token_expiry_days
            )));
        }
        if !(4..=31).contains(&self.password.bcrypt_cost) {
            return Err(ConfigError::Invalid(format!(
                "auth.password.bcrypt_cost must be between 4 and 31, got {}",
                self.password.bcrypt_cost
            )));
        }
        Ok(())
    }
}
