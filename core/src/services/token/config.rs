//! Configuration for the token service

use chrono::Duration;
use jsonwebtoken::Algorithm;
use ks_shared::{JwtConfig, MAX_TOKEN_EXPIRY_DAYS};

use crate::domain::entities::{JWT_AUDIENCE, JWT_ISSUER, TOKEN_EXPIRY_DAYS};

/// Configuration for the token service
///
/// There is no default secret: a service cannot be built without one.
#[derive(Clone)]
pub struct TokenServiceConfig {
    /// JWT signing secret
    pub jwt_secret: String,
    /// JWT signing algorithm
    pub algorithm: Algorithm,
    /// Session token validity window
    pub validity: Duration,
    pub issuer: String,
    pub audience: String,
}

impl TokenServiceConfig {
    /// HS256 configuration with the standard 7-day window
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            validity: Duration::days(TOKEN_EXPIRY_DAYS),
            issuer: JWT_ISSUER.to_string(),
            audience: JWT_AUDIENCE.to_string(),
        }
    }

    /// Build from loaded settings; the window is clamped to the accepted range
    pub fn from_jwt_config(config: &JwtConfig) -> Self {
        Self {
            jwt_secret: config.secret.clone(),
            algorithm: Algorithm::HS256,
            validity: Duration::days(config.token_expiry_days.clamp(1, MAX_TOKEN_EXPIRY_DAYS)),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
        }
    }
}

impl std::fmt::Debug for TokenServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenServiceConfig")
            .field("jwt_secret", &"[redacted]")
            .field("algorithm", &self.algorithm)
            .field("validity", &self.validity)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}
