//! Session token claims and the two-tier role model.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Session token validity window (7 days)
pub const TOKEN_EXPIRY_DAYS: i64 = 7;

/// JWT issuer
pub const JWT_ISSUER: &str = "keystone";

/// JWT audience
pub const JWT_AUDIENCE: &str = "keystone-api";

/// Principal role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular authenticated principal
    #[serde(alias = "user")]
    Standard,
    /// Principal allowed onto administrative endpoints
    #[serde(alias = "admin")]
    Administrator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Standard => "standard",
            Role::Administrator => "administrator",
        }
    }

    pub fn is_administrator(&self) -> bool {
        matches!(self, Role::Administrator)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Standard
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "standard" | "user" => Ok(Role::Standard),
            "administrator" | "admin" => Ok(Role::Administrator),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Claims structure for the session JWT payload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (identity record id)
    pub sub: String,

    /// Email of the principal at issuance
    pub email: String,

    /// Role of the principal at issuance
    pub role: Role,

    /// Issued at timestamp
    pub iat: i64,

    /// Expiration timestamp
    pub exp: i64,

    /// Not before timestamp
    pub nbf: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// JWT ID (unique identifier for the token)
    pub jti: String,
}

impl Claims {
    /// Creates session claims issued at `issued_at` and valid for `validity`
    pub fn new_session(
        subject_id: impl Into<String>,
        email: impl Into<String>,
        role: Role,
        issued_at: DateTime<Utc>,
        validity: Duration,
    ) -> Self {
        let expiry = issued_at + validity;

        Self {
            sub: subject_id.into(),
            email: email.into(),
            role,
            iat: issued_at.timestamp(),
            exp: expiry.timestamp(),
            nbf: issued_at.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            jti: Uuid::new_v4().to_string(),
        }
    }

    /// Override issuer and audience
    pub fn with_issuer(mut self, issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        self.iss = issuer.into();
        self.aud = audience.into();
        self
    }

    /// Checks if the claims have expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() > self.exp
    }

    /// Expiry as a UTC instant
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.exp, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_claims() {
        let now = Utc::now();
        let claims = Claims::new_session("user-1", "a@example.com", Role::Standard, now, Duration::days(TOKEN_EXPIRY_DAYS));

        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "a@example.com");
        assert_eq!(claims.role, Role::Standard);
        assert_eq!(claims.exp - claims.iat, 7 * 24 * 60 * 60);
        assert_eq!(claims.iss, JWT_ISSUER);
        assert_eq!(claims.aud, JWT_AUDIENCE);
        assert!(!claims.is_expired_at(now));
        assert!(claims.is_expired_at(now + Duration::days(8)));
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let issued_at = Utc::now();
        let claims = Claims::new_session("user-1", "a@example.com", Role::Standard, issued_at, Duration::days(1));
        let exp = DateTime::<Utc>::from_timestamp(claims.exp, 0).unwrap();

        assert!(!claims.is_expired_at(exp - Duration::seconds(1)));
        assert!(!claims.is_expired_at(exp));
        assert!(claims.is_expired_at(exp + Duration::seconds(1)));
    }

    #[test]
    fn test_role_serialization() {
        assert_eq!(serde_json::to_string(&Role::Standard).unwrap(), "\"standard\"");
        assert_eq!(serde_json::to_string(&Role::Administrator).unwrap(), "\"administrator\"");

        let role: Role = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(role, Role::Administrator);
        let role: Role = serde_json::from_str("\"user\"").unwrap();
        assert_eq!(role, Role::Standard);
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("Administrator".parse::<Role>().unwrap(), Role::Administrator);
        assert_eq!("standard".parse::<Role>().unwrap(), Role::Standard);
        assert!("superuser".parse::<Role>().is_err());
    }
}
