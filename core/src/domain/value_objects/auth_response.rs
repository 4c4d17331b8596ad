//! Authentication response value objects for API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::{Identity, Role};

/// A freshly signed session token and its expiry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Compact JWT
    pub token: String,

    /// Instant after which validation rejects the token
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Seconds remaining until expiry, measured from `now`
    pub fn expires_in(&self, now: DateTime<Utc>) -> i64 {
        (self.expires_at - now).num_seconds().max(0)
    }
}

/// Authentication response returned after registration or login
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthResponse {
    /// Session token for the Authorization header or the auth cookie
    pub token: String,

    /// Token lifetime in seconds
    pub expires_in: i64,

    /// Subject identifier
    pub user_id: String,

    pub email: String,

    pub role: Role,
}

impl AuthResponse {
    /// Creates an authentication response from an issued token and the identity it names
    pub fn from_issued(issued: &IssuedToken, identity: &Identity) -> Self {
        Self {
            token: issued.token.clone(),
            expires_in: issued.expires_in(Utc::now()),
            user_id: identity.id.clone(),
            email: identity.email.clone(),
            role: identity.role,
        }
    }
}
