//! Main token service implementation

use chrono::{DateTime, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::{debug, error, warn};

use crate::domain::entities::{Claims, Role};
use crate::domain::value_objects::IssuedToken;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service issuing and validating session tokens
///
/// Holds the signing keys derived once from the configured secret. There is
/// no revocation list: a token stays valid for its whole window, and callers
/// that need deactivation re-check the identity record.
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Returns
    ///
    /// A new `TokenService`, or an internal error when the secret is empty
    pub fn new(config: TokenServiceConfig) -> Result<Self, DomainError> {
        if config.jwt_secret.trim().is_empty() {
            return Err(DomainError::Internal {
                message: "JWT signing secret is not configured".to_string(),
            });
        }

        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.leeway = 0;

        Ok(Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        })
    }

    /// Issues a session token valid from now for the configured window
    pub fn issue(&self, subject_id: &str, email: &str, role: Role) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject_id, email, role, Utc::now())
    }

    /// Issues a session token as if signed at `issued_at`
    pub fn issue_at(
        &self,
        subject_id: &str,
        email: &str,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        if issued_at.checked_add_signed(self.config.validity).is_none() {
            error!(validity = ?self.config.validity, "Session token expiry is out of range");
            return Err(TokenError::GenerationFailed);
        }

        let claims = Claims::new_session(subject_id, email, role, issued_at, self.config.validity)
            .with_issuer(self.config.issuer.as_str(), self.config.audience.as_str());

        let expires_at = claims.expires_at().ok_or(TokenError::GenerationFailed)?;
        let token = encode(&Header::new(self.config.algorithm), &claims, &self.encoding_key)
            .map_err(|e| {
                error!(error = %e, "Failed to sign session token");
                TokenError::GenerationFailed
            })?;

        debug!(subject = %subject_id, jti = %claims.jti, "Issued session token");
        Ok(IssuedToken { token, expires_at })
    }

    /// Validates a token: structure, signature, expiry, issuer and audience
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError::Invalid)` - For every failure cause; the cause is only logged
    pub fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                match e.kind() {
                    ErrorKind::ExpiredSignature => debug!("Session token rejected: expired"),
                    ErrorKind::ImmatureSignature => debug!("Session token rejected: not yet valid"),
                    ErrorKind::InvalidSignature => warn!("Session token rejected: signature mismatch"),
                    ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
                        warn!(reason = ?e.kind(), "Session token rejected: foreign issuer or audience")
                    }
                    kind => debug!(reason = ?kind, "Session token rejected: malformed"),
                }
                TokenError::Invalid
            })
    }

    pub fn config(&self) -> &TokenServiceConfig {
        &self.config
    }
}
