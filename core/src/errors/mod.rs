//! Domain-specific error types and error handling.

mod types;

#[cfg(test)]
mod tests;

// Re-export all error types
pub use types::{AuthError, StoreError, StoreErrorKind, TokenError};

use thiserror::Error;

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Resource not found: {resource}")]
    NotFound { resource: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Token(#[from] TokenError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl DomainError {
    /// Whether this error belongs to the 401 category
    pub fn is_authentication_failure(&self) -> bool {
        match self {
            DomainError::Auth(e) => e.is_authentication_failure(),
            DomainError::Token(TokenError::Invalid) => true,
            _ => false,
        }
    }

    /// Whether this error belongs to the 403 category
    pub fn is_authorization_failure(&self) -> bool {
        matches!(self, DomainError::Auth(AuthError::InsufficientPermissions))
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
