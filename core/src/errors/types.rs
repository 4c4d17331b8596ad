//! Domain-specific error types for authentication, tokens and store access
//!
//! Display strings here are terse on purpose: the transport layer maps each
//! variant to a status category and never forwards internal causes.

use std::fmt;
use thiserror::Error;

/// Authentication and authorization failures
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// No bearer header and no auth cookie on the request
    #[error("Authentication required")]
    MissingToken,

    /// The token failed validation (structure, signature or expiry)
    #[error("Invalid or expired session")]
    InvalidSession,

    /// Token was valid but its subject no longer exists in the store
    #[error("Identity not found")]
    IdentityNotFound,

    /// Authenticated, but the role does not allow the operation
    #[error("Insufficient permissions")]
    InsufficientPermissions,

    /// Unknown email or wrong password at login
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailAlreadyRegistered,
}

impl AuthError {
    /// 401-style failures
    pub fn is_authentication_failure(&self) -> bool {
        matches!(
            self,
            AuthError::MissingToken
                | AuthError::InvalidSession
                | AuthError::IdentityNotFound
                | AuthError::InvalidCredentials
        )
    }
}

/// Token-related errors
///
/// Validation collapses every failure cause into `Invalid`; the specific
/// reason is only ever logged by the token service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token")]
    Invalid,

    #[error("Token generation failed")]
    GenerationFailed,
}

/// Failure class reported by a document store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreErrorKind {
    DeadlineExceeded,
    Unavailable,
    Aborted,
    ResourceExhausted,
    Internal,
    /// Transaction lock contention or deadlock
    Contention,
    ConnectionReset,
    Timeout,
    NotFound,
    AlreadyExists,
    PermissionDenied,
    InvalidArgument,
    Unknown,
}

impl StoreErrorKind {
    /// Stable lowercase name, also used as a transience signal
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreErrorKind::DeadlineExceeded => "deadline-exceeded",
            StoreErrorKind::Unavailable => "unavailable",
            StoreErrorKind::Aborted => "aborted",
            StoreErrorKind::ResourceExhausted => "resource-exhausted",
            StoreErrorKind::Internal => "internal",
            StoreErrorKind::Contention => "contention",
            StoreErrorKind::ConnectionReset => "connection-reset",
            StoreErrorKind::Timeout => "timeout",
            StoreErrorKind::NotFound => "not-found",
            StoreErrorKind::AlreadyExists => "already-exists",
            StoreErrorKind::PermissionDenied => "permission-denied",
            StoreErrorKind::InvalidArgument => "invalid-argument",
            StoreErrorKind::Unknown => "unknown",
        }
    }

    /// Kinds likely to succeed when retried
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            StoreErrorKind::DeadlineExceeded
                | StoreErrorKind::Unavailable
                | StoreErrorKind::Aborted
                | StoreErrorKind::ResourceExhausted
                | StoreErrorKind::Internal
                | StoreErrorKind::Contention
                | StoreErrorKind::ConnectionReset
                | StoreErrorKind::Timeout
        )
    }
}

impl fmt::Display for StoreErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error raised by a document store, with an inspectable kind and message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct StoreError {
    pub kind: StoreErrorKind,
    pub message: String,
}

impl StoreError {
    pub fn new(kind: StoreErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Unavailable, message)
    }

    pub fn contention(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Contention, message)
    }

    pub fn already_exists(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::AlreadyExists, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StoreErrorKind::Internal, message)
    }
}
