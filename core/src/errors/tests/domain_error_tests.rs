//! Unit tests for domain error types

use crate::errors::{AuthError, DomainError, StoreError, StoreErrorKind, TokenError};

#[test]
fn test_auth_error_messages_are_terse() {
    assert_eq!(AuthError::MissingToken.to_string(), "Authentication required");
    assert_eq!(AuthError::InvalidSession.to_string(), "Invalid or expired session");
    assert_eq!(AuthError::InsufficientPermissions.to_string(), "Insufficient permissions");
}

#[test]
fn test_authentication_vs_authorization_categories() {
    let missing = DomainError::Auth(AuthError::MissingToken);
    let invalid = DomainError::Token(TokenError::Invalid);
    let deleted = DomainError::Auth(AuthError::IdentityNotFound);
    let forbidden = DomainError::Auth(AuthError::InsufficientPermissions);

    assert!(missing.is_authentication_failure());
    assert!(invalid.is_authentication_failure());
    assert!(deleted.is_authentication_failure());
    assert!(!forbidden.is_authentication_failure());

    assert!(forbidden.is_authorization_failure());
    assert!(!deleted.is_authorization_failure());
}

#[test]
fn test_store_error_display_includes_kind() {
    let error = StoreError::new(StoreErrorKind::DeadlineExceeded, "read timed out");
    assert_eq!(error.to_string(), "deadline-exceeded: read timed out");
}

#[test]
fn test_store_error_kind_transience() {
    let transient = [
        StoreErrorKind::DeadlineExceeded,
        StoreErrorKind::Unavailable,
        StoreErrorKind::Aborted,
        StoreErrorKind::ResourceExhausted,
        StoreErrorKind::Internal,
        StoreErrorKind::Contention,
        StoreErrorKind::ConnectionReset,
        StoreErrorKind::Timeout,
    ];
    for kind in transient {
        assert!(kind.is_transient(), "{} should be transient", kind);
    }

    let permanent = [
        StoreErrorKind::NotFound,
        StoreErrorKind::AlreadyExists,
        StoreErrorKind::PermissionDenied,
        StoreErrorKind::InvalidArgument,
        StoreErrorKind::Unknown,
    ];
    for kind in permanent {
        assert!(!kind.is_transient(), "{} should not be transient", kind);
    }
}

#[test]
fn test_store_error_converts_into_domain_error() {
    let error: DomainError = StoreError::unavailable("down").into();
    assert!(matches!(error, DomainError::Store(ref e) if e.kind == StoreErrorKind::Unavailable));
}
