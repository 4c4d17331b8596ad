//! Transience classification for store failures

use crate::errors::{DomainError, StoreError, StoreErrorKind};

/// Message fragments that mark a failure as worth retrying
pub const TRANSIENT_SIGNALS: &[&str] = &[
    "deadline",
    "unavailable",
    "aborted",
    "resource exhausted",
    "resource-exhausted",
    "internal",
    "lock",
    "contention",
    "deadlock",
    "connection reset",
    "connection-reset",
    "econnreset",
    "timeout",
    "timed out",
];

/// Case-insensitive match of a failure message against [`TRANSIENT_SIGNALS`]
pub fn is_transient_message(message: &str) -> bool {
    let message = message.to_lowercase();
    TRANSIENT_SIGNALS.iter().any(|signal| message.contains(signal))
}

/// Errors that can tell whether retrying might succeed
pub trait Transient {
    fn is_transient(&self) -> bool;
}

impl Transient for StoreError {
    fn is_transient(&self) -> bool {
        match self.kind {
            // Drivers that cannot classify a failure still leave a message
            StoreErrorKind::Unknown => is_transient_message(&self.message),
            kind => kind.is_transient(),
        }
    }
}

impl Transient for DomainError {
    fn is_transient(&self) -> bool {
        match self {
            DomainError::Store(error) => error.is_transient(),
            _ => false,
        }
    }
}
