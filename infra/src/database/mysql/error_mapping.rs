//! Translation of SQLx errors into store error kinds

use std::io::ErrorKind as IoErrorKind;

use sqlx::mysql::MySqlDatabaseError;

use ks_core::errors::{StoreError, StoreErrorKind};

/// ER_LOCK_DEADLOCK
const ER_LOCK_DEADLOCK: u16 = 1213;
/// ER_LOCK_WAIT_TIMEOUT
const ER_LOCK_WAIT_TIMEOUT: u16 = 1205;
/// ER_CON_COUNT_ERROR
const ER_CON_COUNT_ERROR: u16 = 1040;
/// ER_TOO_MANY_USER_CONNECTIONS
const ER_TOO_MANY_USER_CONNECTIONS: u16 = 1203;
/// ER_DBACCESS_DENIED_ERROR
const ER_DBACCESS_DENIED: u16 = 1044;
/// ER_ACCESS_DENIED_ERROR
const ER_ACCESS_DENIED: u16 = 1045;
/// ER_TABLEACCESS_DENIED_ERROR
const ER_TABLEACCESS_DENIED: u16 = 1142;
/// ER_QUERY_INTERRUPTED
const ER_QUERY_INTERRUPTED: u16 = 1317;

/// Classify a driver error; the message keeps the driver's text
pub fn classify_sqlx_error(error: &sqlx::Error) -> StoreError {
    let kind = match error {
        sqlx::Error::PoolTimedOut => StoreErrorKind::Timeout,
        sqlx::Error::Io(io) => match io.kind() {
            IoErrorKind::ConnectionReset | IoErrorKind::ConnectionAborted | IoErrorKind::BrokenPipe => {
                StoreErrorKind::ConnectionReset
            }
            IoErrorKind::TimedOut => StoreErrorKind::Timeout,
            _ => StoreErrorKind::Unavailable,
        },
        sqlx::Error::PoolClosed | sqlx::Error::Tls(_) | sqlx::Error::WorkerCrashed => {
            StoreErrorKind::Unavailable
        }
        sqlx::Error::Database(db) => {
            if db.is_unique_violation() {
                StoreErrorKind::AlreadyExists
            } else {
                match db.try_downcast_ref::<MySqlDatabaseError>().map(|e| e.number()) {
                    Some(ER_LOCK_DEADLOCK) | Some(ER_LOCK_WAIT_TIMEOUT) => StoreErrorKind::Contention,
                    Some(ER_CON_COUNT_ERROR) | Some(ER_TOO_MANY_USER_CONNECTIONS) => {
                        StoreErrorKind::ResourceExhausted
                    }
                    Some(ER_DBACCESS_DENIED) | Some(ER_ACCESS_DENIED) | Some(ER_TABLEACCESS_DENIED) => {
                        StoreErrorKind::PermissionDenied
                    }
                    Some(ER_QUERY_INTERRUPTED) => StoreErrorKind::Aborted,
                    _ => StoreErrorKind::Unknown,
                }
            }
        }
        sqlx::Error::Protocol(_) => StoreErrorKind::Internal,
        sqlx::Error::RowNotFound => StoreErrorKind::NotFound,
        sqlx::Error::Configuration(_)
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::TypeNotFound { .. } => StoreErrorKind::InvalidArgument,
        _ => StoreErrorKind::Unknown,
    };

    StoreError::new(kind, error.to_string())
}
