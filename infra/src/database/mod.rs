//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management with retried bootstrap
//! - The MySQL-backed document store
//! - Classification of driver errors into store error kinds

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{classify_sqlx_error, MySqlDocumentStore};
