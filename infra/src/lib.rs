//! # Infrastructure Layer
//!
//! Concrete [`DocumentStore`](ks_core::repositories::DocumentStore)
//! implementations for Keystone.
//!
//! ## Architecture
//!
//! - **Store**: the factory the composition root calls once, plus the
//!   in-memory store used for development and tests
//! - **Database**: MySQL document table on SQLx, with driver errors
//!   classified into store error kinds
//!
//! ## Features
//!
//! - `mysql`: Enable the MySQL store (default)

// Re-export core types for convenience
pub use ks_core::errors::*;

/// Database module - MySQL implementations using SQLx
#[cfg(feature = "mysql")]
pub mod database;

/// Store module - factory and in-memory implementation
pub mod store;

pub use store::{connect, MemoryStore};

/// Infrastructure-specific error types
#[derive(Debug, thiserror::Error)]
pub enum InfrastructureError {
    /// Database connection error
    #[cfg(feature = "mysql")]
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Store operation failed
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
