//! # Keystone Core
//!
//! Domain layer for the Keystone backend: session tokens, the retry
//! executor, timestamp normalization, identity resolution and the account
//! flows, all written against the [`DocumentStore`] abstraction.

pub mod domain;
pub mod services;
pub mod repositories;
pub mod errors;

// Re-export commonly used types for convenience
pub use domain::*;
pub use services::*;
pub use repositories::*;
pub use errors::*;
