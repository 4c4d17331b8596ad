//! Retry executor with exponential backoff for store operations
//!
//! Two executors share one loop:
//! - [`execute`] retries every failure until the attempt budget is spent
//! - [`execute_if`] / [`execute_transient`] stop at the first failure the
//!   classifier rejects
//!
//! Either way the caller receives the last error exactly as the operation
//! produced it.

mod classifier;
mod executor;
mod policy;

#[cfg(test)]
mod tests;

pub use classifier::{is_transient_message, Transient, TRANSIENT_SIGNALS};
pub use executor::{execute, execute_if, execute_transient};
pub use policy::{RetryAttempt, RetryObserver, RetryPolicy};
