//! Account service module
//!
//! This module provides registration and login on top of the document
//! store:
//! - Email and password validation
//! - Atomic creation of the credential and identity records
//! - Password verification and session issuance

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::AccountServiceConfig;
pub use service::AccountService;
