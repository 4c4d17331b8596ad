//! Password hashing and strength rules

mod service;
mod strength;

pub use service::PasswordService;
pub use strength::{check_strength, MIN_PASSWORD_LENGTH};
