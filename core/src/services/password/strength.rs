//! Local password strength check

use ks_shared::validation::{validators, ValidationErrors};

pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Checks every rule and reports all unmet ones together.
///
/// Rules: at least 8 characters, one uppercase letter, one lowercase letter
/// and one digit.
pub fn check_strength(password: &str) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add_error(
            "password",
            format!("be at least {} characters long", MIN_PASSWORD_LENGTH),
            "password_too_short",
        );
    }
    if !validators::has_uppercase(password) {
        errors.add_error("password", "contain at least one uppercase letter", "password_no_uppercase");
    }
    if !validators::has_lowercase(password) {
        errors.add_error("password", "contain at least one lowercase letter", "password_no_lowercase");
    }
    if !validators::has_digit(password) {
        errors.add_error("password", "contain at least one number", "password_no_digit");
    }

    errors.into_result()
}
