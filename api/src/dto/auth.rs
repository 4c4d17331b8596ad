use ks_core::domain::Identity;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login email; normalized to lowercase before storage
    #[validate(email(message = "Email must be a valid address"))]
    pub email: String,

    /// Strength rules are enforced by the account service, which reports every unmet rule
    #[validate(length(min = 1, max = 128, message = "Password must be between 1 and 128 characters"))]
    pub password: String,

    #[validate(length(min = 1, max = 100, message = "Display name must be between 1 and 100 characters"))]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 254, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, max = 128, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogoutResponse {
    pub message: String,
}

/// Body of the optional-auth landing route
#[derive(Debug, Clone, Serialize)]
pub struct WelcomeResponse {
    pub authenticated: bool,

    pub greeting: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<Identity>,
}

impl WelcomeResponse {
    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            greeting: "Welcome, guest".to_string(),
            identity: None,
        }
    }

    pub fn for_identity(identity: Identity) -> Self {
        let name = identity
            .profile
            .get("display_name")
            .and_then(|v| v.as_str())
            .unwrap_or(&identity.email)
            .to_string();

        Self {
            authenticated: true,
            greeting: format!("Welcome back, {}", name),
            identity: Some(identity),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let request = RegisterRequest {
            email: "not-an-email".to_string(),
            password: String::new(),
            display_name: None,
        };
        let errors = request.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("email"));
        assert!(fields.contains_key("password"));
        assert!(!fields.contains_key("display_name"));
    }

    #[test]
    fn test_valid_register_request() {
        let request = RegisterRequest {
            email: "ada@example.com".to_string(),
            password: "Abcdef12".to_string(),
            display_name: Some("Ada".to_string()),
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_anonymous_welcome_omits_identity() {
        let json = serde_json::to_value(WelcomeResponse::anonymous()).unwrap();
        assert_eq!(json["authenticated"], false);
        assert!(json.get("identity").is_none());
    }
}
