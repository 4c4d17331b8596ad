//! Business services containing domain logic and use cases.

pub mod auth;
pub mod identity;
pub mod normalize;
pub mod password;
pub mod retry;
pub mod token;

// Re-export commonly used types
pub use auth::{AccountService, AccountServiceConfig};
pub use identity::{IdentityResolver, IdentityService};
pub use normalize::{normalize, normalize_value};
pub use password::{check_strength, PasswordService};
pub use retry::{execute, execute_if, execute_transient, RetryAttempt, RetryPolicy, Transient};
pub use token::{TokenService, TokenServiceConfig};
