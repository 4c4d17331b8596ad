//! Domain entities representing core business objects.

pub mod claims;
pub mod document;
pub mod identity;

// Re-export commonly used types
pub use claims::{Claims, Role, JWT_AUDIENCE, JWT_ISSUER, TOKEN_EXPIRY_DAYS};
pub use document::{Document, StoreTimestamp};
pub use identity::{
    Credential, Identity, CREDENTIALS_COLLECTION, USERS_COLLECTION,
};
