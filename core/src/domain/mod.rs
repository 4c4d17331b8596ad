//! Domain layer containing business entities and value objects.

pub mod entities;
pub mod value_objects;

// Re-export commonly used domain types
pub use entities::{
    Claims, Credential, Document, Identity, Role, StoreTimestamp, CREDENTIALS_COLLECTION,
    JWT_AUDIENCE, JWT_ISSUER, TOKEN_EXPIRY_DAYS, USERS_COLLECTION,
};
pub use value_objects::{AuthResponse, IssuedToken};
