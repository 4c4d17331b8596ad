//! Identity of an authenticated principal and the stored login credential.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::claims::{Claims, Role};
use super::document::Document;

/// Collection holding identity records, keyed by subject id
pub const USERS_COLLECTION: &str = "users";

/// Collection holding login credentials, keyed by normalized email
pub const CREDENTIALS_COLLECTION: &str = "credentials";

/// Identity attached to a request once authentication succeeds.
///
/// Built from a normalized identity record. The record's `role` is
/// authoritative: a missing or unrecognised value means `Standard`. `email`
/// falls back to the token claims when the record lacks one.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    /// Subject identifier
    pub id: String,

    pub email: String,

    pub role: Role,

    /// Every other normalized field of the record
    pub profile: Document,
}

impl Identity {
    /// Build from the token claims and an already-normalized record
    pub fn from_record(claims: &Claims, record: Document) -> Self {
        Self::with_fallback(&claims.sub, &claims.email, record)
    }

    /// Build from a normalized record, using `email` only where the record
    /// lacks a usable value
    pub fn with_fallback(id: &str, email: &str, mut record: Document) -> Self {
        record.remove("id");

        let email = match record.remove("email") {
            Some(Value::String(email)) => email,
            _ => email.to_string(),
        };
        let role = match record.remove("role") {
            Some(Value::String(stored)) => stored.parse().unwrap_or(Role::Standard),
            _ => Role::Standard,
        };

        Self {
            id: id.to_string(),
            email,
            role,
            profile: record,
        }
    }

    pub fn is_administrator(&self) -> bool {
        self.role.is_administrator()
    }

    /// Flat representation: `{ id, email, role, ...profile }`
    pub fn to_document(&self) -> Document {
        let mut doc = self.profile.clone();
        doc.insert("id".to_string(), Value::String(self.id.clone()));
        doc.insert("email".to_string(), Value::String(self.email.clone()));
        doc.insert("role".to_string(), Value::String(self.role.to_string()));
        doc
    }
}

impl Serialize for Identity {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_document().serialize(serializer)
    }
}

/// Login credential stored under the normalized email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    /// Subject id of the identity record this credential unlocks
    pub subject_id: String,

    /// bcrypt hash of the password
    pub password_hash: String,
}

impl Credential {
    pub fn new(subject_id: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            password_hash: password_hash.into(),
        }
    }

    pub fn to_document(&self) -> Document {
        let mut doc = Document::new();
        doc.insert("subject_id".to_string(), Value::String(self.subject_id.clone()));
        doc.insert("password_hash".to_string(), Value::String(self.password_hash.clone()));
        doc
    }

    /// None when either field is missing or not a string
    pub fn from_document(doc: &Document) -> Option<Self> {
        let subject_id = doc.get("subject_id")?.as_str()?;
        let password_hash = doc.get("password_hash")?.as_str()?;
        Some(Self::new(subject_id, password_hash))
    }
}
