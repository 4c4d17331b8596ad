//! Main account service implementation

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};
use uuid::Uuid;

use ks_shared::email::{is_valid_email, mask_email, normalize_email};

use crate::domain::entities::{
    Credential, Document, Identity, Role, StoreTimestamp, CREDENTIALS_COLLECTION, USERS_COLLECTION,
};
use crate::domain::value_objects::AuthResponse;
use crate::errors::{AuthError, DomainError, DomainResult, StoreError, StoreErrorKind};
use crate::repositories::{DocumentStore, WriteOp};
use crate::services::identity::load_document;
use crate::services::normalize::normalize;
use crate::services::password::{check_strength, PasswordService};
use crate::services::retry::execute_transient;
use crate::services::token::TokenService;

use super::config::AccountServiceConfig;

/// Registration and login against the credentials and users collections
pub struct AccountService<S: DocumentStore + ?Sized> {
    /// Document store holding both collections
    store: Arc<S>,
    /// Token service for session issuance
    tokens: Arc<TokenService>,
    passwords: PasswordService,
    config: AccountServiceConfig,
}

impl<S: DocumentStore + ?Sized> AccountService<S> {
    /// Create a new account service
    pub fn new(
        store: Arc<S>,
        tokens: Arc<TokenService>,
        passwords: PasswordService,
        config: AccountServiceConfig,
    ) -> Self {
        Self {
            store,
            tokens,
            passwords,
            config,
        }
    }

    /// Register a new standard account and issue its first session
    ///
    /// This method:
    /// 1. Validates email format, password strength and display name
    /// 2. Rejects an email that already has a credential
    /// 3. Hashes the password
    /// 4. Creates the credential and identity records in one transaction,
    ///    retrying transient failures with the transaction preset
    ///
    /// A concurrent registration of the same email loses at step 4 with the
    /// same conflict error as step 2.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<&str>,
    ) -> DomainResult<AuthResponse> {
        if !self.config.allow_registration {
            return Err(DomainError::Validation {
                message: "Registration is disabled".to_string(),
            });
        }

        let email = normalize_email(email);
        if !is_valid_email(&email) {
            return Err(DomainError::Validation {
                message: "Invalid email address".to_string(),
            });
        }
        check_strength(password).map_err(|errors| DomainError::Validation {
            message: format!("Password must {}", errors.joined_messages()),
        })?;
        let display_name = self.validate_display_name(display_name)?;

        if self.read(CREDENTIALS_COLLECTION, &email).await?.is_some() {
            info!(email = %mask_email(&email), "Registration for an existing email");
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        let password_hash = self.passwords.hash(password).await?;
        let subject_id = Uuid::new_v4().to_string();
        let created_at = StoreTimestamp::now();

        let mut credential = Credential::new(subject_id.as_str(), password_hash).to_document();
        credential.insert("created_at".to_string(), created_at.to_value());

        let mut record = Document::new();
        record.insert("email".to_string(), Value::String(email.clone()));
        record.insert("role".to_string(), Value::String(Role::Standard.to_string()));
        record.insert("created_at".to_string(), created_at.to_value());
        if let Some(name) = display_name {
            record.insert("display_name".to_string(), Value::String(name));
        }

        let writes = vec![
            WriteOp::create(CREDENTIALS_COLLECTION, email.as_str(), credential),
            WriteOp::create(USERS_COLLECTION, subject_id.as_str(), record.clone()),
        ];
        let store = self.store.as_ref();
        execute_transient(&self.config.transaction_retry, || {
            store.run_transaction(writes.clone())
        })
        .await
        .map_err(|e| match e.kind {
            StoreErrorKind::AlreadyExists => {
                info!(email = %mask_email(&email), "Lost registration race for email");
                DomainError::Auth(AuthError::EmailAlreadyRegistered)
            }
            _ => {
                error!(error = %e, "Registration transaction failed");
                DomainError::Store(e)
            }
        })?;

        info!(subject = %subject_id, email = %mask_email(&email), "Registered account");

        let identity = Identity::with_fallback(&subject_id, &email, normalize(&record));
        self.start_session(&identity)
    }

    /// Authenticate with email and password
    ///
    /// Unknown email, wrong password and a credential without an identity
    /// record all produce the same `InvalidCredentials` error.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResponse> {
        let email = normalize_email(email);

        let credential = match self.read(CREDENTIALS_COLLECTION, &email).await? {
            Some(doc) => Credential::from_document(&doc).ok_or_else(|| {
                error!(email = %mask_email(&email), "Stored credential is malformed");
                DomainError::Internal {
                    message: "Malformed credential record".to_string(),
                }
            })?,
            None => {
                info!(email = %mask_email(&email), "Login for unknown email");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !self.passwords.verify(password, &credential.password_hash).await? {
            warn!(subject = %credential.subject_id, "Login with wrong password");
            return Err(AuthError::InvalidCredentials.into());
        }

        let record = match self.read(USERS_COLLECTION, &credential.subject_id).await? {
            Some(record) => normalize(&record),
            None => {
                warn!(subject = %credential.subject_id, "Credential without identity record");
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        let identity = Identity::with_fallback(&credential.subject_id, &email, record);
        info!(subject = %identity.id, "Login succeeded");
        self.start_session(&identity)
    }

    fn start_session(&self, identity: &Identity) -> DomainResult<AuthResponse> {
        let issued = self.tokens.issue(&identity.id, &identity.email, identity.role)?;
        Ok(AuthResponse::from_issued(&issued, identity))
    }

    async fn read(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        load_document(self.store.as_ref(), &self.config.read_retry, collection, id)
            .await
            .map_err(|e| {
                error!(collection = %collection, error = %e, "Store read failed");
                e
            })
    }

    fn validate_display_name(&self, display_name: Option<&str>) -> DomainResult<Option<String>> {
        let name = match display_name.map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => return Ok(None),
        };
        if name.chars().count() > self.config.max_display_name_length {
            return Err(DomainError::Validation {
                message: format!(
                    "Display name must be at most {} characters",
                    self.config.max_display_name_length
                ),
            });
        }
        Ok(Some(name.to_string()))
    }
}
