//! Identity service implementation

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, error, info};

use crate::domain::entities::{Document, Identity, USERS_COLLECTION};
use crate::errors::{AuthError, DomainError, DomainResult, StoreError};
use crate::repositories::DocumentStore;
use crate::services::normalize::normalize;
use crate::services::retry::{execute_transient, RetryPolicy};
use crate::services::token::TokenService;

/// Read one document through the classifier-gated retry executor
pub async fn load_document<S>(
    store: &S,
    policy: &RetryPolicy,
    collection: &str,
    id: &str,
) -> Result<Option<Document>, StoreError>
where
    S: DocumentStore + ?Sized,
{
    execute_transient(policy, || store.get(collection, id)).await
}

/// Object-safe view of the identity gate for the transport layer
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Strict resolution: every failing gate is an error
    async fn resolve(&self, token: Option<&str>) -> DomainResult<Identity>;

    /// Optional resolution: any failure yields `None`
    async fn resolve_optional(&self, token: Option<&str>) -> Option<Identity> {
        match self.resolve(token).await {
            Ok(identity) => Some(identity),
            Err(e) => {
                debug!(error = %e, "Continuing without identity");
                None
            }
        }
    }

    /// Second gate for administrative operations
    fn authorize_admin(&self, identity: &Identity) -> DomainResult<()> {
        if identity.is_administrator() {
            Ok(())
        } else {
            info!(subject = %identity.id, role = %identity.role, "Administrator role required");
            Err(AuthError::InsufficientPermissions.into())
        }
    }

    /// Normalized identity record by subject id
    async fn find_record(&self, subject_id: &str) -> DomainResult<Option<Document>>;
}

/// Resolves session tokens to identities backed by the users collection
pub struct IdentityService<S: DocumentStore + ?Sized> {
    tokens: Arc<TokenService>,
    store: Arc<S>,
    retry: RetryPolicy,
}

impl<S: DocumentStore + ?Sized> IdentityService<S> {
    /// Identity loads use the default retry preset
    pub fn new(tokens: Arc<TokenService>, store: Arc<S>) -> Self {
        Self::with_retry(tokens, store, RetryPolicy::new())
    }

    pub fn with_retry(tokens: Arc<TokenService>, store: Arc<S>, retry: RetryPolicy) -> Self {
        Self { tokens, store, retry }
    }

    async fn load_record(&self, subject_id: &str) -> DomainResult<Option<Document>> {
        let record = load_document(self.store.as_ref(), &self.retry, USERS_COLLECTION, subject_id)
            .await
            .map_err(|e| {
                error!(subject = %subject_id, error = %e, "Failed to load identity record");
                DomainError::Store(e)
            })?;

        Ok(record.map(|record| normalize(&record)))
    }
}

#[async_trait]
impl<S: DocumentStore + ?Sized> IdentityResolver for IdentityService<S> {
    async fn resolve(&self, token: Option<&str>) -> DomainResult<Identity> {
        let token = match token.map(str::trim) {
            Some(token) if !token.is_empty() => token,
            _ => return Err(AuthError::MissingToken.into()),
        };

        let claims = self
            .tokens
            .validate(token)
            .map_err(|_| AuthError::InvalidSession)?;

        let record = match self.load_record(&claims.sub).await? {
            Some(record) => record,
            None => {
                info!(subject = %claims.sub, "Valid session for a missing identity");
                return Err(AuthError::IdentityNotFound.into());
            }
        };

        Ok(Identity::from_record(&claims, record))
    }

    async fn find_record(&self, subject_id: &str) -> DomainResult<Option<Document>> {
        self.load_record(subject_id).await
    }
}
