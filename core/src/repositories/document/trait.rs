//! Document store trait: the persistence boundary of the core.
//!
//! The store is an external collaborator. The core reads single documents by
//! `(collection, id)` and applies groups of writes atomically; everything
//! else about the backing engine is left to the implementation. Every
//! failure is reported as a [`StoreError`] whose kind drives the retry
//! classifier.

use async_trait::async_trait;

use crate::domain::entities::Document;
use crate::errors::StoreError;

/// A single write inside a transaction
#[derive(Debug, Clone, PartialEq)]
pub enum WriteOp {
    /// Insert a new document; fails with `AlreadyExists` if the id is taken
    Create {
        collection: String,
        id: String,
        document: Document,
    },
    /// Insert or replace a document
    Set {
        collection: String,
        id: String,
        document: Document,
    },
    /// Remove a document if present
    Delete { collection: String, id: String },
}

impl WriteOp {
    pub fn create(collection: impl Into<String>, id: impl Into<String>, document: Document) -> Self {
        WriteOp::Create {
            collection: collection.into(),
            id: id.into(),
            document,
        }
    }

    pub fn set(collection: impl Into<String>, id: impl Into<String>, document: Document) -> Self {
        WriteOp::Set {
            collection: collection.into(),
            id: id.into(),
            document,
        }
    }

    pub fn delete(collection: impl Into<String>, id: impl Into<String>) -> Self {
        WriteOp::Delete {
            collection: collection.into(),
            id: id.into(),
        }
    }

    /// Target `(collection, id)` of this write
    pub fn key(&self) -> (&str, &str) {
        match self {
            WriteOp::Create { collection, id, .. }
            | WriteOp::Set { collection, id, .. }
            | WriteOp::Delete { collection, id } => (collection, id),
        }
    }
}

/// Repository trait for document persistence
///
/// Implementations must be safe for concurrent use by many in-flight
/// operations; the core shares one handle across all requests.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Fetch a document by collection and id
    ///
    /// # Returns
    /// * `Ok(Some(Document))` - Document found
    /// * `Ok(None)` - No document with that id
    /// * `Err(StoreError)` - The store failed; `kind` tells whether a retry may help
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError>;

    /// Apply all writes atomically: either every write lands or none does
    async fn run_transaction(&self, writes: Vec<WriteOp>) -> Result<(), StoreError>;

    /// Cheap liveness probe used by health checks
    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
