//! Process-local document store

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use ks_core::domain::entities::Document;
use ks_core::errors::StoreError;
use ks_core::repositories::{DocumentStore, WriteOp};

type Collections = HashMap<String, HashMap<String, Document>>;

/// In-memory document store
///
/// Transactions hold the write lock for their whole duration, so a group of
/// writes is applied atomically with respect to every other operation.
#[derive(Default)]
pub struct MemoryStore {
    collections: RwLock<Collections>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents in a collection
    pub async fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .await
            .get(collection)
            .map_or(0, HashMap::len)
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|documents| documents.get(id))
            .cloned())
    }

    async fn run_transaction(&self, writes: Vec<WriteOp>) -> Result<(), StoreError> {
        let mut collections = self.collections.write().await;

        // Check creates first so a conflict leaves nothing applied
        for write in &writes {
            if let WriteOp::Create { collection, id, .. } = write {
                let taken = collections
                    .get(collection)
                    .is_some_and(|documents| documents.contains_key(id));
                if taken {
                    return Err(StoreError::already_exists(format!(
                        "Document {}/{} already exists",
                        collection, id
                    )));
                }
            }
        }

        let count = writes.len();
        for write in writes {
            match write {
                WriteOp::Create { collection, id, document }
                | WriteOp::Set { collection, id, document } => {
                    collections.entry(collection).or_default().insert(id, document);
                }
                WriteOp::Delete { collection, id } => {
                    if let Some(documents) = collections.get_mut(&collection) {
                        documents.remove(&id);
                    }
                }
            }
        }

        debug!(writes = count, "Applied in-memory transaction");
        Ok(())
    }
}
