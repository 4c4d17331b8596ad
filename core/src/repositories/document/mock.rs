//! Mock implementation of DocumentStore for testing

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::domain::entities::Document;
use crate::errors::{StoreError, StoreErrorKind};

use super::trait_::{DocumentStore, WriteOp};

type Key = (String, String);

/// Mock document store with scripted failure injection
///
/// Failures queued with [`fail_next_gets`](Self::fail_next_gets) or
/// [`fail_next_transactions`](Self::fail_next_transactions) are returned, in
/// order, by the next calls before the store behaves normally again.
pub struct MockDocumentStore {
    documents: Arc<RwLock<HashMap<Key, Document>>>,
    get_failures: Mutex<VecDeque<StoreError>>,
    transaction_failures: Mutex<VecDeque<StoreError>>,
    get_calls: AtomicUsize,
    transaction_calls: AtomicUsize,
}

impl MockDocumentStore {
    /// Create a new empty mock store
    pub fn new() -> Self {
        Self {
            documents: Arc::new(RwLock::new(HashMap::new())),
            get_failures: Mutex::new(VecDeque::new()),
            transaction_failures: Mutex::new(VecDeque::new()),
            get_calls: AtomicUsize::new(0),
            transaction_calls: AtomicUsize::new(0),
        }
    }

    /// Seed a document directly, bypassing transactions
    pub async fn insert(&self, collection: &str, id: &str, document: Document) {
        self.documents
            .write()
            .await
            .insert((collection.to_string(), id.to_string()), document);
    }

    pub async fn remove(&self, collection: &str, id: &str) {
        self.documents
            .write()
            .await
            .remove(&(collection.to_string(), id.to_string()));
    }

    pub async fn contains(&self, collection: &str, id: &str) -> bool {
        self.documents
            .read()
            .await
            .contains_key(&(collection.to_string(), id.to_string()))
    }

    /// Queue `count` failures of `kind` for upcoming `get` calls
    pub async fn fail_next_gets(&self, count: usize, kind: StoreErrorKind) {
        let mut failures = self.get_failures.lock().await;
        for n in 0..count {
            failures.push_back(StoreError::new(kind, format!("injected get failure {}", n + 1)));
        }
    }

    /// Queue `count` failures of `kind` for upcoming transactions
    pub async fn fail_next_transactions(&self, count: usize, kind: StoreErrorKind) {
        let mut failures = self.transaction_failures.lock().await;
        for n in 0..count {
            failures.push_back(StoreError::new(
                kind,
                format!("injected transaction failure {}", n + 1),
            ));
        }
    }

    pub fn get_calls(&self) -> usize {
        self.get_calls.load(Ordering::SeqCst)
    }

    pub fn transaction_calls(&self) -> usize {
        self.transaction_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockDocumentStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentStore for MockDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.get_failures.lock().await.pop_front() {
            return Err(error);
        }

        let documents = self.documents.read().await;
        Ok(documents
            .get(&(collection.to_string(), id.to_string()))
            .cloned())
    }

    async fn run_transaction(&self, writes: Vec<WriteOp>) -> Result<(), StoreError> {
        self.transaction_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.transaction_failures.lock().await.pop_front() {
            return Err(error);
        }

        let mut documents = self.documents.write().await;

        // Validate every write before applying any of them
        for write in &writes {
            if let WriteOp::Create { collection, id, .. } = write {
                if documents.contains_key(&(collection.clone(), id.clone())) {
                    return Err(StoreError::already_exists(format!("{}/{}", collection, id)));
                }
            }
        }

        for write in writes {
            match write {
                WriteOp::Create { collection, id, document }
                | WriteOp::Set { collection, id, document } => {
                    documents.insert((collection, id), document);
                }
                WriteOp::Delete { collection, id } => {
                    documents.remove(&(collection, id));
                }
            }
        }

        Ok(())
    }
}
