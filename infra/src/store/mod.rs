//! Store factory
//!
//! [`connect`] is called once by the composition root; the returned handle
//! is shared by every service for the life of the process.

mod memory;


use std::sync::Arc;

use ks_core::repositories::DocumentStore;
use ks_shared::{RetrySettings, StoreBackend, StoreConfig};
use tracing::info;

use crate::InfrastructureError;

pub use memory::MemoryStore;

/// Build the configured store
///
/// The MySQL backend connects through the unconditional retry executor using
/// `retry`, then makes sure the documents table exists.
pub async fn connect(
    config: &StoreConfig,
    retry: &RetrySettings,
) -> Result<Arc<dyn DocumentStore>, InfrastructureError> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory document store; contents are lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreBackend::Mysql => connect_mysql(config, retry).await,
    }
}

#[cfg(feature = "mysql")]
async fn connect_mysql(
    config: &StoreConfig,
    retry: &RetrySettings,
) -> Result<Arc<dyn DocumentStore>, InfrastructureError> {
    use crate::database::{DatabasePool, MySqlDocumentStore};
    use ks_core::services::retry::RetryPolicy;

    let pool = DatabasePool::connect(config, &RetryPolicy::from_settings(retry)).await?;
    let store = MySqlDocumentStore::new(pool);
    store.ensure_schema().await?;

    info!(url = %config.masked_url(), "Using MySQL document store");
    Ok(Arc::new(store))
}

#[cfg(not(feature = "mysql"))]
async fn connect_mysql(
    _config: &StoreConfig,
    _retry: &RetrySettings,
) -> Result<Arc<dyn DocumentStore>, InfrastructureError> {
    Err(InfrastructureError::Config(
        "MySQL backend requested but the `mysql` feature is disabled".to_string(),
    ))
}
