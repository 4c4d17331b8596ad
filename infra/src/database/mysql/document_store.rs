//! MySQL implementation of the DocumentStore trait.
//!
//! Every collection shares one table keyed by `(collection, id)`; the
//! document itself lives in a JSON column.

use async_trait::async_trait;
use serde_json::Value;
use sqlx::types::Json;
use sqlx::Row;
use tracing::{debug, error};

use ks_core::domain::entities::Document;
use ks_core::errors::{StoreError, StoreErrorKind};
use ks_core::repositories::{DocumentStore, WriteOp};

use super::error_mapping::classify_sqlx_error;
use crate::database::DatabasePool;
use crate::InfrastructureError;

/// Table holding every document
pub const DOCUMENTS_TABLE: &str = "documents";

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS documents (
        collection VARCHAR(128) NOT NULL,
        id VARCHAR(255) NOT NULL,
        body JSON NOT NULL,
        created_at TIMESTAMP(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3),
        updated_at TIMESTAMP(3) NOT NULL DEFAULT CURRENT_TIMESTAMP(3) ON UPDATE CURRENT_TIMESTAMP(3),
        PRIMARY KEY (collection, id)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_unicode_ci
"#;

/// MySQL implementation of DocumentStore
pub struct MySqlDocumentStore {
    /// Database connection pool
    pool: DatabasePool,
}

impl MySqlDocumentStore {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }

    /// Create the documents table if it does not exist yet
    pub async fn ensure_schema(&self) -> Result<(), InfrastructureError> {
        sqlx::query(CREATE_TABLE)
            .execute(self.pool.get_pool())
            .await
            .map_err(|e| {
                error!(error = %e, "Failed to create documents table");
                InfrastructureError::Database(e)
            })?;
        Ok(())
    }

    fn store_error(context: &str, e: sqlx::Error) -> StoreError {
        let classified = classify_sqlx_error(&e);
        error!(kind = %classified.kind, error = %e, "{}", context);
        classified
    }
}

#[async_trait]
impl DocumentStore for MySqlDocumentStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, StoreError> {
        let query = r#"
            SELECT body
            FROM documents
            WHERE collection = ? AND id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(collection)
            .bind(id)
            .fetch_optional(self.pool.get_pool())
            .await
            .map_err(|e| Self::store_error("Document read failed", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let body: Json<Value> = row
            .try_get("body")
            .map_err(|e| Self::store_error("Failed to decode document body", e))?;

        match body.0 {
            Value::Object(document) => Ok(Some(document)),
            _ => Err(StoreError::new(
                StoreErrorKind::InvalidArgument,
                format!("Document {}/{} is not a JSON object", collection, id),
            )),
        }
    }

    async fn run_transaction(&self, writes: Vec<WriteOp>) -> Result<(), StoreError> {
        let mut tx = self
            .pool
            .get_pool()
            .begin()
            .await
            .map_err(|e| Self::store_error("Failed to begin transaction", e))?;

        let count = writes.len();
        for write in writes {
            let result = match write {
                WriteOp::Create { collection, id, document } => {
                    sqlx::query("INSERT INTO documents (collection, id, body) VALUES (?, ?, ?)")
                        .bind(collection)
                        .bind(id)
                        .bind(Json(Value::Object(document)))
                        .execute(&mut *tx)
                        .await
                }
                WriteOp::Set { collection, id, document } => {
                    sqlx::query(
                        "INSERT INTO documents (collection, id, body) VALUES (?, ?, ?) \
                         ON DUPLICATE KEY UPDATE body = VALUES(body)",
                    )
                    .bind(collection)
                    .bind(id)
                    .bind(Json(Value::Object(document)))
                    .execute(&mut *tx)
                    .await
                }
                WriteOp::Delete { collection, id } => {
                    sqlx::query("DELETE FROM documents WHERE collection = ? AND id = ?")
                        .bind(collection)
                        .bind(id)
                        .execute(&mut *tx)
                        .await
                }
            };

            // Dropping `tx` on error rolls the transaction back
            result.map_err(|e| Self::store_error("Transaction write failed", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| Self::store_error("Failed to commit transaction", e))?;

        debug!(writes = count, "Committed document transaction");
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.get_pool())
            .await
            .map_err(|e| Self::store_error("Database health check failed", e))?;
        Ok(())
    }
}
