//! MySQL document store

mod document_store;
mod error_mapping;

pub use document_store::{MySqlDocumentStore, DOCUMENTS_TABLE};
pub use error_mapping::classify_sqlx_error;
