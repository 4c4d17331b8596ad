pub mod document;

pub use document::{DocumentStore, WriteOp};

#[cfg(test)]
pub use document::MockDocumentStore;
