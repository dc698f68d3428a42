//! Document persistence for the inventory service.
//!
//! The whole application state lives in one JSON document that is read and
//! rewritten wholesale on every mutation. Implementations sit behind the
//! object-safe [`DocumentStore`] trait so the service layer can swap the
//! JSON-file store for the in-memory one (tests, dev) without touching
//! callers.

use stockforge_core::DomainError;

pub mod document;
pub mod json_file;
pub mod memory;
pub mod seed;

pub use document::Document;
pub use json_file::JsonFileStore;
pub use memory::InMemoryStore;

/// Store error.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::persistence(err.to_string())
    }
}

/// Whole-document storage.
///
/// `load` and `save` each cover the full document; there is no partial
/// update. Concurrent writers race (last writer wins) — serializing
/// read-modify-write cycles is the caller's concern.
pub trait DocumentStore: Send + Sync {
    /// Load the current document, falling back to seed data when no document
    /// has been persisted yet.
    fn load(&self) -> Result<Document, StoreError>;

    /// Persist the document in full.
    fn save(&self, document: &Document) -> Result<(), StoreError>;
}
