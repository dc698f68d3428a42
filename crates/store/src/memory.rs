//! In-memory document store for tests/dev.

use std::sync::Mutex;

use crate::document::Document;
use crate::{DocumentStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryStore {
    document: Mutex<Document>,
}

impl InMemoryStore {
    /// Start from an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a given document (e.g. `seed::document()`).
    pub fn with_document(document: Document) -> Self {
        Self {
            document: Mutex::new(document),
        }
    }
}

impl DocumentStore for InMemoryStore {
    fn load(&self) -> Result<Document, StoreError> {
        Ok(self.document.lock().unwrap().clone())
    }

    fn save(&self, document: &Document) -> Result<(), StoreError> {
        *self.document.lock().unwrap() = document.clone();
        Ok(())
    }
}
