//! JSON-file document store.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::document::Document;
use crate::seed;
use crate::{DocumentStore, StoreError};

/// Stores the document as one pretty-printed JSON file.
///
/// Reads and rewrites the whole file on every call; writes are synchronous
/// with no partial-write recovery.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentStore for JsonFileStore {
    fn load(&self) -> Result<Document, StoreError> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no document file; starting from seed data");
            return Ok(seed::document());
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, document: &Document) -> Result<(), StoreError> {
        let raw = serde_json::to_string_pretty(document)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
