//! InMemoryDocumentStore - HashMap-backed document store for testing and development.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{Document, DocumentError, DocumentStore, Stage};

/// In-memory document store backed by a HashMap.
///
/// Storage key is `"Stage:id"`. Clone-friendly via Arc.
#[derive(Clone, Default)]
pub struct InMemoryDocumentStore {
    storage: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl InMemoryDocumentStore {
    /// Create a new empty document store.
    pub fn new() -> Self {
        Self::default()
    }

    fn make_key(stage: Stage, id: &str) -> String {
        format!("{}:{}", stage.as_str(), id)
    }

    fn decode(bytes: &[u8]) -> Result<Document, DocumentError> {
        serde_json::from_slice(bytes).map_err(|e| DocumentError::Serde(e.to_string()))
    }
}

impl DocumentStore for InMemoryDocumentStore {
    fn get_document(&self, id: &str, stage: Stage) -> Result<Option<Document>, DocumentError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))?;

        storage
            .get(&Self::make_key(stage, id))
            .map(|bytes| Self::decode(bytes))
            .transpose()
    }

    fn save_document(&self, document: &Document) -> Result<Document, DocumentError> {
        let key = Self::make_key(document.stage, &document.id);
        let mut storage = self
            .storage
            .write()
            .map_err(|_| DocumentError::Storage("lock poisoned".into()))?;

        let mut stored = document.clone();
        if let Some(existing) = storage.get(&key) {
            let existing = Self::decode(existing)?;
            if existing.creator_id.is_some() {
                stored.creator_id = existing.creator_id;
            }
        }

        let bytes =
            serde_json::to_vec(&stored).map_err(|e| DocumentError::Serde(e.to_string()))?;
        storage.insert(key, bytes);

        Ok(stored)
    }
}
