use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use super::{LockError, LockState, LockStore, Versioned};

/// Internal stored representation of a lock record.
struct StoredLock {
    bytes: Vec<u8>,
    version: u64,
}

/// In-memory lock store backed by a `HashMap<String, StoredLock>`.
///
/// Records are kept serialized, as a real backend would. Clone-friendly via
/// Arc; all clones share the same records.
#[derive(Clone, Default)]
pub struct InMemoryLockStore {
    storage: Arc<RwLock<HashMap<String, StoredLock>>>,
}

impl InMemoryLockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of lock records, expired ones included.
    pub fn len(&self) -> usize {
        self.storage
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn decode(stored: &StoredLock) -> Result<Versioned<LockState>, LockError> {
        let data: LockState =
            serde_json::from_slice(&stored.bytes).map_err(|e| LockError::Serde(e.to_string()))?;
        Ok(Versioned {
            data,
            version: stored.version,
        })
    }

    fn encode(lock: &LockState) -> Result<Vec<u8>, LockError> {
        serde_json::to_vec(lock).map_err(|e| LockError::Serde(e.to_string()))
    }
}

impl LockStore for InMemoryLockStore {
    fn load(&self, document_id: &str) -> Result<Option<Versioned<LockState>>, LockError> {
        let storage = self
            .storage
            .read()
            .map_err(|_| LockError::Storage("lock store poisoned".into()))?;

        storage.get(document_id).map(Self::decode).transpose()
    }

    fn save(&self, lock: &LockState) -> Result<Versioned<LockState>, LockError> {
        let bytes = Self::encode(lock)?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| LockError::Storage("lock store poisoned".into()))?;

        let version = storage
            .get(&lock.document_id)
            .map(|s| s.version + 1)
            .unwrap_or(1);
        storage.insert(lock.document_id.clone(), StoredLock { bytes, version });

        Ok(Versioned {
            data: lock.clone(),
            version,
        })
    }

    fn compare_and_save(
        &self,
        lock: &LockState,
        expected_version: Option<u64>,
    ) -> Result<Versioned<LockState>, LockError> {
        let bytes = Self::encode(lock)?;
        let mut storage = self
            .storage
            .write()
            .map_err(|_| LockError::Storage("lock store poisoned".into()))?;

        let actual_version = storage.get(&lock.document_id).map(|s| s.version);
        if actual_version != expected_version {
            return Err(LockError::Conflict {
                document_id: lock.document_id.clone(),
                expected: expected_version,
                actual: actual_version,
            });
        }

        let version = actual_version.map(|v| v + 1).unwrap_or(1);
        storage.insert(lock.document_id.clone(), StoredLock { bytes, version });

        Ok(Versioned {
            data: lock.clone(),
            version,
        })
    }
}
