use chrono::{DateTime, Utc};

use super::{LockError, LockState, Versioned};

/// Durable storage for lock records, one per document id.
///
/// Every write replaces the whole record, so the holder and the expiry
/// always change together. Implementations might use a SQL row with a
/// version column, a KV store with CAS, etc.
pub trait LockStore: Send + Sync {
    /// Load the lock record for a document, expired or not.
    fn load(&self, document_id: &str) -> Result<Option<Versioned<LockState>>, LockError>;

    /// Write a lock record unconditionally (last writer wins).
    fn save(&self, lock: &LockState) -> Result<Versioned<LockState>, LockError>;

    /// Write a lock record only if the stored version still matches.
    ///
    /// `expected_version` of `None` means "no record may exist yet".
    /// Returns [`LockError::Conflict`] when the check fails.
    fn compare_and_save(
        &self,
        lock: &LockState,
        expected_version: Option<u64>,
    ) -> Result<Versioned<LockState>, LockError>;

    /// Load the lock record only if it expires after `now`.
    fn find_active(
        &self,
        document_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<Versioned<LockState>>, LockError> {
        Ok(self
            .load(document_id)?
            .filter(|stored| stored.data.expires_at > now))
    }
}
