//! Self-expiring, per-document edit locks.
//!
//! A lock is a lease: it is held while `now < expires_at` and simply lapses
//! when the holder stops renewing it. There is no release operation.
//!
//! Lock records are kept apart from the documents they guard, keyed by
//! document id. They always describe the draft stage of a document, whatever
//! stage the caller happens to be viewing.
//!
//! ## Example
//!
//! ```ignore
//! use frontend_editing::{Actor, InMemoryLockStore, LockConfig, LockManager};
//!
//! let locks = LockManager::new(InMemoryLockStore::new(), LockConfig::default())?;
//! let alice = Actor::new("alice", "alice@example.com");
//!
//! let acquisition = locks.try_acquire("42", &alice, Utc::now())?;
//! assert!(acquisition.is_acquired());
//! ```

mod error;
mod in_memory;
mod lock_manager;
mod renewal;
mod store;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::actor::{Actor, ActorId};

pub use error::LockError;
pub use in_memory::InMemoryLockStore;
pub use lock_manager::LockManager;
pub use renewal::RenewalDirective;
pub use store::LockStore;

/// Format used when showing a lock expiry to people.
pub const EXPIRY_DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The lock held on a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LockState {
    pub document_id: String,
    /// The actor holding (or who last held) the lock.
    pub editor: ActorId,
    pub editor_email: String,
    pub expires_at: DateTime<Utc>,
}

impl LockState {
    pub fn new(document_id: impl Into<String>, holder: &Actor, expires_at: DateTime<Utc>) -> Self {
        Self {
            document_id: document_id.into(),
            editor: holder.id.clone(),
            editor_email: holder.email.clone(),
            expires_at,
        }
    }

    /// True while the lease has not lapsed.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at
    }

    pub fn is_held_by(&self, actor: &ActorId) -> bool {
        &self.editor == actor
    }

    pub fn expires_display(&self) -> String {
        self.expires_at.format(EXPIRY_DISPLAY_FORMAT).to_string()
    }
}

/// A versioned wrapper around a stored lock, used for conditional writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Versioned<T> {
    pub data: T,
    pub version: u64,
}

/// Outcome of trying to take a lock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquisition {
    /// The caller now holds the lock (newly taken or extended).
    Acquired(LockState),
    /// Someone else holds an unexpired lock; nothing was written.
    Contended(LockState),
}

impl Acquisition {
    pub fn is_acquired(&self) -> bool {
        matches!(self, Acquisition::Acquired(_))
    }

    pub fn state(&self) -> &LockState {
        match self {
            Acquisition::Acquired(state) | Acquisition::Contended(state) => state,
        }
    }

    pub fn into_state(self) -> LockState {
        match self {
            Acquisition::Acquired(state) | Acquisition::Contended(state) => state,
        }
    }
}
