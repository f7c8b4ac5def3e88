use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use super::{Acquisition, LockError, LockState, LockStore, RenewalDirective};
use crate::actor::{Actor, ActorId};
use crate::config::{ConfigError, LeaseDuration, LockConfig};

/// Conditional writes attempted before `try_acquire` gives up on a hot lock.
const MAX_ACQUIRE_ATTEMPTS: usize = 3;

/// Acquire, renew and inspect leases on documents.
///
/// All state lives in the [`LockStore`]; the manager itself holds none, so any
/// number of managers (or processes) may share one store. A lease expires on
/// its own and expiry is only noticed when the lock is next read.
pub struct LockManager<S> {
    store: S,
    config: LockConfig,
    lease: LeaseDuration,
}

impl<S: LockStore> LockManager<S> {
    /// Create a manager, validating the configured lease.
    pub fn new(store: S, config: LockConfig) -> Result<Self, ConfigError> {
        let lease = config.lease()?;
        Ok(Self {
            store,
            config,
            lease,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &LockConfig {
        &self.config
    }

    pub fn lease(&self) -> LeaseDuration {
        self.lease
    }

    fn lease_from(&self, document_id: &str, actor: &Actor, now: DateTime<Utc>) -> LockState {
        LockState::new(document_id, actor, now + self.lease.as_time_delta())
    }

    /// Take the lock for `actor` until `now + lease`, whoever holds it.
    ///
    /// This does not check for contention; use [`try_acquire`](Self::try_acquire)
    /// unless the caller has already decided the write must happen.
    pub fn acquire(
        &self,
        document_id: &str,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<LockState, LockError> {
        let lock = self.lease_from(document_id, actor, now);
        let saved = self.store.save(&lock).inspect_err(|e| {
            warn!(document_id, editor = %actor.id, error = %e, "failed to write lock");
        })?;
        info!(
            document_id,
            editor = %saved.data.editor,
            expires_at = %saved.data.expires_at,
            "lock acquired"
        );
        Ok(saved.data)
    }

    /// The unexpired lock on a document, or `None` if it is free.
    pub fn inspect(
        &self,
        document_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<LockState>, LockError> {
        let lock = self.store.find_active(document_id, now)?.map(|v| v.data);
        debug!(
            document_id,
            held_by = lock.as_ref().map(|l| l.editor.as_str()),
            "lock inspected"
        );
        Ok(lock)
    }

    /// Take the lock if it is free or already held by `actor`.
    ///
    /// The check and the write are one conditional update against the store
    /// version, so two editors racing for a free lock cannot both win: the
    /// loser re-reads and gets [`Acquisition::Contended`] with the winner.
    pub fn try_acquire(
        &self,
        document_id: &str,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<Acquisition, LockError> {
        let mut last_conflict = None;

        for _ in 0..MAX_ACQUIRE_ATTEMPTS {
            let current = self.store.load(document_id)?;
            let expected_version = match current {
                Some(stored) if stored.data.is_active(now) && !stored.data.is_held_by(&actor.id) => {
                    debug!(
                        document_id,
                        editor = %actor.id,
                        held_by = %stored.data.editor,
                        expires_at = %stored.data.expires_at,
                        "lock contended"
                    );
                    return Ok(Acquisition::Contended(stored.data));
                }
                Some(stored) => Some(stored.version),
                None => None,
            };

            let lock = self.lease_from(document_id, actor, now);
            match self.store.compare_and_save(&lock, expected_version) {
                Ok(saved) => {
                    info!(
                        document_id,
                        editor = %saved.data.editor,
                        expires_at = %saved.data.expires_at,
                        "lock acquired"
                    );
                    return Ok(Acquisition::Acquired(saved.data));
                }
                Err(conflict @ LockError::Conflict { .. }) => {
                    debug!(document_id, editor = %actor.id, "lock changed underneath us, re-reading");
                    last_conflict = Some(conflict);
                }
                Err(e) => {
                    warn!(document_id, editor = %actor.id, error = %e, "failed to write lock");
                    return Err(e);
                }
            }
        }

        Err(last_conflict.unwrap_or_else(|| LockError::Conflict {
            document_id: document_id.to_string(),
            expected: None,
            actual: None,
        }))
    }

    /// Renew the caller's lease, or start one if the lock is free.
    pub fn renew(
        &self,
        document_id: &str,
        actor: &Actor,
        now: DateTime<Utc>,
    ) -> Result<Acquisition, LockError> {
        self.try_acquire(document_id, actor, now)
    }

    /// Whether `actor` may write now without taking the lock: it is free or theirs.
    pub fn holds_lock(
        &self,
        document_id: &str,
        actor: &ActorId,
        now: DateTime<Utc>,
    ) -> Result<bool, LockError> {
        Ok(self
            .inspect(document_id, now)?
            .map_or(true, |lock| lock.is_held_by(actor)))
    }

    /// The keep-alive directive a page should hand to the browser.
    pub fn renewal_directive(&self, document_id: &str) -> RenewalDirective {
        RenewalDirective::new(
            document_id,
            self.config.update_lock_path(document_id),
            self.lease,
        )
    }
}
