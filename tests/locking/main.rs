//! Lock lifecycle integration tests (LockManager + LockStore).

mod properties;
mod race;
mod scenarios;
