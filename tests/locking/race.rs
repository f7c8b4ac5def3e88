//! Two editors racing for a free lock.
//!
//! `try_acquire` is a conditional write against the stored version, so the
//! check-then-acquire window cannot produce two holders. `acquire` stays
//! unconditional and is last-writer-wins.

use std::sync::{Arc, Barrier};
use std::thread;

use frontend_editing::{
    Acquisition, Actor, ActorId, InMemoryLockStore, LockConfig, LockManager, LockState, LockStore,
};

use crate::support::{alice, at, bob, manager, RivalWriteStore};

#[test]
fn rival_write_between_check_and_act_is_reported_as_contention() {
    let rival = LockState::new("page-1", &bob(), at(120));
    let locks = LockManager::new(RivalWriteStore::new(rival.clone()), LockConfig::default()).unwrap();

    // alice reads "free", bob writes, alice's conditional write then conflicts
    let outcome = locks.try_acquire("page-1", &alice(), at(0)).unwrap();
    assert_eq!(outcome, Acquisition::Contended(rival));

    let stored = locks.store().inner.load("page-1").unwrap().unwrap();
    assert_eq!(stored.data.editor, ActorId::new("bob"));
}

#[test]
fn concurrent_first_acquisitions_yield_one_holder() {
    const EDITORS: usize = 8;

    let store = InMemoryLockStore::new();
    let locks = Arc::new(LockManager::new(store.clone(), LockConfig::default()).unwrap());
    let barrier = Arc::new(Barrier::new(EDITORS));

    let handles: Vec<_> = (0..EDITORS)
        .map(|i| {
            let locks = Arc::clone(&locks);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                let editor = Actor::new(format!("editor-{i}"), format!("editor-{i}@example.com"));
                barrier.wait();
                locks.try_acquire("page-1", &editor, at(0)).unwrap()
            })
        })
        .collect();

    let outcomes: Vec<Acquisition> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners: Vec<&LockState> = outcomes
        .iter()
        .filter(|o| o.is_acquired())
        .map(|o| o.state())
        .collect();
    assert_eq!(winners.len(), 1);

    let winner = winners[0].editor.clone();
    for outcome in &outcomes {
        assert_eq!(outcome.state().editor, winner);
    }
    assert_eq!(store.load("page-1").unwrap().unwrap().data.editor, winner);
}

#[test]
fn unconditional_acquire_is_last_writer_wins() {
    let locks = manager();
    locks.acquire("page-1", &alice(), at(0)).unwrap();
    locks.acquire("page-1", &bob(), at(0)).unwrap();

    let lock = locks.inspect("page-1", at(1)).unwrap().unwrap();
    assert_eq!(lock.editor, ActorId::new("bob"));
}
