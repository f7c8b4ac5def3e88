use frontend_editing::{Acquisition, ActorId, LockStore};

use crate::support::{alice, at, bob, manager};

#[test]
fn contention_then_expiry_then_takeover() {
    let locks = manager();

    // A acquires at t=0
    let acquired = locks.try_acquire("page-1", &alice(), at(0)).unwrap();
    assert!(acquired.is_acquired());
    assert_eq!(acquired.state().expires_at, at(120));

    // B looks at t=100: locked by A until 120
    let seen = locks.inspect("page-1", at(100)).unwrap().unwrap();
    assert_eq!(seen.editor, ActorId::new("alice"));
    assert_eq!(seen.expires_at, at(120));

    let contended = locks.try_acquire("page-1", &bob(), at(100)).unwrap();
    assert!(!contended.is_acquired());
    assert_eq!(contended.state().editor, ActorId::new("alice"));

    // t=130: A never renewed, B sees it free and takes it
    assert_eq!(locks.inspect("page-1", at(130)).unwrap(), None);
    let taken = locks.try_acquire("page-1", &bob(), at(130)).unwrap();
    assert!(taken.is_acquired());
    assert_eq!(taken.state().editor, ActorId::new("bob"));
    assert_eq!(taken.state().expires_at, at(250));
}

#[test]
fn renewals_keep_the_lock_alive() {
    let locks = manager();
    locks.try_acquire("page-1", &alice(), at(0)).unwrap();

    // the browser renews every 110s
    for tick in 1..=5 {
        let renewed = locks.renew("page-1", &alice(), at(tick * 110)).unwrap();
        assert!(renewed.is_acquired());
        assert_eq!(renewed.state().expires_at, at(tick * 110 + 120));

        let rival = locks.try_acquire("page-1", &bob(), at(tick * 110 + 5)).unwrap();
        assert!(matches!(rival, Acquisition::Contended(ref lock) if lock.editor.as_str() == "alice"));
    }
}

#[test]
fn renew_starts_a_lock_when_free() {
    let locks = manager();
    let renewed = locks.renew("page-1", &alice(), at(0)).unwrap();
    assert!(renewed.is_acquired());
    assert!(locks.holds_lock("page-1", &alice().id, at(1)).unwrap());
}

#[test]
fn repeat_acquire_by_holder_keeps_holder_and_extends() {
    let locks = manager();
    let first = locks.try_acquire("page-1", &alice(), at(0)).unwrap().into_state();
    let second = locks.try_acquire("page-1", &alice(), at(0)).unwrap().into_state();
    assert_eq!(first.editor, second.editor);
    assert_eq!(second.expires_at, at(120));

    let later = locks.try_acquire("page-1", &alice(), at(60)).unwrap().into_state();
    assert_eq!(later.editor, ActorId::new("alice"));
    assert_eq!(later.expires_at, at(180));
}

#[test]
fn stale_editor_is_ignored_after_expiry() {
    let locks = manager();
    locks.acquire("page-1", &alice(), at(0)).unwrap();

    // the record still names alice, but nobody holds the lock
    let record = locks.store().load("page-1").unwrap().unwrap();
    assert_eq!(record.data.editor, ActorId::new("alice"));
    assert_eq!(locks.inspect("page-1", at(200)).unwrap(), None);
    assert!(locks.holds_lock("page-1", &bob().id, at(200)).unwrap());
}

#[test]
fn locks_are_per_document() {
    let locks = manager();
    locks.try_acquire("page-1", &alice(), at(0)).unwrap();
    let other = locks.try_acquire("page-2", &bob(), at(10)).unwrap();
    assert!(other.is_acquired());
    assert_eq!(
        locks.inspect("page-1", at(10)).unwrap().unwrap().editor,
        ActorId::new("alice")
    );
}
