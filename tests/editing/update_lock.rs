use frontend_editing::{Acquisition, ActorId, Denial, EditError, RequestContext, Stage};

use crate::support::{alice, at, bob, draft, editing, live, mallory};

#[test]
fn keep_alive_extends_holders_lease() {
    let editing = editing();
    editing.update_lock("42", &draft(alice(), 0)).unwrap();

    let renewed = editing.update_lock("42", &draft(alice(), 110)).unwrap();
    assert!(renewed.is_acquired());
    assert_eq!(renewed.state().expires_at, at(230));
}

#[test]
fn keep_alive_from_rival_reports_holder() {
    let editing = editing();
    editing.update_lock("42", &draft(alice(), 0)).unwrap();

    let outcome = editing.update_lock("42", &draft(bob(), 50)).unwrap();
    match outcome {
        Acquisition::Contended(lock) => assert_eq!(lock.editor, ActorId::new("alice")),
        other => panic!("expected contention, got {:?}", other),
    }
}

#[test]
fn keep_alive_ignores_viewing_stage() {
    let editing = editing();
    let outcome = editing.update_lock("42", &live(alice(), 0)).unwrap();
    assert!(outcome.is_acquired());
}

#[test]
fn keep_alive_requires_actor_and_rights() {
    let editing = editing();
    assert!(matches!(
        editing.update_lock("42", &RequestContext::anonymous(Stage::Draft, at(0))),
        Err(EditError::Denied(Denial::Unauthenticated))
    ));
    assert!(matches!(
        editing.update_lock("42", &draft(mallory(), 0)),
        Err(EditError::Denied(Denial::Forbidden))
    ));
    assert!(editing.lock_status("42", at(0)).unwrap().is_none());
}

#[test]
fn keep_alive_for_unknown_document() {
    let err = editing().update_lock("404", &draft(alice(), 0)).unwrap_err();
    assert_eq!(err.status_code(), 404);
}
