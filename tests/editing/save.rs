use frontend_editing::{
    ActorId, Denial, Document, DocumentStore, EditError, Stage,
};

use crate::support::{alice, at, bob, draft, editing, live, mallory};

#[test]
fn save_writes_draft_and_takes_lock() {
    let editing = editing();
    let saved = editing
        .save_field("42", "Title", "New title", &draft(bob(), 0))
        .unwrap();
    assert_eq!(saved.field("Title"), Some("New title"));

    let stored = editing
        .documents()
        .get_document("42", Stage::Draft)
        .unwrap()
        .unwrap();
    assert_eq!(stored.field("Title"), Some("New title"));
    assert_eq!(stored.creator_id, Some(ActorId::new("alice")));

    let live = editing
        .documents()
        .get_document("42", Stage::Live)
        .unwrap()
        .unwrap();
    assert_eq!(live.field("Title"), Some("Welcome"));

    let lock = editing.lock_status("42", at(1)).unwrap().unwrap();
    assert_eq!(lock.editor, ActorId::new("bob"));
}

#[test]
fn save_extends_the_editors_lease() {
    let editing = editing();
    editing.update_lock("42", &draft(alice(), 0)).unwrap();
    editing
        .save_field("42", "Title", "Later", &draft(alice(), 90))
        .unwrap();
    assert_eq!(
        editing.lock_status("42", at(91)).unwrap().unwrap().expires_at,
        at(210)
    );
}

#[test]
fn save_while_locked_by_other_is_rejected() {
    let editing = editing();
    editing.update_lock("42", &draft(alice(), 0)).unwrap();

    let err = editing
        .save_field("42", "Title", "Clobbered", &draft(bob(), 30))
        .unwrap_err();
    match err {
        EditError::Locked(lock) => assert_eq!(lock.editor, ActorId::new("alice")),
        other => panic!("expected locked error, got {:?}", other),
    }

    let stored = editing
        .documents()
        .get_document("42", Stage::Draft)
        .unwrap()
        .unwrap();
    assert_eq!(stored.field("Title"), Some("Welcome"));
}

#[test]
fn save_on_live_stage_is_denied() {
    let err = editing()
        .save_field("42", "Title", "Nope", &live(alice(), 0))
        .unwrap_err();
    assert!(matches!(err, EditError::Denied(Denial::WrongStage)));
}

#[test]
fn save_without_rights_is_denied() {
    let err = editing()
        .save_field("42", "Title", "Nope", &draft(mallory(), 0))
        .unwrap_err();
    assert_eq!(err.status_code(), 403);
}

#[test]
fn first_save_records_creator() {
    let editing = editing();
    editing
        .documents()
        .save_document(&Document::new("7", "Page", Stage::Draft))
        .unwrap();

    let saved = editing
        .save_field("7", "Title", "Fresh", &draft(bob(), 0))
        .unwrap();
    assert_eq!(saved.creator_id, Some(ActorId::new("bob")));

    let again = editing
        .save_field("7", "Title", "Fresher", &draft(bob(), 10))
        .unwrap();
    assert_eq!(again.creator_id, Some(ActorId::new("bob")));
}

fn inner_html(markup: &str) -> &str {
    let start = markup.find("\">").unwrap() + 2;
    let end = markup.rfind("</div>").unwrap();
    &markup[start..end]
}

#[test]
fn html_survives_edit_round_trips() {
    let editing = editing();
    let body = "<p>Fish &amp; <em>chips</em></p>";
    editing
        .save_field("42", "Content", body, &draft(alice(), 0))
        .unwrap();

    let doc = editing.documents().get_document("42", Stage::Draft).unwrap().unwrap();
    let first = editing
        .render_field(&doc, "Content", &draft(alice(), 1))
        .unwrap();
    assert_eq!(inner_html(&first.markup), body);

    // The editor posts back the element's innerHTML unchanged.
    editing
        .save_field("42", "Content", inner_html(&first.markup), &draft(alice(), 2))
        .unwrap();
    let doc = editing.documents().get_document("42", Stage::Draft).unwrap().unwrap();
    assert_eq!(doc.field("Content"), Some(body));

    let second = editing
        .render_field(&doc, "Content", &draft(alice(), 3))
        .unwrap();
    assert_eq!(second.markup, first.markup);
}
