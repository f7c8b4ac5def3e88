use chrono::{DateTime, TimeZone, Utc};
use frontend_editing::{
    Actor, Document, DocumentStore, FrontendEditing, Grants, InMemoryDocumentStore,
    InMemoryLockStore, LockConfig, LockManager, RequestContext, Stage, PERM_FRONTEND_EDIT,
};

pub type Editing = FrontendEditing<InMemoryLockStore, InMemoryDocumentStore, Grants>;

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

/// Creator of the test page.
pub fn alice() -> Actor {
    Actor::new("alice", "alice@example.com")
}

/// Holds the frontend-edit grant.
pub fn bob() -> Actor {
    Actor::new("bob", "bob@example.com")
}

/// No rights at all.
pub fn mallory() -> Actor {
    Actor::new("mallory", "mallory@example.com")
}

pub fn page() -> Document {
    Document::new("42", "Page", Stage::Draft)
        .created_by("alice")
        .with_field("Title", "Welcome")
        .with_html_field("Content", "<p>Hello &amp; welcome</p>")
}

/// An editing setup with the draft and live copies of `page()` stored.
pub fn editing() -> Editing {
    let mut grants = Grants::new();
    grants.grant(&bob().id, PERM_FRONTEND_EDIT);

    let locks = LockManager::new(InMemoryLockStore::new(), LockConfig::default()).unwrap();
    let documents = InMemoryDocumentStore::new();
    documents.save_document(&page()).unwrap();
    documents.save_document(&page().on_stage(Stage::Live)).unwrap();

    FrontendEditing::new(locks, documents, grants)
}

pub fn draft(actor: Actor, secs: i64) -> RequestContext {
    RequestContext::for_actor(actor, Stage::Draft, at(secs))
}

pub fn live(actor: Actor, secs: i64) -> RequestContext {
    RequestContext::for_actor(actor, Stage::Live, at(secs))
}
