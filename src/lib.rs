//! Frontend editing for CMS documents, guarded by self-expiring edit locks.
//!
//! Editors edit content fields directly in the rendered page. Before a field
//! is rendered editable, the editor takes a lease on the document; their
//! browser renews it periodically and it lapses on its own once they leave.
//! Anyone else rendering the document meanwhile sees who holds the lock and
//! until when.
//!
//! ## Quick Start
//!
//! ```ignore
//! use frontend_editing::{
//!     Actor, Document, FrontendEditing, Grants, InMemoryDocumentStore, InMemoryLockStore,
//!     LockConfig, LockManager, RequestContext, Stage,
//! };
//!
//! let locks = LockManager::new(InMemoryLockStore::new(), LockConfig::default())?;
//! let editing = FrontendEditing::new(locks, InMemoryDocumentStore::new(), Grants::new());
//!
//! let page = Document::new("42", "Page", Stage::Draft).created_by("alice");
//! let ctx = RequestContext::for_actor(Actor::new("alice", "alice@example.com"), Stage::Draft, Utc::now());
//!
//! let field = editing.render_field(&page, "Content", &ctx)?;
//! if let Some(renewal) = field.renewal {
//!     // emit <script>{renewal.to_script()}</script> into the page
//! }
//! ```
//!
//! The HTTP endpoints the browser calls live in [`http`] behind the `http` feature.

mod actor;
mod clock;
mod config;
mod document;
mod editing;
mod error;
mod gate;
mod lock;

#[cfg(feature = "http")]
pub mod http;

pub use actor::{Actor, ActorId};
pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{
    ConfigError, LeaseDuration, LockConfig, DEFAULT_LEASE_SECONDS, MAX_LEASE_SECONDS,
    RENEWAL_MARGIN_SECONDS,
};
pub use document::{
    Document, DocumentError, DocumentStore, FieldKind, InMemoryDocumentStore, Stage,
};
pub use editing::{markup, FrontendEditing, RenderMode, RenderedField, RequestContext, DEFAULT_TAG};
pub use error::EditError;
pub use gate::{Denial, EditGate, Grants, PermissionChecker, PERM_FRONTEND_EDIT};
pub use lock::{
    Acquisition, InMemoryLockStore, LockError, LockManager, LockState, LockStore,
    RenewalDirective, Versioned, EXPIRY_DISPLAY_FORMAT,
};
