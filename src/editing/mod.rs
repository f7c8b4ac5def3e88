//! Frontend editing - the entry points the page renderer and the browser call.
//!
//! [`FrontendEditing`] ties the [`EditGate`], the [`LockManager`] and a
//! [`DocumentStore`] together:
//!
//! - [`render_field`](FrontendEditing::render_field) decides per field whether
//!   to emit read-only, locked or editable markup, taking the lock on the way.
//! - [`update_lock`](FrontendEditing::update_lock) is what the browser's
//!   keep-alive loop hits.
//! - [`save_field`](FrontendEditing::save_field) writes an edited field back
//!   to the draft document.
//!
//! Everything a request knows (who is asking, which stage they are viewing,
//! what time it is) travels in a [`RequestContext`].

pub mod markup;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::actor::Actor;
use crate::config::LockConfig;
use crate::document::{Document, DocumentStore, Stage};
use crate::error::EditError;
use crate::gate::{Denial, EditGate, PermissionChecker};
use crate::lock::{Acquisition, LockManager, LockState, LockStore, RenewalDirective};

pub use markup::DEFAULT_TAG;

/// Per-request ambient state, passed explicitly.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub actor: Option<Actor>,
    /// The stage the request is rendering.
    pub stage: Stage,
    pub now: DateTime<Utc>,
}

impl RequestContext {
    pub fn new(actor: Option<Actor>, stage: Stage, now: DateTime<Utc>) -> Self {
        Self { actor, stage, now }
    }

    pub fn anonymous(stage: Stage, now: DateTime<Utc>) -> Self {
        Self::new(None, stage, now)
    }

    pub fn for_actor(actor: Actor, stage: Stage, now: DateTime<Utc>) -> Self {
        Self::new(Some(actor), stage, now)
    }
}

/// How a field ended up being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderMode {
    /// Plain value; the gate refused edit mode.
    ReadOnly(Denial),
    /// Another actor holds the lock.
    Locked(LockState),
    /// The requesting actor holds the lock and may edit.
    Editable,
}

/// Output of rendering one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedField {
    pub markup: String,
    pub mode: RenderMode,
    /// Present only for editable fields; the page must hand it to the browser.
    pub renewal: Option<RenewalDirective>,
}

impl RenderedField {
    pub fn is_editable(&self) -> bool {
        self.mode == RenderMode::Editable
    }
}

/// Frontend editing over a lock store, a document store and a permission source.
pub struct FrontendEditing<L, D, P> {
    locks: LockManager<L>,
    documents: D,
    gate: EditGate<P>,
}

impl<L, D, P> FrontendEditing<L, D, P>
where
    L: LockStore,
    D: DocumentStore,
    P: PermissionChecker,
{
    pub fn new(locks: LockManager<L>, documents: D, permissions: P) -> Self {
        Self {
            locks,
            documents,
            gate: EditGate::new(permissions),
        }
    }

    /// Build from a lock store and an unvalidated config.
    pub fn from_config(
        lock_store: L,
        config: LockConfig,
        documents: D,
        permissions: P,
    ) -> Result<Self, EditError> {
        let locks = LockManager::new(lock_store, config)?;
        Ok(Self::new(locks, documents, permissions))
    }

    pub fn locks(&self) -> &LockManager<L> {
        &self.locks
    }

    pub fn documents(&self) -> &D {
        &self.documents
    }

    pub fn gate(&self) -> &EditGate<P> {
        &self.gate
    }

    /// Render a field wrapped in the default `div`.
    pub fn render_field(
        &self,
        document: &Document,
        field: &str,
        ctx: &RequestContext,
    ) -> Result<RenderedField, EditError> {
        self.render_field_as(document, field, DEFAULT_TAG, ctx)
    }

    /// Render a field, wrapping editable output in `tag`.
    ///
    /// Denied actors get the bare field content (text escaped, HTML as
    /// stored) with no wrapper. Allowed actors take the lock if they can; if
    /// someone else holds it they get the locked fragment naming the holder.
    pub fn render_field_as(
        &self,
        document: &Document,
        field: &str,
        tag: &str,
        ctx: &RequestContext,
    ) -> Result<RenderedField, EditError> {
        if !markup::is_valid_tag(tag) {
            return Err(EditError::InvalidTag(tag.to_string()));
        }

        let content = markup::field_content(
            document.field_kind(field),
            document.field(field).unwrap_or_default(),
        );
        let actor = match self.allowed_actor(document, ctx) {
            Ok(actor) => actor,
            Err(denial) => {
                return Ok(RenderedField {
                    markup: content,
                    mode: RenderMode::ReadOnly(denial),
                    renewal: None,
                })
            }
        };

        match self.locks.try_acquire(&document.id, actor, ctx.now)? {
            Acquisition::Contended(lock) => Ok(RenderedField {
                markup: markup::locked(&content, &lock),
                mode: RenderMode::Locked(lock),
                renewal: None,
            }),
            Acquisition::Acquired(_) => Ok(RenderedField {
                markup: markup::editable(tag, &markup::element_id(document, field), &content),
                mode: RenderMode::Editable,
                renewal: Some(self.locks.renewal_directive(&document.id)),
            }),
        }
    }

    fn allowed_actor<'a>(
        &self,
        document: &Document,
        ctx: &'a RequestContext,
    ) -> Result<&'a Actor, Denial> {
        self.gate
            .check(document, ctx.actor.as_ref(), ctx.stage, true)?;
        ctx.actor.as_ref().ok_or(Denial::Unauthenticated)
    }

    fn draft_document(&self, document_id: &str) -> Result<Document, EditError> {
        self.documents
            .get_document(document_id, Stage::Draft)?
            .ok_or_else(|| EditError::DocumentNotFound(document_id.to_string()))
    }

    /// Renew (or start) the calling actor's lock on a document.
    ///
    /// The keep-alive call carries no stage, so only identity and permissions
    /// are checked. Contention is returned, not raised.
    pub fn update_lock(
        &self,
        document_id: &str,
        ctx: &RequestContext,
    ) -> Result<Acquisition, EditError> {
        let actor = ctx
            .actor
            .as_ref()
            .ok_or(EditError::Denied(Denial::Unauthenticated))?;
        let document = self.draft_document(document_id)?;
        self.gate.check(&document, Some(actor), ctx.stage, false)?;

        Ok(self.locks.renew(document_id, actor, ctx.now)?)
    }

    /// The current lock on a document, as shown to the requesting actor.
    ///
    /// Holder details are only revealed to actors who could edit the
    /// document, checked the same way as [`update_lock`](Self::update_lock).
    pub fn visible_lock(
        &self,
        document_id: &str,
        ctx: &RequestContext,
    ) -> Result<Option<LockState>, EditError> {
        let actor = ctx
            .actor
            .as_ref()
            .ok_or(EditError::Denied(Denial::Unauthenticated))?;
        let document = self.draft_document(document_id)?;
        self.gate.check(&document, Some(actor), ctx.stage, false)?;

        self.lock_status(document_id, ctx.now)
    }

    /// The current lock on a document, if any. No access check.
    pub fn lock_status(
        &self,
        document_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<LockState>, EditError> {
        Ok(self.locks.inspect(document_id, now)?)
    }

    /// Save an edited field to the draft document.
    ///
    /// The actor must pass the gate on the draft stage and must be able to
    /// take (or already hold) the lock; saving extends their lease.
    pub fn save_field(
        &self,
        document_id: &str,
        field: &str,
        value: &str,
        ctx: &RequestContext,
    ) -> Result<Document, EditError> {
        let mut document = self.draft_document(document_id)?;
        let actor = self.allowed_actor(&document, ctx)?;

        if let Acquisition::Contended(lock) = self.locks.try_acquire(document_id, actor, ctx.now)? {
            warn!(
                document_id,
                editor = %actor.id,
                held_by = %lock.editor,
                "save rejected, document locked by another editor"
            );
            return Err(EditError::Locked(lock));
        }

        document.assign_creator(&actor.id);
        document.set_field(field, value);
        let saved = self.documents.save_document(&document)?;
        info!(document_id, editor = %actor.id, field, "field saved");

        Ok(saved)
    }
}
