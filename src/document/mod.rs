//! Lockable documents and their storage.
//!
//! A document exists once per [`Stage`]: the draft ("Stage") copy is what
//! editors change, the live copy is what visitors see. Both copies share the
//! same id. Lock state is not part of the document; see [`crate::lock`].
//!
//! ## Example
//!
//! ```ignore
//! use frontend_editing::{ActorId, Document, DocumentStore, InMemoryDocumentStore, Stage};
//!
//! let store = InMemoryDocumentStore::new();
//! let mut page = Document::new("42", "Page", Stage::Draft);
//! page.set_field("Content", "<p>Hello</p>");
//! page.assign_creator(&ActorId::new("member-1"));
//! store.save_document(&page)?;
//! ```

mod in_memory;
mod store;

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::actor::ActorId;

pub use in_memory::InMemoryDocumentStore;
pub use store::DocumentStore;

/// Which logical version of a document is being read or rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// The editable draft version.
    #[serde(rename = "Stage")]
    Draft,
    /// The published version.
    Live,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Draft => "Stage",
            Stage::Live => "Live",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a field's stored value is emitted into a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain text, escaped on output.
    Text,
    /// HTML markup, emitted as stored.
    Html,
}

/// A content entity that can be edited on the frontend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    /// Type name used when building editable element identifiers (e.g. `Page`).
    pub doc_type: String,
    pub stage: Stage,
    /// Set on first save and never changed afterwards.
    pub creator_id: Option<ActorId>,
    #[serde(default)]
    pub fields: BTreeMap<String, String>,
    /// Fields holding HTML; every other field is plain text.
    #[serde(default)]
    pub html_fields: BTreeSet<String>,
}

impl Document {
    pub fn new(id: impl Into<String>, doc_type: impl Into<String>, stage: Stage) -> Self {
        Self {
            id: id.into(),
            doc_type: doc_type.into(),
            stage,
            creator_id: None,
            fields: BTreeMap::new(),
            html_fields: BTreeSet::new(),
        }
    }

    /// Builder-style creator assignment.
    pub fn created_by(mut self, creator: impl Into<ActorId>) -> Self {
        self.creator_id = Some(creator.into());
        self
    }

    /// Builder-style field assignment.
    pub fn with_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_field(name, value);
        self
    }

    /// Builder-style assignment of an HTML field.
    pub fn with_html_field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.html_fields.insert(name.clone());
        self.set_field(name, value);
        self
    }

    /// Record `actor` as the creator unless one is already set.
    ///
    /// Returns true if the creator was assigned by this call.
    pub fn assign_creator(&mut self, actor: &ActorId) -> bool {
        if self.creator_id.is_some() {
            return false;
        }
        self.creator_id = Some(actor.clone());
        true
    }

    pub fn is_creator(&self, actor: &ActorId) -> bool {
        self.creator_id.as_ref() == Some(actor)
    }

    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|v| v.as_str())
    }

    pub fn field_kind(&self, name: &str) -> FieldKind {
        if self.html_fields.contains(name) {
            FieldKind::Html
        } else {
            FieldKind::Text
        }
    }

    pub fn set_field(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(name.into(), value.into());
    }

    /// The same document as seen on another stage.
    pub fn on_stage(&self, stage: Stage) -> Self {
        Self {
            stage,
            ..self.clone()
        }
    }
}

/// Error type for document store operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// Serialization/deserialization error.
    Serde(String),
    /// Storage-level error.
    Storage(String),
}

impl fmt::Display for DocumentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentError::Serde(msg) => write!(f, "document serialization error: {}", msg),
            DocumentError::Storage(msg) => write!(f, "document storage error: {}", msg),
        }
    }
}

impl std::error::Error for DocumentError {}
