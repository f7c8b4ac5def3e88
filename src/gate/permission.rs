use std::collections::{HashMap, HashSet};

use crate::actor::ActorId;
use crate::document::Document;

/// Permission key granting frontend editing on every document.
pub const PERM_FRONTEND_EDIT: &str = "FRONTEND_EDIT";

/// Answers permission questions on behalf of the surrounding CMS.
pub trait PermissionChecker: Send + Sync {
    /// Whether the actor holds a named permission.
    fn has_permission(&self, actor: &ActorId, permission: &str) -> bool;

    /// Whether the actor has the CMS's own edit right on this document.
    fn can_edit_document(&self, actor: &ActorId, document: &Document) -> bool;
}

/// In-memory permission grants.
#[derive(Debug, Clone, Default)]
pub struct Grants {
    permissions: HashMap<ActorId, HashSet<String>>,
    document_editors: HashMap<String, HashSet<ActorId>>,
}

impl Grants {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grant a named permission.
    pub fn grant(&mut self, actor: &ActorId, permission: impl Into<String>) -> &mut Self {
        self.permissions
            .entry(actor.clone())
            .or_default()
            .insert(permission.into());
        self
    }

    /// Give an actor edit rights on a single document.
    pub fn allow_document(&mut self, actor: &ActorId, document_id: impl Into<String>) -> &mut Self {
        self.document_editors
            .entry(document_id.into())
            .or_default()
            .insert(actor.clone());
        self
    }
}

impl PermissionChecker for Grants {
    fn has_permission(&self, actor: &ActorId, permission: &str) -> bool {
        self.permissions
            .get(actor)
            .is_some_and(|granted| granted.contains(permission))
    }

    fn can_edit_document(&self, actor: &ActorId, document: &Document) -> bool {
        self.document_editors
            .get(&document.id)
            .is_some_and(|editors| editors.contains(actor))
    }
}
