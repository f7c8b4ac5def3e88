//! Edit Session Gate - may this actor edit this document right now?

mod permission;

use std::fmt;

use tracing::debug;

use crate::actor::Actor;
use crate::document::{Document, Stage};

pub use permission::{Grants, PermissionChecker, PERM_FRONTEND_EDIT};

/// Why an actor may not enter edit mode.
///
/// None of these are failures: a denied actor just gets read-only output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// No actor identity on the request.
    Unauthenticated,
    /// Not the creator, no document edit right and no frontend-edit grant.
    Forbidden,
    /// The request is viewing the published stage.
    WrongStage,
}

impl fmt::Display for Denial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Denial::Unauthenticated => write!(f, "not logged in"),
            Denial::Forbidden => write!(f, "not permitted to edit this document"),
            Denial::WrongStage => write!(f, "editing is only possible on the draft stage"),
        }
    }
}

/// Combines identity, ownership, permissions and stage into an edit decision.
pub struct EditGate<P> {
    permissions: P,
}

impl<P: PermissionChecker> EditGate<P> {
    pub fn new(permissions: P) -> Self {
        Self { permissions }
    }

    pub fn permissions(&self) -> &P {
        &self.permissions
    }

    /// Decide whether `actor` may edit `document` while viewing `stage`.
    ///
    /// With `require_draft_stage` false the stage is ignored, which answers
    /// "could they edit if they switched to the draft?".
    pub fn check(
        &self,
        document: &Document,
        actor: Option<&Actor>,
        stage: Stage,
        require_draft_stage: bool,
    ) -> Result<(), Denial> {
        let decision = self.decide(document, actor, stage, require_draft_stage);
        debug!(
            document_id = %document.id,
            actor = actor.map(|a| a.id.as_str()),
            stage = %stage,
            denied = ?decision.err(),
            "edit gate decision"
        );
        decision
    }

    pub fn can_edit(
        &self,
        document: &Document,
        actor: Option<&Actor>,
        stage: Stage,
        require_draft_stage: bool,
    ) -> bool {
        self.check(document, actor, stage, require_draft_stage).is_ok()
    }

    fn decide(
        &self,
        document: &Document,
        actor: Option<&Actor>,
        stage: Stage,
        require_draft_stage: bool,
    ) -> Result<(), Denial> {
        let actor = actor.ok_or(Denial::Unauthenticated)?;

        let permitted = document.is_creator(&actor.id)
            || self.permissions.can_edit_document(&actor.id, document)
            || self.permissions.has_permission(&actor.id, PERM_FRONTEND_EDIT);
        if !permitted {
            return Err(Denial::Forbidden);
        }

        if require_draft_stage && stage != Stage::Draft {
            return Err(Denial::WrongStage);
        }

        Ok(())
    }
}
