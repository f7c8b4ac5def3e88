use std::error::Error;
use std::fmt;

use crate::config::ConfigError;
use crate::document::DocumentError;
use crate::gate::Denial;
use crate::lock::{LockError, LockState};

/// Error type for frontend editing operations.
#[derive(Debug)]
pub enum EditError {
    /// The gate refused edit mode.
    Denied(Denial),
    /// Another actor holds the lock, so a write cannot proceed.
    Locked(LockState),
    /// No draft document with this id.
    DocumentNotFound(String),
    /// The requested wrapper tag is not a plain element name.
    InvalidTag(String),
    /// Lock store error.
    Lock(LockError),
    /// Document store error.
    Document(DocumentError),
    /// Invalid configuration.
    Config(ConfigError),
}

impl fmt::Display for EditError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditError::Denied(denial) => write!(f, "edit denied: {}", denial),
            EditError::Locked(lock) => write!(
                f,
                "document {} is locked by {} until {}",
                lock.document_id,
                lock.editor_email,
                lock.expires_display()
            ),
            EditError::DocumentNotFound(id) => write!(f, "document not found: {}", id),
            EditError::InvalidTag(tag) => write!(f, "invalid element tag: {:?}", tag),
            EditError::Lock(e) => write!(f, "lock error: {}", e),
            EditError::Document(e) => write!(f, "document error: {}", e),
            EditError::Config(e) => write!(f, "configuration error: {}", e),
        }
    }
}

impl Error for EditError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            EditError::Lock(e) => Some(e),
            EditError::Document(e) => Some(e),
            EditError::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<Denial> for EditError {
    fn from(denial: Denial) -> Self {
        EditError::Denied(denial)
    }
}

impl From<LockError> for EditError {
    fn from(err: LockError) -> Self {
        EditError::Lock(err)
    }
}

impl From<DocumentError> for EditError {
    fn from(err: DocumentError) -> Self {
        EditError::Document(err)
    }
}

impl From<ConfigError> for EditError {
    fn from(err: ConfigError) -> Self {
        EditError::Config(err)
    }
}

impl EditError {
    /// Map this error to an HTTP-style status code.
    pub fn status_code(&self) -> u16 {
        match self {
            EditError::Denied(Denial::Unauthenticated) => 401,
            EditError::Denied(_) => 403,
            EditError::Locked(_) => 409,
            EditError::DocumentNotFound(_) => 404,
            EditError::InvalidTag(_) => 400,
            EditError::Lock(_) => 500,
            EditError::Document(_) => 500,
            EditError::Config(_) => 500,
        }
    }
}
