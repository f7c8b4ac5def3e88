//! DocumentStore - Abstract storage for lockable documents.

use super::{Document, DocumentError, Stage};

/// Storage for documents, one record per `(id, stage)`.
pub trait DocumentStore: Send + Sync {
    /// Get a document by ID on the given stage. Returns None if not found.
    fn get_document(&self, id: &str, stage: Stage) -> Result<Option<Document>, DocumentError>;

    /// Insert or update a document on its own stage.
    ///
    /// A creator already recorded for the document is kept even if the
    /// incoming document carries a different one. Returns the stored document.
    fn save_document(&self, document: &Document) -> Result<Document, DocumentError>;
}
