//! Document use-case service.
//!
//! # Responsibility
//! - Provide stable document CRUD entry points for core callers.
//! - Delegate persistence (and the progress write-back it owns) to
//!   repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.

use crate::model::document::{Document, DocumentId};
use crate::model::notebook::NotebookId;
use crate::repo::document_repo::{DocumentPatch, DocumentRecord, DocumentRepository};
use crate::repo::RepoResult;

/// Request model for creating a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateDocumentRequest {
    pub notebook_uuid: NotebookId,
    pub title: String,
    pub content: Option<String>,
    /// Defaults to 0 when absent.
    pub order_index: Option<i64>,
}

/// Use-case service wrapper for document CRUD operations.
pub struct DocumentService<R: DocumentRepository> {
    repo: R,
}

impl<R: DocumentRepository> DocumentService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a document inside its notebook.
    ///
    /// # Contract
    /// - The owning notebook's progress/status reflect the new count when
    ///   this returns.
    /// - Returns the created stable document ID.
    pub fn create_document(&mut self, request: &CreateDocumentRequest) -> RepoResult<DocumentId> {
        let mut document = Document::new(request.notebook_uuid, request.title.clone());
        document.content = request.content.clone();
        if let Some(order_index) = request.order_index {
            document.order_index = order_index;
        }
        self.repo.create_document(&document)
    }

    /// Gets one document by stable ID.
    pub fn get_document(&self, id: DocumentId) -> RepoResult<Option<DocumentRecord>> {
        self.repo.get_document(id)
    }

    /// Lists a notebook's documents in manual order.
    pub fn list_documents(&self, notebook: NotebookId) -> RepoResult<Vec<DocumentRecord>> {
        self.repo.list_documents(notebook)
    }

    /// Applies a partial update. Does not touch notebook progress.
    pub fn update_document(&mut self, id: DocumentId, patch: &DocumentPatch) -> RepoResult<()> {
        self.repo.update_document(id, patch)
    }

    /// Deletes a document.
    ///
    /// # Contract
    /// - The owning notebook's progress/status reflect the reduced count
    ///   when this returns.
    pub fn delete_document(&mut self, id: DocumentId) -> RepoResult<()> {
        self.repo.delete_document(id)
    }
}
