//! Notebook use-case service.
//!
//! # Responsibility
//! - Provide notebook create/get/list/update/delete APIs plus the
//!   dashboard overview (list + stats).
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Create and update read the written row back; a missing read-back is an
//!   inconsistency error, not a silent success.
//! - Service layer remains storage-agnostic.

use crate::model::notebook::{Notebook, NotebookId};
use crate::repo::notebook_repo::{
    HubStats, NotebookListQuery, NotebookPatch, NotebookRecord, NotebookRepository,
};
use crate::repo::{RepoError, RepoResult};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Service error for notebook use-cases.
#[derive(Debug)]
pub enum NotebookServiceError {
    /// Target notebook does not exist.
    NotebookNotFound(NotebookId),
    /// Persistence-layer failure.
    Repo(RepoError),
    /// Internal consistency mismatch between write and read-back.
    InconsistentState(&'static str),
}

impl Display for NotebookServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotebookNotFound(id) => write!(f, "notebook not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => {
                write!(f, "inconsistent notebook state: {details}")
            }
        }
    }
}

impl Error for NotebookServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for NotebookServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::NotebookNotFound(id),
            other => Self::Repo(other),
        }
    }
}

/// Request model for creating a notebook.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateNotebookRequest {
    pub name: String,
    pub description: Option<String>,
    /// Defaults to `BookOpen` when absent.
    pub icon: Option<String>,
    /// Defaults to `General` when absent.
    pub category: Option<String>,
}

/// Dashboard envelope: the full notebook list plus hub-wide stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HubOverview {
    pub notebooks: Vec<NotebookRecord>,
    pub stats: HubStats,
}

/// Notebook service facade over repository implementations.
pub struct NotebookService<R: NotebookRepository> {
    repo: R,
}

impl<R: NotebookRepository> NotebookService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates one notebook and returns the persisted record.
    pub fn create_notebook(
        &self,
        request: &CreateNotebookRequest,
    ) -> Result<NotebookRecord, NotebookServiceError> {
        let mut notebook = Notebook::new(request.name.clone());
        notebook.description = request.description.clone();
        if let Some(icon) = request.icon.clone() {
            notebook.icon = icon;
        }
        if let Some(category) = request.category.clone() {
            notebook.category = category;
        }

        let id = self.repo.create_notebook(&notebook)?;
        self.repo
            .get_notebook(id)?
            .ok_or(NotebookServiceError::InconsistentState(
                "created notebook not found in read-back",
            ))
    }

    /// Gets one notebook by stable ID.
    pub fn get_notebook(&self, id: NotebookId) -> RepoResult<Option<NotebookRecord>> {
        self.repo.get_notebook(id)
    }

    /// Lists notebooks using the category filter.
    pub fn list_notebooks(&self, query: &NotebookListQuery) -> RepoResult<Vec<NotebookRecord>> {
        self.repo.list_notebooks(query)
    }

    /// Applies a partial update and returns the persisted record.
    pub fn update_notebook(
        &self,
        id: NotebookId,
        patch: &NotebookPatch,
    ) -> Result<NotebookRecord, NotebookServiceError> {
        self.repo.update_notebook(id, patch)?;
        self.repo
            .get_notebook(id)?
            .ok_or(NotebookServiceError::InconsistentState(
                "updated notebook not found in read-back",
            ))
    }

    /// Deletes a notebook and, via cascade, its documents.
    pub fn delete_notebook(&self, id: NotebookId) -> RepoResult<()> {
        self.repo.delete_notebook(id)
    }

    /// Returns the dashboard overview: all notebooks plus hub stats.
    pub fn overview(&self) -> RepoResult<HubOverview> {
        let notebooks = self.repo.list_notebooks(&NotebookListQuery::default())?;
        let stats = self.repo.stats()?;
        Ok(HubOverview { notebooks, stats })
    }
}
