//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts per aggregate.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes enforce model `validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`) in addition to DB
//!   transport errors.
//! - Document write paths own the notebook progress recomputation.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::db::DbError;
use crate::model::conversation::ConversationValidationError;
use crate::model::document::DocumentValidationError;
use crate::model::notebook::NotebookValidationError;
use crate::model::progress::ProgressError;
use crate::model::topic::TopicValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

pub mod conversation_repo;
pub mod document_repo;
pub mod notebook_repo;
pub mod topic_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Notebook(NotebookValidationError),
    Document(DocumentValidationError),
    Topic(TopicValidationError),
    Conversation(ConversationValidationError),
    Progress(ProgressError),
    Db(DbError),
    NotFound(Uuid),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Notebook(err) => write!(f, "{err}"),
            Self::Document(err) => write!(f, "{err}"),
            Self::Topic(err) => write!(f, "{err}"),
            Self::Conversation(err) => write!(f, "{err}"),
            Self::Progress(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "record not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Notebook(err) => Some(err),
            Self::Document(err) => Some(err),
            Self::Topic(err) => Some(err),
            Self::Conversation(err) => Some(err),
            Self::Progress(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<NotebookValidationError> for RepoError {
    fn from(value: NotebookValidationError) -> Self {
        Self::Notebook(value)
    }
}

impl From<DocumentValidationError> for RepoError {
    fn from(value: DocumentValidationError) -> Self {
        Self::Document(value)
    }
}

impl From<TopicValidationError> for RepoError {
    fn from(value: TopicValidationError) -> Self {
        Self::Topic(value)
    }
}

impl From<ConversationValidationError> for RepoError {
    fn from(value: ConversationValidationError) -> Self {
        Self::Conversation(value)
    }
}

impl From<ProgressError> for RepoError {
    fn from(value: ProgressError) -> Self {
        Self::Progress(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

pub(crate) fn parse_uuid_column(value: &str, column: &str) -> RepoResult<Uuid> {
    Uuid::parse_str(value)
        .map_err(|_| RepoError::InvalidData(format!("invalid uuid value `{value}` in {column}")))
}
