//! Core domain logic for the KnowHub knowledge base.
//! This crate is the single source of truth for business invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::conversation::{Conversation, ConversationId, ConversationValidationError};
pub use model::document::{Document, DocumentId, DocumentValidationError};
pub use model::notebook::{Notebook, NotebookId, NotebookValidationError};
pub use model::progress::{
    compute_progress, NotebookStatus, ProgressError, ProgressSnapshot, COMPLETED_THRESHOLD,
    PERCENT_PER_DOCUMENT,
};
pub use model::topic::{Topic, TopicId, TopicStatus, TopicValidationError};
pub use repo::conversation_repo::{
    ConversationListQuery, ConversationRecord, ConversationRepository,
    SqliteConversationRepository,
};
pub use repo::document_repo::{
    DocumentPatch, DocumentRecord, DocumentRepository, SqliteDocumentRepository,
};
pub use repo::notebook_repo::{
    HubStats, NotebookListQuery, NotebookPatch, NotebookRecord, NotebookRepository,
    SqliteNotebookRepository,
};
pub use repo::topic_repo::{SqliteTopicRepository, TopicListQuery, TopicRecord, TopicRepository};
pub use repo::{RepoError, RepoResult};
pub use search::text::{
    search_all, SearchDomain, SearchError, SearchHit, SearchQuery, SearchResult,
};
pub use service::document_service::{CreateDocumentRequest, DocumentService};
pub use service::notebook_service::{
    CreateNotebookRequest, HubOverview, NotebookService, NotebookServiceError,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
