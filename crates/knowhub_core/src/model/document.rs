//! Document domain model.
//!
//! # Responsibility
//! - Define the write shape of a document inside a notebook.
//! - Validate write-path input before persistence.
//!
//! # Invariants
//! - Every document belongs to exactly one notebook.
//! - Creating or deleting a document obliges the caller to recompute the
//!   owning notebook's progress from the post-mutation count.

use crate::model::notebook::NotebookId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a document.
pub type DocumentId = Uuid;

/// User-editable document fields used by create paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Stable global ID.
    pub uuid: DocumentId,
    /// Owning notebook.
    pub notebook_uuid: NotebookId,
    /// Display title. Must not be blank.
    pub title: String,
    /// Optional free-text body.
    pub content: Option<String>,
    /// Manual ordering inside the notebook. Lower sorts first.
    pub order_index: i64,
}

/// Validation failures for document write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentValidationError {
    BlankTitle,
    NegativeOrderIndex(i64),
}

impl Display for DocumentValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "document title must not be blank"),
            Self::NegativeOrderIndex(value) => {
                write!(f, "order index must not be negative, got {value}")
            }
        }
    }
}

impl Error for DocumentValidationError {}

impl Document {
    /// Creates a document with a generated stable ID and order index 0.
    pub fn new(notebook_uuid: NotebookId, title: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), notebook_uuid, title)
    }

    /// Creates a document with a caller-provided stable ID.
    pub fn with_id(
        uuid: DocumentId,
        notebook_uuid: NotebookId,
        title: impl Into<String>,
    ) -> Self {
        Self {
            uuid,
            notebook_uuid,
            title: title.into(),
            content: None,
            order_index: 0,
        }
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), DocumentValidationError> {
        if self.title.trim().is_empty() {
            return Err(DocumentValidationError::BlankTitle);
        }
        if self.order_index < 0 {
            return Err(DocumentValidationError::NegativeOrderIndex(
                self.order_index,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Document, DocumentValidationError};
    use uuid::Uuid;

    #[test]
    fn blank_title_is_rejected() {
        let document = Document::new(Uuid::new_v4(), " ");
        assert_eq!(
            document.validate().unwrap_err(),
            DocumentValidationError::BlankTitle
        );
    }

    #[test]
    fn negative_order_index_is_rejected() {
        let mut document = Document::new(Uuid::new_v4(), "Runbook");
        document.order_index = -3;
        assert_eq!(
            document.validate().unwrap_err(),
            DocumentValidationError::NegativeOrderIndex(-3)
        );
    }
}
