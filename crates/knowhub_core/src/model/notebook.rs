//! Notebook domain model.
//!
//! # Responsibility
//! - Define the user-editable shape of a notebook.
//! - Validate write-path input before persistence.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another notebook.
//! - `progress`/`status` are not part of this write model; they are derived
//!   by the progress rule and live on the persisted record.
//!
//! # See also
//! - docs/architecture/data-model.md

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a notebook.
pub type NotebookId = Uuid;

/// Icon tag applied when the caller does not pick one.
pub const DEFAULT_ICON: &str = "BookOpen";

/// Category label applied when the caller does not pick one.
pub const DEFAULT_CATEGORY: &str = "General";

/// User-editable notebook fields used by create paths.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notebook {
    /// Stable global ID used for linking and auditing.
    pub uuid: NotebookId,
    /// Display name. Must not be blank.
    pub name: String,
    /// Optional free-text description.
    pub description: Option<String>,
    /// UI icon tag, e.g. `BookOpen` or `Rocket`.
    pub icon: String,
    /// Category label used to group the notebook list.
    pub category: String,
}

/// Validation failures for notebook write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotebookValidationError {
    BlankName,
    BlankIcon,
    BlankCategory,
    /// Explicit progress override outside `0..=100`.
    ProgressOutOfRange(u8),
}

impl Display for NotebookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "notebook name must not be blank"),
            Self::BlankIcon => write!(f, "notebook icon must not be blank"),
            Self::BlankCategory => write!(f, "notebook category must not be blank"),
            Self::ProgressOutOfRange(value) => {
                write!(f, "progress override {value} is outside 0..=100")
            }
        }
    }
}

impl Error for NotebookValidationError {}

impl Notebook {
    /// Creates a notebook with a generated stable ID and default icon and
    /// category.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4(), name)
    }

    /// Creates a notebook with a caller-provided stable ID.
    ///
    /// Used by import paths where identity already exists externally.
    pub fn with_id(uuid: NotebookId, name: impl Into<String>) -> Self {
        Self {
            uuid,
            name: name.into(),
            description: None,
            icon: DEFAULT_ICON.to_string(),
            category: DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Checks write-path invariants.
    ///
    /// # Errors
    /// - [`NotebookValidationError::BlankName`] when `name` trims to empty.
    /// - [`NotebookValidationError::BlankIcon`] / `BlankCategory` when the
    ///   corresponding tag trims to empty.
    pub fn validate(&self) -> Result<(), NotebookValidationError> {
        if self.name.trim().is_empty() {
            return Err(NotebookValidationError::BlankName);
        }
        if self.icon.trim().is_empty() {
            return Err(NotebookValidationError::BlankIcon);
        }
        if self.category.trim().is_empty() {
            return Err(NotebookValidationError::BlankCategory);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Notebook, NotebookValidationError, DEFAULT_CATEGORY, DEFAULT_ICON};

    #[test]
    fn new_applies_defaults() {
        let notebook = Notebook::new("Finance");
        assert_eq!(notebook.icon, DEFAULT_ICON);
        assert_eq!(notebook.category, DEFAULT_CATEGORY);
        assert!(notebook.description.is_none());
        assert!(notebook.validate().is_ok());
    }

    #[test]
    fn blank_name_is_rejected() {
        let notebook = Notebook::new("   ");
        assert_eq!(
            notebook.validate().unwrap_err(),
            NotebookValidationError::BlankName
        );
    }

    #[test]
    fn blank_category_is_rejected() {
        let mut notebook = Notebook::new("Finance");
        notebook.category = String::new();
        assert_eq!(
            notebook.validate().unwrap_err(),
            NotebookValidationError::BlankCategory
        );
    }
}
