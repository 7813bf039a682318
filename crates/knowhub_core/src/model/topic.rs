//! Topic journal model.
//!
//! # Responsibility
//! - Define the topic record fed by external capture pipelines.
//! - Enforce the lowercase key format shared with conversations.
//!
//! # Invariants
//! - `topic_key` and `project_key` match `[a-z0-9][a-z0-9._-]*`.
//! - Archived topics stay out of listings and search.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a topic.
pub type TopicId = Uuid;

static KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9][a-z0-9._-]*$").expect("valid key regex"));

/// Returns whether `value` is a well-formed topic/project key.
pub fn is_valid_key(value: &str) -> bool {
    KEY_RE.is_match(value)
}

/// Topic lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TopicStatus {
    Active,
    Archived,
}

/// Captured topic belonging to one project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub uuid: TopicId,
    /// Machine key, unique within a project by convention.
    pub topic_key: String,
    /// Machine key of the owning project.
    pub project_key: String,
    /// Optional grouping inside the project.
    pub section: Option<String>,
    /// Display title. Must not be blank.
    pub title: String,
    pub description: Option<String>,
    pub status: TopicStatus,
}

/// Validation failures for topic write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopicValidationError {
    BlankTitle,
    InvalidTopicKey(String),
    InvalidProjectKey(String),
}

impl Display for TopicValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "topic title must not be blank"),
            Self::InvalidTopicKey(value) => write!(f, "invalid topic key `{value}`"),
            Self::InvalidProjectKey(value) => write!(f, "invalid project key `{value}`"),
        }
    }
}

impl Error for TopicValidationError {}

impl Topic {
    /// Creates an active topic with a generated stable ID.
    pub fn new(
        topic_key: impl Into<String>,
        project_key: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            topic_key: topic_key.into(),
            project_key: project_key.into(),
            section: None,
            title: title.into(),
            description: None,
            status: TopicStatus::Active,
        }
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), TopicValidationError> {
        if self.title.trim().is_empty() {
            return Err(TopicValidationError::BlankTitle);
        }
        if !is_valid_key(&self.topic_key) {
            return Err(TopicValidationError::InvalidTopicKey(
                self.topic_key.clone(),
            ));
        }
        if !is_valid_key(&self.project_key) {
            return Err(TopicValidationError::InvalidProjectKey(
                self.project_key.clone(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{is_valid_key, Topic, TopicValidationError};

    #[test]
    fn key_format_accepts_lowercase_keys() {
        assert!(is_valid_key("launch-plan"));
        assert!(is_valid_key("saas.v2"));
        assert!(is_valid_key("ops_2026"));
    }

    #[test]
    fn key_format_rejects_uppercase_and_blank() {
        assert!(!is_valid_key("Launch"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("-leading-dash"));
        assert!(!is_valid_key("has space"));
    }

    #[test]
    fn validate_rejects_bad_project_key() {
        let topic = Topic::new("pricing", "Invalid Key", "Pricing research");
        assert!(matches!(
            topic.validate().unwrap_err(),
            TopicValidationError::InvalidProjectKey(value) if value == "Invalid Key"
        ));
    }
}
