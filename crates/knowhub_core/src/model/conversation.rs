//! Conversation log model.
//!
//! # Responsibility
//! - Define the captured-conversation record written by assistant
//!   integrations.
//!
//! # Invariants
//! - `provider` identifies the source assistant and must not be blank.
//! - Optional topic/project keys, when present, use the shared key format.

use crate::model::topic::is_valid_key;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a captured conversation.
pub type ConversationId = Uuid;

/// One captured assistant conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub uuid: ConversationId,
    /// Source assistant label, e.g. `claude` or `chatgpt`.
    pub provider: String,
    /// Display title. Must not be blank.
    pub title: String,
    /// Short digest of the exchange.
    pub summary: Option<String>,
    /// Optional link to a captured topic.
    pub topic_key: Option<String>,
    /// Optional link to a project.
    pub project_key: Option<String>,
    pub section: Option<String>,
    /// Number of messages in the captured exchange.
    pub message_count: i64,
}

/// Validation failures for conversation write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationValidationError {
    BlankProvider,
    BlankTitle,
    InvalidTopicKey(String),
    InvalidProjectKey(String),
    NegativeMessageCount(i64),
}

impl Display for ConversationValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankProvider => write!(f, "conversation provider must not be blank"),
            Self::BlankTitle => write!(f, "conversation title must not be blank"),
            Self::InvalidTopicKey(value) => write!(f, "invalid topic key `{value}`"),
            Self::InvalidProjectKey(value) => write!(f, "invalid project key `{value}`"),
            Self::NegativeMessageCount(count) => {
                write!(f, "message count must not be negative, got {count}")
            }
        }
    }
}

impl Error for ConversationValidationError {}

impl Conversation {
    /// Creates a conversation record with a generated stable ID.
    pub fn new(provider: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            provider: provider.into(),
            title: title.into(),
            summary: None,
            topic_key: None,
            project_key: None,
            section: None,
            message_count: 0,
        }
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), ConversationValidationError> {
        if self.provider.trim().is_empty() {
            return Err(ConversationValidationError::BlankProvider);
        }
        if self.title.trim().is_empty() {
            return Err(ConversationValidationError::BlankTitle);
        }
        if let Some(key) = self.topic_key.as_deref() {
            if !is_valid_key(key) {
                return Err(ConversationValidationError::InvalidTopicKey(
                    key.to_string(),
                ));
            }
        }
        if let Some(key) = self.project_key.as_deref() {
            if !is_valid_key(key) {
                return Err(ConversationValidationError::InvalidProjectKey(
                    key.to_string(),
                ));
            }
        }
        if self.message_count < 0 {
            return Err(ConversationValidationError::NegativeMessageCount(
                self.message_count,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Conversation, ConversationValidationError};

    #[test]
    fn blank_provider_is_rejected() {
        let conversation = Conversation::new("", "Kickoff notes");
        assert_eq!(
            conversation.validate().unwrap_err(),
            ConversationValidationError::BlankProvider
        );
    }

    #[test]
    fn optional_keys_are_validated_when_present() {
        let mut conversation = Conversation::new("claude", "Kickoff notes");
        conversation.project_key = Some("Bad Key".to_string());
        assert!(matches!(
            conversation.validate().unwrap_err(),
            ConversationValidationError::InvalidProjectKey(value) if value == "Bad Key"
        ));
    }
}
