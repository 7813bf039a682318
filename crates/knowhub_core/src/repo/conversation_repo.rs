//! Conversation log repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist conversations captured from assistant integrations.
//! - Provide provider/project-filtered, recency-ordered listings.
//!
//! # Invariants
//! - List ordering is deterministic: `created_at DESC, uuid ASC`.

use crate::model::conversation::{Conversation, ConversationId};
use crate::repo::{parse_uuid_column, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const CONVERSATION_SELECT_SQL: &str = "SELECT
    uuid,
    provider,
    title,
    summary,
    topic_key,
    project_key,
    section,
    message_count,
    created_at,
    updated_at
FROM conversations";

const CONVERSATIONS_DEFAULT_LIMIT: u32 = 50;
const CONVERSATIONS_LIMIT_MAX: u32 = 200;

/// Read model for conversation listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversationRecord {
    pub uuid: ConversationId,
    pub provider: String,
    pub title: String,
    pub summary: Option<String>,
    pub topic_key: Option<String>,
    pub project_key: Option<String>,
    pub section: Option<String>,
    pub message_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Query options for listing conversations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationListQuery {
    /// Optional exact provider filter.
    pub provider: Option<String>,
    /// Optional exact project filter.
    pub project: Option<String>,
    /// Maximum rows to return. Defaults to 50 and clamps to 200.
    pub limit: Option<u32>,
}

/// Repository interface for the conversation log.
pub trait ConversationRepository {
    fn record_conversation(&self, conversation: &Conversation) -> RepoResult<ConversationId>;
    fn get_conversation(&self, id: ConversationId) -> RepoResult<Option<ConversationRecord>>;
    fn list_conversations(
        &self,
        query: &ConversationListQuery,
    ) -> RepoResult<Vec<ConversationRecord>>;
}

/// SQLite-backed conversation repository.
pub struct SqliteConversationRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteConversationRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl ConversationRepository for SqliteConversationRepository<'_> {
    fn record_conversation(&self, conversation: &Conversation) -> RepoResult<ConversationId> {
        conversation.validate()?;

        self.conn.execute(
            "INSERT INTO conversations
                (uuid, provider, title, summary, topic_key, project_key, section, message_count)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            params![
                conversation.uuid.to_string(),
                conversation.provider.as_str(),
                conversation.title.as_str(),
                conversation.summary.as_deref(),
                conversation.topic_key.as_deref(),
                conversation.project_key.as_deref(),
                conversation.section.as_deref(),
                conversation.message_count,
            ],
        )?;

        Ok(conversation.uuid)
    }

    fn get_conversation(&self, id: ConversationId) -> RepoResult<Option<ConversationRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{CONVERSATION_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_conversation_row(row)?));
        }

        Ok(None)
    }

    fn list_conversations(
        &self,
        query: &ConversationListQuery,
    ) -> RepoResult<Vec<ConversationRecord>> {
        let mut sql = format!("{CONVERSATION_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(provider) = query.provider.as_ref() {
            sql.push_str(" AND provider = ?");
            bind_values.push(Value::Text(provider.clone()));
        }

        if let Some(project) = query.project.as_ref() {
            sql.push_str(" AND project_key = ?");
            bind_values.push(Value::Text(project.clone()));
        }

        sql.push_str(" ORDER BY created_at DESC, uuid ASC LIMIT ?");
        bind_values.push(Value::Integer(i64::from(normalize_limit(query.limit))));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut conversations = Vec::new();

        while let Some(row) = rows.next()? {
            conversations.push(parse_conversation_row(row)?);
        }

        Ok(conversations)
    }
}

fn normalize_limit(limit: Option<u32>) -> u32 {
    limit
        .unwrap_or(CONVERSATIONS_DEFAULT_LIMIT)
        .min(CONVERSATIONS_LIMIT_MAX)
}

fn parse_conversation_row(row: &Row<'_>) -> RepoResult<ConversationRecord> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid_column(&uuid_text, "conversations.uuid")?;

    Ok(ConversationRecord {
        uuid,
        provider: row.get("provider")?,
        title: row.get("title")?,
        summary: row.get("summary")?,
        topic_key: row.get("topic_key")?,
        project_key: row.get("project_key")?,
        section: row.get("section")?,
        message_count: row.get("message_count")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
