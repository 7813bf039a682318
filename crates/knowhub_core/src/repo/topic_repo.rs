//! Topic repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Persist topics recorded by external capture pipelines.
//! - Provide filtered, recency-ordered listings for the journal view.
//!
//! # Invariants
//! - Listings return only `active` topics unless archived rows are asked
//!   for explicitly.
//! - List ordering is deterministic: `updated_at DESC, uuid ASC`.

use crate::model::topic::{Topic, TopicId, TopicStatus};
use crate::repo::{parse_uuid_column, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};

const TOPIC_SELECT_SQL: &str = "SELECT
    uuid,
    topic_key,
    project_key,
    section,
    title,
    description,
    status,
    created_at,
    updated_at
FROM topics";

const TOPICS_DEFAULT_LIMIT: u32 = 50;
const TOPICS_LIMIT_MAX: u32 = 200;

/// Read model for topic listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicRecord {
    pub uuid: TopicId,
    pub topic_key: String,
    pub project_key: String,
    pub section: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub status: TopicStatus,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Query options for listing topics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicListQuery {
    /// Optional exact project filter.
    pub project: Option<String>,
    /// Include archived topics. Defaults to active-only.
    pub include_archived: bool,
    /// Maximum rows to return. Defaults to 50 and clamps to 200.
    pub limit: Option<u32>,
}

/// Repository interface for topic journal operations.
pub trait TopicRepository {
    fn record_topic(&self, topic: &Topic) -> RepoResult<TopicId>;
    fn get_topic(&self, id: TopicId) -> RepoResult<Option<TopicRecord>>;
    fn list_topics(&self, query: &TopicListQuery) -> RepoResult<Vec<TopicRecord>>;
}

/// SQLite-backed topic repository.
pub struct SqliteTopicRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTopicRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TopicRepository for SqliteTopicRepository<'_> {
    fn record_topic(&self, topic: &Topic) -> RepoResult<TopicId> {
        topic.validate()?;

        self.conn.execute(
            "INSERT INTO topics
                (uuid, topic_key, project_key, section, title, description, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7);",
            params![
                topic.uuid.to_string(),
                topic.topic_key.as_str(),
                topic.project_key.as_str(),
                topic.section.as_deref(),
                topic.title.as_str(),
                topic.description.as_deref(),
                topic_status_to_db(topic.status),
            ],
        )?;

        Ok(topic.uuid)
    }

    fn get_topic(&self, id: TopicId) -> RepoResult<Option<TopicRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TOPIC_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_topic_row(row)?));
        }

        Ok(None)
    }

    fn list_topics(&self, query: &TopicListQuery) -> RepoResult<Vec<TopicRecord>> {
        let mut sql = format!("{TOPIC_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if !query.include_archived {
            sql.push_str(" AND status = 'active'");
        }

        if let Some(project) = query.project.as_ref() {
            sql.push_str(" AND project_key = ?");
            bind_values.push(Value::Text(project.clone()));
        }

        sql.push_str(" ORDER BY updated_at DESC, uuid ASC LIMIT ?");
        bind_values.push(Value::Integer(i64::from(normalize_limit(query.limit))));

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut topics = Vec::new();

        while let Some(row) = rows.next()? {
            topics.push(parse_topic_row(row)?);
        }

        Ok(topics)
    }
}

fn normalize_limit(limit: Option<u32>) -> u32 {
    limit.unwrap_or(TOPICS_DEFAULT_LIMIT).min(TOPICS_LIMIT_MAX)
}

fn parse_topic_row(row: &Row<'_>) -> RepoResult<TopicRecord> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid_column(&uuid_text, "topics.uuid")?;

    let status_text: String = row.get("status")?;
    let status = parse_topic_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in topics.status"))
    })?;

    Ok(TopicRecord {
        uuid,
        topic_key: row.get("topic_key")?,
        project_key: row.get("project_key")?,
        section: row.get("section")?,
        title: row.get("title")?,
        description: row.get("description")?,
        status,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub(crate) fn topic_status_to_db(status: TopicStatus) -> &'static str {
    match status {
        TopicStatus::Active => "active",
        TopicStatus::Archived => "archived",
    }
}

fn parse_topic_status(value: &str) -> Option<TopicStatus> {
    match value {
        "active" => Some(TopicStatus::Active),
        "archived" => Some(TopicStatus::Archived),
        _ => None,
    }
}
