//! Case-insensitive substring search across the hub.
//!
//! # Responsibility
//! - Match a user query against topics, conversations and notebooks.
//! - Return typed hits with stable IDs, grouped by domain.
//!
//! # Invariants
//! - Archived topics are never returned.
//! - Result ordering is deterministic per domain (recency, then `uuid`).
//! - No relevance ranking; hits keep domain grouping order
//!   (topics, conversations, notebooks).

use crate::db::DbError;
use crate::repo::{parse_uuid_column, RepoError};
use once_cell::sync::Lazy;
use regex::Regex;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, Row};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Result type for search APIs.
pub type SearchResult<T> = Result<T, SearchError>;

/// Search-layer error for DB interaction and result decoding.
#[derive(Debug)]
pub enum SearchError {
    Db(DbError),
    InvalidData(String),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid search row: {message}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for SearchError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SearchError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<RepoError> for SearchError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::Db(err) => Self::Db(err),
            other => Self::InvalidData(other.to_string()),
        }
    }
}

/// Which table a hit came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchDomain {
    Topic,
    Conversation,
    Notebook,
}

/// Search options for substring query behavior.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    /// User query text. Matched case-insensitively as a substring.
    pub text: String,
    /// Optional exact project filter (topics and conversations only;
    /// notebooks have no project key).
    pub project: Option<String>,
    /// Maximum number of hits per domain.
    pub limit: u32,
}

impl SearchQuery {
    /// Creates a query with the default per-domain limit and no project
    /// filter.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            project: None,
            limit: 20,
        }
    }
}

/// Single search hit returned by [`search_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub id: Uuid,
    pub domain: SearchDomain,
    pub title: String,
    pub description: Option<String>,
    /// Project key for topics/conversations; category for notebooks.
    pub group: Option<String>,
}

/// Searches topics, conversations and notebooks for the query text.
///
/// Returns an empty list for blank queries or a zero limit. Hits keep
/// domain grouping order: topics first, then conversations, then
/// notebooks.
pub fn search_all(conn: &Connection, query: &SearchQuery) -> SearchResult<Vec<SearchHit>> {
    let Some(pattern) = build_like_pattern(&query.text) else {
        return Ok(Vec::new());
    };

    if query.limit == 0 {
        return Ok(Vec::new());
    }

    let mut hits = Vec::new();
    search_topics(conn, query, &pattern, &mut hits)?;
    search_conversations(conn, query, &pattern, &mut hits)?;
    search_notebooks(conn, query, &pattern, &mut hits)?;

    Ok(hits)
}

fn search_topics(
    conn: &Connection,
    query: &SearchQuery,
    pattern: &str,
    hits: &mut Vec<SearchHit>,
) -> SearchResult<()> {
    let mut sql = String::from(
        "SELECT uuid, title, description, project_key
         FROM topics
         WHERE status = 'active'
           AND (title LIKE ?1 ESCAPE '\\'
                OR description LIKE ?1 ESCAPE '\\'
                OR topic_key LIKE ?1 ESCAPE '\\')",
    );
    let mut bind_values: Vec<Value> = vec![Value::Text(pattern.to_string())];

    if let Some(project) = query.project.as_ref() {
        sql.push_str(" AND project_key = ?");
        bind_values.push(Value::Text(project.clone()));
    }

    sql.push_str(" ORDER BY updated_at DESC, uuid ASC LIMIT ?");
    bind_values.push(Value::Integer(i64::from(query.limit)));

    collect_hits(conn, &sql, bind_values, SearchDomain::Topic, "topics", hits)
}

fn search_conversations(
    conn: &Connection,
    query: &SearchQuery,
    pattern: &str,
    hits: &mut Vec<SearchHit>,
) -> SearchResult<()> {
    let mut sql = String::from(
        "SELECT uuid, title, summary AS description, project_key
         FROM conversations
         WHERE (title LIKE ?1 ESCAPE '\\'
                OR summary LIKE ?1 ESCAPE '\\')",
    );
    let mut bind_values: Vec<Value> = vec![Value::Text(pattern.to_string())];

    if let Some(project) = query.project.as_ref() {
        sql.push_str(" AND project_key = ?");
        bind_values.push(Value::Text(project.clone()));
    }

    sql.push_str(" ORDER BY created_at DESC, uuid ASC LIMIT ?");
    bind_values.push(Value::Integer(i64::from(query.limit)));

    collect_hits(
        conn,
        &sql,
        bind_values,
        SearchDomain::Conversation,
        "conversations",
        hits,
    )
}

fn search_notebooks(
    conn: &Connection,
    query: &SearchQuery,
    pattern: &str,
    hits: &mut Vec<SearchHit>,
) -> SearchResult<()> {
    // Notebooks carry no project key; their category fills the group slot.
    let sql = "SELECT uuid, name AS title, description, category AS project_key
         FROM notebooks
         WHERE (name LIKE ?1 ESCAPE '\\'
                OR description LIKE ?1 ESCAPE '\\')
         ORDER BY updated_at DESC, uuid ASC LIMIT ?2";
    let bind_values = vec![
        Value::Text(pattern.to_string()),
        Value::Integer(i64::from(query.limit)),
    ];

    collect_hits(
        conn,
        sql,
        bind_values,
        SearchDomain::Notebook,
        "notebooks",
        hits,
    )
}

fn collect_hits(
    conn: &Connection,
    sql: &str,
    bind_values: Vec<Value>,
    domain: SearchDomain,
    table: &str,
    hits: &mut Vec<SearchHit>,
) -> SearchResult<()> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;

    while let Some(row) = rows.next()? {
        hits.push(parse_search_hit(row, domain, table)?);
    }

    Ok(())
}

fn parse_search_hit(row: &Row<'_>, domain: SearchDomain, table: &str) -> SearchResult<SearchHit> {
    let uuid_text: String = row.get("uuid")?;
    let id = parse_uuid_column(&uuid_text, &format!("{table}.uuid"))?;

    Ok(SearchHit {
        id,
        domain,
        title: row.get("title")?,
        description: row.get("description")?,
        group: row.get("project_key")?,
    })
}

/// Builds a `%...%` LIKE pattern from user text, or `None` for blank input.
///
/// Inner whitespace collapses to single spaces so that copy-pasted queries
/// behave the same as typed ones. LIKE wildcards in the text are escaped.
fn build_like_pattern(text: &str) -> Option<String> {
    let normalized = WHITESPACE_RE.replace_all(text.trim(), " ");
    if normalized.is_empty() {
        return None;
    }

    let escaped = normalized
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    Some(format!("%{escaped}%"))
}
