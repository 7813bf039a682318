//! Notebook repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over `notebooks` storage.
//! - Surface per-notebook document counts and hub-wide stats on reads.
//!
//! # Invariants
//! - Write paths call `Notebook::validate()` / `NotebookPatch::validate()`
//!   before SQL mutations.
//! - `progress`/`status` are written here only through the explicit patch
//!   override; derived recomputation lives in the document repository.
//! - List ordering is deterministic: `category ASC, name ASC, uuid ASC`.

use crate::model::notebook::{Notebook, NotebookId, NotebookValidationError};
use crate::model::progress::NotebookStatus;
use crate::repo::{parse_uuid_column, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const NOTEBOOK_SELECT_SQL: &str = "SELECT
    n.uuid,
    n.name,
    n.description,
    n.icon,
    n.category,
    n.progress,
    n.status,
    (SELECT COUNT(*) FROM documents d WHERE d.notebook_uuid = n.uuid) AS document_count,
    n.created_at,
    n.updated_at
FROM notebooks n";

/// Read model for notebook list/detail use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotebookRecord {
    pub uuid: NotebookId,
    pub name: String,
    pub description: Option<String>,
    pub icon: String,
    pub category: String,
    /// Derived completion percent, `0..=100`.
    pub progress: u8,
    /// Derived lifecycle label consistent with `progress` at last
    /// recomputation.
    pub status: NotebookStatus,
    /// Live document count at read time. May be ahead of `progress` if an
    /// override was applied since the last document mutation.
    pub document_count: i64,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Update timestamp in epoch milliseconds.
    pub updated_at: i64,
}

/// Query options for listing notebooks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotebookListQuery {
    /// Optional exact category filter.
    pub category: Option<String>,
}

/// Partial update for a notebook.
///
/// `None` fields keep their stored value. `progress`/`status` form the
/// explicit override path; the next document mutation recomputes over them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotebookPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
    pub category: Option<String>,
    pub progress: Option<u8>,
    pub status: Option<NotebookStatus>,
}

impl NotebookPatch {
    /// Checks write-path invariants for the fields present.
    pub fn validate(&self) -> Result<(), NotebookValidationError> {
        if let Some(name) = self.name.as_deref() {
            if name.trim().is_empty() {
                return Err(NotebookValidationError::BlankName);
            }
        }
        if let Some(icon) = self.icon.as_deref() {
            if icon.trim().is_empty() {
                return Err(NotebookValidationError::BlankIcon);
            }
        }
        if let Some(category) = self.category.as_deref() {
            if category.trim().is_empty() {
                return Err(NotebookValidationError::BlankCategory);
            }
        }
        if let Some(progress) = self.progress {
            if progress > 100 {
                return Err(NotebookValidationError::ProgressOutOfRange(progress));
            }
        }
        Ok(())
    }
}

/// Hub-wide aggregate numbers for the dashboard header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HubStats {
    pub notebook_count: i64,
    pub document_count: i64,
    /// Integer average of notebook progress; 0 when no notebooks exist.
    pub average_progress: i64,
}

/// Repository interface for notebook CRUD and stats.
pub trait NotebookRepository {
    fn create_notebook(&self, notebook: &Notebook) -> RepoResult<NotebookId>;
    fn get_notebook(&self, id: NotebookId) -> RepoResult<Option<NotebookRecord>>;
    fn list_notebooks(&self, query: &NotebookListQuery) -> RepoResult<Vec<NotebookRecord>>;
    fn update_notebook(&self, id: NotebookId, patch: &NotebookPatch) -> RepoResult<()>;
    /// Hard-deletes the notebook; owned documents go with it via FK cascade.
    fn delete_notebook(&self, id: NotebookId) -> RepoResult<()>;
    fn stats(&self) -> RepoResult<HubStats>;
}

/// SQLite-backed notebook repository.
pub struct SqliteNotebookRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNotebookRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl NotebookRepository for SqliteNotebookRepository<'_> {
    fn create_notebook(&self, notebook: &Notebook) -> RepoResult<NotebookId> {
        notebook.validate()?;

        self.conn.execute(
            "INSERT INTO notebooks (uuid, name, description, icon, category)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                notebook.uuid.to_string(),
                notebook.name.as_str(),
                notebook.description.as_deref(),
                notebook.icon.as_str(),
                notebook.category.as_str(),
            ],
        )?;

        Ok(notebook.uuid)
    }

    fn get_notebook(&self, id: NotebookId) -> RepoResult<Option<NotebookRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{NOTEBOOK_SELECT_SQL} WHERE n.uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_notebook_row(row)?));
        }

        Ok(None)
    }

    fn list_notebooks(&self, query: &NotebookListQuery) -> RepoResult<Vec<NotebookRecord>> {
        let mut sql = format!("{NOTEBOOK_SELECT_SQL} WHERE 1 = 1");
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(category) = query.category.as_ref() {
            sql.push_str(" AND n.category = ?");
            bind_values.push(Value::Text(category.clone()));
        }

        sql.push_str(" ORDER BY n.category ASC, n.name ASC, n.uuid ASC");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut notebooks = Vec::new();

        while let Some(row) = rows.next()? {
            notebooks.push(parse_notebook_row(row)?);
        }

        Ok(notebooks)
    }

    fn update_notebook(&self, id: NotebookId, patch: &NotebookPatch) -> RepoResult<()> {
        patch.validate()?;

        let mut sets = vec!["updated_at = (strftime('%s', 'now') * 1000)".to_string()];
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(name) = patch.name.as_ref() {
            sets.push("name = ?".to_string());
            bind_values.push(Value::Text(name.clone()));
        }
        if let Some(description) = patch.description.as_ref() {
            sets.push("description = ?".to_string());
            bind_values.push(Value::Text(description.clone()));
        }
        if let Some(icon) = patch.icon.as_ref() {
            sets.push("icon = ?".to_string());
            bind_values.push(Value::Text(icon.clone()));
        }
        if let Some(category) = patch.category.as_ref() {
            sets.push("category = ?".to_string());
            bind_values.push(Value::Text(category.clone()));
        }
        if let Some(progress) = patch.progress {
            sets.push("progress = ?".to_string());
            bind_values.push(Value::Integer(i64::from(progress)));
        }
        if let Some(status) = patch.status {
            sets.push("status = ?".to_string());
            bind_values.push(Value::Text(status_to_db(status).to_string()));
        }

        let sql = format!(
            "UPDATE notebooks SET {} WHERE uuid = ?;",
            sets.join(", ")
        );
        bind_values.push(Value::Text(id.to_string()));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_notebook(&self, id: NotebookId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM notebooks WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn stats(&self) -> RepoResult<HubStats> {
        let stats = self
            .conn
            .query_row(
                "SELECT
                    (SELECT COUNT(*) FROM notebooks) AS notebook_count,
                    (SELECT COUNT(*) FROM documents) AS document_count,
                    (SELECT CAST(COALESCE(AVG(progress), 0) AS INTEGER) FROM notebooks)
                        AS average_progress;",
                [],
                |row| {
                    Ok(HubStats {
                        notebook_count: row.get("notebook_count")?,
                        document_count: row.get("document_count")?,
                        average_progress: row.get("average_progress")?,
                    })
                },
            )
            .optional()?;

        // The subselects always yield exactly one row.
        stats.ok_or_else(|| RepoError::InvalidData("stats query returned no row".to_string()))
    }
}

fn parse_notebook_row(row: &Row<'_>) -> RepoResult<NotebookRecord> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid_column(&uuid_text, "notebooks.uuid")?;

    let status_text: String = row.get("status")?;
    let status = parse_status(&status_text).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid status `{status_text}` in notebooks.status"))
    })?;

    let progress: i64 = row.get("progress")?;
    if !(0..=100).contains(&progress) {
        return Err(RepoError::InvalidData(format!(
            "progress {progress} outside 0..=100 in notebooks.progress"
        )));
    }

    Ok(NotebookRecord {
        uuid,
        name: row.get("name")?,
        description: row.get("description")?,
        icon: row.get("icon")?,
        category: row.get("category")?,
        progress: progress as u8,
        status,
        document_count: row.get("document_count")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}

pub(crate) fn status_to_db(status: NotebookStatus) -> &'static str {
    match status {
        NotebookStatus::NotStarted => "not_started",
        NotebookStatus::InProgress => "in_progress",
        NotebookStatus::Completed => "completed",
    }
}

pub(crate) fn parse_status(value: &str) -> Option<NotebookStatus> {
    match value {
        "not_started" => Some(NotebookStatus::NotStarted),
        "in_progress" => Some(NotebookStatus::InProgress),
        "completed" => Some(NotebookStatus::Completed),
        _ => None,
    }
}
