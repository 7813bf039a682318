//! Document repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over `documents` storage.
//! - Recompute the owning notebook's progress/status on create and delete,
//!   inside the same transaction as the mutation.
//!
//! # Invariants
//! - Write paths call `Document::validate()` before SQL mutations.
//! - Progress recomputation uses the post-mutation document count and the
//!   pure derivation rule in `model::progress`.
//! - Title/content/order updates leave the count unchanged and therefore do
//!   not touch notebook progress.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::document::{Document, DocumentId, DocumentValidationError};
use crate::model::notebook::NotebookId;
use crate::model::progress::compute_progress;
use crate::repo::notebook_repo::status_to_db;
use crate::repo::{parse_uuid_column, RepoError, RepoResult};
use rusqlite::types::Value;
use rusqlite::{
    params, params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior,
};

const DOCUMENT_SELECT_SQL: &str = "SELECT
    uuid,
    notebook_uuid,
    title,
    content,
    order_index,
    created_at,
    updated_at
FROM documents";

/// Read model for document list/detail use-cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    pub uuid: DocumentId,
    pub notebook_uuid: NotebookId,
    pub title: String,
    pub content: Option<String>,
    pub order_index: i64,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
    /// Update timestamp in epoch milliseconds.
    pub updated_at: i64,
}

/// Partial update for a document. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub order_index: Option<i64>,
}

impl DocumentPatch {
    /// Checks write-path invariants for the fields present.
    pub fn validate(&self) -> Result<(), DocumentValidationError> {
        if let Some(title) = self.title.as_deref() {
            if title.trim().is_empty() {
                return Err(DocumentValidationError::BlankTitle);
            }
        }
        if let Some(order_index) = self.order_index {
            if order_index < 0 {
                return Err(DocumentValidationError::NegativeOrderIndex(order_index));
            }
        }
        Ok(())
    }
}

/// Repository interface for document CRUD operations.
///
/// Mutating operations take `&mut self` because create/delete run a
/// multi-statement transaction (insert/delete + progress write-back).
pub trait DocumentRepository {
    fn create_document(&mut self, document: &Document) -> RepoResult<DocumentId>;
    fn get_document(&self, id: DocumentId) -> RepoResult<Option<DocumentRecord>>;
    fn list_documents(&self, notebook: NotebookId) -> RepoResult<Vec<DocumentRecord>>;
    fn update_document(&mut self, id: DocumentId, patch: &DocumentPatch) -> RepoResult<()>;
    fn delete_document(&mut self, id: DocumentId) -> RepoResult<()>;
}

/// SQLite-backed document repository.
pub struct SqliteDocumentRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqliteDocumentRepository<'conn> {
    pub fn new(conn: &'conn mut Connection) -> Self {
        Self { conn }
    }
}

impl DocumentRepository for SqliteDocumentRepository<'_> {
    fn create_document(&mut self, document: &Document) -> RepoResult<DocumentId> {
        document.validate()?;

        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let notebook_exists: Option<i64> = tx
            .query_row(
                "SELECT 1 FROM notebooks WHERE uuid = ?1;",
                [document.notebook_uuid.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        if notebook_exists.is_none() {
            return Err(RepoError::NotFound(document.notebook_uuid));
        }

        tx.execute(
            "INSERT INTO documents (uuid, notebook_uuid, title, content, order_index)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                document.uuid.to_string(),
                document.notebook_uuid.to_string(),
                document.title.as_str(),
                document.content.as_deref(),
                document.order_index,
            ],
        )?;

        write_back_progress(&tx, document.notebook_uuid)?;
        tx.commit()?;

        Ok(document.uuid)
    }

    fn get_document(&self, id: DocumentId) -> RepoResult<Option<DocumentRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{DOCUMENT_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_document_row(row)?));
        }

        Ok(None)
    }

    fn list_documents(&self, notebook: NotebookId) -> RepoResult<Vec<DocumentRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{DOCUMENT_SELECT_SQL}
             WHERE notebook_uuid = ?1
             ORDER BY order_index ASC, created_at ASC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([notebook.to_string()])?;
        let mut documents = Vec::new();

        while let Some(row) = rows.next()? {
            documents.push(parse_document_row(row)?);
        }

        Ok(documents)
    }

    fn update_document(&mut self, id: DocumentId, patch: &DocumentPatch) -> RepoResult<()> {
        patch.validate()?;

        let mut sets = vec!["updated_at = (strftime('%s', 'now') * 1000)".to_string()];
        let mut bind_values: Vec<Value> = Vec::new();

        if let Some(title) = patch.title.as_ref() {
            sets.push("title = ?".to_string());
            bind_values.push(Value::Text(title.clone()));
        }
        if let Some(content) = patch.content.as_ref() {
            sets.push("content = ?".to_string());
            bind_values.push(Value::Text(content.clone()));
        }
        if let Some(order_index) = patch.order_index {
            sets.push("order_index = ?".to_string());
            bind_values.push(Value::Integer(order_index));
        }

        let sql = format!("UPDATE documents SET {} WHERE uuid = ?;", sets.join(", "));
        bind_values.push(Value::Text(id.to_string()));

        let changed = self.conn.execute(&sql, params_from_iter(bind_values))?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_document(&mut self, id: DocumentId) -> RepoResult<()> {
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;

        let notebook_uuid: Option<String> = tx
            .query_row(
                "SELECT notebook_uuid FROM documents WHERE uuid = ?1;",
                [id.to_string()],
                |row| row.get(0),
            )
            .optional()?;
        let Some(notebook_uuid) = notebook_uuid else {
            return Err(RepoError::NotFound(id));
        };
        let notebook = parse_uuid_column(&notebook_uuid, "documents.notebook_uuid")?;

        tx.execute("DELETE FROM documents WHERE uuid = ?1;", [id.to_string()])?;

        write_back_progress(&tx, notebook)?;
        tx.commit()?;

        Ok(())
    }
}

/// Recomputes and persists notebook progress from the current count.
///
/// Runs inside the caller's transaction so the mutation and the write-back
/// land atomically.
fn write_back_progress(tx: &Transaction<'_>, notebook: NotebookId) -> RepoResult<()> {
    let count: i64 = tx.query_row(
        "SELECT COUNT(*) FROM documents WHERE notebook_uuid = ?1;",
        [notebook.to_string()],
        |row| row.get(0),
    )?;

    let snapshot = compute_progress(count)?;

    let changed = tx.execute(
        "UPDATE notebooks
         SET
            progress = ?1,
            status = ?2,
            updated_at = (strftime('%s', 'now') * 1000)
         WHERE uuid = ?3;",
        params![
            i64::from(snapshot.percent),
            status_to_db(snapshot.status),
            notebook.to_string(),
        ],
    )?;

    if changed == 0 {
        return Err(RepoError::NotFound(notebook));
    }

    Ok(())
}

fn parse_document_row(row: &Row<'_>) -> RepoResult<DocumentRecord> {
    let uuid_text: String = row.get("uuid")?;
    let uuid = parse_uuid_column(&uuid_text, "documents.uuid")?;

    let notebook_text: String = row.get("notebook_uuid")?;
    let notebook_uuid = parse_uuid_column(&notebook_text, "documents.notebook_uuid")?;

    Ok(DocumentRecord {
        uuid,
        notebook_uuid,
        title: row.get("title")?,
        content: row.get("content")?,
        order_index: row.get("order_index")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    })
}
