use knowhub_core::db::open_db_in_memory;
use knowhub_core::{
    Document, DocumentPatch, DocumentRepository, DocumentValidationError, Notebook, NotebookPatch,
    NotebookRepository, NotebookStatus, RepoError, SqliteDocumentRepository,
    SqliteNotebookRepository,
};
use uuid::Uuid;

fn create_notebook(conn: &rusqlite::Connection, name: &str) -> Uuid {
    let repo = SqliteNotebookRepository::new(conn);
    repo.create_notebook(&Notebook::new(name)).unwrap()
}

fn notebook_state(conn: &rusqlite::Connection, id: Uuid) -> (u8, NotebookStatus, i64) {
    let repo = SqliteNotebookRepository::new(conn);
    let record = repo.get_notebook(id).unwrap().unwrap();
    (record.progress, record.status, record.document_count)
}

#[test]
fn creating_documents_advances_notebook_progress() {
    let mut conn = open_db_in_memory().unwrap();
    let notebook = create_notebook(&conn, "Launch");

    {
        let mut repo = SqliteDocumentRepository::new(&mut conn);
        repo.create_document(&Document::new(notebook, "Checklist"))
            .unwrap();
    }
    assert_eq!(
        notebook_state(&conn, notebook),
        (10, NotebookStatus::InProgress, 1)
    );

    {
        let mut repo = SqliteDocumentRepository::new(&mut conn);
        for index in 1..9 {
            repo.create_document(&Document::new(notebook, format!("Doc {index}")))
                .unwrap();
        }
    }
    assert_eq!(
        notebook_state(&conn, notebook),
        (90, NotebookStatus::InProgress, 9)
    );

    {
        let mut repo = SqliteDocumentRepository::new(&mut conn);
        repo.create_document(&Document::new(notebook, "Doc 10"))
            .unwrap();
    }
    assert_eq!(
        notebook_state(&conn, notebook),
        (100, NotebookStatus::Completed, 10)
    );
}

#[test]
fn progress_clamps_past_the_completion_threshold() {
    let mut conn = open_db_in_memory().unwrap();
    let notebook = create_notebook(&conn, "Archive");

    {
        let mut repo = SqliteDocumentRepository::new(&mut conn);
        for index in 0..25 {
            repo.create_document(&Document::new(notebook, format!("Doc {index}")))
                .unwrap();
        }
    }

    assert_eq!(
        notebook_state(&conn, notebook),
        (100, NotebookStatus::Completed, 25)
    );
}

#[test]
fn deleting_documents_recomputes_notebook_progress() {
    let mut conn = open_db_in_memory().unwrap();
    let notebook = create_notebook(&conn, "Shrinking");

    let (first, second) = {
        let mut repo = SqliteDocumentRepository::new(&mut conn);
        let first = repo
            .create_document(&Document::new(notebook, "First"))
            .unwrap();
        let second = repo
            .create_document(&Document::new(notebook, "Second"))
            .unwrap();
        (first, second)
    };
    assert_eq!(
        notebook_state(&conn, notebook),
        (20, NotebookStatus::InProgress, 2)
    );

    {
        let mut repo = SqliteDocumentRepository::new(&mut conn);
        repo.delete_document(first).unwrap();
    }
    assert_eq!(
        notebook_state(&conn, notebook),
        (10, NotebookStatus::InProgress, 1)
    );

    {
        let mut repo = SqliteDocumentRepository::new(&mut conn);
        repo.delete_document(second).unwrap();
    }
    assert_eq!(
        notebook_state(&conn, notebook),
        (0, NotebookStatus::NotStarted, 0)
    );
}

#[test]
fn document_mutation_overwrites_manual_override() {
    let mut conn = open_db_in_memory().unwrap();
    let notebook = create_notebook(&conn, "Overridden");

    {
        let repo = SqliteNotebookRepository::new(&conn);
        repo.update_notebook(
            notebook,
            &NotebookPatch {
                progress: Some(55),
                status: Some(NotebookStatus::Completed),
                ..NotebookPatch::default()
            },
        )
        .unwrap();
    }
    assert_eq!(
        notebook_state(&conn, notebook),
        (55, NotebookStatus::Completed, 0)
    );

    {
        let mut repo = SqliteDocumentRepository::new(&mut conn);
        repo.create_document(&Document::new(notebook, "Back to derived"))
            .unwrap();
    }
    assert_eq!(
        notebook_state(&conn, notebook),
        (10, NotebookStatus::InProgress, 1)
    );
}

#[test]
fn updating_document_content_leaves_progress_untouched() {
    let mut conn = open_db_in_memory().unwrap();
    let notebook = create_notebook(&conn, "Stable");

    let id = {
        let mut repo = SqliteDocumentRepository::new(&mut conn);
        repo.create_document(&Document::new(notebook, "Draft"))
            .unwrap()
    };

    {
        let mut repo = SqliteDocumentRepository::new(&mut conn);
        repo.update_document(
            id,
            &DocumentPatch {
                title: Some("Final".to_string()),
                content: Some("polished body".to_string()),
                ..DocumentPatch::default()
            },
        )
        .unwrap();

        let loaded = repo.get_document(id).unwrap().unwrap();
        assert_eq!(loaded.title, "Final");
        assert_eq!(loaded.content.as_deref(), Some("polished body"));
    }

    assert_eq!(
        notebook_state(&conn, notebook),
        (10, NotebookStatus::InProgress, 1)
    );
}

#[test]
fn create_in_missing_notebook_returns_not_found() {
    let mut conn = open_db_in_memory().unwrap();
    let missing = Uuid::new_v4();

    let mut repo = SqliteDocumentRepository::new(&mut conn);
    let err = repo
        .create_document(&Document::new(missing, "orphan"))
        .unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}

#[test]
fn create_rejects_blank_title() {
    let mut conn = open_db_in_memory().unwrap();
    let notebook = create_notebook(&conn, "Strict");

    let mut repo = SqliteDocumentRepository::new(&mut conn);
    let err = repo
        .create_document(&Document::new(notebook, "   "))
        .unwrap_err();
    assert!(matches!(
        err,
        RepoError::Document(DocumentValidationError::BlankTitle)
    ));
}

#[test]
fn list_follows_manual_order_index() {
    let mut conn = open_db_in_memory().unwrap();
    let notebook = create_notebook(&conn, "Ordered");

    let mut repo = SqliteDocumentRepository::new(&mut conn);
    let mut third = Document::new(notebook, "Third");
    third.order_index = 2;
    let mut first = Document::new(notebook, "First");
    first.order_index = 0;
    let mut second = Document::new(notebook, "Second");
    second.order_index = 1;

    repo.create_document(&third).unwrap();
    repo.create_document(&first).unwrap();
    repo.create_document(&second).unwrap();

    let titles: Vec<String> = repo
        .list_documents(notebook)
        .unwrap()
        .into_iter()
        .map(|record| record.title)
        .collect();
    assert_eq!(titles, vec!["First", "Second", "Third"]);
}

#[test]
fn deleting_notebook_cascades_to_documents() {
    let mut conn = open_db_in_memory().unwrap();
    let notebook = create_notebook(&conn, "Doomed");

    let document = {
        let mut repo = SqliteDocumentRepository::new(&mut conn);
        repo.create_document(&Document::new(notebook, "Goes with it"))
            .unwrap()
    };

    {
        let repo = SqliteNotebookRepository::new(&conn);
        repo.delete_notebook(notebook).unwrap();
    }

    let repo = SqliteDocumentRepository::new(&mut conn);
    assert!(repo.get_document(document).unwrap().is_none());
}
