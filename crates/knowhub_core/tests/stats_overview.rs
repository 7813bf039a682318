use knowhub_core::db::{open_db_in_memory, seed_default_notebooks};
use knowhub_core::{
    CreateDocumentRequest, CreateNotebookRequest, Document, DocumentRepository, DocumentService,
    Notebook, NotebookRepository, NotebookService, NotebookStatus, SqliteDocumentRepository,
    SqliteNotebookRepository,
};

#[test]
fn stats_on_empty_store_are_zero() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteNotebookRepository::new(&conn);

    let stats = repo.stats().unwrap();
    assert_eq!(stats.notebook_count, 0);
    assert_eq!(stats.document_count, 0);
    assert_eq!(stats.average_progress, 0);
}

#[test]
fn stats_aggregate_counts_and_average_progress() {
    let mut conn = open_db_in_memory().unwrap();

    let (tracked, _idle) = {
        let repo = SqliteNotebookRepository::new(&conn);
        let tracked = repo.create_notebook(&Notebook::new("Tracked")).unwrap();
        let idle = repo.create_notebook(&Notebook::new("Idle")).unwrap();
        (tracked, idle)
    };

    {
        let mut repo = SqliteDocumentRepository::new(&mut conn);
        for index in 0..5 {
            repo.create_document(&Document::new(tracked, format!("Doc {index}")))
                .unwrap();
        }
    }

    let repo = SqliteNotebookRepository::new(&conn);
    let stats = repo.stats().unwrap();
    assert_eq!(stats.notebook_count, 2);
    assert_eq!(stats.document_count, 5);
    // (50 + 0) / 2
    assert_eq!(stats.average_progress, 25);
}

#[test]
fn seeding_populates_an_empty_store_once() {
    let mut conn = open_db_in_memory().unwrap();

    assert_eq!(seed_default_notebooks(&mut conn).unwrap(), 15);
    assert_eq!(seed_default_notebooks(&mut conn).unwrap(), 0);

    let repo = SqliteNotebookRepository::new(&conn);
    let stats = repo.stats().unwrap();
    assert_eq!(stats.notebook_count, 15);
    assert_eq!(stats.average_progress, 0);
}

#[test]
fn seeding_skips_a_store_with_user_notebooks() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let repo = SqliteNotebookRepository::new(&conn);
        repo.create_notebook(&Notebook::new("Mine")).unwrap();
    }

    assert_eq!(seed_default_notebooks(&mut conn).unwrap(), 0);

    let repo = SqliteNotebookRepository::new(&conn);
    assert_eq!(repo.stats().unwrap().notebook_count, 1);
}

#[test]
fn overview_bundles_notebooks_and_stats() {
    let mut conn = open_db_in_memory().unwrap();
    seed_default_notebooks(&mut conn).unwrap();

    let service = NotebookService::new(SqliteNotebookRepository::new(&conn));
    let overview = service.overview().unwrap();

    assert_eq!(overview.notebooks.len(), 15);
    assert_eq!(overview.stats.notebook_count, 15);
    assert!(overview
        .notebooks
        .iter()
        .all(|record| record.status == NotebookStatus::NotStarted));
}

#[test]
fn notebook_service_applies_request_defaults_and_reads_back() {
    let conn = open_db_in_memory().unwrap();
    let service = NotebookService::new(SqliteNotebookRepository::new(&conn));

    let created = service
        .create_notebook(&CreateNotebookRequest {
            name: "Field Notes".to_string(),
            description: Some("observations".to_string()),
            icon: None,
            category: Some("Research".to_string()),
        })
        .unwrap();

    assert_eq!(created.name, "Field Notes");
    assert_eq!(created.icon, "BookOpen");
    assert_eq!(created.category, "Research");
    assert_eq!(created.progress, 0);
    assert_eq!(created.document_count, 0);
}

#[test]
fn document_service_create_reflects_in_notebook_record() {
    let mut conn = open_db_in_memory().unwrap();

    let notebook = {
        let service = NotebookService::new(SqliteNotebookRepository::new(&conn));
        service
            .create_notebook(&CreateNotebookRequest {
                name: "Playbooks".to_string(),
                ..CreateNotebookRequest::default()
            })
            .unwrap()
            .uuid
    };

    {
        let mut service = DocumentService::new(SqliteDocumentRepository::new(&mut conn));
        service
            .create_document(&CreateDocumentRequest {
                notebook_uuid: notebook,
                title: "Incident response".to_string(),
                content: Some("step one: breathe".to_string()),
                order_index: None,
            })
            .unwrap();
    }

    let service = NotebookService::new(SqliteNotebookRepository::new(&conn));
    let record = service.get_notebook(notebook).unwrap().unwrap();
    assert_eq!(record.document_count, 1);
    assert_eq!(record.progress, 10);
    assert_eq!(record.status, NotebookStatus::InProgress);
}
