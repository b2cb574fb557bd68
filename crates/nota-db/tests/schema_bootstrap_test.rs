//! Schema bootstrap against on-disk SQLite files.
//!
//! The in-memory tests elsewhere never touch the filesystem, so these
//! cover file creation and durability across reconnects.

use nota_core::{CreateNoteRequest, NoteRepository};
use nota_db::{Database, PoolConfig};

fn file_url(path: &std::path::Path) -> String {
    format!("sqlite://{}", path.display())
}

#[tokio::test]
async fn test_connect_creates_missing_database_file() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.db");

    let db = Database::connect(&file_url(&path))
        .await
        .expect("Failed to connect");
    db.init_schema().await.expect("Failed to init schema");

    assert!(path.exists(), "connecting must create the database file");
}

#[tokio::test]
async fn test_init_schema_is_idempotent() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.db");

    let db = Database::connect(&file_url(&path))
        .await
        .expect("Failed to connect");
    db.init_schema().await.expect("First init failed");
    db.init_schema().await.expect("Second init failed");

    let note = db
        .notes
        .create(CreateNoteRequest {
            title: "t".to_string(),
            content: "c".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create note after double init");
    assert_eq!(note.id, 1);
}

#[tokio::test]
async fn test_data_survives_reconnect() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.db");
    let url = file_url(&path);

    let db = Database::connect(&url).await.expect("Failed to connect");
    db.init_schema().await.expect("Failed to init schema");
    let created = db
        .notes
        .create(CreateNoteRequest {
            title: "durable".to_string(),
            content: "c".to_string(),
            ..Default::default()
        })
        .await
        .expect("Failed to create note");
    db.pool().close().await;
    drop(db);

    let db = Database::connect(&url).await.expect("Failed to reconnect");
    let fetched = db
        .notes
        .fetch(created.id)
        .await
        .expect("Failed to fetch note after reconnect");
    assert_eq!(fetched.title, "durable");
}

#[tokio::test]
async fn test_connect_with_custom_pool_config() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("notes.db");

    let config = PoolConfig::new()
        .max_connections(2)
        .min_connections(1)
        .connect_timeout(std::time::Duration::from_secs(5));

    let db = Database::connect_with_config(&file_url(&path), config)
        .await
        .expect("Failed to connect with config");
    db.init_schema().await.expect("Failed to init schema");

    assert!(db.notes.exists(1).await.is_ok(), "pool must serve queries");
}
