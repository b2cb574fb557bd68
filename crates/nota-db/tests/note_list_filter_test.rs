//! Listing behavior: category filter, text search, and ordering.

use nota_core::{CreateNoteRequest, ListNotesRequest, Note, NoteRepository};
use nota_db::Database;

async fn setup_db() -> Database {
    Database::connect_test()
        .await
        .expect("Failed to create in-memory test database")
}

async fn create_note(db: &Database, title: &str, content: &str, category: &str) -> Note {
    db.notes
        .create(CreateNoteRequest {
            title: title.to_string(),
            content: content.to_string(),
            category: Some(category.to_string()),
            ..Default::default()
        })
        .await
        .expect("Failed to create note")
}

fn titles(notes: &[Note]) -> Vec<&str> {
    notes.iter().map(|n| n.title.as_str()).collect()
}

#[tokio::test]
async fn test_list_without_filters_returns_everything() {
    let db = setup_db().await;

    create_note(&db, "a", "x", "Work").await;
    create_note(&db, "b", "y", "Personal").await;

    let notes = db
        .notes
        .list(ListNotesRequest::default())
        .await
        .expect("Failed to list notes");

    assert_eq!(notes.len(), 2);
}

#[tokio::test]
async fn test_category_filter_matches_literally() {
    let db = setup_db().await;

    create_note(&db, "a", "x", "Work").await;
    create_note(&db, "b", "y", "Personal").await;

    let notes = db
        .notes
        .list(ListNotesRequest {
            category: Some("Work".to_string()),
            search: None,
        })
        .await
        .expect("Failed to list notes");
    assert_eq!(titles(&notes), vec!["a"]);

    // A category nobody uses matches nothing rather than falling back.
    let notes = db
        .notes
        .list(ListNotesRequest {
            category: Some("Todos".to_string()),
            search: None,
        })
        .await
        .expect("Failed to list notes");
    assert!(notes.is_empty());
}

#[tokio::test]
async fn test_all_sentinel_and_empty_string_disable_category_filter() {
    let db = setup_db().await;

    create_note(&db, "a", "x", "Work").await;
    create_note(&db, "b", "y", "Personal").await;

    let all = db
        .notes
        .list(ListNotesRequest {
            category: Some("all".to_string()),
            search: None,
        })
        .await
        .expect("Failed to list notes");
    assert_eq!(all.len(), 2, "the 'all' sentinel must not filter");

    let blank = db
        .notes
        .list(ListNotesRequest {
            category: Some(String::new()),
            search: None,
        })
        .await
        .expect("Failed to list notes");
    assert_eq!(blank.len(), 2, "an empty category must not filter");
}

#[tokio::test]
async fn test_search_covers_title_content_and_tags_case_insensitively() {
    let db = setup_db().await;

    db.notes
        .create(CreateNoteRequest {
            title: "Meeting notes".to_string(),
            content: "discuss BUDGET".to_string(),
            tags: Some(vec!["Urgent".to_string()]),
            ..Default::default()
        })
        .await
        .expect("Failed to create note");
    create_note(&db, "Groceries", "milk and eggs", "Personal").await;

    let search = |term: &str| ListNotesRequest {
        category: None,
        search: Some(term.to_string()),
    };

    let by_title = db.notes.list(search("meeting")).await.expect("list failed");
    assert_eq!(titles(&by_title), vec!["Meeting notes"]);

    let by_content = db.notes.list(search("budget")).await.expect("list failed");
    assert_eq!(titles(&by_content), vec!["Meeting notes"]);

    let by_tag = db.notes.list(search("URGENT")).await.expect("list failed");
    assert_eq!(titles(&by_tag), vec!["Meeting notes"]);

    let nothing = db.notes.list(search("zzz")).await.expect("list failed");
    assert!(nothing.is_empty());
}

#[tokio::test]
async fn test_search_matches_non_ascii_text_verbatim() {
    let db = setup_db().await;

    create_note(&db, "CAFÉ menu", "espresso prices", "General").await;

    let search = |term: &str| ListNotesRequest {
        category: None,
        search: Some(term.to_string()),
    };

    // The needle and the stored text fold identically, so a term that
    // appears verbatim always matches, accents included.
    let verbatim = db.notes.list(search("CAFÉ")).await.expect("list failed");
    assert_eq!(
        titles(&verbatim),
        vec!["CAFÉ menu"],
        "a term appearing verbatim in the title must match"
    );

    // ASCII letters still fold case-insensitively around the accent.
    let folded = db.notes.list(search("caf")).await.expect("list failed");
    assert_eq!(titles(&folded), vec!["CAFÉ menu"]);
}

#[tokio::test]
async fn test_category_and_search_combine_with_and() {
    let db = setup_db().await;

    create_note(&db, "budget review", "q3", "Work").await;
    create_note(&db, "budget groceries", "weekly", "Personal").await;
    create_note(&db, "standup", "daily", "Work").await;

    let notes = db
        .notes
        .list(ListNotesRequest {
            category: Some("Work".to_string()),
            search: Some("budget".to_string()),
        })
        .await
        .expect("Failed to list notes");

    assert_eq!(
        titles(&notes),
        vec!["budget review"],
        "both filters must apply at once"
    );
}

#[tokio::test]
async fn test_search_treats_like_wildcards_as_literals() {
    let db = setup_db().await;

    create_note(&db, "100% done", "x", "General").await;
    create_note(&db, "100x done", "y", "General").await;
    create_note(&db, "a_b", "x", "General").await;
    create_note(&db, "axb", "y", "General").await;

    let search = |term: &str| ListNotesRequest {
        category: None,
        search: Some(term.to_string()),
    };

    let percent = db.notes.list(search("0%")).await.expect("list failed");
    assert_eq!(
        titles(&percent),
        vec!["100% done"],
        "'%' must match itself, not act as a wildcard"
    );

    let underscore = db.notes.list(search("a_b")).await.expect("list failed");
    assert_eq!(
        titles(&underscore),
        vec!["a_b"],
        "'_' must match itself, not act as a wildcard"
    );
}

#[tokio::test]
async fn test_list_orders_pinned_first_then_recently_updated() {
    let db = setup_db().await;

    create_note(&db, "oldest", "x", "General").await;
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    db.notes
        .create(CreateNoteRequest {
            title: "pinned".to_string(),
            content: "y".to_string(),
            is_pinned: Some(true),
            ..Default::default()
        })
        .await
        .expect("Failed to create note");
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    let newest = create_note(&db, "newest", "z", "General").await;

    let notes = db
        .notes
        .list(ListNotesRequest::default())
        .await
        .expect("Failed to list notes");
    assert_eq!(titles(&notes), vec!["pinned", "newest", "oldest"]);

    // Touching a note lifts it within its group.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    db.notes
        .update(
            notes[2].id,
            nota_core::UpdateNoteRequest {
                content: Some("x2".to_string()),
                ..Default::default()
            },
        )
        .await
        .expect("Failed to update note");

    let notes = db
        .notes
        .list(ListNotesRequest::default())
        .await
        .expect("Failed to list notes");
    assert_eq!(
        titles(&notes),
        vec!["pinned", "oldest", "newest"],
        "the freshly updated note outranks {:?}",
        newest.title
    );
}
