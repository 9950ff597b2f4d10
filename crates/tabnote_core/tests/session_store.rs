use rusqlite::Connection;
use tabnote_core::db::migrations::latest_version;
use tabnote_core::db::{open_db, open_db_in_memory, DbError};
use tabnote_core::{
    InMemorySessionRepository, NoteEditor, Route, Selection, SessionRepository,
    SqliteSessionRepository, SESSION_STATE_KEY,
};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
    assert!(SqliteSessionRepository::try_new(conn).is_ok());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::SchemaTooNew {
            found: 999,
            supported: 1
        }
    ));
    assert_eq!(err.schema_version(), Some(999));
}

#[test]
fn failed_migration_reports_its_version_and_rolls_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clash.db");
    let conn = Connection::open(&path).unwrap();
    // An index already owns the name the session table needs.
    conn.execute_batch("CREATE TABLE other (x TEXT); CREATE INDEX app_state ON other (x);")
        .unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    assert!(matches!(err, DbError::MigrationFailed { version: 1, .. }));
    assert!(err.to_string().contains("migration v1 failed"));

    let conn = Connection::open(&path).unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, 0);
}

#[test]
fn repository_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();
    assert!(SqliteSessionRepository::try_new(conn).is_err());
}

#[test]
fn session_survives_reopen_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.sqlite3");

    {
        let repo = SqliteSessionRepository::try_new(open_db(&path).unwrap()).unwrap();
        let mut editor = NoteEditor::open(repo);
        editor.text_changed(0, "first").unwrap();
        let key = editor.new_note();
        editor.selection_changed(Selection::caret(0));
        editor.insert_bullet().unwrap();
        editor.text_changed(key, "• Todo").unwrap();
        editor.request_delete();
    }

    let repo = SqliteSessionRepository::try_new(open_db(&path).unwrap()).unwrap();
    let editor = NoteEditor::open(repo);
    let state = editor.state();
    assert_eq!(
        state.routes,
        vec![Route::new(1, "• Todo"), Route::new(0, "first")]
    );
    assert_eq!(state.max_key, 1);
    assert!(state.pending_capitalize);
    assert!(!state.delete_dialog);
    assert!(editor.advisory().is_none());
}

#[test]
fn stored_record_uses_app_state_field_names() {
    let repo = SqliteSessionRepository::try_new(open_db_in_memory().unwrap()).unwrap();
    let mut editor = NoteEditor::open(repo);
    editor.text_changed(0, "hello").unwrap();

    let raw: String = editor
        .repository()
        .connection()
        .query_row(
            "SELECT value FROM app_state WHERE key = ?1;",
            [SESSION_STATE_KEY],
            |row| row.get(0),
        )
        .unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["index"], 0);
    assert_eq!(json["maxKey"], 0);
    assert_eq!(json["notes"]["0"], "hello");
    assert_eq!(json["routes"][0]["title"], "hello");
    assert!(json.get("deleteDialog").is_none());
}

#[test]
fn legacy_record_with_deleted_notes_is_repaired() {
    let record = r#"{
        "index": 3,
        "notes": {"0": "kept", "1": null, "4": ""},
        "maxKey": 2,
        "deleteDialog": true,
        "routes": [{"key": 1, "title": "gone"}, {"key": 0, "title": "kept"}]
    }"#;
    let editor = NoteEditor::open(InMemorySessionRepository::with_record(record));
    let state = editor.state();
    assert_eq!(
        state.routes,
        vec![Route::new(0, "kept"), Route::new(4, "New note")]
    );
    assert_eq!(state.max_key, 4);
    assert_eq!(state.index, 0);
    assert!(!state.delete_dialog);
    assert!(!state.pending_capitalize);
}

#[test]
fn corrupt_record_falls_back_to_default_with_advisory() {
    let mut editor = NoteEditor::open(InMemorySessionRepository::with_record("{not json"));
    assert_eq!(editor.state().routes, vec![Route::new(0, "New note")]);
    assert!(editor.advisory().is_some());

    editor.text_changed(0, "fresh").unwrap();
    assert!(editor.advisory().is_none());
    let stored = editor.repository().load().unwrap().unwrap();
    assert_eq!(stored.note_text(0), Some("fresh"));
}

#[test]
fn unavailable_store_on_open_starts_default_session() {
    let repo = InMemorySessionRepository::new();
    repo.set_available(false);
    let mut editor = NoteEditor::open(repo);
    assert!(editor.advisory().is_some());

    let outcome = editor.text_changed(0, "typed offline").unwrap();
    assert_eq!(outcome.text, "typed offline");
    assert!(editor.advisory().unwrap().to_string().contains("could not be saved"));
}
