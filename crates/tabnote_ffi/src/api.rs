//! FFI use-case API for the hosting note surface.
//!
//! # Responsibility
//! - Expose the editor session as stable, use-case-level calls via FRB.
//! - Hold the one process-wide editor the view reports events into.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Failures are returned as messages inside response envelopes.
//! - The view treats every returned text as authoritative.

use log::warn;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};
use tabnote_core::db::open_db;
use tabnote_core::{
    capitalize_hint, core_version as core_version_inner, delete_prompt,
    init_logging as init_logging_inner, ping as ping_inner, EditOutcome, NoteEditor,
    NoteKey, Route, Selection, SqliteSessionRepository,
};

const SESSION_DB_FILE_NAME: &str = "tabnote_session.sqlite3";
const SESSION_DB_PATH_ENV: &str = "TABNOTE_DB_PATH";

type BridgeEditor = NoteEditor<SqliteSessionRepository>;

static EDITOR: Mutex<Option<BridgeEditor>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One tab as rendered by the tab strip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabItem {
    pub key: i64,
    pub title: String,
}

/// Full render snapshot of the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    /// Tabs in display order, newest first.
    pub tabs: Vec<TabItem>,
    pub index: u32,
    /// Text of the active note.
    pub active_text: String,
    /// Auto-capitalize the next word in the active note.
    pub capitalize: bool,
    /// Whether the delete confirmation is visible.
    pub delete_dialog: bool,
    /// Question shown by the delete confirmation.
    pub delete_prompt: String,
    /// Non-blocking persistence warning, if any.
    pub advisory: Option<String>,
}

/// Response to a text-producing event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorTextResponse {
    pub ok: bool,
    /// Committed text to push back into the note surface.
    pub text: String,
    /// Caret to restore; `None` keeps it at end-of-text.
    pub caret: Option<u32>,
    pub capitalize: bool,
    pub message: String,
}

impl EditorTextResponse {
    fn success(outcome: EditOutcome) -> Self {
        Self {
            ok: true,
            text: outcome.text,
            caret: outcome.caret.map(saturating_u32),
            capitalize: outcome.capitalize,
            message: String::new(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            text: String::new(),
            caret: None,
            capitalize: false,
            message: message.into(),
        }
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorActionResponse {
    pub ok: bool,
    pub message: String,
}

impl EditorActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Opens (or reopens) the session store.
///
/// # FFI contract
/// - `db_path`: explicit database file; falls back to `TABNOTE_DB_PATH`,
///   then to a file in the temp directory.
/// - Replaces any previously opened editor.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_open(db_path: Option<String>) -> EditorActionResponse {
    let path = resolve_db_path(db_path);
    let editor = match open_editor(&path) {
        Ok(editor) => editor,
        Err(err) => return EditorActionResponse::failure(format!("editor_open failed: {err}")),
    };
    match lock_editor() {
        Ok(mut slot) => {
            *slot = Some(editor);
            EditorActionResponse::success(format!("Session opened at {}.", path.display()))
        }
        Err(err) => EditorActionResponse::failure(format!("editor_open failed: {err}")),
    }
}

/// Returns the current render snapshot.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_snapshot() -> Result<EditorSnapshot, String> {
    with_editor(|editor| Ok(snapshot(editor)))
}

/// Records the caret/range reported by the active note surface.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_selection_changed(start: u32, end: u32) -> EditorActionResponse {
    let selection = Selection::new(start as usize, end as usize);
    match with_editor(|editor| {
        editor.selection_changed(selection);
        Ok(())
    }) {
        Ok(()) => EditorActionResponse::success(""),
        Err(err) => EditorActionResponse::failure(err),
    }
}

/// Reports a text change for note `key`.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_text_changed(key: i64, text: String) -> EditorTextResponse {
    let result = note_key(key).and_then(|key| {
        with_editor(|editor| {
            editor
                .text_changed(key, text.as_str())
                .map_err(|err| err.to_string())
        })
    });
    match result {
        Ok(outcome) => EditorTextResponse::success(outcome),
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error call=editor_text_changed error={err}");
            EditorTextResponse::failure(format!("editor_text_changed failed: {err}"))
        }
    }
}

/// Inserts a bullet into the active note at the recorded selection.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_insert_bullet() -> EditorTextResponse {
    match with_editor(|editor| editor.insert_bullet().map_err(|err| err.to_string())) {
        Ok(outcome) => EditorTextResponse::success(outcome),
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error call=editor_insert_bullet error={err}");
            EditorTextResponse::failure(format!("editor_insert_bullet failed: {err}"))
        }
    }
}

/// Creates a new empty note at the front and activates it.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_new_note() -> EditorActionResponse {
    action(|editor| Ok(format!("Note {} created.", editor.new_note())))
}

/// Shows the delete confirmation; the message carries its question.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_request_delete() -> EditorActionResponse {
    action(|editor| Ok(editor.request_delete()))
}

#[flutter_rust_bridge::frb(sync)]
pub fn editor_cancel_delete() -> EditorActionResponse {
    action(|editor| {
        editor.cancel_delete();
        Ok(String::new())
    })
}

/// Deletes the active note after confirmation.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_delete_active() -> EditorActionResponse {
    action(|editor| {
        editor.delete_active_note();
        Ok("Note deleted.".to_string())
    })
}

/// Switches the active tab.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_set_index(index: u32) -> EditorActionResponse {
    action(|editor| {
        editor
            .set_active_index(index as usize)
            .map(|()| String::new())
            .map_err(|err| err.to_string())
    })
}

/// Active note text for the platform share sheet.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_share_text() -> Option<String> {
    with_editor(|editor| Ok(editor.share_text().map(str::to_owned)))
        .ok()
        .flatten()
}

fn snapshot(editor: &BridgeEditor) -> EditorSnapshot {
    let state = editor.state();
    let tabs = state.routes.iter().filter_map(tab_item).collect();
    let capitalize = state
        .active_route()
        .is_some_and(|route| capitalize_hint(state, route.key));
    EditorSnapshot {
        tabs,
        index: saturating_u32(state.index),
        active_text: editor.share_text().unwrap_or_default().to_string(),
        capitalize,
        delete_dialog: state.delete_dialog,
        delete_prompt: delete_prompt(state),
        advisory: editor.advisory().map(ToString::to_string),
    }
}

/// Bridges one route; keys beyond `i64` cannot reach Dart and are skipped.
fn tab_item(route: &Route) -> Option<TabItem> {
    match i64::try_from(route.key) {
        Ok(key) => Some(TabItem {
            key,
            title: route.title.clone(),
        }),
        Err(_) => {
            warn!(
                "event=snapshot_tab module=ffi status=error key={} error=key_exceeds_i64",
                route.key
            );
            None
        }
    }
}

fn action(f: impl FnOnce(&mut BridgeEditor) -> Result<String, String>) -> EditorActionResponse {
    match with_editor(f) {
        Ok(message) => EditorActionResponse::success(message),
        Err(err) => {
            warn!("event=ffi_call module=ffi status=error error={err}");
            EditorActionResponse::failure(err)
        }
    }
}

fn with_editor<T>(f: impl FnOnce(&mut BridgeEditor) -> Result<T, String>) -> Result<T, String> {
    let mut slot = lock_editor()?;
    if slot.is_none() {
        let editor = open_editor(&resolve_db_path(None))?;
        *slot = Some(editor);
    }
    match slot.as_mut() {
        Some(editor) => f(editor),
        None => Err("editor is not open".to_string()),
    }
}

fn lock_editor() -> Result<MutexGuard<'static, Option<BridgeEditor>>, String> {
    EDITOR
        .lock()
        .map_err(|_| "editor state lock poisoned".to_string())
}

fn open_editor(path: &Path) -> Result<BridgeEditor, String> {
    let conn = open_db(path).map_err(|err| format!("session DB open failed: {err}"))?;
    let repo = SqliteSessionRepository::try_new(conn)
        .map_err(|err| format!("session repo init failed: {err}"))?;
    Ok(NoteEditor::open(repo))
}

fn resolve_db_path(explicit: Option<String>) -> PathBuf {
    let configured = explicit.or_else(|| std::env::var(SESSION_DB_PATH_ENV).ok());
    match configured.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => std::env::temp_dir().join(SESSION_DB_FILE_NAME),
    }
}

fn note_key(key: i64) -> Result<NoteKey, String> {
    NoteKey::try_from(key).map_err(|_| format!("invalid note key: {key}"))
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}
