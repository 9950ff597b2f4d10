//! Core domain logic for TabNote, a multi-note tabbed text editor.
//! This crate is the single source of truth for editing and session invariants.

pub mod db;
pub mod editor;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod store;

pub use editor::bullet::{
    apply_decision, continue_bullet, convert_dash_to_bullet, insert_bullet_at_selection,
    terminate_bullet, BulletInsertion,
};
pub use editor::classify::{classify, should_clear_capitalize, was_char_added, EditDecision};
pub use editor::selection_tracker::SelectionTracker;
pub use editor::title::{derive_title, TITLE_MAX_CHARS};
pub use editor::{EditorError, BULLET_MARKER, BULLET_PREFIX, DASH_TRIGGER};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::note::{EditorSessionState, NoteKey, Route, PLACEHOLDER_TEXT, PLACEHOLDER_TITLE};
pub use model::selection::Selection;
pub use repo::session_repo::{
    InMemorySessionRepository, RepoError, RepoResult, SessionRepository,
    SqliteSessionRepository, SESSION_STATE_KEY,
};
pub use service::editor_service::{EditOutcome, NoteEditor, PersistenceUnavailable};
pub use store::note_store::{
    active_key, active_text, cancel_delete, capitalize_hint, create_note, delete_active_note,
    delete_prompt, repair_loaded_state, request_delete, set_active_index, state_from_notes,
    update_note_text,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
