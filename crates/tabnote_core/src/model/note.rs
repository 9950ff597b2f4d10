//! Note collection and editor session state.
//!
//! # Responsibility
//! - Hold the authoritative key -> text mapping and the ordered tab routes.
//! - Provide the default single-empty-note session.
//!
//! # Invariants
//! - `routes` is never empty; at least one note always exists.
//! - `max_key >= max(notes.keys())`.
//! - `index < routes.len()`.
//! - `delete_dialog` is UI-only and is never persisted.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Integer note identity, unique within one session.
pub type NoteKey = u64;

/// Title shown for an empty note and the base label for new notes.
pub const PLACEHOLDER_TITLE: &str = "New note";

/// Hint shown by the view inside an unfocused empty note.
pub const PLACEHOLDER_TEXT: &str = "Tap to edit...";

/// Tab descriptor: identity plus label, distinct from the note body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub key: NoteKey,
    pub title: String,
}

impl Route {
    pub fn new(key: NoteKey, title: impl Into<String>) -> Self {
        Self {
            key,
            title: title.into(),
        }
    }
}

/// Complete state of one editing session.
///
/// Field names on the wire follow the `appState` record layout
/// (`index`, `notes`, `maxKey`, `routes`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorSessionState {
    /// Position of the active tab inside `routes`.
    pub index: usize,
    /// Note bodies by key. Legacy `null` entries are dropped on read.
    #[serde(deserialize_with = "deserialize_live_notes")]
    pub notes: BTreeMap<NoteKey, String>,
    /// Highest key ever allocated in this session.
    pub max_key: NoteKey,
    /// Tab order; the newest note is at the front.
    pub routes: Vec<Route>,
    /// Set after a bullet is inserted so the next word is capitalized.
    #[serde(default)]
    pub pending_capitalize: bool,
    /// Delete confirmation visibility.
    #[serde(skip)]
    pub delete_dialog: bool,
}

impl Default for EditorSessionState {
    fn default() -> Self {
        let mut notes = BTreeMap::new();
        notes.insert(0, String::new());
        Self {
            index: 0,
            notes,
            max_key: 0,
            routes: vec![Route::new(0, PLACEHOLDER_TITLE)],
            pending_capitalize: false,
            delete_dialog: false,
        }
    }
}

impl EditorSessionState {
    /// Returns the route of the active tab, if the index is in range.
    pub fn active_route(&self) -> Option<&Route> {
        self.routes.get(self.index)
    }

    /// Returns the stored text for `key`.
    pub fn note_text(&self, key: NoteKey) -> Option<&str> {
        self.notes.get(&key).map(String::as_str)
    }

    /// Returns the position of `key` in tab order (first match).
    pub fn route_position(&self, key: NoteKey) -> Option<usize> {
        self.routes.iter().position(|route| route.key == key)
    }
}

fn deserialize_live_notes<'de, D>(deserializer: D) -> Result<BTreeMap<NoteKey, String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<NoteKey, Option<String>>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(key, text)| text.map(|text| (key, text)))
        .collect())
}
