//! Note collection reducers.
//!
//! # Invariants
//! - New notes are prepended and become active (`index = 0`).
//! - Deleting the last note yields the default single-empty-note session.
//! - Route lookup is a linear scan; note counts stay in the tens.

use crate::editor::text::last_line;
use crate::editor::title::derive_title;
use crate::editor::{EditorError, BULLET_PREFIX};
use crate::model::note::{EditorSessionState, NoteKey, Route, PLACEHOLDER_TITLE};
use std::collections::BTreeMap;

/// Allocates a new empty note at the front of the tab list.
///
/// The title gets a ` (N)` suffix when other notes are still empty, where
/// `N` is the number of empty notes including the new one.
pub fn create_note(state: &EditorSessionState) -> EditorSessionState {
    let key = state.max_key + 1;
    let blank_notes = state.notes.values().filter(|text| text.is_empty()).count();
    let title = if blank_notes > 0 {
        format!("{PLACEHOLDER_TITLE} ({})", blank_notes + 1)
    } else {
        PLACEHOLDER_TITLE.to_string()
    };

    let mut next = state.clone();
    next.max_key = key;
    next.notes.insert(key, String::new());
    next.routes.insert(0, Route::new(key, title));
    next.index = 0;
    next
}

/// Removes the active note from both routes and notes.
pub fn delete_active_note(state: &EditorSessionState) -> EditorSessionState {
    if state.routes.len() <= 1 {
        return EditorSessionState::default();
    }

    let position = if state.index < state.routes.len() {
        state.index
    } else {
        0
    };
    let mut next = state.clone();
    let removed = next.routes.remove(position);
    next.notes.remove(&removed.key);
    next.index = 0;
    next.delete_dialog = false;
    next
}

/// Replaces a note body and refreshes its tab title.
///
/// # Errors
/// - `KeyNotFound` when no route carries `key`.
pub fn update_note_text(
    state: &EditorSessionState,
    key: NoteKey,
    text: &str,
) -> Result<EditorSessionState, EditorError> {
    let position = state
        .route_position(key)
        .ok_or(EditorError::KeyNotFound(key))?;

    let mut next = state.clone();
    next.routes[position].title = derive_title(text);
    next.notes.insert(key, text.to_string());
    Ok(next)
}

/// Switches the active tab.
///
/// # Errors
/// - `IndexOutOfBounds` when `index` is not a valid tab position.
pub fn set_active_index(
    state: &EditorSessionState,
    index: usize,
) -> Result<EditorSessionState, EditorError> {
    if index >= state.routes.len() {
        return Err(EditorError::IndexOutOfBounds {
            index,
            len: state.routes.len(),
        });
    }
    let mut next = state.clone();
    next.index = index;
    Ok(next)
}

pub fn request_delete(state: &EditorSessionState) -> EditorSessionState {
    EditorSessionState {
        delete_dialog: true,
        ..state.clone()
    }
}

pub fn cancel_delete(state: &EditorSessionState) -> EditorSessionState {
    EditorSessionState {
        delete_dialog: false,
        ..state.clone()
    }
}

/// Confirmation question for deleting the active note.
pub fn delete_prompt(state: &EditorSessionState) -> String {
    let title = state
        .active_route()
        .map_or(PLACEHOLDER_TITLE, |route| route.title.as_str());
    format!("Delete \"{title}\"?")
}

pub fn active_key(state: &EditorSessionState) -> Option<NoteKey> {
    state.active_route().map(|route| route.key)
}

/// Text handed to the share sheet.
pub fn active_text(state: &EditorSessionState) -> Option<&str> {
    active_key(state).and_then(|key| state.note_text(key))
}

/// Whether the view should capitalize the next word typed into `key`.
///
/// True while the session flag is pending or while the note ends in a
/// bullet with no content yet.
pub fn capitalize_hint(state: &EditorSessionState, key: NoteKey) -> bool {
    if state.pending_capitalize {
        return true;
    }
    state.note_text(key).is_some_and(|text| {
        let line = last_line(text);
        line.starts_with(BULLET_PREFIX) && line.chars().count() < 3
    })
}

/// Builds a session from bare note bodies, one route per note in key order.
pub fn state_from_notes(notes: BTreeMap<NoteKey, String>) -> EditorSessionState {
    if notes.is_empty() {
        return EditorSessionState::default();
    }
    let routes = notes
        .iter()
        .map(|(key, text)| Route::new(*key, derive_title(text)))
        .collect();
    let max_key = notes.keys().copied().max().unwrap_or_default();
    EditorSessionState {
        index: 0,
        notes,
        max_key,
        routes,
        pending_capitalize: false,
        delete_dialog: false,
    }
}

/// Restores the session invariants on state read from storage.
pub fn repair_loaded_state(state: EditorSessionState) -> EditorSessionState {
    let EditorSessionState {
        index,
        notes,
        max_key,
        routes,
        pending_capitalize,
        ..
    } = state;

    let mut seen = Vec::with_capacity(routes.len());
    let mut repaired_routes: Vec<Route> = routes
        .into_iter()
        .filter(|route| {
            if notes.contains_key(&route.key) && !seen.contains(&route.key) {
                seen.push(route.key);
                true
            } else {
                false
            }
        })
        .collect();
    for (key, text) in &notes {
        if !seen.contains(key) {
            repaired_routes.push(Route::new(*key, derive_title(text)));
        }
    }
    if repaired_routes.is_empty() {
        return EditorSessionState::default();
    }

    let largest_key = notes.keys().copied().max().unwrap_or_default();
    let index = if index < repaired_routes.len() { index } else { 0 };
    EditorSessionState {
        index,
        notes,
        max_key: max_key.max(largest_key),
        routes: repaired_routes,
        pending_capitalize,
        delete_dialog: false,
    }
}
