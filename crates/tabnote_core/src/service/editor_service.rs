//! Editor session service.
//!
//! # Responsibility
//! - Own the single authoritative session and the selection tracker.
//! - Route text changes through classify -> splice -> note store.
//! - Persist every committed transition on a best-effort basis.
//!
//! # Invariants
//! - A transition is installed with one assignment after all checks pass;
//!   a failing call leaves the committed session untouched.
//! - Persistence failures never fail an editing call; they surface as a
//!   non-blocking [`PersistenceUnavailable`] advisory.
//! - Note text is never logged, only keys, lengths and decision labels.

use crate::editor::bullet::{apply_decision, insert_bullet_at_selection};
use crate::editor::classify::{classify, should_clear_capitalize, EditDecision};
use crate::editor::selection_tracker::SelectionTracker;
use crate::editor::text::char_len;
use crate::editor::EditorError;
use crate::model::note::{EditorSessionState, NoteKey};
use crate::model::selection::Selection;
use crate::repo::session_repo::SessionRepository;
use crate::store::note_store::{
    active_key, active_text, cancel_delete, capitalize_hint, create_note, delete_active_note,
    delete_prompt, repair_loaded_state, request_delete, set_active_index, update_note_text,
};
use log::{debug, info, warn};
use std::fmt::{Display, Formatter};

/// Non-blocking advisory raised when the session could not be persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistenceUnavailable {
    pub message: String,
}

impl Display for PersistenceUnavailable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notes could not be saved: {}", self.message)
    }
}

/// What the view must render after a text event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
    /// Committed text; overwrites the view's local echo.
    pub text: String,
    /// Caret to restore when it must not sit at end-of-text.
    pub caret: Option<usize>,
    /// Auto-capitalize the next word.
    pub capitalize: bool,
}

/// Session service over a [`SessionRepository`].
pub struct NoteEditor<R: SessionRepository> {
    repo: R,
    state: EditorSessionState,
    selection: SelectionTracker,
    advisory: Option<PersistenceUnavailable>,
}

impl<R: SessionRepository> NoteEditor<R> {
    /// Restores the stored session, falling back to the default one.
    ///
    /// Load failures and corrupt records are not fatal: the editor starts
    /// from the default session and raises an advisory.
    pub fn open(repo: R) -> Self {
        let (state, advisory) = match repo.load() {
            Ok(Some(stored)) => {
                let state = repair_loaded_state(stored);
                info!(
                    "event=session_load module=service status=ok notes={} index={}",
                    state.routes.len(),
                    state.index
                );
                (state, None)
            }
            Ok(None) => {
                info!("event=session_load module=service status=empty");
                (EditorSessionState::default(), None)
            }
            Err(err) => {
                warn!("event=session_load module=service status=error error={err}");
                (
                    EditorSessionState::default(),
                    Some(PersistenceUnavailable {
                        message: err.to_string(),
                    }),
                )
            }
        };

        Self {
            repo,
            state,
            selection: SelectionTracker::new(),
            advisory,
        }
    }

    pub fn state(&self) -> &EditorSessionState {
        &self.state
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Latest persistence advisory; cleared by the next successful save.
    pub fn advisory(&self) -> Option<&PersistenceUnavailable> {
        self.advisory.as_ref()
    }

    pub fn current_selection(&self) -> Option<Selection> {
        self.selection.current_selection()
    }

    /// Records the caret/range reported by the active note surface.
    pub fn selection_changed(&mut self, selection: Selection) {
        self.selection.record_selection(selection);
    }

    /// Handles one keystroke or paste reported for note `key`.
    ///
    /// # Errors
    /// - `KeyNotFound` when `key` is not part of the session.
    pub fn text_changed(
        &mut self,
        key: NoteKey,
        new_text: &str,
    ) -> Result<EditOutcome, EditorError> {
        let previous = self
            .state
            .note_text(key)
            .ok_or(EditorError::KeyNotFound(key))?;

        let decision = classify(previous, new_text, self.selection.current_selection());
        let clear_capitalize =
            should_clear_capitalize(previous, new_text, self.state.pending_capitalize);
        let label = decision.label();
        let rewritten = !matches!(decision, EditDecision::PlainEdit(_));
        let committed = apply_decision(decision, new_text);

        let mut next = update_note_text(&self.state, key, &committed)?;
        if clear_capitalize {
            next.pending_capitalize = false;
        }
        debug!(
            "event=text_changed module=service status=ok key={key} decision={label} len={}",
            char_len(&committed)
        );

        if rewritten {
            self.selection.record_selection(Selection::caret(char_len(&committed)));
        }
        let capitalize = capitalize_hint(&next, key);
        self.commit(next);
        Ok(EditOutcome {
            text: committed,
            caret: None,
            capitalize,
        })
    }

    /// Inserts a bullet into the active note at the recorded selection.
    ///
    /// Without a recorded selection the bullet is appended at end-of-text.
    ///
    /// # Errors
    /// - Invariant violation when the recorded selection does not fit the
    ///   active note's text.
    pub fn insert_bullet(&mut self) -> Result<EditOutcome, EditorError> {
        let key = active_key(&self.state).ok_or(EditorError::IndexOutOfBounds {
            index: self.state.index,
            len: self.state.routes.len(),
        })?;
        let text = self
            .state
            .note_text(key)
            .ok_or(EditorError::KeyNotFound(key))?;
        let selection = self
            .selection
            .current_selection()
            .unwrap_or_else(|| Selection::caret(char_len(text)));

        let insertion = insert_bullet_at_selection(text, selection)?;
        let mut next = update_note_text(&self.state, key, &insertion.text)?;
        next.pending_capitalize = true;
        debug!(
            "event=bullet_insert module=service status=ok key={key} caret={} restore={}",
            insertion.caret, insertion.restore_caret
        );

        self.selection.record_selection(Selection::caret(insertion.caret));
        self.commit(next);
        Ok(EditOutcome {
            text: insertion.text,
            caret: insertion.restore_caret.then_some(insertion.caret),
            capitalize: true,
        })
    }

    /// Creates an empty note at the front and activates it.
    pub fn new_note(&mut self) -> NoteKey {
        let next = create_note(&self.state);
        let key = next.max_key;
        info!("event=note_create module=service status=ok key={key}");
        self.selection.reset();
        self.commit(next);
        key
    }

    /// Deletes the active note (or resets the session when it is the last).
    pub fn delete_active_note(&mut self) {
        let removed = active_key(&self.state);
        let next = delete_active_note(&self.state);
        info!(
            "event=note_delete module=service status=ok key={} remaining={}",
            removed.map_or_else(|| "none".to_string(), |key| key.to_string()),
            next.routes.len()
        );
        self.selection.reset();
        self.commit(next);
    }

    /// Shows the delete confirmation; returns its question text.
    pub fn request_delete(&mut self) -> String {
        let next = request_delete(&self.state);
        let prompt = delete_prompt(&next);
        self.commit(next);
        prompt
    }

    pub fn cancel_delete(&mut self) {
        let next = cancel_delete(&self.state);
        self.commit(next);
    }

    /// Switches the active tab.
    ///
    /// # Errors
    /// - `IndexOutOfBounds` when `index` is not a tab position.
    pub fn set_active_index(&mut self, index: usize) -> Result<(), EditorError> {
        let next = set_active_index(&self.state, index)?;
        if next.index != self.state.index {
            self.selection.reset();
        }
        self.commit(next);
        Ok(())
    }

    /// Active note text for the platform share sheet.
    pub fn share_text(&self) -> Option<&str> {
        active_text(&self.state)
    }

    fn commit(&mut self, next: EditorSessionState) {
        self.state = next;
        match self.repo.save(&self.state) {
            Ok(()) => self.advisory = None,
            Err(err) => {
                warn!("event=session_save module=service status=error error={err}");
                self.advisory = Some(PersistenceUnavailable {
                    message: err.to_string(),
                });
            }
        }
    }
}
