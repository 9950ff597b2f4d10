//! Edit classification.
//!
//! Rules are checked in order and the first match wins:
//! 1. Only insertions (`new` at least one char longer) can be special.
//! 2. A newline typed at end-of-text right after a bullet line either
//!    continues the list (line has content) or terminates it (empty bullet).
//! 3. A dash typed as the first char of the last line becomes a bullet.
//! 4. Everything else is committed verbatim.

use super::text::{char_len, last_line};
use super::{BULLET_MARKER, DASH_TRIGGER};
use crate::model::selection::Selection;

/// Outcome of classifying one text change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditDecision {
    /// Commit the text unchanged.
    PlainEdit(String),
    /// Append a new bullet marker.
    ContinueBullet,
    /// Clear the trailing empty bullet line.
    TerminateBullet,
    /// Replace the just-typed dash with a bullet marker.
    ConvertDashToBullet,
}

impl EditDecision {
    /// Stable label used in log events.
    pub fn label(&self) -> &'static str {
        match self {
            Self::PlainEdit(_) => "plain_edit",
            Self::ContinueBullet => "continue_bullet",
            Self::TerminateBullet => "terminate_bullet",
            Self::ConvertDashToBullet => "convert_dash",
        }
    }
}

/// Classifies the change from `previous` to `new`.
///
/// `selection` is the most recently recorded selection; `None` disables the
/// newline-after-bullet rules because typing at end-of-text cannot be
/// confirmed.
pub fn classify(previous: &str, new: &str, selection: Option<Selection>) -> EditDecision {
    if !was_char_added(previous, new) {
        return EditDecision::PlainEdit(new.to_string());
    }

    let new_len = char_len(new);
    if let Some(completed) = new.strip_suffix('\n') {
        if selection.is_some_and(|selection| caret_at_end(selection, new_len)) {
            let line = last_line(completed);
            if line.starts_with(BULLET_MARKER) {
                match char_len(line) {
                    len if len > 2 => return EditDecision::ContinueBullet,
                    2 => return EditDecision::TerminateBullet,
                    _ => {}
                }
            }
        }
    }

    let mut dash_line = last_line(new).chars();
    let dash_starts_line = dash_line.next() == Some(DASH_TRIGGER) && dash_line.next().is_none();
    if dash_starts_line && selection.map_or(true, |selection| caret_at_end(selection, new_len)) {
        return EditDecision::ConvertDashToBullet;
    }

    EditDecision::PlainEdit(new.to_string())
}

/// True when `new` grew by at least one char.
pub fn was_char_added(previous: &str, new: &str) -> bool {
    char_len(new) > char_len(previous)
}

/// Decides whether a pending capitalize flag should be cleared.
///
/// Clears once a space is typed anywhere other than right after a bullet
/// marker; only single-char insertions are considered.
pub fn should_clear_capitalize(previous: &str, new: &str, pending: bool) -> bool {
    if !pending {
        return false;
    }
    let before: Vec<char> = previous.chars().collect();
    let after: Vec<char> = new.chars().collect();
    if after.len() != before.len() + 1 {
        return false;
    }

    let inserted_at = before
        .iter()
        .zip(after.iter())
        .position(|(old, new)| old != new)
        .unwrap_or(before.len());
    let preceded_by_marker = inserted_at > 0 && after[inserted_at - 1] == BULLET_MARKER;
    after[inserted_at] == ' ' && !preceded_by_marker
}

// Selections are reported after the keystroke lands, so typing at the end
// leaves the caret at the new length.
fn caret_at_end(selection: Selection, new_len: usize) -> bool {
    selection.is_caret() && selection.start == new_len
}
