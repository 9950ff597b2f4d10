//! Bullet splicing: the text rewrites behind each [`EditDecision`].
//!
//! # Invariants
//! - A separating newline is inserted only when the preceding line is non-blank.
//! - `insert_bullet_at_selection` validates the selection before building text.

use super::classify::EditDecision;
use super::text::{char_len, is_blank, last_line, selection_byte_range};
use super::{EditorError, BULLET_PREFIX, DASH_TRIGGER};
use crate::model::selection::Selection;

/// Result of inserting a bullet at the caret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulletInsertion {
    /// Rewritten note text.
    pub text: String,
    /// Char offset right after the inserted marker.
    pub caret: usize,
    /// True when text follows the marker, so the view must move the caret
    /// there instead of leaving it at end-of-text.
    pub restore_caret: bool,
}

/// Appends a bullet, preceded by a newline unless the last line is blank.
pub fn continue_bullet(text: &str) -> String {
    let mut next = String::with_capacity(text.len() + BULLET_PREFIX.len() + 1);
    next.push_str(text);
    if !is_blank(last_line(text)) {
        next.push('\n');
    }
    next.push_str(BULLET_PREFIX);
    next
}

/// Clears the content of the final line, keeping the newlines before it.
///
/// Single-line text is returned unchanged.
pub fn terminate_bullet(text: &str) -> String {
    match text.rfind('\n') {
        Some(index) => text[..=index].to_string(),
        None => text.to_string(),
    }
}

/// Replaces a trailing dash with the bullet prefix.
pub fn convert_dash_to_bullet(text: &str) -> String {
    let stem = text.strip_suffix(DASH_TRIGGER).unwrap_or(text);
    format!("{stem}{BULLET_PREFIX}")
}

/// Inserts a bullet at `selection`, replacing any selected range.
///
/// Callers set the session's pending-capitalize flag after a successful
/// insertion so the word following the marker capitalizes.
///
/// # Errors
/// - Returns an invariant violation when `selection` does not fit `text`.
pub fn insert_bullet_at_selection(
    text: &str,
    selection: Selection,
) -> Result<BulletInsertion, EditorError> {
    let (start, end) = selection_byte_range(text, selection)?;
    let before = &text[..start];
    let after = &text[end..];
    let separator = if is_blank(last_line(before)) { "" } else { "\n" };

    let spliced = format!("{before}{separator}{BULLET_PREFIX}{after}");
    let caret = char_len(before) + separator.len() + char_len(BULLET_PREFIX);
    Ok(BulletInsertion {
        text: spliced,
        caret,
        restore_caret: !after.is_empty(),
    })
}

/// Produces the text to commit for `decision`, given the text the view sent.
pub fn apply_decision(decision: EditDecision, new_text: &str) -> String {
    match decision {
        EditDecision::PlainEdit(text) => text,
        EditDecision::ContinueBullet => continue_bullet(new_text),
        EditDecision::TerminateBullet => {
            terminate_bullet(new_text.strip_suffix('\n').unwrap_or(new_text))
        }
        EditDecision::ConvertDashToBullet => convert_dash_to_bullet(new_text),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        apply_decision, continue_bullet, convert_dash_to_bullet, insert_bullet_at_selection,
        terminate_bullet,
    };
    use crate::editor::classify::EditDecision;
    use crate::editor::EditorError;
    use crate::model::selection::Selection;

    #[test]
    fn continue_adds_newline_only_after_non_blank_line() {
        assert_eq!(continue_bullet("• item1"), "• item1\n• ");
        assert_eq!(continue_bullet("• item1\n"), "• item1\n• ");
        assert_eq!(continue_bullet("• item1\n  "), "• item1\n  • ");
        assert_eq!(continue_bullet(""), "• ");
    }

    #[test]
    fn terminate_clears_only_the_final_line() {
        assert_eq!(terminate_bullet("• item1\n• "), "• item1\n");
        assert_eq!(terminate_bullet("• "), "• ");
    }

    #[test]
    fn convert_replaces_trailing_dash() {
        assert_eq!(convert_dash_to_bullet("hello\n-"), "hello\n• ");
        assert_eq!(convert_dash_to_bullet("-"), "• ");
    }

    #[test]
    fn apply_decision_scenarios() {
        assert_eq!(
            apply_decision(EditDecision::ContinueBullet, "• item1\n"),
            "• item1\n• "
        );
        assert_eq!(
            apply_decision(EditDecision::TerminateBullet, "• item1\n• \n"),
            "• item1\n"
        );
        assert_eq!(
            apply_decision(EditDecision::ConvertDashToBullet, "hello\n-"),
            "hello\n• "
        );
        assert_eq!(
            apply_decision(EditDecision::PlainEdit("abc".to_string()), "ignored"),
            "abc"
        );
    }

    #[test]
    fn insert_mid_text_restores_caret_after_marker() {
        let inserted = insert_bullet_at_selection("hello world", Selection::caret(5)).unwrap();
        assert_eq!(inserted.text, "hello\n•  world");
        assert_eq!(inserted.caret, 8);
        assert!(inserted.restore_caret);
    }

    #[test]
    fn insert_at_end_leaves_caret_at_end() {
        let inserted = insert_bullet_at_selection("groceries\n", Selection::caret(10)).unwrap();
        assert_eq!(inserted.text, "groceries\n• ");
        assert_eq!(inserted.caret, 12);
        assert!(!inserted.restore_caret);
    }

    #[test]
    fn insert_replaces_selected_range() {
        let inserted = insert_bullet_at_selection("one\ntwo three", Selection::new(4, 8)).unwrap();
        assert_eq!(inserted.text, "one\n• three");
        assert_eq!(inserted.caret, 6);
    }

    #[test]
    fn inserting_twice_from_same_split_yields_two_bullets() {
        let first = insert_bullet_at_selection("a b", Selection::caret(1)).unwrap();
        assert_eq!(first.text, "a\n•  b");
        let second = insert_bullet_at_selection(&first.text, Selection::caret(first.caret)).unwrap();
        assert_eq!(second.text, "a\n• \n•  b");
        assert_eq!(second.caret, 7);
    }

    #[test]
    fn insert_rejects_out_of_range_selection() {
        let err = insert_bullet_at_selection("abc", Selection::caret(4)).unwrap_err();
        assert!(matches!(err, EditorError::SelectionOutOfBounds { len: 3, .. }));
    }
}
