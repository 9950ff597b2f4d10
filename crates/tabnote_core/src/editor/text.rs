//! Char-offset helpers over UTF-8 note text.

use super::EditorError;
use crate::model::selection::Selection;

/// Number of chars in `text`.
pub fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of char `offset`, or `None` past the end.
pub fn byte_index(text: &str, offset: usize) -> Option<usize> {
    text.char_indices()
        .map(|(index, _)| index)
        .chain(std::iter::once(text.len()))
        .nth(offset)
}

/// Content after the last newline (the whole text when single-line).
pub fn last_line(text: &str) -> &str {
    match text.rfind('\n') {
        Some(index) => &text[index + 1..],
        None => text,
    }
}

/// True for empty or whitespace-only lines.
pub fn is_blank(line: &str) -> bool {
    line.trim().is_empty()
}

/// Validates `selection` against `text` and returns its byte range.
///
/// # Errors
/// - `InvertedSelection` when `start > end`.
/// - `SelectionOutOfBounds` when `end` exceeds the char length.
pub fn selection_byte_range(
    text: &str,
    selection: Selection,
) -> Result<(usize, usize), EditorError> {
    if selection.start > selection.end {
        return Err(EditorError::InvertedSelection {
            start: selection.start,
            end: selection.end,
        });
    }
    let out_of_bounds = || EditorError::SelectionOutOfBounds {
        start: selection.start,
        end: selection.end,
        len: char_len(text),
    };
    let start = byte_index(text, selection.start).ok_or_else(out_of_bounds)?;
    let end = byte_index(text, selection.end).ok_or_else(out_of_bounds)?;
    Ok((start, end))
}
