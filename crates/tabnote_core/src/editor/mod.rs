//! Note text-transformation engine.
//!
//! # Responsibility
//! - Classify every text change reported by the view.
//! - Rewrite bulleted text (continue, terminate, convert dash, insert at caret).
//! - Derive tab titles from note bodies.
//!
//! # Invariants
//! - All offsets are char offsets, never byte offsets.
//! - Functions here are pure; they never touch persistence or session state.
//! - Invalid selections are rejected before any text is produced.

use crate::model::note::NoteKey;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod bullet;
pub mod classify;
pub mod selection_tracker;
pub mod text;
pub mod title;

/// List item glyph prepended to bulleted lines.
pub const BULLET_MARKER: char = '•';

/// Marker plus separating space, as inserted into text.
pub const BULLET_PREFIX: &str = "• ";

/// Typed at the start of a line, converted into [`BULLET_PREFIX`].
pub const DASH_TRIGGER: char = '-';

/// Invariant violations raised by the editing pipeline.
///
/// None of these corrupt committed state: callers validate before mutating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Selection offsets exceed the text length.
    SelectionOutOfBounds {
        start: usize,
        end: usize,
        len: usize,
    },
    /// Selection start lies after its end.
    InvertedSelection { start: usize, end: usize },
    /// No route or note exists for the key.
    KeyNotFound(NoteKey),
    /// Tab index outside the route list.
    IndexOutOfBounds { index: usize, len: usize },
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::SelectionOutOfBounds { start, end, len } => write!(
                f,
                "invariant violation: selection {start}..{end} exceeds text length {len}"
            ),
            Self::InvertedSelection { start, end } => write!(
                f,
                "invariant violation: selection start {start} is after end {end}"
            ),
            Self::KeyNotFound(key) => write!(f, "invariant violation: note key not found: {key}"),
            Self::IndexOutOfBounds { index, len } => write!(
                f,
                "invariant violation: tab index {index} out of range for {len} tab(s)"
            ),
        }
    }
}

impl Error for EditorError {}
