//! Most recent selection reported by the text surface.

use crate::model::selection::Selection;

/// Holds the latest selection; starts unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionTracker {
    current: Option<Selection>,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the previously recorded selection.
    pub fn record_selection(&mut self, selection: Selection) {
        self.current = Some(selection);
    }

    pub fn current_selection(&self) -> Option<Selection> {
        self.current
    }

    /// Forgets the selection, e.g. when another note becomes active.
    pub fn reset(&mut self) {
        self.current = None;
    }
}
