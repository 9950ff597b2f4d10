//! Tab title derivation.

use crate::model::note::PLACEHOLDER_TITLE;

/// Maximum title length in chars.
pub const TITLE_MAX_CHARS: usize = 15;

/// Maps a note body to its tab label.
///
/// Empty text yields the placeholder label; otherwise the first line,
/// truncated to [`TITLE_MAX_CHARS`].
pub fn derive_title(text: &str) -> String {
    if text.is_empty() {
        return PLACEHOLDER_TITLE.to_string();
    }
    text.split('\n')
        .next()
        .unwrap_or_default()
        .chars()
        .take(TITLE_MAX_CHARS)
        .collect()
}
