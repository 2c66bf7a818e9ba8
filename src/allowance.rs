//! Marker-scan heuristic deciding whether a selection may be wrapped.

use crate::markers::{MARKER_CHAR, PLACEHOLDER_CHAR};

/// Returns whether `selection`, as it currently appears in `document`, should
/// be wrapped in highlight markers.
///
/// This is a heuristic, not a parser. It locates the *first* occurrence of
/// the selection as a literal substring (not the actual selection offsets)
/// and scans backward from there: a `=` before any `%` means the occurrence
/// presumably sits inside a still-open highlight span, while a `%` means the
/// nearest preceding highlight was already closed. The scan relies on the
/// convention that every highlight span is immediately followed by exactly
/// one placeholder pair; it does not validate marker balance. Callers that
/// need structural guarantees want a real marker-balance scan or
/// position-tracked offsets instead of substring search.
pub fn is_highlight_allowed(document: &str, selection: &str) -> bool {
    // Selections touching a marker boundary are rejected outright.
    if selection.starts_with(MARKER_CHAR) || selection.ends_with(MARKER_CHAR) {
        return false;
    }

    // Degenerate fallback: a selection we cannot locate is allowed.
    let Some(occurrence) = document.find(selection) else {
        return true;
    };

    for ch in document[..occurrence].chars().rev() {
        match ch {
            MARKER_CHAR => return false,
            PLACEHOLDER_CHAR => return true,
            _ => {}
        }
    }

    true
}
