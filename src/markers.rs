//! Literal marker text embedded into the document.
//!
//! Every applied highlight has the shape `==<text>==%% %%`: the selection
//! wrapped in highlight markers, followed by one placeholder pair with an
//! embedded space. The allowance scan leans on this shape staying fixed.

/// Opening/closing highlight marker.
pub const HIGHLIGHT_MARKER: &str = "==";

/// Placeholder inserted after every highlight span.
pub const PLACEHOLDER: &str = "%% %%";

/// Character the allowance scan treats as an open-highlight boundary.
pub const MARKER_CHAR: char = '=';

/// Character the allowance scan treats as a closed-highlight boundary.
pub const PLACEHOLDER_CHAR: char = '%';

/// Columns to step back after insertion, landing the cursor inside the
/// placeholder at the embedded space.
pub const CURSOR_BACKSTEP: usize = 3;

/// Wrap a selection in highlight markers plus the trailing placeholder.
pub fn wrap_selection(text: &str) -> String {
    let mut wrapped =
        String::with_capacity(text.len() + HIGHLIGHT_MARKER.len() * 2 + PLACEHOLDER.len());
    wrapped.push_str(HIGHLIGHT_MARKER);
    wrapped.push_str(text);
    wrapped.push_str(HIGHLIGHT_MARKER);
    wrapped.push_str(PLACEHOLDER);
    wrapped
}
