//! Host editor seam: the minimal contract the controller drives.

/// A position in the document (line and column)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed, counted in characters)
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// Operations the host exposes on its active editable surface.
///
/// Implementations follow the usual editor convention: replacing the
/// selection collapses it and leaves the cursor at the end of the inserted
/// text, and moving the cursor collapses any selection tied to it.
pub trait EditableSurface {
    /// Currently selected text; empty when the selection is collapsed.
    fn selection(&self) -> String;

    /// Full document text snapshot.
    fn text(&self) -> String;

    /// Current cursor position.
    fn cursor(&self) -> Position;

    /// Move the cursor, collapsing the selection.
    fn set_cursor(&mut self, position: Position);

    /// Replace the current selection with `text`, leaving the cursor at the
    /// end of the insertion.
    fn replace_selection(&mut self, text: &str);
}
