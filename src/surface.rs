//! Rope-backed [`EditableSurface`] used by the demo binary and the test
//! suites. Hosts with a native buffer implement the trait directly instead.

use std::ops::Range;

use ropey::Rope;

use crate::editor::{EditableSurface, Position};

/// In-memory editable text with one cursor and one selection range.
///
/// All offsets are char indices into the rope. The selection is half-open;
/// a collapsed range means no selection.
#[derive(Debug, Clone)]
pub struct BufferSurface {
    buffer: Rope,
    selection: Range<usize>,
    cursor: usize,
}

impl Default for BufferSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferSurface {
    pub fn new() -> Self {
        Self::from_text("")
    }

    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: Rope::from_str(text),
            selection: 0..0,
            cursor: 0,
        }
    }

    /// Select the char range `start..end`, clamped to the buffer. The cursor
    /// moves to the selection end.
    pub fn select_range(&mut self, start: usize, end: usize) {
        let len = self.buffer.len_chars();
        let start = start.min(len);
        let end = end.max(start).min(len);
        self.selection = start..end;
        self.cursor = end;
    }

    /// Select the first occurrence of `needle`, returning whether it was
    /// found. An empty needle selects nothing.
    pub fn select_first(&mut self, needle: &str) -> bool {
        if needle.is_empty() {
            return false;
        }
        let text = self.buffer.to_string();
        let Some(byte_start) = text.find(needle) else {
            return false;
        };
        let start = text[..byte_start].chars().count();
        let end = start + needle.chars().count();
        self.select_range(start, end);
        true
    }

    /// Current selection as a char range.
    pub fn selected_range(&self) -> Range<usize> {
        self.selection.clone()
    }

    fn position_to_offset(&self, position: Position) -> usize {
        if position.line >= self.buffer.len_lines() {
            return self.buffer.len_chars();
        }
        let line_start = self.buffer.line_to_char(position.line);
        line_start + position.column.min(self.line_length(position.line))
    }

    fn offset_to_position(&self, offset: usize) -> Position {
        let offset = offset.min(self.buffer.len_chars());
        let line = self.buffer.char_to_line(offset);
        let line_start = self.buffer.line_to_char(line);
        Position::new(line, offset - line_start)
    }

    /// Length of a line in chars, excluding the trailing newline.
    fn line_length(&self, line: usize) -> usize {
        let slice = self.buffer.line(line);
        let len = slice.len_chars();
        if len > 0 && slice.char(len - 1) == '\n' {
            len - 1
        } else {
            len
        }
    }
}

impl EditableSurface for BufferSurface {
    fn selection(&self) -> String {
        if self.selection.is_empty() {
            return String::new();
        }
        self.buffer
            .slice(self.selection.start..self.selection.end)
            .to_string()
    }

    fn text(&self) -> String {
        self.buffer.to_string()
    }

    fn cursor(&self) -> Position {
        self.offset_to_position(self.cursor)
    }

    fn set_cursor(&mut self, position: Position) {
        self.cursor = self.position_to_offset(position);
        self.selection = self.cursor..self.cursor;
    }

    fn replace_selection(&mut self, text: &str) {
        let start = self.selection.start;
        if !self.selection.is_empty() {
            self.buffer.remove(self.selection.clone());
        }
        self.buffer.insert(start, text);
        let head = start + text.chars().count();
        self.cursor = head;
        self.selection = head..head;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_and_read_back() {
        let mut surface = BufferSurface::from_text("hello world");
        assert!(surface.select_first("world"));
        assert_eq!(surface.selection(), "world");
        assert_eq!(surface.selected_range(), 6..11);
    }

    #[test]
    fn test_select_first_missing_needle() {
        let mut surface = BufferSurface::from_text("hello world");
        assert!(!surface.select_first("absent"));
        assert_eq!(surface.selection(), "");
    }

    #[test]
    fn test_replace_selection_collapses_after_insert() {
        let mut surface = BufferSurface::from_text("hello world");
        surface.select_first("world");
        surface.replace_selection("there");

        assert_eq!(surface.text(), "hello there");
        assert_eq!(surface.selection(), "");
        assert_eq!(surface.cursor(), Position::new(0, 11));
    }

    #[test]
    fn test_replace_collapsed_selection_inserts_at_cursor() {
        let mut surface = BufferSurface::from_text("ab");
        surface.set_cursor(Position::new(0, 1));
        surface.replace_selection("X");

        assert_eq!(surface.text(), "aXb");
        assert_eq!(surface.cursor(), Position::new(0, 2));
    }

    #[test]
    fn test_char_offsets_with_multibyte_text() {
        let mut surface = BufferSurface::from_text("café au lait");
        assert!(surface.select_first("au"));
        assert_eq!(surface.selected_range(), 5..7);

        surface.replace_selection("avec");
        assert_eq!(surface.text(), "café avec lait");
    }

    #[test]
    fn test_set_cursor_clamps_to_line_and_buffer() {
        let mut surface = BufferSurface::from_text("ab\ncd");

        surface.set_cursor(Position::new(0, 99));
        assert_eq!(surface.cursor(), Position::new(0, 2));

        surface.set_cursor(Position::new(9, 0));
        assert_eq!(surface.cursor(), Position::new(1, 2));
    }

    #[test]
    fn test_cursor_position_across_lines() {
        let mut surface = BufferSurface::from_text("one\ntwo\nthree");
        surface.set_cursor(Position::new(2, 3));
        assert_eq!(surface.cursor(), Position::new(2, 3));

        surface.select_first("two");
        assert_eq!(surface.cursor(), Position::new(1, 3));
    }
}
