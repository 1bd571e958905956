//! Single-cell edit overlay
//!
//! Holds the text being typed into one cell. The grid is only written when
//! the edit is committed by the update loop; cancelling just drops this state.

use crate::grid::CellPosition;

/// State for editing a single cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellEditState {
    /// Position of the cell being edited
    pub position: CellPosition,
    /// Value before editing started
    pub original: String,
    buffer: String,
    /// Cursor position in characters
    cursor: usize,
}

impl CellEditState {
    /// Seed the buffer with the cell's current value, cursor at end
    pub fn new(position: CellPosition, value: String) -> Self {
        let cursor = value.chars().count();
        Self {
            position,
            original: value.clone(),
            buffer: value,
            cursor,
        }
    }

    /// Start editing by typing: the buffer is replaced with `ch`
    pub fn with_char(position: CellPosition, original: String, ch: char) -> Self {
        Self {
            position,
            original,
            buffer: ch.to_string(),
            cursor: 1,
        }
    }

    /// Current buffer content
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Cursor position in characters (for rendering)
    pub fn cursor_char_position(&self) -> usize {
        self.cursor
    }

    /// Check if content changed from original
    pub fn is_modified(&self) -> bool {
        self.buffer != self.original
    }

    fn byte_offset(&self, char_idx: usize) -> usize {
        self.buffer
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.buffer.len())
    }

    fn char_len(&self) -> usize {
        self.buffer.chars().count()
    }

    /// Insert character at cursor position
    pub fn insert_char(&mut self, ch: char) {
        let at = self.byte_offset(self.cursor);
        self.buffer.insert(at, ch);
        self.cursor += 1;
    }

    /// Insert text at cursor (for paste); line breaks are dropped
    pub fn insert_text(&mut self, text: &str) {
        for ch in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(ch);
        }
    }

    /// Delete character before cursor (backspace)
    pub fn delete_backward(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let at = self.byte_offset(self.cursor);
        self.buffer.remove(at);
    }

    /// Delete character at cursor (delete)
    pub fn delete_forward(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let at = self.byte_offset(self.cursor);
        self.buffer.remove(at);
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn cursor_home(&mut self) {
        self.cursor = 0;
    }

    pub fn cursor_end(&mut self) {
        self.cursor = self.char_len();
    }

    /// Consume the edit, returning the final text
    pub fn into_value(self) -> String {
        self.buffer
    }
}
