//! # Beaker Buffer
//!
//! The document buffer owns all text mutation. Hosts feed edits through
//! the two structural primitives (`replace_range`, `indent`) or sync the
//! whole text after a host-side keystroke; the cursor is recomputed on
//! every structural edit so it stays consistent with the new text.
//!
//! Imperative cursor placement on the host input is invalidated when the
//! text content is replaced in the same tick, so each structural edit
//! records a [`PendingCursor`] the host applies on its next render tick.

pub mod edit;
pub mod history;

use std::ops::Range;

pub use edit::{Edit, EditKind};
pub use history::History;

/// Fixed-width indentation inserted for the indent key
pub const INDENT: &str = "    ";

/// Cursor placement the host must apply after its next re-render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingCursor(pub usize);

/// Document buffer
pub struct Document {
    /// Text content
    text: String,
    /// Cursor as a byte offset into the text
    cursor: usize,
    /// Selection anchor; None means no active selection
    anchor: Option<usize>,
    /// Deferred visual cursor restore
    pending_cursor: Option<PendingCursor>,
    /// Edit history
    history: History,
    /// Increments on each mutation
    version: u64,
}

impl Document {
    /// Create an empty document
    pub fn new() -> Self {
        Self::from_text("")
    }

    /// Create a document from text, cursor at the start
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cursor: 0,
            anchor: None,
            pending_cursor: None,
            history: History::new(),
            version: 0,
        }
    }

    /// Full text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Text length in bytes
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of newline-delimited lines
    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Lines for display
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.text.split('\n')
    }

    /// Current cursor offset
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the cursor, clamped to a char boundary within the text
    pub fn set_cursor(&mut self, offset: usize) {
        self.cursor = self.clamp_offset(offset);
        self.anchor = None;
    }

    /// Set the host selection (anchor..cursor, either order)
    pub fn set_selection(&mut self, anchor: usize, cursor: usize) {
        self.anchor = Some(self.clamp_offset(anchor));
        self.cursor = self.clamp_offset(cursor);
    }

    /// Active selection as an ordered range (empty at the cursor when none)
    pub fn selection(&self) -> Range<usize> {
        match self.anchor {
            Some(anchor) => anchor.min(self.cursor)..anchor.max(self.cursor),
            None => self.cursor..self.cursor,
        }
    }

    /// Mutation counter
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Wholesale host-driven mutation: the host input changed the text
    /// itself (a keystroke), so adopt the new text and cursor as-is.
    pub fn sync(&mut self, text: impl Into<String>, cursor: usize) {
        let text = text.into();
        if text == self.text {
            self.cursor = self.clamp_offset(cursor);
            return;
        }
        let edit = Edit::replace(0..self.text.len(), text);
        self.apply(edit);
        self.cursor = self.clamp_offset(cursor);
        self.anchor = None;
    }

    /// Replace the half-open byte range with `replacement` and reposition
    /// the cursor to `start + replacement.len()`.
    ///
    /// Used for suggestion acceptance and indentation alike.
    pub fn replace_range(&mut self, start: usize, end: usize, replacement: &str) {
        let start = self.clamp_offset(start);
        let end = self.clamp_offset(end.max(start));
        self.apply(Edit::replace(start..end, replacement));
        self.cursor = start + replacement.len();
        self.anchor = None;
        self.pending_cursor = Some(PendingCursor(self.cursor));
    }

    /// Insert the fixed indentation run at the cursor, collapsing any
    /// active selection, and advance the cursor past it.
    pub fn indent(&mut self) {
        let range = self.selection();
        self.replace_range(range.start, range.end, INDENT);
    }

    /// Take the deferred cursor restore, if an edit produced one
    pub fn take_pending_cursor(&mut self) -> Option<PendingCursor> {
        self.pending_cursor.take()
    }

    /// Undo the last edit
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(edit) => {
                self.apply_raw(&edit);
                self.cursor = self.clamp_offset(edit.caret_after());
                self.version += 1;
                true
            }
            None => false,
        }
    }

    /// Redo the last undone edit
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(edit) => {
                self.apply_raw(&edit);
                self.cursor = self.clamp_offset(edit.caret_after());
                self.version += 1;
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Apply an edit, recording its inverse for undo
    fn apply(&mut self, edit: Edit) {
        let inverse = edit.inverse(&self.text);
        self.apply_raw(&edit);
        self.history.push(edit, inverse);
        self.version += 1;
    }

    fn apply_raw(&mut self, edit: &Edit) {
        match &edit.kind {
            EditKind::Insert { offset, text } => {
                self.text.insert_str(*offset, text);
            }
            EditKind::Delete { range } => {
                self.text.replace_range(range.clone(), "");
            }
            EditKind::Replace { range, text } => {
                self.text.replace_range(range.clone(), text);
            }
        }
    }

    /// Clamp an offset into the text, snapping down to a char boundary
    fn clamp_offset(&self, offset: usize) -> usize {
        let mut offset = offset.min(self.text.len());
        while offset > 0 && !self.text.is_char_boundary(offset) {
            offset -= 1;
        }
        offset
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replace_range_repositions_cursor() {
        let mut doc = Document::from_text("let pri = 1");
        doc.replace_range(4, 7, "print");
        assert_eq!(doc.text(), "let print = 1");
        assert_eq!(doc.cursor(), 4 + "print".len());
    }

    #[test]
    fn test_indent_inserts_four_spaces_mid_line() {
        let mut doc = Document::from_text("abcdef");
        doc.set_cursor(3);
        doc.indent();
        assert_eq!(doc.text(), "abc    def");
        assert_eq!(doc.cursor(), 7);
    }

    #[test]
    fn test_indent_collapses_selection() {
        let mut doc = Document::from_text("abcdef");
        doc.set_selection(2, 4);
        doc.indent();
        assert_eq!(doc.text(), "ab    ef");
        assert_eq!(doc.cursor(), 6);
    }

    #[test]
    fn test_pending_cursor_handoff() {
        let mut doc = Document::from_text("ab");
        doc.replace_range(1, 1, "xy");
        assert_eq!(doc.take_pending_cursor(), Some(PendingCursor(3)));
        assert_eq!(doc.take_pending_cursor(), None);
    }

    #[test]
    fn test_sync_adopts_host_text() {
        let mut doc = Document::from_text("pr");
        doc.sync("pri", 3);
        assert_eq!(doc.text(), "pri");
        assert_eq!(doc.cursor(), 3);
    }

    #[test]
    fn test_undo_restores_prior_text() {
        let mut doc = Document::from_text("hello");
        doc.replace_range(0, 5, "world");
        assert!(doc.undo());
        assert_eq!(doc.text(), "hello");
        assert!(doc.redo());
        assert_eq!(doc.text(), "world");
    }

    #[test]
    fn test_cursor_clamps_to_char_boundary() {
        let mut doc = Document::from_text("aé");
        doc.set_cursor(2); // inside the two-byte 'é'
        assert_eq!(doc.cursor(), 1);
        doc.set_cursor(99);
        assert_eq!(doc.cursor(), 3);
    }

    #[test]
    fn test_line_count() {
        assert_eq!(Document::from_text("").line_count(), 1);
        assert_eq!(Document::from_text("a\nb\n").line_count(), 3);
    }
}
