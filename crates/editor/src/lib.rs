//! # Beaker Editor
//!
//! The editor surface controller: routes keystrokes, owns the document
//! and the suggestion popup lifecycle, and keeps the popup anchor in
//! sync with the caret.
//!
//! Data flow on a keystroke: the host input mutates its text and reports
//! it through [`EditorSurface::on_change`]; the document adopts the new
//! text, suggestions are re-evaluated, and the caret mirror recomputes
//! the popup anchor. Structural edits (indentation, suggestion
//! acceptance) flow the other way: the surface mutates the document and
//! hands the host a pending cursor to apply after it re-renders.

pub mod input;
pub mod save_state;
pub mod view;

use std::time::Instant;

use buffer::{Document, PendingCursor};
use completion::{CompletionItem, SuggestionState};
use layout::{CaretMirror, PopupAnchor, ScrollOffset, SharedLayout};
use syntax::HighlightedSpan;
use theme::SyntaxTheme;

pub use input::{InputResult, Key, KeyEvent, Modifiers};
pub use save_state::{SAVE_QUIET_DELAY, SaveIndicator, SaveState};
pub use view::{MIN_GUTTER_ROWS, gutter_rows};

/// Snapshot of the suggestion popup for rendering
#[derive(Debug, Clone)]
pub struct PopupView<'a> {
    pub items: &'a [CompletionItem],
    pub selected: usize,
    pub anchor: Option<PopupAnchor>,
}

/// The code editor surface
pub struct EditorSurface {
    document: Document,
    suggestions: SuggestionState,
    mirror: CaretMirror,
    save: SaveIndicator,
}

impl EditorSurface {
    pub fn new() -> Self {
        Self::with_text("")
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            document: Document::from_text(text),
            suggestions: SuggestionState::new(),
            mirror: CaretMirror::new(),
            save: SaveIndicator::new(),
        }
    }

    /// Attach the host's text layout capability for popup anchoring
    pub fn mount_layout(&mut self, layout: SharedLayout) {
        self.mirror.mount(layout);
    }

    pub fn text(&self) -> &str {
        self.document.text()
    }

    pub fn cursor(&self) -> usize {
        self.document.cursor()
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The host input's text changed (a keystroke or paste).
    pub fn on_change(&mut self, text: &str, cursor: usize) {
        self.document.sync(text, cursor);
        self.save.touch(Instant::now());

        if self.suggestions.update(text, cursor) {
            self.mirror.refresh(text, cursor);
        }
    }

    /// Route a key event.
    ///
    /// While the popup is visible: Up/Down cycle the selection without
    /// moving the text cursor, Enter/Tab confirm, Escape cancels. Tab
    /// with no popup indents. Everything else is the host's default
    /// editing.
    pub fn handle_key(&mut self, event: KeyEvent) -> InputResult {
        if self.suggestions.is_visible() {
            match event.key {
                Key::Up => {
                    self.suggestions.select_prev();
                    return InputResult::Handled;
                }
                Key::Down => {
                    self.suggestions.select_next();
                    return InputResult::Handled;
                }
                Key::Enter | Key::Tab => {
                    self.accept_selected();
                    return InputResult::Handled;
                }
                Key::Escape => {
                    self.suggestions.hide();
                    return InputResult::Handled;
                }
                _ => {}
            }
        }

        if event.key == Key::Tab {
            self.document.indent();
            return InputResult::Handled;
        }

        InputResult::Unhandled
    }

    /// Confirm the selected candidate via the document primitive
    fn accept_selected(&mut self) {
        if let Some(acceptance) = self.suggestions.accept(self.document.cursor()) {
            self.document
                .replace_range(acceptance.start, acceptance.end, &acceptance.text);
        }
    }

    /// Popup click on a candidate row
    pub fn click_candidate(&mut self, index: usize) {
        self.suggestions.select(index);
        self.accept_selected();
    }

    /// The host input scrolled: popup anchors would go stale, so hide.
    pub fn on_scroll(&mut self, scroll: ScrollOffset) {
        self.mirror.set_scroll(scroll);
        self.suggestions.hide();
    }

    /// The host input was clicked
    pub fn on_click(&mut self) {
        self.suggestions.hide();
    }

    /// The host input lost focus
    pub fn on_blur(&mut self) {
        self.suggestions.hide();
    }

    /// Popup snapshot, None while hidden
    pub fn popup(&self) -> Option<PopupView<'_>> {
        if !self.suggestions.is_visible() {
            return None;
        }
        Some(PopupView {
            items: self.suggestions.items(),
            selected: self.suggestions.selected(),
            anchor: self.mirror.anchor(),
        })
    }

    /// Deferred cursor restore for the host's next render tick
    pub fn take_pending_cursor(&mut self) -> Option<PendingCursor> {
        self.document.take_pending_cursor()
    }

    /// Styled spans for the highlight layer
    pub fn highlighted(&self, theme: &SyntaxTheme) -> Vec<HighlightedSpan> {
        syntax::render_tokens(self.document.text(), theme)
    }

    /// Gutter line numbers
    pub fn gutter(&self) -> Vec<usize> {
        gutter_rows(self.document.line_count())
    }

    /// Save indicator as of now
    pub fn save_state(&self) -> SaveState {
        self.save.state(Instant::now())
    }
}

impl Default for EditorSurface {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use layout::{FontMetrics, MonospaceLayout};
    use std::sync::Arc;

    fn surface_with(text: &str) -> EditorSurface {
        let mut surface = EditorSurface::new();
        surface.mount_layout(Arc::new(MonospaceLayout::new(FontMetrics::default())));
        surface.on_change(text, text.len());
        surface
    }

    #[test]
    fn test_typing_partial_word_shows_popup() {
        let surface = surface_with("pri");
        let popup = surface.popup().expect("popup visible");
        assert!(popup.items.iter().any(|i| i.label == "print"));
        assert_eq!(popup.selected, 0);
        assert!(popup.anchor.is_some());
    }

    #[test]
    fn test_confirm_replaces_partial_word_and_moves_cursor() {
        let mut surface = surface_with("x = pri");
        surface.handle_key(KeyEvent::plain(Key::Enter));

        assert_eq!(surface.text(), "x = print");
        assert_eq!(surface.cursor(), "x = print".len());
        assert!(surface.popup().is_none());
        assert_eq!(
            surface.take_pending_cursor(),
            Some(buffer::PendingCursor("x = print".len()))
        );
    }

    #[test]
    fn test_tab_confirms_while_popup_visible() {
        let mut surface = surface_with("pri");
        assert_eq!(
            surface.handle_key(KeyEvent::plain(Key::Tab)),
            InputResult::Handled
        );
        assert_eq!(surface.text(), "print");
    }

    #[test]
    fn test_tab_indents_without_popup() {
        // "qz" has no prefix match, so no popup is in the way.
        let mut surface = surface_with("qz");
        assert!(surface.popup().is_none());

        surface.handle_key(KeyEvent::plain(Key::Tab));
        assert_eq!(surface.text(), "qz    ");
        assert_eq!(surface.cursor(), 6);
    }

    #[test]
    fn test_navigation_cycles_without_moving_cursor() {
        let mut surface = surface_with("e");
        let cursor_before = surface.cursor();
        let count = surface.popup().unwrap().items.len();
        assert!(count >= 2);

        surface.handle_key(KeyEvent::plain(Key::Up));
        assert_eq!(surface.popup().unwrap().selected, count - 1);
        surface.handle_key(KeyEvent::plain(Key::Down));
        assert_eq!(surface.popup().unwrap().selected, 0);
        assert_eq!(surface.cursor(), cursor_before);
    }

    #[test]
    fn test_escape_hides_without_modifying_text() {
        let mut surface = surface_with("pri");
        surface.handle_key(KeyEvent::plain(Key::Escape));
        assert!(surface.popup().is_none());
        assert_eq!(surface.text(), "pri");
    }

    #[test]
    fn test_scroll_hides_popup() {
        let mut surface = surface_with("pri");
        assert!(surface.popup().is_some());
        surface.on_scroll(ScrollOffset { top: 10.0, left: 0.0 });
        assert!(surface.popup().is_none());
    }

    #[test]
    fn test_buffer_identifier_completion_end_to_end() {
        let mut surface = surface_with("reagent = 5\nrea");
        let popup = surface.popup().unwrap();
        assert_eq!(popup.items[0].label, "reagent");

        surface.handle_key(KeyEvent::plain(Key::Enter));
        assert_eq!(surface.text(), "reagent = 5\nreagent");
    }

    #[test]
    fn test_gutter_padding() {
        let surface = surface_with("a\nb");
        assert_eq!(surface.gutter().len(), MIN_GUTTER_ROWS);
    }
}
