//! # Beaker Completion
//!
//! Cursor-aware autocompletion over the document buffer.
//!
//! On every text change the engine isolates the partial word behind the
//! cursor, unions the reserved-word list with identifiers discovered in
//! the buffer, and keeps the prefix matches that are not exactly the
//! typed word. The candidate universe is recomputed on demand, never
//! cached across edits.

pub mod extract;
pub mod item;
pub mod word;

use syntax::KEYWORDS;

pub use extract::known_identifiers;
pub use item::{CompletionItem, CompletionKind};
pub use word::{partial_word, partial_word_start};

/// Replacement the editor applies when a candidate is confirmed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Acceptance {
    /// Start of the replaced partial word
    pub start: usize,
    /// End of the replaced span (the cursor)
    pub end: usize,
    /// Text to insert
    pub text: String,
}

/// Popup state for the suggestion list.
///
/// Replaced on every keystroke; any edit, click, or scroll in the host
/// hides it unconditionally so the anchor can never go stale.
#[derive(Debug, Clone, Default)]
pub struct SuggestionState {
    items: Vec<CompletionItem>,
    selected: usize,
    visible: bool,
    word_start: usize,
}

impl SuggestionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-evaluate suggestions for the new text and cursor.
    ///
    /// Returns true when the popup should be (re)shown.
    pub fn update(&mut self, text: &str, cursor: usize) -> bool {
        let start = partial_word_start(text, cursor);
        let current = partial_word(text, cursor);

        if current.is_empty() {
            self.hide();
            return false;
        }

        let mut items: Vec<CompletionItem> = KEYWORDS
            .iter()
            .map(|k| CompletionItem::keyword(*k))
            .chain(known_identifiers(text))
            .filter(|item| item.label.starts_with(current) && item.label != current)
            .collect();
        dedupe_by_label(&mut items);
        items.sort_by(|a, b| a.label.cmp(&b.label));

        if items.is_empty() {
            self.hide();
            return false;
        }

        self.items = items;
        self.selected = 0;
        self.word_start = start;
        self.visible = true;
        true
    }

    /// Hide the popup without touching the text
    pub fn hide(&mut self) {
        self.visible = false;
        self.items.clear();
        self.selected = 0;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Candidates in display order
    pub fn items(&self) -> &[CompletionItem] {
        &self.items
    }

    /// Selected index
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Move the selection down, wrapping from last to first
    pub fn select_next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = (self.selected + 1) % self.items.len();
    }

    /// Move the selection up, wrapping from first to last
    pub fn select_prev(&mut self) {
        if self.items.is_empty() {
            return;
        }
        self.selected = self
            .selected
            .checked_sub(1)
            .unwrap_or(self.items.len() - 1);
    }

    /// Select a specific index (popup click)
    pub fn select(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    /// Confirm the selected candidate: the partial word from its start to
    /// the cursor is replaced and the popup hides.
    pub fn accept(&mut self, cursor: usize) -> Option<Acceptance> {
        if !self.visible {
            return None;
        }
        let item = self.items.get(self.selected)?;
        let acceptance = Acceptance {
            start: self.word_start,
            end: cursor,
            text: item.label.clone(),
        };
        self.hide();
        Some(acceptance)
    }
}

fn dedupe_by_label(items: &mut Vec<CompletionItem>) {
    let mut seen = Vec::new();
    items.retain(|item| {
        if seen.contains(&item.label) {
            false
        } else {
            seen.push(item.label.clone());
            true
        }
    });
}
