//! Identifier extraction
//!
//! Scans the buffer for the two patterns that introduce user identifiers:
//! an assignment target at the start of a line (leading whitespace
//! ignored), and a definition introducer followed by a name.

use syntax::{is_keyword, is_word_char};

use crate::{CompletionItem, CompletionKind};

/// Identifiers introduced by the buffer text, in discovery order
pub fn known_identifiers(text: &str) -> Vec<CompletionItem> {
    let mut found = Vec::new();

    for line in text.split('\n') {
        if let Some(name) = assignment_target(line) {
            if !is_keyword(name) {
                push_unique(&mut found, CompletionItem::variable(name));
            }
        }
    }

    for name in definition_names(text) {
        push_unique(&mut found, CompletionItem::function(name));
    }

    found
}

/// `name =` at the start of a line, ignoring leading whitespace and
/// rejecting `==`
fn assignment_target(line: &str) -> Option<&str> {
    let trimmed = line.trim_start();
    let end = trimmed
        .char_indices()
        .find(|&(_, c)| !is_word_char(c))
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());
    if end == 0 || trimmed.starts_with(|c: char| c.is_ascii_digit()) {
        return None;
    }

    let rest = trimmed[end..].trim_start();
    if rest.starts_with('=') && !rest.starts_with("==") {
        Some(&trimmed[..end])
    } else {
        None
    }
}

/// Names following the `def` introducer, anywhere in the buffer
fn definition_names(text: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut words = WordRuns::new(text);
    while let Some(word) = words.next() {
        if word == "def" {
            if let Some(name) = words.next() {
                names.push(name);
            }
        }
    }
    names
}

fn push_unique(items: &mut Vec<CompletionItem>, item: CompletionItem) {
    if !items.iter().any(|existing| existing.label == item.label) {
        items.push(item);
    }
}

/// Iterator over contiguous word runs
struct WordRuns<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> WordRuns<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl<'a> Iterator for WordRuns<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<&'a str> {
        let rest = &self.text[self.pos..];
        let start = rest
            .char_indices()
            .find(|&(_, c)| is_word_char(c))
            .map(|(i, _)| i)?;
        let after = &rest[start..];
        let len = after
            .char_indices()
            .find(|&(_, c)| !is_word_char(c))
            .map(|(i, _)| i)
            .unwrap_or(after.len());

        self.pos += start + len;
        Some(&after[..len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(text: &str) -> Vec<String> {
        known_identifiers(text)
            .into_iter()
            .map(|i| i.label)
            .collect()
    }

    #[test]
    fn test_assignment_targets() {
        assert_eq!(labels("count = 1\n  total = 2"), vec!["count", "total"]);
    }

    #[test]
    fn test_keywords_are_not_identifiers() {
        assert!(labels("print = 3").is_empty());
    }

    #[test]
    fn test_equality_is_not_assignment() {
        assert!(labels("x == 1").is_empty());
    }

    #[test]
    fn test_definition_names() {
        let items = known_identifiers("def mix(a, b):\n    return a");
        assert_eq!(items[0].label, "mix");
        assert_eq!(items[0].kind, CompletionKind::Function);
    }

    #[test]
    fn test_duplicates_collapse() {
        assert_eq!(labels("x = 1\nx = 2"), vec!["x"]);
    }

    #[test]
    fn test_numeric_start_rejected() {
        assert!(labels("1x = 2").is_empty());
    }
}
