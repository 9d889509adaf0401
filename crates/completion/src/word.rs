//! Partial-word isolation at the cursor

use syntax::is_word_char;

/// Start offset of the word the cursor sits at the end of.
///
/// Scans backward from `cursor` while characters are word-constituent;
/// returns `cursor` itself when the character before it is not.
pub fn partial_word_start(text: &str, cursor: usize) -> usize {
    let cursor = clamp_boundary(text, cursor);
    let mut start = cursor;
    for (i, c) in text[..cursor].char_indices().rev() {
        if !is_word_char(c) {
            break;
        }
        start = i;
    }
    start
}

/// The partially typed word ending at the cursor
pub fn partial_word(text: &str, cursor: usize) -> &str {
    let cursor = clamp_boundary(text, cursor);
    &text[partial_word_start(text, cursor)..cursor]
}

fn clamp_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}
