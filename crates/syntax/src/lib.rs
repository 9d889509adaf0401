//! # Beaker Syntax
//!
//! Scanner-based tokenization for presentational highlighting.
//!
//! The scanner walks the buffer once and classifies spans in priority
//! order: comment, string literal, word run, punctuation run, whitespace
//! run. Evaluating the alternatives at a single scan position is what
//! keeps a `#` inside an open string literal from opening a comment:
//! the string alternative has already consumed it.

pub mod highlight;
pub mod language;

use serde::{Deserialize, Serialize};

pub use highlight::{HighlightedSpan, render_tokens};
pub use language::{KEYWORDS, is_keyword, is_word_char};

/// Token classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    Comment,
    Str,
    Keyword,
    Plain,
}

impl TokenKind {
    /// Scope name used for theme lookup
    pub fn scope(self) -> &'static str {
        match self {
            TokenKind::Comment => "comment",
            TokenKind::Str => "string",
            TokenKind::Keyword => "keyword",
            TokenKind::Plain => "plain",
        }
    }
}

/// A classified span of the source text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
}

/// Tokenize the full buffer text.
///
/// The returned iterator is lazy, finite, and restartable; the spans it
/// yields cover the input exactly, in document order, with no gaps or
/// overlaps. Concatenating their text reconstructs the input.
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { text, pos: 0 }
}

/// Iterator over classified spans
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        let rest = &self.text[self.pos..];
        let first = rest.chars().next()?;

        let (len, kind) = match first {
            '#' => (scan_comment(rest), TokenKind::Comment),
            '"' | '\'' => (scan_string(rest, first), TokenKind::Str),
            c if is_word_char(c) => {
                let len = scan_while(rest, is_word_char);
                let kind = if is_keyword(&rest[..len]) {
                    TokenKind::Keyword
                } else {
                    TokenKind::Plain
                };
                (len, kind)
            }
            c if c.is_whitespace() => {
                (scan_while(rest, char::is_whitespace), TokenKind::Plain)
            }
            _ => (scan_while(rest, is_punct), TokenKind::Plain),
        };

        let token = Token {
            kind,
            text: &rest[..len],
        };
        self.pos += len;
        Some(token)
    }
}

/// Consume the comment marker through end of line (newline excluded)
fn scan_comment(rest: &str) -> usize {
    rest.find('\n').unwrap_or(rest.len())
}

/// Consume a quoted literal with escape-aware termination.
///
/// An unterminated literal runs to end of input; a backslash escapes the
/// character after it, including the closing quote.
fn scan_string(rest: &str, quote: char) -> usize {
    let mut chars = rest.char_indices().skip(1);
    while let Some((i, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            c if c == quote => return i + c.len_utf8(),
            _ => {}
        }
    }
    rest.len()
}

/// Length of the leading run satisfying the predicate
fn scan_while(rest: &str, pred: impl Fn(char) -> bool) -> usize {
    rest.char_indices()
        .find(|&(_, c)| !pred(c))
        .map(|(i, _)| i)
        .unwrap_or(rest.len())
}

/// Punctuation run constituent: not a word char, not whitespace, and not a
/// character that starts a higher-priority alternative.
fn is_punct(c: char) -> bool {
    !is_word_char(c) && !c.is_whitespace() && c != '"' && c != '\'' && c != '#'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<(TokenKind, &str)> {
        tokenize(text).map(|t| (t.kind, t.text)).collect()
    }

    fn reassemble(text: &str) -> String {
        tokenize(text).map(|t| t.text).collect()
    }

    #[test]
    fn test_round_trip_is_lossless() {
        let inputs = [
            "",
            "# just a comment",
            "x = \"a b\"  # trailing\nprint(x)",
            "def f(a, b):\n    return a + b\n",
            "   \n\t\n",
            "s = 'it\\'s'",
        ];
        for input in inputs {
            assert_eq!(reassemble(input), input, "lossy for {input:?}");
        }
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        assert_eq!(tokenize("").count(), 0);
    }

    #[test]
    fn test_comment_only_buffer() {
        let tokens = kinds("# hello");
        assert_eq!(tokens, vec![(TokenKind::Comment, "# hello")]);
    }

    #[test]
    fn test_hash_inside_string_is_not_a_comment() {
        let comment_count = tokenize("x = \"a#b\"")
            .filter(|t| t.kind == TokenKind::Comment)
            .count();
        assert_eq!(comment_count, 0);
    }

    #[test]
    fn test_comment_stops_at_newline() {
        let tokens = kinds("# note\nx");
        assert_eq!(tokens[0], (TokenKind::Comment, "# note"));
        assert_eq!(tokens[1], (TokenKind::Plain, "\n"));
        assert_eq!(tokens[2], (TokenKind::Plain, "x"));
    }

    #[test]
    fn test_keyword_vs_identifier() {
        let tokens = kinds("for item in items");
        assert_eq!(tokens[0], (TokenKind::Keyword, "for"));
        assert_eq!(tokens[2], (TokenKind::Plain, "item"));
        assert_eq!(tokens[4], (TokenKind::Keyword, "in"));
    }

    #[test]
    fn test_escaped_quote_does_not_terminate() {
        let tokens = kinds(r#""a\"b" rest"#);
        assert_eq!(tokens[0], (TokenKind::Str, r#""a\"b""#));
    }

    #[test]
    fn test_unterminated_string_runs_to_end() {
        let tokens = kinds("x = \"open");
        assert_eq!(tokens.last().unwrap(), &(TokenKind::Str, "\"open"));
    }

    #[test]
    fn test_single_quoted_string() {
        let tokens = kinds("name = 'moli'");
        assert!(tokens.contains(&(TokenKind::Str, "'moli'")));
    }

    #[test]
    fn test_comment_after_punctuation() {
        let tokens = kinds("f()# note");
        assert_eq!(tokens.last().unwrap(), &(TokenKind::Comment, "# note"));
    }

    #[test]
    fn test_restartable() {
        let iter = tokenize("a = 1");
        assert_eq!(iter.clone().count(), iter.count());
    }
}
