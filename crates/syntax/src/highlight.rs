//! Styled-span rendering

use theme::{SyntaxTheme, TokenStyle};

use crate::tokenize;

/// A span of text paired with its resolved style
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightedSpan {
    pub text: String,
    pub style: TokenStyle,
}

/// Tokenize and resolve styles against a theme.
///
/// Purely presentational; the spans concatenate back to the input text.
pub fn render_tokens(text: &str, theme: &SyntaxTheme) -> Vec<HighlightedSpan> {
    tokenize(text)
        .map(|token| HighlightedSpan {
            text: token.text.to_string(),
            style: theme.style_for_scope(token.kind.scope()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use theme::SyntaxTheme;

    #[test]
    fn test_render_covers_input() {
        let theme = SyntaxTheme::light();
        let text = "x = \"lab\"  # note";
        let joined: String = render_tokens(text, &theme)
            .iter()
            .map(|s| s.text.as_str())
            .collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_keyword_gets_keyword_style() {
        let theme = SyntaxTheme::dark();
        let spans = render_tokens("def f", &theme);
        assert_eq!(spans[0].style, theme.keyword);
    }
}
