//! Syntax highlighting theme

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// Font style applied to a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Bold,
}

/// Style applied to a classified token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TokenStyle {
    /// Foreground color (None = theme default)
    pub foreground: Option<Color>,
    /// Font style
    pub font_style: FontStyle,
}

impl TokenStyle {
    pub fn color(value: u32) -> Self {
        Self {
            foreground: Some(Color::hex(value)),
            font_style: FontStyle::Normal,
        }
    }

    pub fn italic(mut self) -> Self {
        self.font_style = FontStyle::Italic;
        self
    }

    pub fn bold(mut self) -> Self {
        self.font_style = FontStyle::Bold;
        self
    }
}

/// Syntax highlighting palette
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyntaxTheme {
    /// Default foreground
    pub foreground: Color,
    /// Editor background
    pub background: Color,
    /// Comment spans
    pub comment: TokenStyle,
    /// String literal spans
    pub string: TokenStyle,
    /// Reserved-word spans
    pub keyword: TokenStyle,
}

impl SyntaxTheme {
    /// Style for a token scope name
    pub fn style_for_scope(&self, scope: &str) -> TokenStyle {
        match scope {
            "comment" => self.comment,
            "string" => self.string,
            "keyword" => self.keyword,
            _ => TokenStyle {
                foreground: Some(self.foreground),
                font_style: FontStyle::Normal,
            },
        }
    }

    /// Default light palette
    pub fn light() -> Self {
        Self {
            foreground: Color::hex(0x1E293B),
            background: Color::WHITE,
            comment: TokenStyle::color(0x16A34A).italic(),
            string: TokenStyle::color(0xD97706),
            keyword: TokenStyle::color(0x9333EA).bold(),
        }
    }

    /// Default dark palette
    pub fn dark() -> Self {
        Self {
            foreground: Color::hex(0xCBD5E1),
            background: Color::hex(0x1E1E2E),
            comment: TokenStyle::color(0x4ADE80).italic(),
            string: TokenStyle::color(0xFBBF24),
            keyword: TokenStyle::color(0xC084FC).bold(),
        }
    }
}
