//! # Beaker Theme
//!
//! Light/dark appearance for the tutor UI and the editor's token styling.

pub mod color;
pub mod syntax;

use serde::{Deserialize, Serialize};

pub use color::Color;
pub use syntax::{FontStyle, SyntaxTheme, TokenStyle};

/// Theme kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeKind {
    #[default]
    Light,
    Dark,
}

impl ThemeKind {
    /// The other kind
    pub fn toggled(self) -> Self {
        match self {
            ThemeKind::Light => ThemeKind::Dark,
            ThemeKind::Dark => ThemeKind::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, ThemeKind::Dark)
    }
}

/// Complete theme
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Theme {
    /// Theme name
    pub name: String,
    /// Theme kind
    pub kind: ThemeKind,
    /// Syntax highlighting styles
    pub syntax: SyntaxTheme,
}

impl Theme {
    /// Create a theme for a kind with its default palette
    pub fn for_kind(kind: ThemeKind) -> Self {
        match kind {
            ThemeKind::Light => Self::light(),
            ThemeKind::Dark => Self::dark(),
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            name: "Beaker Light".into(),
            kind: ThemeKind::Light,
            syntax: SyntaxTheme::light(),
        }
    }

    /// Dark theme
    pub fn dark() -> Self {
        Self {
            name: "Beaker Dark".into(),
            kind: ThemeKind::Dark,
            syntax: SyntaxTheme::dark(),
        }
    }

    /// Theme for the opposite kind
    pub fn toggled(&self) -> Self {
        Self::for_kind(self.kind.toggled())
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::light()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let theme = Theme::light();
        assert_eq!(theme.toggled().kind, ThemeKind::Dark);
        assert_eq!(theme.toggled().toggled().kind, ThemeKind::Light);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&ThemeKind::Dark).unwrap();
        assert_eq!(json, "\"dark\"");
    }
}
