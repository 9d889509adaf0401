//! Completion item

use serde::{Deserialize, Serialize};

/// Completion item kind, used for presentational badging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CompletionKind {
    Keyword,
    Variable,
    Function,
}

impl CompletionKind {
    pub fn badge(self) -> &'static str {
        match self {
            CompletionKind::Keyword => "🔑",
            CompletionKind::Variable => "📦",
            CompletionKind::Function => "💥",
        }
    }
}

/// A candidate offered by the popup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionItem {
    /// Display label; also the text inserted on confirm
    pub label: String,
    /// Kind
    pub kind: CompletionKind,
}

impl CompletionItem {
    pub fn new(label: impl Into<String>, kind: CompletionKind) -> Self {
        Self {
            label: label.into(),
            kind,
        }
    }

    pub fn keyword(label: impl Into<String>) -> Self {
        Self::new(label, CompletionKind::Keyword)
    }

    pub fn variable(label: impl Into<String>) -> Self {
        Self::new(label, CompletionKind::Variable)
    }

    pub fn function(label: impl Into<String>) -> Self {
        Self::new(label, CompletionKind::Function)
    }
}
