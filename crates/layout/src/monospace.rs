//! Monospace reference layout

use crate::{LayoutPoint, TextLayout};

/// Font and box metrics mirrored from the host input
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontMetrics {
    /// Horizontal advance of one character cell
    pub char_advance: f32,
    /// Height of one line
    pub line_height: f32,
    /// Top content padding
    pub padding_top: f32,
    /// Left content padding
    pub padding_left: f32,
    /// Wrap after this many columns; None disables wrapping
    pub wrap_column: Option<usize>,
}

impl Default for FontMetrics {
    fn default() -> Self {
        Self {
            char_advance: 8.0,
            line_height: 28.0,
            padding_top: 16.0,
            padding_left: 48.0,
            wrap_column: None,
        }
    }
}

/// Reference [`TextLayout`] for monospace rendering
#[derive(Debug, Clone)]
pub struct MonospaceLayout {
    metrics: FontMetrics,
}

impl MonospaceLayout {
    pub fn new(metrics: FontMetrics) -> Self {
        Self { metrics }
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// (row, column) of the marker after `text`, honoring newlines and
    /// the wrap column
    fn grid_position(&self, text: &str) -> (usize, usize) {
        let mut row = 0;
        let mut col = 0;
        for c in text.chars() {
            if c == '\n' {
                row += 1;
                col = 0;
                continue;
            }
            col += 1;
            if let Some(wrap) = self.metrics.wrap_column {
                if col >= wrap {
                    row += 1;
                    col = 0;
                }
            }
        }
        (row, col)
    }
}

impl Default for MonospaceLayout {
    fn default() -> Self {
        Self::new(FontMetrics::default())
    }
}

impl TextLayout for MonospaceLayout {
    fn marker_position(&self, text_before_caret: &str) -> LayoutPoint {
        let (row, col) = self.grid_position(text_before_caret);
        LayoutPoint {
            top: self.metrics.padding_top + row as f32 * self.metrics.line_height,
            left: self.metrics.padding_left + col as f32 * self.metrics.char_advance,
        }
    }

    fn line_height(&self) -> f32 {
        self.metrics.line_height
    }
}
