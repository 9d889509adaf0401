//! # Beaker Layout
//!
//! Caret-position mirroring for anchoring the autocomplete popup.
//!
//! Pixel measurement is inherently a property of the rendering surface,
//! so it lives behind the [`TextLayout`] capability: the host mirrors the
//! input's font and box metrics and reports where a marker appended after
//! the text preceding the caret would land. [`MonospaceLayout`] is the
//! built-in reference implementation for monospace hosts and tests.

pub mod mirror;
pub mod monospace;

use std::sync::Arc;

pub use mirror::{CaretMirror, PopupAnchor, ScrollOffset};
pub use monospace::{FontMetrics, MonospaceLayout};

/// A pixel position relative to the unscrolled content origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutPoint {
    pub top: f32,
    pub left: f32,
}

/// Host capability: reproduce the input's text layout.
///
/// Implementations must use the same font metrics, padding, and wrapping
/// as the element the text is rendered in; the caret mirror only composes
/// the reported marker position with scroll state and the popup bias.
pub trait TextLayout: Send + Sync {
    /// Position of a zero-width marker appended after `text_before_caret`
    fn marker_position(&self, text_before_caret: &str) -> LayoutPoint;

    /// Height of one rendered line, used as the popup's vertical bias
    fn line_height(&self) -> f32;
}

/// Shared layout handle
pub type SharedLayout = Arc<dyn TextLayout>;
