//! Caret mirror

use crate::{SharedLayout, TextLayout};

/// Scroll offset of the host input
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffset {
    pub top: f32,
    pub left: f32,
}

/// Popup anchor in the input's visible coordinate space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupAnchor {
    pub top: f32,
    pub left: f32,
}

/// Computes where the autocomplete popup should anchor.
///
/// The popup lands one line below the marker position so it never covers
/// the caret's own line. While no layout is mounted, refreshes are
/// skipped and the previous anchor is retained; an unmounted mirror is
/// an expected startup state, not an error.
pub struct CaretMirror {
    layout: Option<SharedLayout>,
    scroll: ScrollOffset,
    anchor: Option<PopupAnchor>,
}

impl CaretMirror {
    /// Create an unmounted mirror
    pub fn new() -> Self {
        Self {
            layout: None,
            scroll: ScrollOffset::default(),
            anchor: None,
        }
    }

    /// Attach the host layout capability
    pub fn mount(&mut self, layout: SharedLayout) {
        self.layout = Some(layout);
    }

    pub fn is_mounted(&self) -> bool {
        self.layout.is_some()
    }

    /// Track the host input's scroll offset
    pub fn set_scroll(&mut self, scroll: ScrollOffset) {
        self.scroll = scroll;
    }

    /// Recompute the anchor for the caret at `cursor` in `text`.
    ///
    /// Returns the new anchor, or the retained previous one when the
    /// layout is not mounted.
    pub fn refresh(&mut self, text: &str, cursor: usize) -> Option<PopupAnchor> {
        let layout = match &self.layout {
            Some(layout) => layout,
            None => return self.anchor,
        };

        let before = &text[..clamp_boundary(text, cursor)];
        let marker = layout.marker_position(before);

        let anchor = PopupAnchor {
            top: marker.top - self.scroll.top + layout.line_height(),
            left: marker.left - self.scroll.left,
        };
        self.anchor = Some(anchor);
        self.anchor
    }

    /// Last computed anchor
    pub fn anchor(&self) -> Option<PopupAnchor> {
        self.anchor
    }
}

impl Default for CaretMirror {
    fn default() -> Self {
        Self::new()
    }
}

/// Snap an offset down to a char boundary
fn clamp_boundary(text: &str, offset: usize) -> usize {
    let mut offset = offset.min(text.len());
    while offset > 0 && !text.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::monospace::{FontMetrics, MonospaceLayout};
    use std::sync::Arc;

    fn mounted() -> CaretMirror {
        let mut mirror = CaretMirror::new();
        mirror.mount(Arc::new(MonospaceLayout::new(FontMetrics {
            char_advance: 10.0,
            line_height: 20.0,
            padding_top: 0.0,
            padding_left: 0.0,
            wrap_column: None,
        })));
        mirror
    }

    #[test]
    fn test_unmounted_refresh_is_skipped() {
        let mut mirror = CaretMirror::new();
        assert_eq!(mirror.refresh("abc", 3), None);
        assert_eq!(mirror.anchor(), None);
    }

    #[test]
    fn test_anchor_lands_one_line_below_caret() {
        let mut mirror = mounted();
        let anchor = mirror.refresh("abc", 3).unwrap();
        assert_eq!(anchor.top, 20.0);
        assert_eq!(anchor.left, 30.0);
    }

    #[test]
    fn test_scroll_offset_is_subtracted() {
        let mut mirror = mounted();
        mirror.set_scroll(ScrollOffset { top: 15.0, left: 5.0 });
        let anchor = mirror.refresh("ab\ncd", 5).unwrap();
        assert_eq!(anchor.top, 20.0 - 15.0 + 20.0);
        assert_eq!(anchor.left, 20.0 - 5.0);
    }

    #[test]
    fn test_previous_anchor_retained_after_unmount_skip() {
        let mut mirror = mounted();
        let first = mirror.refresh("abc", 1);
        // Once the layout goes away, refreshes skip and the anchor holds.
        mirror.layout = None;
        assert_eq!(mirror.refresh("zzzzzz", 6), first);
    }
}
