//! Drag selection: anchor/endpoint tracking, highlight rectangles, selected text.

use std::ops::Range;

use crate::buffer::TextBuffer;
use crate::layout::LayoutState;
use crate::navigator::Caret;

/// One highlighted area, in the same pixel space as glyph coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HighlightRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A released, non-empty selection: `start < end`, both in `[0, len]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
    /// Buffer contents over `[start, end)` at release time.
    pub text: String,
}

impl Selection {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Number of selected glyphs.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Tracks a mouse drag and the selection it leaves behind.
#[derive(Debug, Default)]
pub struct SelectionManager {
    anchor: Option<Caret>,
    head: Option<Caret>,
    dragging: bool,
    selection: Option<Selection>,
    highlights: Vec<HighlightRect>,
}

impl SelectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new drag at `caret`, dropping any previous selection.
    pub fn press(&mut self, caret: Caret) {
        self.clear();
        self.anchor = Some(caret);
        self.head = Some(caret);
        self.dragging = true;
    }

    /// Moves the live endpoint and recomputes every highlight rectangle.
    /// Ignored when no drag is in progress.
    pub fn drag(&mut self, buffer: &TextBuffer, layout: &LayoutState, caret: Caret) {
        let Some(anchor) = self.anchor.filter(|_| self.dragging) else {
            return;
        };
        self.head = Some(caret);
        self.highlights = compute_highlights(buffer, layout, anchor, caret);
    }

    /// Ends the drag at `caret`. An empty range clears the selection.
    pub fn release(
        &mut self,
        buffer: &TextBuffer,
        layout: &LayoutState,
        caret: Caret,
    ) -> Option<&Selection> {
        let Some(anchor) = self.anchor.filter(|_| self.dragging) else {
            return self.selection.as_ref();
        };
        self.dragging = false;

        let start = anchor.index.min(caret.index);
        let end = anchor.index.max(caret.index);
        if start == end {
            self.clear();
            return None;
        }

        self.head = Some(caret);
        self.highlights = compute_highlights(buffer, layout, anchor, caret);
        let text = buffer.slice(start, end);
        tracing::debug!(start, end, "selection made");
        self.selection = Some(Selection { start, end, text });
        self.selection.as_ref()
    }

    pub fn clear(&mut self) {
        self.anchor = None;
        self.head = None;
        self.dragging = false;
        self.selection = None;
        self.highlights.clear();
    }

    /// Re-places both endpoints from their indices and rebuilds the highlights
    /// after a reflow moved glyphs. A selection that no longer fits the buffer
    /// is dropped.
    pub fn refresh(&mut self, buffer: &TextBuffer, layout: &LayoutState) {
        let (Some(anchor), Some(head)) = (self.anchor, self.head) else {
            return;
        };
        if anchor.index.max(head.index) > buffer.len() {
            self.clear();
            return;
        }
        let (anchor, head) = if anchor.index <= head.index {
            (
                Caret::at(buffer, layout, anchor.index),
                Caret::after(buffer, layout, head.index),
            )
        } else {
            (
                Caret::after(buffer, layout, anchor.index),
                Caret::at(buffer, layout, head.index),
            )
        };
        self.anchor = Some(anchor);
        self.head = Some(head);
        if !self.highlights.is_empty() {
            self.highlights = compute_highlights(buffer, layout, anchor, head);
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn highlights(&self) -> &[HighlightRect] {
        &self.highlights
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn has_selection(&self) -> bool {
        self.selection.is_some()
    }
}

/// Rectangles covering everything between two carets, one per visual row.
///
/// The first row runs from the earlier caret to the row end, middle rows span
/// margin to row end, and the last row runs from the margin to the later caret.
/// A row ending in an explicit newline is widened by one space so the selected
/// line break is visible; a wrapped row already ends in its hanging space.
pub fn compute_highlights(
    buffer: &TextBuffer,
    layout: &LayoutState,
    a: Caret,
    b: Caret,
) -> Vec<HighlightRect> {
    let (start, end) = if (a.index, a.line) <= (b.index, b.line) {
        (a, b)
    } else {
        (b, a)
    };
    let height = layout.font_size;

    if start.line >= end.line {
        let left = start.x.min(end.x);
        return vec![HighlightRect {
            x: left,
            y: start.y,
            width: start.x.max(end.x) - left,
            height,
        }];
    }

    let row_end = |line: usize| {
        let pad = if layout.line_terminator(buffer, line).is_some() {
            layout.space_width
        } else {
            0.0
        };
        layout.content_right(buffer, line) + pad
    };

    let mut rects = Vec::with_capacity(end.line - start.line + 1);
    rects.push(HighlightRect {
        x: start.x,
        y: start.y,
        width: (row_end(start.line) - start.x).max(0.0),
        height,
    });
    for line in start.line + 1..end.line {
        rects.push(HighlightRect {
            x: layout.margin_width,
            y: layout.line_top(line),
            width: row_end(line) - layout.margin_width,
            height,
        });
    }
    rects.push(HighlightRect {
        x: layout.margin_width,
        y: end.y,
        width: (end.x - layout.margin_width).max(0.0),
        height,
    });
    rects
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FixedWidthMetrics;
    use crate::layout::{reflow, LayoutConfig};
    use crate::navigator::find_nearest;

    fn laid_out(text: &str) -> (TextBuffer, LayoutState) {
        let config = LayoutConfig {
            viewport_width: 50.0,
            ..LayoutConfig::default()
        };
        let mut buf = TextBuffer::from(text);
        let state = reflow(&mut buf, &config, &FixedWidthMetrics::new(8.0, 12.0));
        (buf, state)
    }

    fn select(
        buf: &TextBuffer,
        state: &LayoutState,
        from: (f32, f32),
        to: (f32, f32),
    ) -> SelectionManager {
        let mut sel = SelectionManager::new();
        sel.press(find_nearest(buf, state, from.0, from.1));
        sel.drag(buf, state, find_nearest(buf, state, to.0, to.1));
        sel.release(buf, state, find_nearest(buf, state, to.0, to.1));
        sel
    }

    // ── Highlights ───────────────────────────────────────────────────

    #[test]
    fn test_single_line_drag_one_rect() {
        let (buf, state) = laid_out("abcd");
        let sel = select(&buf, &state, (14.0, 3.0), (30.0, 3.0));
        let rects = sel.highlights();
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].x, 13.0);
        assert_eq!(rects[0].width, 16.0);
        assert_eq!(rects[0].height, 12.0);
        assert_eq!(sel.selection().unwrap().text, "bc");
    }

    #[test]
    fn test_backwards_drag_orders_endpoints() {
        let (buf, state) = laid_out("abcd");
        let sel = select(&buf, &state, (30.0, 3.0), (14.0, 3.0));
        let s = sel.selection().unwrap();
        assert_eq!((s.start, s.end), (1, 3));
        assert_eq!(sel.highlights()[0].x, 13.0);
    }

    #[test]
    fn test_three_row_wrap_selection() {
        // "abcd " / "efgh " / "ijkl"
        let (buf, state) = laid_out("abcd efgh ijkl");
        assert_eq!(state.total_lines(), 3);
        let sel = select(&buf, &state, (13.0, 3.0), (13.0, 27.0));
        let rects = sel.highlights();
        assert_eq!(rects.len(), 3);
        assert_eq!((rects[0].x, rects[0].width), (13.0, 32.0));
        assert_eq!((rects[1].x, rects[1].width), (5.0, 40.0));
        assert_eq!((rects[2].x, rects[2].width), (5.0, 8.0));
        assert_eq!(rects[1].y, 12.0);
        assert_eq!(rects[2].y, 24.0);
        let s = sel.selection().unwrap();
        assert_eq!(s.text, "bcd efgh i");
        assert_eq!(s.text, buf.slice(s.start, s.end));
    }

    #[test]
    fn test_explicit_newline_row_is_padded() {
        let (buf, state) = laid_out("ab\ncd");
        let sel = select(&buf, &state, (5.0, 3.0), (21.0, 15.0));
        let rects = sel.highlights();
        assert_eq!(rects.len(), 2);
        // content ends at 21, plus one space
        assert_eq!(rects[0].width, 24.0);
        assert_eq!(rects[1].width, 16.0);
        assert_eq!(sel.selection().unwrap().text, "ab\ncd");
    }

    #[test]
    fn test_rect_count_matches_rows_spanned() {
        let (buf, state) = laid_out("a\n\n\nb");
        let sel = select(&buf, &state, (5.0, 1.0), (13.0, 40.0));
        assert_eq!(sel.highlights().len(), 4);
        // empty middle rows still show the selected line break
        assert_eq!(sel.highlights()[1].width, 8.0);
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    #[test]
    fn test_click_without_movement_clears() {
        let (buf, state) = laid_out("abcd");
        let sel = select(&buf, &state, (14.0, 3.0), (14.0, 3.0));
        assert!(sel.selection().is_none());
        assert!(sel.highlights().is_empty());
        assert!(!sel.is_dragging());
    }

    #[test]
    fn test_drag_without_press_is_ignored() {
        let (buf, state) = laid_out("abcd");
        let mut sel = SelectionManager::new();
        sel.drag(&buf, &state, find_nearest(&buf, &state, 30.0, 3.0));
        assert!(sel.highlights().is_empty());
        assert!(sel.release(&buf, &state, find_nearest(&buf, &state, 30.0, 3.0)).is_none());
    }

    #[test]
    fn test_drag_updates_highlights_live() {
        let (buf, state) = laid_out("abcd");
        let mut sel = SelectionManager::new();
        sel.press(find_nearest(&buf, &state, 5.0, 3.0));
        assert!(sel.is_dragging());
        sel.drag(&buf, &state, find_nearest(&buf, &state, 14.0, 3.0));
        assert_eq!(sel.highlights()[0].width, 8.0);
        sel.drag(&buf, &state, find_nearest(&buf, &state, 30.0, 3.0));
        assert_eq!(sel.highlights()[0].width, 24.0);
        assert!(sel.selection().is_none());
    }

    #[test]
    fn test_press_drops_previous_selection() {
        let (buf, state) = laid_out("abcd");
        let mut sel = select(&buf, &state, (5.0, 3.0), (30.0, 3.0));
        assert!(sel.has_selection());
        sel.press(find_nearest(&buf, &state, 5.0, 3.0));
        assert!(!sel.has_selection());
        assert!(sel.highlights().is_empty());
    }

    #[test]
    fn test_refresh_after_wider_reflow() {
        let (mut buf, state) = laid_out("abcd efgh ijkl");
        let mut sel = select(&buf, &state, (13.0, 3.0), (13.0, 27.0));
        assert_eq!(sel.highlights().len(), 3);

        let wide = LayoutConfig {
            viewport_width: 200.0,
            ..LayoutConfig::default()
        };
        let state = reflow(&mut buf, &wide, &FixedWidthMetrics::new(8.0, 12.0));
        sel.refresh(&buf, &state);
        let rects = sel.highlights();
        assert_eq!(rects.len(), 1);
        // indices 1..11 on one row: 13 .. 5 + 11 * 8
        assert_eq!(rects[0].x, 13.0);
        assert_eq!(rects[0].width, 80.0);
        assert_eq!(sel.selection().unwrap().text, "bcd efgh i");
    }

    #[test]
    fn test_selection_bounds_hold_for_any_drag() {
        let (buf, state) = laid_out("ab cd\nefgh ijklmnop q");
        let points = [-5.0, 0.0, 7.0, 19.0, 33.0, 48.0, 90.0];
        for &x0 in &points {
            for &y0 in &points {
                for &x1 in &points {
                    for &y1 in &points {
                        let sel = select(&buf, &state, (x0, y0), (x1, y1));
                        if let Some(s) = sel.selection() {
                            assert!(s.start < s.end && s.end <= buf.len());
                            assert_eq!(s.text, buf.slice(s.start, s.end));
                        }
                    }
                }
            }
        }
    }
}
