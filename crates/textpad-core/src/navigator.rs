/// Pixel-to-position resolution and directional cursor movement.
///
/// All functions here are pure reads of the buffer and the last layout; they
/// return a new [`Caret`] and leave storing it to the caller.
use crate::buffer::TextBuffer;
use crate::layout::LayoutState;

/// A logical buffer position plus the pixel spot where it is drawn.
///
/// `index` is in `[0, len]`; `len` means after the last glyph. The same index
/// can be drawn at the end of one visual line or the start of the next, which
/// is why the coordinates are carried alongside it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Caret {
    pub index: usize,
    pub x: f32,
    pub y: f32,
    /// 1-based visual line.
    pub line: usize,
}

impl Caret {
    /// Default placement of `index`: the left edge of the glyph at `index`, or
    /// the spot after the last glyph when `index == len`.
    ///
    /// # Panics
    ///
    /// Panics if `index > buffer.len()`.
    pub fn at(buffer: &TextBuffer, layout: &LayoutState, index: usize) -> Self {
        assert!(
            index <= buffer.len(),
            "caret index {} out of bounds (buffer has {} glyphs)",
            index,
            buffer.len()
        );
        if let Some(g) = buffer.get(index) {
            return Self {
                index,
                x: g.x,
                y: g.y,
                line: g.line,
            };
        }
        match buffer.glyphs().last() {
            None => Self {
                index: 0,
                x: layout.margin_width,
                y: layout.line_top(1),
                line: 1,
            },
            Some(last) if last.is_newline() => Self {
                index,
                x: layout.margin_width,
                y: last.y + layout.font_size,
                line: last.line + 1,
            },
            Some(last) => Self {
                index,
                x: last.right(),
                y: last.y,
                line: last.line,
            },
        }
    }

    /// Placement of `index` at the right edge of the glyph before it, so a
    /// position at a wrap point stays on the earlier line. Falls back to
    /// [`Caret::at`] at the buffer start and after a newline.
    ///
    /// # Panics
    ///
    /// Panics if `index > buffer.len()`.
    pub fn after(buffer: &TextBuffer, layout: &LayoutState, index: usize) -> Self {
        match index.checked_sub(1).and_then(|prev| buffer.get(prev)) {
            Some(prev) if !prev.is_newline() => Self {
                index,
                x: prev.right(),
                y: prev.y,
                line: prev.line,
            },
            _ => Self::at(buffer, layout, index),
        }
    }
}

/// Maps a pixel coordinate to the nearest logical position.
///
/// Points above the first line resolve to index 0, points below the last line
/// to the end of the buffer.
pub fn find_nearest(buffer: &TextBuffer, layout: &LayoutState, x: f32, y: f32) -> Caret {
    let line = layout.line_at_y(y);
    if line == 0 {
        return Caret::at(buffer, layout, 0);
    }
    if line > layout.total_lines() {
        return Caret::at(buffer, layout, buffer.len());
    }
    nearest_on_line(buffer, layout, x, line)
}

/// Resolves `x` on a known visual line.
///
/// A glyph containing `x` resolves to its own index when `x` is left of its
/// midpoint and to the index after it otherwise. Clicks past the end of the
/// line land after the last glyph (before a terminating newline); clicks left
/// of the first glyph land at the line's margin.
///
/// # Panics
///
/// Panics if `line` is not in `1..=layout.total_lines()`.
pub fn nearest_on_line(buffer: &TextBuffer, layout: &LayoutState, x: f32, line: usize) -> Caret {
    assert!(
        (1..=layout.total_lines()).contains(&line),
        "line {} out of range (layout has {} lines)",
        line,
        layout.total_lines()
    );
    let range = layout.line_range(line, buffer.len());
    let top = layout.line_top(line);
    let glyphs = &buffer.glyphs()[range.clone()];

    for g in glyphs.iter().take_while(|g| !g.is_newline()) {
        if g.x <= x && x <= g.right() {
            let midpoint = g.x + g.width / 2.0;
            return if x >= midpoint {
                Caret {
                    index: g.index + 1,
                    x: g.right(),
                    y: g.y,
                    line,
                }
            } else {
                Caret {
                    index: g.index,
                    x: g.x,
                    y: g.y,
                    line,
                }
            };
        }
    }

    let line_margin = Caret {
        index: range.start,
        x: layout.margin_width,
        y: top,
        line,
    };
    let Some(first) = glyphs.first().filter(|g| !g.is_newline()) else {
        // Empty line
        return line_margin;
    };
    if x < first.x {
        return line_margin;
    }
    if let Some(terminator) = glyphs.last().filter(|g| g.is_newline()) {
        return Caret {
            index: terminator.index,
            x: terminator.x,
            y: top,
            line,
        };
    }
    match glyphs.last() {
        Some(last) => Caret {
            index: last.index + 1,
            x: last.right(),
            y: top,
            line,
        },
        None => line_margin,
    }
}

/// One position back. Crossing a newline lands after the last non-space glyph
/// of the previous line, or at its margin when the line holds only spaces.
pub fn move_left(buffer: &TextBuffer, layout: &LayoutState, caret: Caret) -> Caret {
    if caret.index == 0 {
        return caret;
    }
    let prev = caret.index - 1;
    if !buffer.get(prev).is_some_and(|g| g.is_newline()) {
        return Caret::at(buffer, layout, prev);
    }
    let mut end = prev;
    while end > 0 && buffer.get(end - 1).is_some_and(|g| g.is_space()) {
        end -= 1;
    }
    Caret::after(buffer, layout, end)
}

/// One position forward. Crossing a newline moves to the margin of the next line.
pub fn move_right(buffer: &TextBuffer, layout: &LayoutState, caret: Caret) -> Caret {
    let Some(g) = buffer.get(caret.index) else {
        return caret;
    };
    if g.is_newline() {
        return Caret::at(buffer, layout, caret.index + 1);
    }
    Caret {
        index: caret.index + 1,
        x: g.right(),
        y: g.y,
        line: g.line,
    }
}

/// Nearest position one line up; from the first line, the buffer start.
pub fn move_up(buffer: &TextBuffer, layout: &LayoutState, caret: Caret) -> Caret {
    if caret.line <= 1 {
        return Caret::at(buffer, layout, 0);
    }
    let line = (caret.line - 1).min(layout.total_lines());
    nearest_on_line(buffer, layout, caret.x, line)
}

/// Nearest position one line down; from the last line, the buffer end.
pub fn move_down(buffer: &TextBuffer, layout: &LayoutState, caret: Caret) -> Caret {
    if caret.line >= layout.total_lines() {
        return Caret::at(buffer, layout, buffer.len());
    }
    nearest_on_line(buffer, layout, caret.x, caret.line + 1)
}
