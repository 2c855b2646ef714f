//! Reflow: line assignment, word-wrap, and pixel coordinates for every glyph.
//!
//! Layout is always recomputed from scratch in one left-to-right pass over the
//! buffer. The pass is triggered by the document after every edit, viewport
//! resize, or font-size change.

use std::ops::Range;

use crate::buffer::{Glyph, TextBuffer};
use crate::fonts::FontMetricsProvider;

/// Inputs to a reflow. Resizing or zooming produces a new value.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Horizontal padding on both sides of the text area.
    pub margin_width: f32,
    /// Vertical offset of the first line.
    pub margin_height: f32,
    pub font_name: String,
    /// Font size in pixels; also the line height.
    pub font_size: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            margin_width: 5.0,
            margin_height: 0.0,
            font_name: "Verdana".to_string(),
            font_size: 12.0,
            viewport_width: 500.0,
            viewport_height: 500.0,
        }
    }
}

impl LayoutConfig {
    /// Width available to one line of text.
    pub fn usable_width(&self) -> f32 {
        self.viewport_width - 2.0 * self.margin_width
    }

    /// A glyph whose right edge passes this x overflows its line.
    pub fn right_limit(&self) -> f32 {
        self.viewport_width - self.margin_width
    }

    /// Same config with a different viewport size.
    pub fn with_viewport(&self, width: f32, height: f32) -> Self {
        Self {
            viewport_width: width,
            viewport_height: height,
            ..self.clone()
        }
    }

    /// Same config with a different font size.
    pub fn with_font_size(&self, font_size: f32) -> Self {
        Self {
            font_size,
            ..self.clone()
        }
    }
}

/// Result of a reflow: geometry constants plus the line registry.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutState {
    pub margin_width: f32,
    pub margin_height: f32,
    pub font_size: f32,
    pub viewport_width: f32,
    /// Advance of a space at the current font, used for highlight padding.
    pub space_width: f32,
    /// `line_starts[l - 1]` is the index of the first position on line `l`.
    /// A trailing empty line (after a final newline) starts at `len()`.
    line_starts: Vec<usize>,
}

impl LayoutState {
    /// Number of visual lines, at least 1.
    pub fn total_lines(&self) -> usize {
        self.line_starts.len()
    }

    /// Index of the first position on `line` (1-based).
    pub fn line_start(&self, line: usize) -> Option<usize> {
        line.checked_sub(1)
            .and_then(|idx| self.line_starts.get(idx))
            .copied()
    }

    /// Glyph indices on `line`, including a terminating newline glyph.
    /// Empty for lines outside `1..=total_lines()`.
    pub fn line_range(&self, line: usize, len: usize) -> Range<usize> {
        let Some(start) = self.line_start(line) else {
            return len..len;
        };
        let end = self.line_starts.get(line).copied().unwrap_or(len);
        start..end
    }

    /// Top y coordinate of `line`.
    pub fn line_top(&self, line: usize) -> f32 {
        self.margin_height + line.saturating_sub(1) as f32 * self.font_size
    }

    /// The 1-based line a y coordinate falls on, before clamping.
    /// Returns 0 for points above the first line.
    pub fn line_at_y(&self, y: f32) -> usize {
        let rel = (y - self.margin_height) / self.font_size;
        if rel.is_nan() || rel < 0.0 {
            0
        } else {
            rel.floor() as usize + 1
        }
    }

    /// Right edge of the visible content on `line` (the margin for an empty line).
    pub fn content_right(&self, buffer: &TextBuffer, line: usize) -> f32 {
        buffer.glyphs()[self.line_range(line, buffer.len())]
            .iter()
            .rev()
            .find(|g| !g.is_newline())
            .map_or(self.margin_width, Glyph::right)
    }

    /// The newline glyph that terminates `line`, if the line ends explicitly.
    pub fn line_terminator<'a>(&self, buffer: &'a TextBuffer, line: usize) -> Option<&'a Glyph> {
        let range = self.line_range(line, buffer.len());
        if range.is_empty() {
            return None;
        }
        buffer.get(range.end - 1).filter(|g| g.is_newline())
    }
}

/// The word-wrap unit around `index`: the maximal run of glyphs containing
/// `index` that holds no space or newline. Empty when `index` is itself a break.
pub fn word_at(buffer: &TextBuffer, index: usize) -> Range<usize> {
    word_span(buffer.glyphs(), index)
}

fn word_span(glyphs: &[Glyph], index: usize) -> Range<usize> {
    if glyphs.get(index).map_or(true, Glyph::is_word_break) {
        return index..index;
    }
    let start = glyphs[..index]
        .iter()
        .rposition(Glyph::is_word_break)
        .map_or(0, |p| p + 1);
    let end = glyphs[index..]
        .iter()
        .position(Glyph::is_word_break)
        .map_or(glyphs.len(), |p| index + p);
    start..end
}

/// Running pen position during a reflow.
struct Pen {
    x: f32,
    y: f32,
    line: usize,
}

impl Pen {
    fn place(&mut self, glyph: &mut Glyph) {
        glyph.x = self.x;
        glyph.y = self.y;
        glyph.line = self.line;
        self.x += glyph.width;
    }

    fn new_line(&mut self, config: &LayoutConfig) {
        self.x = config.margin_width;
        self.y += config.font_size;
        self.line += 1;
    }
}

/// Measures every glyph and assigns `line`, `x`, `y` in one pass.
///
/// A glyph that would overflow the line triggers word-wrap of the word that
/// contains it: the whole word moves to the next line when it fits the usable
/// width, otherwise it stays put and overflows. Spaces never wrap; a space that
/// overflows hangs at the end of its line. A newline glyph sits at the end of
/// the line it terminates and starts the next line.
pub fn reflow(
    buffer: &mut TextBuffer,
    config: &LayoutConfig,
    metrics: &dyn FontMetricsProvider,
) -> LayoutState {
    let right_limit = config.right_limit();
    let usable = config.usable_width();

    let glyphs = buffer.glyphs_mut();
    for glyph in glyphs.iter_mut() {
        glyph.width = if glyph.is_newline() {
            0.0
        } else {
            metrics.width(glyph.content, &config.font_name, config.font_size)
        };
    }

    let mut line_starts = vec![0];
    let mut pen = Pen {
        x: config.margin_width,
        y: config.margin_height,
        line: 1,
    };
    // Glyphs below this index belong to a word already accepted as overflowing.
    let mut overflow_until = 0;

    for i in 0..glyphs.len() {
        let glyph = &glyphs[i];
        if !glyph.is_word_break() && i >= overflow_until && pen.x + glyph.width > right_limit {
            let word = word_span(glyphs, i);
            let word_width: f32 = glyphs[word.clone()].iter().map(|g| g.width).sum();
            let starts_line = line_starts.last() == Some(&word.start);
            if word_width <= usable && !starts_line {
                pen.new_line(config);
                line_starts.push(word.start);
                for earlier in &mut glyphs[word.start..i] {
                    pen.place(earlier);
                }
            } else {
                tracing::trace!(start = word.start, end = word.end, "word wider than line, overflowing");
                overflow_until = word.end;
            }
        }

        let glyph = &mut glyphs[i];
        pen.place(glyph);
        if glyph.is_newline() {
            pen.new_line(config);
            line_starts.push(i + 1);
        }
    }

    let state = LayoutState {
        margin_width: config.margin_width,
        margin_height: config.margin_height,
        font_size: config.font_size,
        viewport_width: config.viewport_width,
        space_width: metrics.width(' ', &config.font_name, config.font_size),
        line_starts,
    };
    tracing::debug!(
        glyphs = buffer.len(),
        lines = state.total_lines(),
        width = config.viewport_width,
        "reflowed"
    );
    state
}
