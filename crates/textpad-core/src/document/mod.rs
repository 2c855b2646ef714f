//! Editing session combining buffer, layout, cursor, selection, and history.
//!
//! A `Document` is the single owner of every piece of editor state. Each
//! public operation finishes with a full reflow, so the cursor and highlight
//! coordinates it exposes always match the current buffer. Text editing lives
//! in the `editing` submodule, cursor and mouse handling in `pointer`, and
//! file I/O in `io`.

mod editing;
mod io;
mod pointer;

use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::buffer::{TextBuffer, NEWLINE};
use crate::fonts::FontMetricsProvider;
use crate::history::{EditKind, HistoryConfig, UndoManager};
use crate::layout::{reflow, LayoutConfig, LayoutState};
use crate::navigator::Caret;
use crate::persistence::normalize_line_endings;
use crate::selection::{HighlightRect, Selection, SelectionManager};

/// Allowed font sizes and the zoom step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontSizePolicy {
    pub min: f32,
    pub max: f32,
    /// Amount added or removed by one zoom step.
    pub step: f32,
}

impl Default for FontSizePolicy {
    fn default() -> Self {
        Self {
            min: 1.0,
            max: 200.0,
            step: 4.0,
        }
    }
}

/// Characters that may enter the buffer. Control characters other than tab
/// and line breaks are dropped.
fn is_insertable(ch: char) -> bool {
    ch == NEWLINE || ch == '\t' || !ch.is_control()
}

/// Where to draw the cursor for an index after a reflow.
#[derive(Debug, Clone, Copy)]
enum Placement {
    /// Left edge of the glyph at the index.
    At(usize),
    /// Right edge of the glyph before the index.
    After(usize),
}

/// A single open document and its view state.
pub struct Document {
    buffer: TextBuffer,
    layout_config: LayoutConfig,
    layout: LayoutState,
    cursor: Caret,
    selection: SelectionManager,
    history: UndoManager,
    metrics: Box<dyn FontMetricsProvider>,
    font_policy: FontSizePolicy,
    /// File path on disk, if any.
    file_path: Option<PathBuf>,
    /// Whether the document has been modified since last save.
    modified: bool,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("len", &self.buffer.len())
            .field("cursor", &self.cursor)
            .field("lines", &self.layout.total_lines())
            .field("file_path", &self.file_path)
            .field("modified", &self.modified)
            .finish_non_exhaustive()
    }
}

impl Document {
    /// Creates an empty document.
    pub fn new(config: LayoutConfig, metrics: Box<dyn FontMetricsProvider>) -> Self {
        Self::from_text("", config, metrics)
    }

    /// Creates a document holding `text`, cursor at the start, empty history.
    /// Line endings are normalized and control characters that could not be
    /// typed are dropped.
    pub fn from_text(
        text: &str,
        config: LayoutConfig,
        metrics: Box<dyn FontMetricsProvider>,
    ) -> Self {
        let text = normalize_line_endings(text);
        let kept: String = text.chars().filter(|&ch| is_insertable(ch)).collect();
        let dropped = text.chars().count() - kept.chars().count();
        if dropped > 0 {
            tracing::warn!(dropped, "dropped control characters from loaded text");
        }
        let mut buffer = TextBuffer::from(kept.as_str());
        let layout = reflow(&mut buffer, &config, metrics.as_ref());
        let cursor = Caret::at(&buffer, &layout, 0);
        Self {
            buffer,
            layout_config: config,
            layout,
            cursor,
            selection: SelectionManager::new(),
            history: UndoManager::default(),
            metrics,
            font_policy: FontSizePolicy::default(),
            file_path: None,
            modified: false,
        }
    }

    /// Replaces the (still empty) history with one using `config`.
    pub fn with_history_config(mut self, config: HistoryConfig) -> Self {
        self.history = UndoManager::new(config);
        self
    }

    pub fn with_font_size_policy(mut self, policy: FontSizePolicy) -> Self {
        self.font_policy = policy;
        self
    }

    // ── Accessors ────────────────────────────────────────────────────

    pub fn text(&self) -> String {
        self.buffer.text()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn layout(&self) -> &LayoutState {
        &self.layout
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout_config
    }

    pub fn cursor(&self) -> Caret {
        self.cursor
    }

    /// The released selection, if any.
    pub fn selection(&self) -> Option<&Selection> {
        self.selection.selection()
    }

    pub fn selected_text(&self) -> Option<&str> {
        self.selection.selection().map(|s| s.text.as_str())
    }

    /// Highlight rectangles for the live drag or the released selection.
    pub fn highlights(&self) -> &[HighlightRect] {
        self.selection.highlights()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn font_size(&self) -> f32 {
        self.layout_config.font_size
    }

    pub fn font_size_policy(&self) -> FontSizePolicy {
        self.font_policy
    }

    // ── History ──────────────────────────────────────────────────────

    /// Reverts the most recent edit. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(record) = self.history.undo().cloned() else {
            return false;
        };
        self.selection.clear();
        let placement = match record.kind {
            EditKind::Deletion => {
                self.buffer.insert_str(record.index, &record.run);
                Placement::After(record.end())
            }
            EditKind::Insertion => {
                self.buffer.delete_range(record.index, record.end());
                Placement::At(record.index)
            }
        };
        tracing::debug!(index = record.index, kind = ?record.kind, "undo");
        self.modified = true;
        self.relayout(placement);
        true
    }

    /// Re-applies the most recently undone edit. Returns false when there is
    /// nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(record) = self.history.redo().cloned() else {
            return false;
        };
        self.selection.clear();
        let placement = match record.kind {
            EditKind::Insertion => {
                self.buffer.insert_str(record.index, &record.run);
                Placement::After(record.end())
            }
            EditKind::Deletion => {
                self.buffer.delete_range(record.index, record.end());
                Placement::At(record.index)
            }
        };
        tracing::debug!(index = record.index, kind = ?record.kind, "redo");
        self.modified = true;
        self.relayout(placement);
        true
    }

    // ── View ─────────────────────────────────────────────────────────

    /// Changes the font size and re-measures every glyph.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the document unchanged, if `size` falls
    /// outside the font-size policy.
    pub fn set_font_size(&mut self, size: f32) -> Result<()> {
        let FontSizePolicy { min, max, .. } = self.font_policy;
        if !size.is_finite() || size < min {
            bail!("font size {size} is below the minimum of {min}");
        }
        if size > max {
            bail!("font size {size} is above the maximum of {max}");
        }
        let placement = self.current_placement();
        self.layout_config = self.layout_config.with_font_size(size);
        tracing::debug!(size, "font size changed");
        self.relayout(placement);
        Ok(())
    }

    /// Grows the font by one step.
    ///
    /// # Errors
    ///
    /// Returns an error if the result would exceed the maximum size.
    pub fn zoom_in(&mut self) -> Result<()> {
        self.set_font_size(self.font_size() + self.font_policy.step)
    }

    /// Shrinks the font by one step.
    ///
    /// # Errors
    ///
    /// Returns an error if the result would fall below the minimum size.
    pub fn zoom_out(&mut self) -> Result<()> {
        self.set_font_size(self.font_size() - self.font_policy.step)
    }

    /// Applies a new viewport size. The cursor keeps its index.
    pub fn resize(&mut self, width: f32, height: f32) {
        let placement = self.current_placement();
        self.layout_config = self
            .layout_config
            .with_viewport(width.max(0.0), height.max(0.0));
        tracing::debug!(width, height, "viewport resized");
        self.relayout(placement);
    }

    // ── Internals ────────────────────────────────────────────────────

    /// How the cursor is drawn now, so a reflow can keep it on the same side
    /// of a wrap point.
    fn current_placement(&self) -> Placement {
        let index = self.cursor.index;
        match self.buffer.get(index) {
            Some(g) if g.line != self.cursor.line => Placement::After(index),
            _ => Placement::At(index),
        }
    }

    /// Full reflow followed by cursor and highlight recomputation.
    fn relayout(&mut self, placement: Placement) {
        self.layout = reflow(&mut self.buffer, &self.layout_config, self.metrics.as_ref());
        self.cursor = match placement {
            Placement::At(index) => Caret::at(&self.buffer, &self.layout, index),
            Placement::After(index) => Caret::after(&self.buffer, &self.layout, index),
        };
        self.selection.refresh(&self.buffer, &self.layout);
    }
}
