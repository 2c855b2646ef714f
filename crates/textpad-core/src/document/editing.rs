//! Text mutations: typing, pasting, deleting, and clipboard transfer.
//!
//! Every mutation records exactly one undo record per buffer change and ends
//! with a reflow.

use anyhow::{Context, Result};

use crate::buffer::NEWLINE;
use crate::clipboard::ClipboardProvider;
use crate::history::{deletion_record, UndoRecord};
use crate::persistence::normalize_line_endings;

use super::{is_insertable, Document, Placement};

impl Document {
    /// Types one character at the cursor, replacing the selection if any.
    ///
    /// `'\r'` and `'\n'` insert a line break. Returns false if the character
    /// was dropped.
    pub fn type_char(&mut self, ch: char) -> bool {
        let ch = if ch == '\r' { NEWLINE } else { ch };
        if !is_insertable(ch) {
            return false;
        }
        self.delete_selection();

        let index = self.cursor.index;
        self.buffer.insert_char(index, ch);
        self.history.record(UndoRecord::insertion(index, ch.to_string()));
        self.modified = true;
        self.relayout(Placement::After(index + 1));
        true
    }

    /// Inserts a line break at the cursor.
    pub fn insert_newline(&mut self) {
        self.type_char(NEWLINE);
    }

    /// Inserts a whole run at the cursor as a single undoable edit,
    /// replacing the selection if any. Line endings are normalized and
    /// other control characters dropped. Returns false if nothing was inserted.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let run: String = normalize_line_endings(text)
            .chars()
            .filter(|&ch| is_insertable(ch))
            .collect();
        if run.is_empty() {
            return false;
        }
        self.delete_selection();

        let index = self.cursor.index;
        let count = self.buffer.insert_str(index, &run);
        self.history.record(UndoRecord::insertion(index, run));
        self.modified = true;
        self.relayout(Placement::After(index + count));
        true
    }

    /// Deletes the selection, or the glyph before the cursor when nothing is
    /// selected. Returns false at the start of the buffer.
    pub fn backspace(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        let index = self.cursor.index;
        if index == 0 {
            return false;
        }
        let removed = self.buffer.delete_range(index - 1, index);
        if let Some(record) = deletion_record(&removed) {
            self.history.record(record);
        }
        self.modified = true;
        self.relayout(Placement::At(index - 1));
        true
    }

    /// Deletes the released selection and puts the cursor at its start.
    /// Returns false when nothing is selected. A drag still in progress is
    /// abandoned, since its endpoints would no longer cover the same text.
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_dragging() {
            tracing::debug!("edit during drag, dropping it");
            self.selection.clear();
        }
        let Some((start, end)) = self.selection.selection().map(|s| (s.start, s.end)) else {
            return false;
        };
        self.selection.clear();
        let removed = self.buffer.delete_range(start, end);
        if let Some(record) = deletion_record(&removed) {
            self.history.record(record);
        }
        tracing::debug!(start, end, "deleted selection");
        self.modified = true;
        self.relayout(Placement::At(start));
        true
    }

    /// Copies the selection to `clipboard`. Returns false when nothing is selected.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard rejects the text.
    pub fn copy(&self, clipboard: &mut dyn ClipboardProvider) -> Result<bool> {
        let Some(text) = self.selected_text() else {
            return Ok(false);
        };
        clipboard
            .set_text(text)
            .context("failed to copy to clipboard")?;
        Ok(true)
    }

    /// Copies the selection to `clipboard`, then deletes it.
    ///
    /// # Errors
    ///
    /// Returns an error, leaving the document untouched, if the clipboard
    /// rejects the text.
    pub fn cut(&mut self, clipboard: &mut dyn ClipboardProvider) -> Result<bool> {
        if !self.copy(clipboard)? {
            return Ok(false);
        }
        Ok(self.delete_selection())
    }

    /// Inserts the clipboard text at the cursor as one undoable edit.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard cannot be read.
    pub fn paste(&mut self, clipboard: &mut dyn ClipboardProvider) -> Result<bool> {
        let text = clipboard
            .get_text()
            .context("failed to read from clipboard")?;
        Ok(self.insert_text(&text))
    }
}
