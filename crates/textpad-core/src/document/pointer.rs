//! Cursor movement and mouse-driven selection.

use crate::navigator::{self, Caret};
use crate::selection::Selection;

use super::Document;

impl Document {
    pub fn move_left(&mut self) {
        self.selection.clear();
        self.cursor = navigator::move_left(&self.buffer, &self.layout, self.cursor);
    }

    pub fn move_right(&mut self) {
        self.selection.clear();
        self.cursor = navigator::move_right(&self.buffer, &self.layout, self.cursor);
    }

    pub fn move_up(&mut self) {
        self.selection.clear();
        self.cursor = navigator::move_up(&self.buffer, &self.layout, self.cursor);
    }

    pub fn move_down(&mut self) {
        self.selection.clear();
        self.cursor = navigator::move_down(&self.buffer, &self.layout, self.cursor);
    }

    /// Places the cursor at the position nearest `(x, y)` without touching the selection.
    pub fn click(&mut self, x: f32, y: f32) -> Caret {
        self.cursor = navigator::find_nearest(&self.buffer, &self.layout, x, y);
        self.cursor
    }

    /// Starts a drag selection at the nearest position.
    pub fn mouse_press(&mut self, x: f32, y: f32) {
        let caret = self.click(x, y);
        self.selection.press(caret);
    }

    /// Extends the live drag; the cursor follows the pointer.
    pub fn mouse_drag(&mut self, x: f32, y: f32) {
        let caret = self.click(x, y);
        self.selection.drag(&self.buffer, &self.layout, caret);
    }

    /// Ends the drag. A non-empty range becomes the selection and the cursor
    /// moves to its start; otherwise the cursor stays where the pointer is.
    pub fn mouse_release(&mut self, x: f32, y: f32) -> Option<&Selection> {
        let caret = self.click(x, y);
        let start = self
            .selection
            .release(&self.buffer, &self.layout, caret)
            .map(|s| s.start);
        if let Some(start) = start {
            self.cursor = Caret::at(&self.buffer, &self.layout, start);
        }
        self.selection.selection()
    }
}
