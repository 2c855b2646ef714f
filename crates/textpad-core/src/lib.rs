//! Text-layout, cursor-navigation, selection, and undo engine for textpad.
//!
//! Glyphs live in one [`buffer::TextBuffer`] arena; every other component
//! refers to them by index or line number and resolves through the buffer or
//! the [`layout::LayoutState`] produced by the last reflow.

pub mod buffer;
pub mod clipboard;
pub mod document;
pub mod fonts;
pub mod history;
pub mod layout;
pub mod navigator;
pub mod persistence;
pub mod selection;
