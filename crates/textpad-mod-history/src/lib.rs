/// Linear undo/redo history.
///
/// Provides an `UndoManager` holding an ordered list of `UndoRecord`s and a
/// single "current position" into it. Undo walks the position back, redo walks
/// it forward, and recording a new edit truncates whatever was undone.
pub mod config;
pub mod manager;
pub mod operation;

pub use config::HistoryConfig;
pub use manager::UndoManager;
pub use operation::{EditKind, UndoRecord};
