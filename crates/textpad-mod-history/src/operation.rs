//! Core types for recorded edits.

/// Direction of a recorded edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditKind {
    /// The run was inserted at `index`.
    Insertion,
    /// The run was removed from `index`.
    Deletion,
}

/// A reversible description of one user-level edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoRecord {
    /// Buffer position at which the run was inserted or from which it was removed.
    pub index: usize,
    /// Contents of the affected glyphs, in buffer order. Never empty.
    pub run: String,
    /// Whether the edit inserted or removed `run`.
    pub kind: EditKind,
}

impl UndoRecord {
    /// Record for a run inserted at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `run` is empty.
    pub fn insertion(index: usize, run: impl Into<String>) -> Self {
        Self::new(index, run.into(), EditKind::Insertion)
    }

    /// Record for a run removed from `index`.
    ///
    /// # Panics
    ///
    /// Panics if `run` is empty.
    pub fn deletion(index: usize, run: impl Into<String>) -> Self {
        Self::new(index, run.into(), EditKind::Deletion)
    }

    fn new(index: usize, run: String, kind: EditKind) -> Self {
        assert!(!run.is_empty(), "undo record run must not be empty");
        Self { index, run, kind }
    }

    /// True when undoing this record re-inserts `run`.
    pub fn is_deletion(&self) -> bool {
        self.kind == EditKind::Deletion
    }

    /// Number of glyphs in the run.
    pub fn run_len(&self) -> usize {
        self.run.chars().count()
    }

    /// Index one past the last glyph the run covers once it is in the buffer.
    pub fn end(&self) -> usize {
        self.index + self.run_len()
    }
}
