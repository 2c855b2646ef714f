/// Linear undo/redo manager.
///
/// Records live in one vector ordered oldest first. `position` counts the
/// records currently applied to the document: everything before it can be
/// undone, everything at or after it can be redone. A new record truncates the
/// redoable tail, so the history never branches.
use crate::config::HistoryConfig;
use crate::operation::UndoRecord;

/// Manages undo/redo history for a single document.
pub struct UndoManager {
    /// All known records, oldest first.
    records: Vec<UndoRecord>,
    /// Number of records currently applied (the undo cursor).
    position: usize,
    /// Configuration parameters.
    config: HistoryConfig,
}

impl std::fmt::Debug for UndoManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UndoManager")
            .field("len", &self.records.len())
            .field("position", &self.position)
            .field("max_history_depth", &self.config.max_history_depth)
            .finish()
    }
}

impl Default for UndoManager {
    fn default() -> Self {
        Self::new(HistoryConfig::default())
    }
}

impl UndoManager {
    /// Creates an empty manager.
    pub fn new(config: HistoryConfig) -> Self {
        Self {
            records: Vec::new(),
            position: 0,
            config,
        }
    }

    /// Records a user edit.
    ///
    /// Drops every record that was undone but not redone, appends `record`,
    /// and makes it current. Evicts the oldest records beyond the depth cap.
    pub fn record(&mut self, record: UndoRecord) {
        if self.position < self.records.len() {
            tracing::debug!(
                discarded = self.records.len() - self.position,
                "dropping redo branch"
            );
            self.records.truncate(self.position);
        }
        self.records.push(record);
        self.position += 1;

        let cap = self.config.max_history_depth.max(1);
        if self.records.len() > cap {
            let excess = self.records.len() - cap;
            self.records.drain(..excess);
            self.position -= excess;
        }
    }

    /// Steps back over the current record.
    ///
    /// Returns the record whose effect the caller must reverse, or `None`
    /// if there is nothing to undo.
    pub fn undo(&mut self) -> Option<&UndoRecord> {
        if self.position == 0 {
            return None;
        }
        self.position -= 1;
        self.records.get(self.position)
    }

    /// Steps forward over the next undone record.
    ///
    /// Returns the record whose original effect the caller must re-apply,
    /// or `None` if there is nothing to redo.
    pub fn redo(&mut self) -> Option<&UndoRecord> {
        let record = self.records.get(self.position)?;
        self.position += 1;
        Some(record)
    }

    /// The most recently applied record, if any.
    pub fn current(&self) -> Option<&UndoRecord> {
        self.position
            .checked_sub(1)
            .and_then(|idx| self.records.get(idx))
    }

    /// Whether undo is available.
    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    /// Whether redo is available.
    pub fn can_redo(&self) -> bool {
        self.position < self.records.len()
    }

    /// Number of records that can be undone.
    pub fn undo_len(&self) -> usize {
        self.position
    }

    /// Number of records that can be redone.
    pub fn redo_len(&self) -> usize {
        self.records.len() - self.position
    }

    /// Clears all history.
    pub fn clear(&mut self) {
        self.records.clear();
        self.position = 0;
    }
}
