//! Configuration for the history system.

/// Maximum number of records kept per document.
/// Oldest records are evicted when this limit is exceeded.
pub const DEFAULT_MAX_HISTORY_DEPTH: usize = 10_000;

/// Configuration for the history system.
#[derive(Debug, Clone)]
pub struct HistoryConfig {
    /// Max records kept, counting both undoable and redoable ones.
    pub max_history_depth: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_history_depth: DEFAULT_MAX_HISTORY_DEPTH,
        }
    }
}

impl HistoryConfig {
    /// Config with the given depth cap, at least 1.
    pub fn with_depth(max_history_depth: usize) -> Self {
        Self {
            max_history_depth: max_history_depth.max(1),
        }
    }
}
