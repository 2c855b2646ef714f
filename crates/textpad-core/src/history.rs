// Re-exports from textpad-mod-history and glyph-to-record conversion.
pub use textpad_mod_history::{EditKind, HistoryConfig, UndoManager, UndoRecord};

use crate::buffer::Glyph;

/// Builds the record for a run just removed from the buffer.
/// Returns `None` for an empty run, which is never recorded.
pub fn deletion_record(removed: &[Glyph]) -> Option<UndoRecord> {
    let first = removed.first()?;
    let run: String = removed.iter().map(|g| g.content).collect();
    Some(UndoRecord::deletion(first.index, run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::TextBuffer;

    #[test]
    fn test_deletion_record_from_removed_glyphs() {
        let mut buf = TextBuffer::from("ab\ncd");
        let removed = buf.delete_range(1, 4);
        let record = deletion_record(&removed).unwrap();
        assert_eq!(record.index, 1);
        assert_eq!(record.run, "b\nc");
        assert!(record.is_deletion());
    }

    #[test]
    fn test_deletion_record_empty_run() {
        assert!(deletion_record(&[]).is_none());
    }
}
