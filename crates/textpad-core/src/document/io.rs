//! File I/O operations for documents.
//!
//! Opening reads through a [`PersistenceProvider`]; a path that does not exist
//! yet yields an empty document bound to it, and the file is created on the
//! first save.

use std::path::Path;

use anyhow::{Context, Result};

use crate::fonts::FontMetricsProvider;
use crate::layout::LayoutConfig;
use crate::persistence::PersistenceProvider;

use super::Document;

impl Document {
    /// Opens the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if `path` exists but cannot be read.
    pub fn open(
        path: &Path,
        persistence: &dyn PersistenceProvider,
        config: LayoutConfig,
        metrics: Box<dyn FontMetricsProvider>,
    ) -> Result<Self> {
        let text = if path.exists() {
            persistence
                .load(path)
                .with_context(|| format!("failed to open {}", path.display()))?
        } else {
            tracing::info!(path = %path.display(), "file does not exist yet, starting empty");
            String::new()
        };
        let mut doc = Self::from_text(&text, config, metrics);
        doc.file_path = Some(path.to_path_buf());
        Ok(doc)
    }

    /// Saves the document to its file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the document has no path or the write fails.
    pub fn save(&mut self, persistence: &dyn PersistenceProvider) -> Result<()> {
        let path = self
            .file_path
            .clone()
            .context("no file path set for this document")?;
        self.save_to(&path, persistence)
    }

    /// Saves the document to `path` and binds it to that path.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails; the document is left untouched.
    pub fn save_to(&mut self, path: &Path, persistence: &dyn PersistenceProvider) -> Result<()> {
        persistence.save(path, &self.buffer.text())?;
        self.file_path = Some(path.to_path_buf());
        self.modified = false;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::FixedWidthMetrics;
    use crate::persistence::FsPersistence;

    fn open(path: &Path) -> Result<Document> {
        Document::open(
            path,
            &FsPersistence,
            LayoutConfig::default(),
            Box::new(FixedWidthMetrics::default()),
        )
    }

    #[test]
    fn test_open_missing_file_is_empty_and_bound() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");
        let doc = open(&path).unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.file_path(), Some(path.as_path()));
        assert!(!path.exists());
    }

    #[test]
    fn test_open_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "one\r\ntwo").unwrap();
        let doc = open(&path).unwrap();
        assert_eq!(doc.text(), "one\ntwo");
        assert_eq!(doc.cursor().index, 0);
        assert_eq!(doc.layout().total_lines(), 2);
        assert!(!doc.is_modified());
        assert!(!doc.can_undo());
    }

    #[test]
    fn test_open_drops_control_characters() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.txt");
        std::fs::write(&path, "a\x0cb\x1bc\td\n").unwrap();
        let doc = open(&path).unwrap();
        assert_eq!(doc.text(), "abc\td\n");
        assert_eq!(doc.len(), 6);
        assert!(!doc.is_modified());
    }

    #[test]
    fn test_save_creates_file_and_clears_modified() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("new.txt");
        let mut doc = open(&path).unwrap();
        doc.insert_text("hello\nworld");
        assert!(doc.is_modified());
        doc.save(&FsPersistence).unwrap();
        assert!(!doc.is_modified());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "hello\nworld");
    }

    #[test]
    fn test_save_failure_leaves_document_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut doc = open(&dir.path().join("a.txt")).unwrap();
        doc.insert_text("data");
        let bad = dir.path().join("missing").join("b.txt");
        assert!(doc.save_to(&bad, &FsPersistence).is_err());
        assert!(doc.is_modified());
        assert_eq!(doc.text(), "data");
        assert_eq!(doc.file_path(), Some(dir.path().join("a.txt").as_path()));
    }

    #[test]
    fn test_save_without_path_errors() {
        let mut doc = Document::new(
            LayoutConfig::default(),
            Box::new(FixedWidthMetrics::default()),
        );
        let err = doc.save(&FsPersistence).unwrap_err();
        assert!(err.to_string().contains("no file path"));
    }

    #[test]
    fn test_open_directory_errors() {
        let dir = tempfile::tempdir().unwrap();
        assert!(open(dir.path()).is_err());
    }
}
