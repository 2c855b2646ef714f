//! Whole-document load and save.
//!
//! Documents are UTF-8 text. Loading strips a byte-order mark and folds every
//! line-ending style into `\n`; saving writes the glyph contents verbatim.

use std::path::Path;

use anyhow::{Context, Result};

/// Reads and writes whole documents as text.
pub trait PersistenceProvider {
    /// Loads the document at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    fn load(&self, path: &Path) -> Result<String>;

    /// Writes `text` to `path`, replacing any existing contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn save(&self, path: &Path, text: &str) -> Result<()>;
}

/// Local filesystem persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsPersistence;

impl PersistenceProvider for FsPersistence {
    fn load(&self, path: &Path) -> Result<String> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read file: {}", path.display()))?;
        let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(&bytes);
        if had_errors {
            tracing::warn!(
                path = %path.display(),
                "file contains invalid UTF-8; replaced with U+FFFD"
            );
        }
        let text = normalize_line_endings(&text);
        tracing::info!(path = %path.display(), chars = text.chars().count(), "loaded file");
        Ok(text)
    }

    fn save(&self, path: &Path, text: &str) -> Result<()> {
        std::fs::write(path, text.as_bytes())
            .with_context(|| format!("failed to write file: {}", path.display()))?;
        tracing::info!(path = %path.display(), bytes = text.len(), "saved file");
        Ok(())
    }
}

/// Converts `\r\n` and lone `\r` to `\n`.
pub fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
