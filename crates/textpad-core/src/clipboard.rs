/// Clipboard capability consumed by copy, cut, and paste.
use anyhow::Result;

/// Get/set access to a text clipboard supplied by the host.
pub trait ClipboardProvider {
    /// Current clipboard text.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard is unavailable or holds no text.
    fn get_text(&mut self) -> Result<String>;

    /// Replaces the clipboard contents.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard is unavailable.
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Process-local clipboard. Used in tests and when no system clipboard exists.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: String,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl ClipboardProvider for MemoryClipboard {
    fn get_text(&mut self) -> Result<String> {
        Ok(self.text.clone())
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.text = text.to_string();
        Ok(())
    }
}
