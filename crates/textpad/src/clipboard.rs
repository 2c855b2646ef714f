//! System clipboard access for the command driver.

use anyhow::{Context, Result};
use textpad_core::clipboard::{ClipboardProvider, MemoryClipboard};

/// The desktop clipboard via `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    /// Connects to the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error when no clipboard is available (e.g. headless sessions).
    pub fn new() -> Result<Self> {
        let inner = arboard::Clipboard::new().context("system clipboard unavailable")?;
        Ok(Self { inner })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn get_text(&mut self) -> Result<String> {
        self.inner
            .get_text()
            .context("failed to read system clipboard")
    }

    fn set_text(&mut self, text: &str) -> Result<()> {
        self.inner
            .set_text(text)
            .context("failed to write system clipboard")
    }
}

/// The system clipboard when one exists, otherwise a process-local one.
pub fn host_clipboard() -> Box<dyn ClipboardProvider> {
    match SystemClipboard::new() {
        Ok(clipboard) => Box::new(clipboard),
        Err(e) => {
            tracing::warn!("{e:#}; using an in-process clipboard");
            Box::new(MemoryClipboard::new())
        }
    }
}
