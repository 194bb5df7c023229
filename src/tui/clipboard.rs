//! Clipboard access for the copy action
//!
//! `App` copies through the [`ClipboardSink`] trait so the copy flow can be
//! exercised without a display server. [`SystemClipboard`] is the real thing,
//! backed by `arboard`; it opens the clipboard fresh on every copy to avoid
//! holding resources between copies.

use anyhow::{Context, Result};
use arboard::Clipboard;

/// Something plain text can be copied into
pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// The system clipboard.
///
/// Common failure cases: no display server (headless Linux), permission denied.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardSink for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
        clipboard
            .set_text(text)
            .context("Failed to set clipboard text")?;
        Ok(())
    }
}
