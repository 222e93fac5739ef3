use anyhow::{anyhow, Result};
use arboard::Clipboard;

/// Clipboard access for pasting essays into the form
pub struct ClipboardManager {
    clipboard: Option<Clipboard>,
}

impl ClipboardManager {
    pub fn new() -> Self {
        let clipboard = match Clipboard::new() {
            Ok(cb) => {
                tracing::info!("Clipboard initialized successfully");
                Some(cb)
            }
            Err(e) => {
                tracing::warn!("Failed to initialize clipboard: {} - paste is limited to terminal paste", e);
                None
            }
        };
        Self { clipboard }
    }

    /// Paste text from clipboard
    pub fn paste(&mut self) -> Result<String> {
        let clipboard = self
            .clipboard
            .as_mut()
            .ok_or_else(|| anyhow!("Clipboard not available"))?;

        let content = clipboard
            .get_text()
            .map_err(|e| anyhow!("Failed to read clipboard: {}", e))?;
        tracing::info!("Pasted {} characters from clipboard", content.len());
        Ok(normalize_pasted_text(&content))
    }
}

impl Default for ClipboardManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Windows and old Mac line endings become `\n`
pub fn normalize_pasted_text(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
