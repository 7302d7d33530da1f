//! Clipboard access for copying price lists.
//!
//! Failures never abort a command: the clipboard is often missing over SSH
//! or in headless sessions, so the outcome comes back as a status message.

use arboard::Clipboard;

/// Copy text to the system clipboard and describe what happened.
pub fn copy_to_clipboard(text: &str, description: &str) -> String {
    match Clipboard::new() {
        Ok(mut clipboard) => match clipboard.set_text(text) {
            Ok(()) => format!("Copied {} to clipboard", description),
            Err(e) => format!("Clipboard error: {}", e),
        },
        Err(e) => format!("Clipboard not available: {}", e),
    }
}
