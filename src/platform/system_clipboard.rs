//=========================================================================
// System Clipboard
//=========================================================================
//
// `ClipboardBackend` over the OS clipboard via arboard. The arboard handle
// is created on first use and kept for the lifetime of the application;
// on X11/Wayland the copied text is only served while it is alive.
//
// If the OS clipboard cannot be opened (headless session, no display
// server) the backend logs once and behaves as an empty clipboard.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== Internal Dependencies ===============================================

use crate::core::clipboard::ClipboardBackend;

//=== SystemClipboard =====================================================

pub(crate) struct SystemClipboard {
    handle: Option<arboard::Clipboard>,
    unavailable: bool,
}

impl SystemClipboard {
    pub(crate) fn new() -> Self {
        Self {
            handle: None,
            unavailable: false,
        }
    }

    /// Backend that never touches the OS.
    #[cfg(test)]
    fn unavailable() -> Self {
        Self {
            handle: None,
            unavailable: true,
        }
    }

    fn handle(&mut self) -> Option<&mut arboard::Clipboard> {
        if self.handle.is_none() && !self.unavailable {
            match arboard::Clipboard::new() {
                Ok(clipboard) => {
                    debug!(target: "clipboard", "System clipboard opened");
                    self.handle = Some(clipboard);
                }
                Err(e) => {
                    warn!(target: "clipboard", "System clipboard unavailable: {}", e);
                    self.unavailable = true;
                }
            }
        }
        self.handle.as_mut()
    }
}

impl ClipboardBackend for SystemClipboard {
    fn set(&mut self, text: &str) {
        let Some(clipboard) = self.handle() else {
            return;
        };
        if let Err(e) = clipboard.set_text(text) {
            warn!(target: "clipboard", "Failed to write system clipboard: {}", e);
        }
    }

    fn get(&mut self) -> Option<String> {
        let clipboard = self.handle()?;
        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(arboard::Error::ContentNotAvailable) => None,
            Err(e) => {
                warn!(target: "clipboard", "Failed to read system clipboard: {}", e);
                None
            }
        }
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.handle.is_some())
            .field("unavailable", &self.unavailable)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clipboard::Clipboard;

    #[test]
    fn unavailable_clipboard_reads_empty() {
        let mut backend = SystemClipboard::unavailable();
        backend.set("ignored");
        assert_eq!(backend.get(), None);
        assert!(backend.handle.is_none());
    }

    #[test]
    fn unavailable_clipboard_clears_shell_buffer() {
        let mut clip = Clipboard::new(true, 64, Box::new(SystemClipboard::unavailable()));
        clip.set("local only");
        assert_eq!(clip.get(), "");
    }

    #[test]
    fn opens_lazily() {
        let backend = SystemClipboard::new();
        assert!(backend.handle.is_none());
        assert!(!backend.unavailable);
    }
}
