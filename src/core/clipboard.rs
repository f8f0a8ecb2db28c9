//=========================================================================
// Clipboard
//=========================================================================
//
// The shell owns the clipboard buffer and the enable flag and decides
// *when* the platform clipboard is touched. *How* is the backend's
// business (`ClipboardBackend`).
//
// Text is capped at `size - 1` bytes (the last byte is reserved, matching
// a C-string sized buffer) and truncated on a UTF-8 character boundary.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, warn};

//=== ClipboardBackend ====================================================

/// Platform clipboard access.
pub trait ClipboardBackend: Send {
    /// Replaces the platform clipboard content with `text`.
    fn set(&mut self, text: &str);

    /// Reads the platform clipboard as UTF-8 text.
    fn get(&mut self) -> Option<String>;
}

//=== MemoryClipboard =====================================================

/// Process-local clipboard, used when no platform backend is installed.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    content: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn set(&mut self, text: &str) {
        self.content = Some(text.to_string());
    }

    fn get(&mut self) -> Option<String> {
        self.content.clone()
    }
}

//=== Clipboard ===========================================================

/// Clipboard state owned by the application context.
pub(crate) struct Clipboard {
    enabled: bool,
    size: usize,
    buffer: String,
    discarded: bool,
    backend: Box<dyn ClipboardBackend>,
}

impl Clipboard {
    pub(crate) fn new(enabled: bool, size: usize, backend: Box<dyn ClipboardBackend>) -> Self {
        let capacity = if enabled { size } else { 0 };
        Self {
            enabled,
            size,
            buffer: String::with_capacity(capacity),
            discarded: false,
            backend,
        }
    }

    pub(crate) fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Copies `text` into the buffer (truncated) and pushes it to the
    /// platform. No-op while disabled or after teardown.
    pub(crate) fn set(&mut self, text: &str) {
        if !self.enabled || self.discarded {
            return;
        }
        self.store(text);
        self.backend.set(&self.buffer);
        debug!(target: "clipboard", "Clipboard set ({} bytes)", self.buffer.len());
    }

    /// Refreshes the buffer from the platform and returns it. Returns an
    /// empty string while disabled, after teardown, or when the platform
    /// has no text.
    pub(crate) fn get(&mut self) -> &str {
        if !self.enabled || self.discarded {
            return "";
        }
        match self.backend.get() {
            Some(text) => self.store(&text),
            None => self.buffer.clear(),
        }
        &self.buffer
    }

    /// Zeroes the buffer and releases its storage.
    pub(crate) fn discard(&mut self) {
        self.buffer = String::new();
        self.discarded = true;
    }

    fn store(&mut self, text: &str) {
        let limit = self.size.saturating_sub(1);
        let mut end = text.len().min(limit);
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        if end < text.len() {
            warn!(
                target: "clipboard",
                "Clipboard text truncated from {} to {} bytes",
                text.len(),
                end
            );
        }
        self.buffer.clear();
        self.buffer.push_str(&text[..end]);
    }
}

impl std::fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Clipboard")
            .field("enabled", &self.enabled)
            .field("size", &self.size)
            .field("buffered", &self.buffer.len())
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
