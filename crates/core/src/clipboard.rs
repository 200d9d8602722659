//! Clipboard seam used when copying a color or link.

use thiserror::Error;

/// Failures reported by a clipboard backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClipboardError {
    /// No clipboard could be opened (headless session, missing display).
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),
    /// The clipboard rejected the text.
    #[error("clipboard write failed: {0}")]
    Write(String),
}

/// Destination for copied values.
pub trait ClipboardSink {
    /// Replace the clipboard contents with `value`.
    fn write_text(&mut self, value: &str) -> Result<(), ClipboardError>;
}
