use diamonds_core::{ClipboardError, ClipboardSink};

/// System clipboard backed by arboard.
///
/// The handle is opened on first use and kept for the session; on X11 the
/// copied text only stays available while its owner is alive.
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self { inner: None }
    }

    fn ensure(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        let clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => arboard::Clipboard::new()
                .map_err(|err| ClipboardError::Unavailable(err.to_string()))?,
        };
        Ok(self.inner.insert(clipboard))
    }
}

impl ClipboardSink for SystemClipboard {
    fn write_text(&mut self, value: &str) -> Result<(), ClipboardError> {
        let clipboard = self.ensure()?;
        clipboard
            .set_text(value.to_string())
            .map_err(|err| ClipboardError::Write(err.to_string()))
    }
}
