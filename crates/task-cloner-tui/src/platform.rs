/*
[INPUT]:  Desktop clipboard and default URL handler
[OUTPUT]: ClipboardPort and UrlOpener implementations for this machine
[POS]:    Platform adapters - injected into the success notifier
[UPDATE]: When platform integrations change
*/

use std::sync::Mutex;

use tracing::debug;

use crate::notifier::{ClipboardPort, PortError, UrlOpener};

/// Clipboard backed by arboard. The handle is opened on first use and kept,
/// since some platforms drop clipboard contents when it is released.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardPort for SystemClipboard {
    fn set_text(&self, text: &str) -> Result<(), PortError> {
        let mut guard = self.handle.lock().expect("clipboard lock");
        if guard.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|err| PortError::Clipboard(err.to_string()))?;
            *guard = Some(clipboard);
        }
        let Some(clipboard) = guard.as_mut() else {
            return Err(PortError::Clipboard("clipboard not initialized".to_string()));
        };
        clipboard
            .set_text(text.to_string())
            .map_err(|err| PortError::Clipboard(err.to_string()))?;
        debug!(chars = text.chars().count(), "clipboard updated");
        Ok(())
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str) -> Result<(), PortError> {
        open::that_detached(url).map_err(|err| PortError::Open {
            url: url.to_string(),
            reason: err.to_string(),
        })
    }
}
