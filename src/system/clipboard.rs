//! OS clipboard access
//!
//! The rest of the crate only sees the `ClipboardSink` trait, so the
//! history store and watcher can be driven by an in-memory clipboard in tests.

use crate::shared::errors::{AppError, AppResult};

/// Read/write access to the system clipboard text
pub trait ClipboardSink: Send + Sync {
    fn read(&self) -> AppResult<String>;
    fn write(&self, text: &str) -> AppResult<()>;
}

/// System clipboard backed by `cli-clipboard`
///
/// A fresh context is opened per call; holding one open across polls keeps
/// the clipboard locked on some platforms.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSink for SystemClipboard {
    fn read(&self) -> AppResult<String> {
        cli_clipboard::get_contents().map_err(|e| AppError::ClipboardRead(e.to_string()))
    }

    fn write(&self, text: &str) -> AppResult<()> {
        cli_clipboard::set_contents(text.to_owned())
            .map_err(|e| AppError::ClipboardWrite(e.to_string()))
    }
}
