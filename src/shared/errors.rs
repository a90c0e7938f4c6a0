//! Error handling with the AppError enum
//!
//! Every fallible operation in the crate returns `AppResult<T>`.
//! Only `ClipboardWrite` is surfaced to a caller that has to act on it;
//! the polling loops log everything else and carry on.

use thiserror::Error;
use serde::Serialize;

/// Clipboard history errors
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "message")]
pub enum AppError {
    /// Reading the OS clipboard failed (transient, skipped until next poll)
    #[error("Clipboard read error: {0}")]
    ClipboardRead(String),

    /// Writing the OS clipboard failed (history is left untouched)
    #[error("Clipboard write error: {0}")]
    ClipboardWrite(String),

    /// History has no entries yet
    #[error("Clipboard history is empty")]
    EmptyHistory,

    /// Index past the end of the history buffer
    #[error("History index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// Settings could not be located, read or parsed
    #[error("Settings error: {0}")]
    Settings(String),

    /// Global keyboard hook failure
    #[error("Keyboard hook error: {0}")]
    Keyboard(String),

    /// Filesystem I/O error
    #[error("I/O error: {0}")]
    Io(String),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Settings(format!("JSON error: {}", err))
    }
}

// Helper type alias for results
pub type AppResult<T> = Result<T, AppError>;
