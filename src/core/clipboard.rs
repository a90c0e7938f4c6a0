//! Clipboard module
//!
//! Provides clipboard history tracking and monitoring functionality.
//!
//! This module contains two main components:
//! - `history`: bounded history with deduplication and commit back to the clipboard
//! - `monitor`: background task that polls the clipboard for changes

pub mod history;
pub mod monitor;

pub use history::HistoryStore;
pub use monitor::ClipboardWatcher;
