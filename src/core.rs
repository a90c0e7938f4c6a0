//! History state machine: store, watcher, navigation gesture and slot chords

pub mod clipboard;
pub mod hotkeys;
pub mod navigation;

pub use clipboard::{ClipboardWatcher, HistoryStore};
pub use hotkeys::HotkeyDispatcher;
pub use navigation::NavigationMachine;
