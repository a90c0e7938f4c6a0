//! Compiled-in defaults and key bindings

use crate::shared::types::Key;

/// Maximum number of clipboard snapshots kept
pub const DEFAULT_MAX_HISTORY_SIZE: usize = 100;

/// Clipboard poll interval (ms)
pub const DEFAULT_CLIPBOARD_POLL_MS: u64 = 500;

/// Key-state poll interval (ms)
pub const DEFAULT_NAVIGATION_POLL_MS: u64 = 20;

/// Preview length in characters
pub const PREVIEW_CHARS: usize = 100;

/// Consecutive read failures between two warnings
pub const READ_ERROR_LOG_EVERY: u32 = 10;

/// Shown when the counter key is pressed with nothing in history
pub const EMPTY_INDICATOR: &str = "Clipboard is empty";

/// Either key holds the gesture open
pub const MODIFIER_KEYS: [Key; 2] = [Key::LeftAlt, Key::RightAlt];

/// Advances the selection
pub const COUNTER_KEY: Key = Key::Q;

/// Either key reverses the counter direction
pub const REVERSE_KEYS: [Key; 2] = [Key::LeftShift, Key::RightShift];

pub const USAGE: &str = "Press and hold Alt\n\
Press Q multiple times to navigate through clipboard history\n\
Hold Shift while pressing Q to step backwards\n\
Release Alt to paste the selected item\n\
Press Shift+Alt+1..9 to paste straight from history";

/// Settings location (see `directories::ProjectDirs`)
pub const APP_QUALIFIER: &str = "dev";
pub const APP_ORGANIZATION: &str = "clipcycle";
pub const APP_NAME: &str = "clipcycle";
pub const SETTINGS_FILENAME: &str = "settings.json";
