//! Global keyboard input
//!
//! Two capabilities feed the core: `KeyStateSource` is polled for the
//! navigation gesture, `HotkeySource` delivers discrete slot chords.
//! Both are backed by a single `rdev` hook running on its own thread.

use std::collections::HashSet;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use rdev::{EventType, Key as RdevKey};
use tokio::sync::mpsc;

use crate::constants::{MODIFIER_KEYS, REVERSE_KEYS};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::types::{Chord, Key};

/// Polled "is this key held right now"
pub trait KeyStateSource: Send + Sync {
    fn is_down(&self, key: Key) -> bool;
}

/// Discrete chord events; `None` means the source is gone
#[async_trait]
pub trait HotkeySource: Send {
    async fn next_chord(&mut self) -> Option<Chord>;
}

/// Pressed-key set maintained from raw press/release events
#[derive(Debug, Default)]
pub struct KeyboardState {
    pressed: HashSet<Key>,
}

impl KeyboardState {
    /// Record a press. Returns the chord it completes, if any.
    ///
    /// Auto-repeat delivers repeated presses without a release in between;
    /// only the first one can fire a chord.
    pub fn press(&mut self, key: Key) -> Option<Chord> {
        if !self.pressed.insert(key) {
            return None;
        }
        match key {
            Key::Digit(n) if self.any_down(&MODIFIER_KEYS) && self.any_down(&REVERSE_KEYS) => {
                Chord::slot(n)
            }
            _ => None,
        }
    }

    pub fn release(&mut self, key: Key) {
        self.pressed.remove(&key);
    }

    pub fn is_down(&self, key: Key) -> bool {
        self.pressed.contains(&key)
    }

    fn any_down(&self, keys: &[Key]) -> bool {
        keys.iter().any(|k| self.pressed.contains(k))
    }
}

/// `KeyStateSource` view of the hook's shared state
#[derive(Clone)]
pub struct HookKeyState {
    state: Arc<RwLock<KeyboardState>>,
}

impl KeyStateSource for HookKeyState {
    fn is_down(&self, key: Key) -> bool {
        match self.state.read() {
            Ok(guard) => guard.is_down(key),
            Err(poisoned) => poisoned.into_inner().is_down(key),
        }
    }
}

/// `HotkeySource` fed by the hook thread
pub struct ChordReceiver {
    rx: mpsc::UnboundedReceiver<Chord>,
}

impl ChordReceiver {
    pub fn new(rx: mpsc::UnboundedReceiver<Chord>) -> Self {
        Self { rx }
    }
}

#[async_trait]
impl HotkeySource for ChordReceiver {
    async fn next_chord(&mut self) -> Option<Chord> {
        self.rx.recv().await
    }
}

fn map_key(key: RdevKey) -> Option<Key> {
    let mapped = match key {
        RdevKey::Alt => Key::LeftAlt,
        RdevKey::AltGr => Key::RightAlt,
        RdevKey::ShiftLeft => Key::LeftShift,
        RdevKey::ShiftRight => Key::RightShift,
        RdevKey::KeyQ => Key::Q,
        RdevKey::Num1 => Key::Digit(1),
        RdevKey::Num2 => Key::Digit(2),
        RdevKey::Num3 => Key::Digit(3),
        RdevKey::Num4 => Key::Digit(4),
        RdevKey::Num5 => Key::Digit(5),
        RdevKey::Num6 => Key::Digit(6),
        RdevKey::Num7 => Key::Digit(7),
        RdevKey::Num8 => Key::Digit(8),
        RdevKey::Num9 => Key::Digit(9),
        _ => return None,
    };
    Some(mapped)
}

/// Start the global keyboard hook thread
///
/// The thread lives until the process exits; `rdev::listen` offers no way
/// to stop it.
pub fn spawn_keyboard_hook() -> AppResult<(HookKeyState, ChordReceiver)> {
    let state = Arc::new(RwLock::new(KeyboardState::default()));
    let (tx, rx) = mpsc::unbounded_channel();
    let hook_state = Arc::clone(&state);

    std::thread::Builder::new()
        .name("keyboard-hook".into())
        .spawn(move || {
            let callback = move |event: rdev::Event| {
                let mut guard = match hook_state.write() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                match event.event_type {
                    EventType::KeyPress(raw) => {
                        if let Some(chord) = map_key(raw).and_then(|key| guard.press(key)) {
                            tracing::debug!("[Keyboard] Chord Shift+Alt+{}", chord.number());
                            // Receiver only drops on shutdown
                            let _ = tx.send(chord);
                        }
                    }
                    EventType::KeyRelease(raw) => {
                        if let Some(key) = map_key(raw) {
                            guard.release(key);
                        }
                    }
                    _ => {}
                }
            };

            if let Err(e) = rdev::listen(callback) {
                tracing::error!("[Keyboard] Global hook stopped: {:?}", e);
            }
        })
        .map_err(|e| AppError::Keyboard(format!("Failed to spawn hook thread: {}", e)))?;

    tracing::info!("[Keyboard] Global hook started");
    Ok((HookKeyState { state }, ChordReceiver::new(rx)))
}
