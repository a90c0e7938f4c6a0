//! Alt+Q navigation gesture
//!
//! Holding the modifier opens a browsing session. Each counter press selects
//! the Nth most recent snapshot, counted from the start of the session
//! (absolute, wrapping). With reverse held, a press steps back one slot from
//! the current selection instead (relative, wrapping). Releasing the modifier
//! commits the selection to the clipboard and hides the display.
//!
//! Only edges act. Keys that are already down on the first sample are
//! recorded as the baseline and do nothing until released and pressed again.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::constants::{COUNTER_KEY, EMPTY_INDICATOR, MODIFIER_KEYS, REVERSE_KEYS};
use crate::core::clipboard::HistoryStore;
use crate::shared::errors::AppError;
use crate::shared::types::preview_of;
use crate::system::display::DisplaySurface;
use crate::system::keyboard::KeyStateSource;

/// Key levels read in one polling tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeySample {
    pub modifier: bool,
    pub counter: bool,
    pub reverse: bool,
}

impl KeySample {
    pub fn read(keys: &dyn KeyStateSource) -> Self {
        Self {
            modifier: MODIFIER_KEYS.iter().any(|k| keys.is_down(*k)),
            counter: keys.is_down(COUNTER_KEY),
            reverse: REVERSE_KEYS.iter().any(|k| keys.is_down(*k)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Browsing,
}

#[derive(Debug, Default)]
pub struct NavigationState {
    pub phase: Phase,
    pub modifier_held: bool,
    pub counter_held: bool,
    pub reverse_held: bool,
    /// Counter presses since the modifier went down
    pub press_count: usize,
    pub selected_index: usize,
    /// Text to commit when the modifier is released
    pub pending: Option<String>,
}

pub struct NavigationMachine {
    store: Arc<HistoryStore>,
    display: Arc<dyn DisplaySurface>,
    keys: Arc<dyn KeyStateSource>,
    interval: Duration,
    state: NavigationState,
    primed: bool,
    visible: Arc<AtomicBool>,
}

impl NavigationMachine {
    /// Closing the display cancels `cancel`.
    pub fn new(
        store: Arc<HistoryStore>,
        display: Arc<dyn DisplaySurface>,
        keys: Arc<dyn KeyStateSource>,
        interval: Duration,
        cancel: CancellationToken,
    ) -> Self {
        let visible = Arc::new(AtomicBool::new(false));
        let on_close_visible = Arc::clone(&visible);
        display.on_close(Box::new(move || {
            on_close_visible.store(false, Ordering::SeqCst);
            tracing::info!("[Navigation] Display closed, shutting down");
            cancel.cancel();
        }));

        Self {
            store,
            display,
            keys,
            interval,
            state: NavigationState::default(),
            primed: false,
            visible,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    /// Advance the machine by one key sample
    pub fn tick(&mut self, sample: KeySample) {
        if !self.primed {
            self.primed = true;
            self.state.modifier_held = sample.modifier;
            self.state.counter_held = sample.counter;
            self.state.reverse_held = sample.reverse;
            return;
        }

        let modifier_rose = sample.modifier && !self.state.modifier_held;
        let modifier_fell = !sample.modifier && self.state.modifier_held;
        let counter_rose = sample.counter && !self.state.counter_held;

        self.state.modifier_held = sample.modifier;
        self.state.reverse_held = sample.reverse;

        if modifier_rose {
            self.begin_browsing();
        } else if modifier_fell {
            self.end_browsing();
        }

        if counter_rose && self.state.phase == Phase::Browsing {
            self.on_counter_press();
        }

        self.state.counter_held = sample.counter;
    }

    fn begin_browsing(&mut self) {
        self.state.phase = Phase::Browsing;
        self.state.press_count = 0;
        self.state.pending = None;
        tracing::debug!("[Navigation] Alt pressed - tracking 'q' presses");
    }

    fn end_browsing(&mut self) {
        if self.state.phase != Phase::Browsing {
            return;
        }
        self.state.phase = Phase::Idle;
        tracing::debug!(
            "[Navigation] Alt released - 'q' was pressed {} times while Alt was held",
            self.state.press_count
        );

        if let Some(pending) = self.state.pending.take() {
            match self.store.commit_if_changed(&pending) {
                Ok(true) => tracing::info!("[Navigation] Pasted \"{}\"", preview_of(&pending)),
                Ok(false) => tracing::debug!("[Navigation] Selection already on clipboard"),
                Err(e) => tracing::warn!("[Navigation] Failed to commit selection: {}", e),
            }
        }

        self.display.hide();
        self.visible.store(false, Ordering::SeqCst);
    }

    fn on_counter_press(&mut self) {
        self.state.press_count += 1;
        tracing::trace!("[Navigation] 'q' pressed while Alt is held (count: {})", self.state.press_count);

        let len = self.store.len();
        if len == 0 {
            self.display.set_text(EMPTY_INDICATOR);
            self.show_display();
            return;
        }

        let index = if self.state.reverse_held {
            (self.state.selected_index % len + len - 1) % len
        } else {
            (self.state.press_count - 1) % len
        };

        let Some(snapshot) = self.store.get(index) else {
            // The store never shrinks, so this means the guards above are wrong
            tracing::error!("[Navigation] {}", AppError::IndexOutOfRange { index, len: self.store.len() });
            return;
        };

        self.state.selected_index = index;
        self.display.set_text(&snapshot.content);
        self.state.pending = Some(snapshot.content);
        self.show_display();
    }

    fn show_display(&self) {
        if !self.visible.swap(true, Ordering::SeqCst) {
            self.display.show();
        }
    }

    /// Sample the keyboard every `interval` until cancelled
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!("[Navigation] Polling keys every {:?}", self.interval);

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let sample = KeySample::read(self.keys.as_ref());
                    self.tick(sample);
                }
            }
        }

        self.display.hide();
        tracing::info!("[Navigation] Stopped");
    }
}
