//! Selection display surface

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::shared::types::preview_of;

pub type CloseCallback = Box<dyn Fn() + Send + Sync + 'static>;

/// Passive view of the currently selected text
pub trait DisplaySurface: Send + Sync {
    fn set_text(&self, text: &str);
    fn show(&self);
    fn hide(&self);
    /// Register a callback for the user closing the surface
    fn on_close(&self, callback: CloseCallback);
}

/// Headless surface that renders selections to the log
#[derive(Default)]
pub struct LogDisplay {
    visible: AtomicBool,
    on_close: Mutex<Option<CloseCallback>>,
}

impl LogDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    /// Close the surface, notifying the registered callback
    pub fn close(&self) {
        self.visible.store(false, Ordering::SeqCst);
        let callback = match self.on_close.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(callback) = callback.as_ref() {
            callback();
        }
    }
}

impl DisplaySurface for LogDisplay {
    fn set_text(&self, text: &str) {
        tracing::info!("[Display] {}", preview_of(text));
    }

    fn show(&self) {
        if !self.visible.swap(true, Ordering::SeqCst) {
            tracing::debug!("[Display] Shown");
        }
    }

    fn hide(&self) {
        if self.visible.swap(false, Ordering::SeqCst) {
            tracing::debug!("[Display] Hidden");
        }
    }

    fn on_close(&self, callback: CloseCallback) {
        match self.on_close.lock() {
            Ok(mut guard) => *guard = Some(callback),
            Err(poisoned) => *poisoned.into_inner() = Some(callback),
        }
    }
}
