//! In-memory stand-ins for the OS capabilities

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::shared::errors::{AppError, AppResult};
use crate::shared::types::Key;
use crate::system::clipboard::ClipboardSink;
use crate::system::display::{CloseCallback, DisplaySurface};
use crate::system::keyboard::KeyStateSource;

#[derive(Default)]
pub struct FakeClipboard {
    contents: Mutex<String>,
    writes: Mutex<Vec<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulate the user copying text in another application
    pub fn copy(&self, text: &str) {
        *self.contents.lock().unwrap() = text.to_owned();
    }

    pub fn contents(&self) -> String {
        self.contents.lock().unwrap().clone()
    }

    pub fn writes(&self) -> Vec<String> {
        self.writes.lock().unwrap().clone()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

impl ClipboardSink for FakeClipboard {
    fn read(&self) -> AppResult<String> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(AppError::ClipboardRead("clipboard busy".into()));
        }
        Ok(self.contents())
    }

    fn write(&self, text: &str) -> AppResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(AppError::ClipboardWrite("clipboard busy".into()));
        }
        self.copy(text);
        self.writes.lock().unwrap().push(text.to_owned());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeKeys {
    down: Mutex<HashSet<Key>>,
}

impl FakeKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&self, key: Key) {
        self.down.lock().unwrap().insert(key);
    }

    pub fn release(&self, key: Key) {
        self.down.lock().unwrap().remove(&key);
    }
}

impl KeyStateSource for FakeKeys {
    fn is_down(&self, key: Key) -> bool {
        self.down.lock().unwrap().contains(&key)
    }
}

#[derive(Default)]
pub struct RecordingDisplay {
    text: Mutex<Option<String>>,
    texts: Mutex<Vec<String>>,
    visible: AtomicBool,
    on_close: Mutex<Option<CloseCallback>>,
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> Option<String> {
        self.text.lock().unwrap().clone()
    }

    /// Every text set, in order
    pub fn texts(&self) -> Vec<String> {
        self.texts.lock().unwrap().clone()
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::SeqCst)
    }

    pub fn close(&self) {
        self.visible.store(false, Ordering::SeqCst);
        if let Some(callback) = self.on_close.lock().unwrap().as_ref() {
            callback();
        }
    }
}

impl DisplaySurface for RecordingDisplay {
    fn set_text(&self, text: &str) {
        *self.text.lock().unwrap() = Some(text.to_owned());
        self.texts.lock().unwrap().push(text.to_owned());
    }

    fn show(&self) {
        self.visible.store(true, Ordering::SeqCst);
    }

    fn hide(&self) {
        self.visible.store(false, Ordering::SeqCst);
    }

    fn on_close(&self, callback: CloseCallback) {
        *self.on_close.lock().unwrap() = Some(callback);
    }
}
