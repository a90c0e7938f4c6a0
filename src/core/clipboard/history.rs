use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::shared::errors::{AppError, AppResult};
use crate::shared::types::{preview_of, ClipboardSnapshot};
use crate::system::clipboard::ClipboardSink;

/// Buffer plus the value believed to be on the OS clipboard.
/// Both live behind the same lock.
#[derive(Debug, Default)]
struct HistoryBuffer {
    items: Vec<ClipboardSnapshot>, // newest first
    last_observed: Option<String>,
}

/// Bounded, deduplicating clipboard history
///
/// Shared between the watcher, the navigation loop and the hotkey dispatcher
/// through an `Arc`. Reads take the shared lock, `observe` and the commit
/// operations take the exclusive one, so a commit can never interleave with
/// an insertion.
pub struct HistoryStore {
    buffer: RwLock<HistoryBuffer>,
    capacity: usize,
    sink: Arc<dyn ClipboardSink>,
}

impl HistoryStore {
    /// Create an empty history holding at most `capacity` entries
    pub fn new(capacity: usize, sink: Arc<dyn ClipboardSink>) -> Self {
        Self {
            buffer: RwLock::new(HistoryBuffer::default()),
            capacity: capacity.max(1),
            sink,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, HistoryBuffer> {
        match self.buffer.read() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("[HistoryStore] Lock poisoned, recovering...");
                poisoned.into_inner()
            }
        }
    }

    fn write(&self) -> RwLockWriteGuard<'_, HistoryBuffer> {
        match self.buffer.write() {
            Ok(guard) => guard,
            Err(poisoned) => {
                tracing::warn!("[HistoryStore] Lock poisoned, recovering...");
                poisoned.into_inner()
            }
        }
    }

    /// Record a freshly read clipboard value.
    ///
    /// Returns false when `text` is empty or equal to the last observed value.
    pub fn observe(&self, text: &str) -> bool {
        if text.is_empty() {
            return false;
        }

        let mut buffer = self.write();
        if buffer.last_observed.as_deref() == Some(text) {
            return false;
        }

        buffer.items.insert(0, ClipboardSnapshot::new_text(text.to_owned()));
        buffer.items.truncate(self.capacity);
        buffer.last_observed = Some(text.to_owned());

        tracing::debug!(
            "[HistoryStore] Added \"{}\", total count: {}",
            preview_of(text),
            buffer.items.len()
        );
        true
    }

    /// Get a specific snapshot by index (0 = most recent)
    pub fn get(&self, index: usize) -> Option<ClipboardSnapshot> {
        self.read().items.get(index).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn last_observed(&self) -> Option<String> {
        self.read().last_observed.clone()
    }

    /// Copy of every snapshot, newest first
    pub fn snapshot(&self) -> Vec<ClipboardSnapshot> {
        self.read().items.clone()
    }

    /// Write the snapshot at `index` to the clipboard.
    ///
    /// On success the written text becomes the last observed value, so the
    /// watcher does not record it again. A failed write changes nothing.
    pub fn commit(&self, index: usize) -> AppResult<()> {
        let mut buffer = self.write();
        let len = buffer.items.len();
        if len == 0 {
            return Err(AppError::EmptyHistory);
        }
        let text = match buffer.items.get(index) {
            Some(snapshot) => snapshot.content.clone(),
            None => return Err(AppError::IndexOutOfRange { index, len }),
        };

        self.sink.write(&text)?;
        tracing::debug!("[HistoryStore] Committed #{}: \"{}\"", index, preview_of(&text));
        buffer.last_observed = Some(text);
        Ok(())
    }

    /// Write `text` to the clipboard unless it is already the last observed
    /// value. Returns whether a write happened.
    pub fn commit_if_changed(&self, text: &str) -> AppResult<bool> {
        let mut buffer = self.write();
        if buffer.last_observed.as_deref() == Some(text) {
            return Ok(false);
        }

        self.sink.write(text)?;
        tracing::debug!("[HistoryStore] Committed \"{}\"", preview_of(text));
        buffer.last_observed = Some(text.to_owned());
        Ok(true)
    }
}
