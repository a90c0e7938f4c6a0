use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use super::history::HistoryStore;
use crate::constants::READ_ERROR_LOG_EVERY;
use crate::shared::types::preview_of;
use crate::system::clipboard::ClipboardSink;

/// Clipboard watcher that polls for changes
pub struct ClipboardWatcher {
    store: Arc<HistoryStore>,
    sink: Arc<dyn ClipboardSink>,
    interval: Duration,
    consecutive_errors: u32,
}

impl ClipboardWatcher {
    pub fn new(store: Arc<HistoryStore>, sink: Arc<dyn ClipboardSink>, interval: Duration) -> Self {
        Self {
            store,
            sink,
            interval,
            consecutive_errors: 0,
        }
    }

    /// Read the clipboard once and feed the store. Returns whether a new
    /// snapshot was recorded.
    pub fn poll_once(&mut self) -> bool {
        match self.sink.read() {
            Ok(current) => {
                self.consecutive_errors = 0;
                let inserted = self.store.observe(&current);
                if inserted {
                    tracing::debug!("[ClipboardWatcher] Detected clipboard change: \"{}\"", preview_of(&current));
                }
                inserted
            }
            Err(e) => {
                self.consecutive_errors += 1;

                // Only log errors occasionally to avoid spam
                if self.consecutive_errors == 1 || self.consecutive_errors % READ_ERROR_LOG_EVERY == 0 {
                    tracing::warn!(
                        "[ClipboardWatcher] Failed to read clipboard (error #{}): {}",
                        self.consecutive_errors,
                        e
                    );
                } else {
                    tracing::trace!("[ClipboardWatcher] Read failed again: {}", e);
                }
                false
            }
        }
    }

    /// Poll until cancelled
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!("[ClipboardWatcher] Started monitoring every {:?}", self.interval);

        loop {
            self.poll_once();

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        tracing::info!("[ClipboardWatcher] Stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::system::fakes::FakeClipboard;

    fn setup() -> (ClipboardWatcher, Arc<HistoryStore>, Arc<FakeClipboard>) {
        let clipboard = Arc::new(FakeClipboard::new());
        let store = Arc::new(HistoryStore::new(10, clipboard.clone()));
        let watcher = ClipboardWatcher::new(store.clone(), clipboard.clone(), Duration::from_millis(500));
        (watcher, store, clipboard)
    }

    #[test]
    fn test_poll_records_new_values_once() {
        let (mut watcher, store, clipboard) = setup();

        clipboard.copy("hello");
        assert!(watcher.poll_once());
        assert!(!watcher.poll_once());

        clipboard.copy("world");
        assert!(watcher.poll_once());
        assert_eq!(store.get(0).unwrap().content, "world");
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_read_failures_are_tolerated() {
        let (mut watcher, store, clipboard) = setup();

        clipboard.copy("kept");
        clipboard.set_fail_reads(true);
        for _ in 0..25 {
            assert!(!watcher.poll_once());
        }
        assert_eq!(watcher.consecutive_errors, 25);

        clipboard.set_fail_reads(false);
        assert!(watcher.poll_once());
        assert_eq!(watcher.consecutive_errors, 0);
        assert_eq!(store.get(0).unwrap().content, "kept");
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_polls_until_cancelled() {
        let (watcher, store, clipboard) = setup();
        let cancel = CancellationToken::new();
        let task = tokio::spawn(watcher.run(cancel.clone()));

        clipboard.copy("one");
        tokio::time::sleep(Duration::from_millis(600)).await;
        clipboard.copy("two");
        tokio::time::sleep(Duration::from_millis(600)).await;

        cancel.cancel();
        task.await.unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.get(0).unwrap().content, "two");

        // Nothing is recorded once stopped
        clipboard.copy("three");
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(store.len(), 2);
    }
}
