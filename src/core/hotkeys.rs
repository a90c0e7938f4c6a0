//! Shift+Alt+1..9 jump-to-slot chords

use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::core::clipboard::HistoryStore;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::types::Chord;
use crate::system::keyboard::HotkeySource;

/// Commits history slots on chord events. Works only through the store,
/// so it can fire mid-gesture without touching navigation state.
pub struct HotkeyDispatcher<S: HotkeySource> {
    store: Arc<HistoryStore>,
    source: S,
}

impl<S: HotkeySource> HotkeyDispatcher<S> {
    pub fn new(store: Arc<HistoryStore>, source: S) -> Self {
        Self { store, source }
    }

    /// Commit the slot a chord points at. A slot past the end of history is
    /// reported and skipped.
    pub fn handle(&self, chord: Chord) -> AppResult<bool> {
        match self.store.commit(chord.index()) {
            Ok(()) => {
                tracing::info!("[Hotkeys] Pasted item {} from history", chord.number());
                Ok(true)
            }
            Err(AppError::EmptyHistory) => {
                tracing::info!("[Hotkeys] Clipboard history is empty");
                Ok(false)
            }
            Err(AppError::IndexOutOfRange { len, .. }) => {
                tracing::info!("[Hotkeys] No item {} in history ({} stored)", chord.number(), len);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Wait for chords until cancelled or the source closes
    pub async fn run(mut self, cancel: CancellationToken) {
        tracing::info!("[Hotkeys] Listening for Shift+Alt+1..9");

        loop {
            let chord = tokio::select! {
                _ = cancel.cancelled() => break,
                chord = self.source.next_chord() => chord,
            };

            let Some(chord) = chord else {
                tracing::warn!("[Hotkeys] Chord source closed");
                break;
            };

            if let Err(e) = self.handle(chord) {
                tracing::warn!("[Hotkeys] Failed to paste item {}: {}", chord.number(), e);
            }
        }

        tracing::info!("[Hotkeys] Stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::sync::mpsc;

    use crate::core::navigation::{KeySample, NavigationMachine};
    use crate::system::fakes::{FakeClipboard, FakeKeys, RecordingDisplay};
    use crate::system::keyboard::ChordReceiver;

    fn setup(entries: &[&str]) -> (Arc<HistoryStore>, Arc<FakeClipboard>) {
        let clipboard = Arc::new(FakeClipboard::new());
        let store = Arc::new(HistoryStore::new(100, clipboard.clone()));
        for text in entries.iter().rev() {
            store.observe(text);
        }
        (store, clipboard)
    }

    fn dispatcher(store: Arc<HistoryStore>) -> HotkeyDispatcher<ChordReceiver> {
        let (_tx, rx) = mpsc::unbounded_channel();
        HotkeyDispatcher::new(store, ChordReceiver::new(rx))
    }

    #[test]
    fn test_slot_commits_matching_entry() {
        let (store, clipboard) = setup(&["A", "B", "C"]);
        let hotkeys = dispatcher(store.clone());

        assert!(hotkeys.handle(Chord::slot(3).unwrap()).unwrap());
        assert_eq!(clipboard.writes(), vec!["C"]);
        assert_eq!(store.last_observed().as_deref(), Some("C"));
    }

    #[test]
    fn test_missing_slot_is_noop() {
        let (store, clipboard) = setup(&["A", "B"]);
        let hotkeys = dispatcher(store);
        assert!(!hotkeys.handle(Chord::slot(9).unwrap()).unwrap());
        assert!(clipboard.writes().is_empty());

        let (empty, clipboard) = setup(&[]);
        let hotkeys = dispatcher(empty);
        assert!(!hotkeys.handle(Chord::slot(1).unwrap()).unwrap());
        assert!(clipboard.writes().is_empty());
    }

    #[test]
    fn test_write_failure_is_reported() {
        let (store, clipboard) = setup(&["A"]);
        clipboard.set_fail_writes(true);
        let hotkeys = dispatcher(store.clone());
        assert!(matches!(
            hotkeys.handle(Chord::slot(1).unwrap()),
            Err(AppError::ClipboardWrite(_))
        ));
    }

    #[test]
    fn test_chord_mid_gesture_leaves_navigation_alone() {
        let (store, clipboard) = setup(&["A", "B", "C"]);
        let display = Arc::new(RecordingDisplay::new());
        let mut machine = NavigationMachine::new(
            store.clone(),
            display.clone(),
            Arc::new(FakeKeys::new()),
            Duration::from_millis(20),
            CancellationToken::new(),
        );
        let hold = KeySample { modifier: true, counter: false, reverse: false };
        let press = KeySample { modifier: true, counter: true, reverse: false };
        machine.tick(KeySample::default());
        machine.tick(hold);
        machine.tick(press);
        machine.tick(hold);
        machine.tick(press);
        machine.tick(hold);

        let hotkeys = dispatcher(store.clone());
        hotkeys.handle(Chord::slot(3).unwrap()).unwrap();

        assert_eq!(clipboard.writes(), vec!["C"]);
        assert_eq!(machine.state().press_count, 2);
        assert_eq!(machine.state().selected_index, 1);
        assert_eq!(display.text().as_deref(), Some("B"));

        // The gesture still commits its own selection on release
        machine.tick(KeySample::default());
        assert_eq!(clipboard.writes(), vec!["C", "B"]);
    }

    #[tokio::test]
    async fn test_run_until_source_closes() {
        let (store, clipboard) = setup(&["A", "B"]);
        let (tx, rx) = mpsc::unbounded_channel();
        let hotkeys = HotkeyDispatcher::new(store, ChordReceiver::new(rx));

        tx.send(Chord::slot(2).unwrap()).unwrap();
        tx.send(Chord::slot(5).unwrap()).unwrap();
        tx.send(Chord::slot(1).unwrap()).unwrap();
        drop(tx);

        hotkeys.run(CancellationToken::new()).await;
        assert_eq!(clipboard.writes(), vec!["B", "A"]);
    }

    #[tokio::test]
    async fn test_run_stops_on_cancel() {
        let (store, _) = setup(&["A"]);
        let (_tx, rx) = mpsc::unbounded_channel();
        let hotkeys = HotkeyDispatcher::new(store, ChordReceiver::new(rx));
        let cancel = CancellationToken::new();
        let task = tokio::spawn(hotkeys.run(cancel.clone()));

        cancel.cancel();
        tokio::time::timeout(Duration::from_secs(1), task)
            .await
            .expect("dispatcher should stop promptly")
            .unwrap();
    }
}
