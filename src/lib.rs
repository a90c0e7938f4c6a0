pub mod constants;
pub mod core;
pub mod shared;
pub mod system;

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::core::{ClipboardWatcher, HistoryStore, HotkeyDispatcher, NavigationMachine};
use crate::shared::settings::AppSettings;
use crate::shared::AppResult;
use crate::system::clipboard::{ClipboardSink, SystemClipboard};
use crate::system::display::LogDisplay;
use crate::system::keyboard::spawn_keyboard_hook;

/// Install the fmt subscriber; `RUST_LOG` overrides the default filter
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,clipcycle_lib=debug"))
        )
        .init();
}

/// Start the watcher, navigation and hotkey tasks and run until Ctrl-C or
/// the display is closed.
pub async fn run() -> AppResult<()> {
    let settings = AppSettings::load().await.unwrap_or_else(|e| {
        tracing::warn!("Failed to load settings: {}, using defaults", e);
        AppSettings::default()
    });

    let clipboard: Arc<dyn ClipboardSink> = Arc::new(SystemClipboard::new());
    let store = Arc::new(HistoryStore::new(settings.history.max_size, Arc::clone(&clipboard)));
    let (keys, chords) = spawn_keyboard_hook()?;
    let display = Arc::new(LogDisplay::new());
    let cancel = CancellationToken::new();

    let watcher = ClipboardWatcher::new(
        Arc::clone(&store),
        clipboard,
        settings.clipboard_poll_interval(),
    );
    let navigation = NavigationMachine::new(
        Arc::clone(&store),
        display,
        Arc::new(keys),
        settings.navigation_poll_interval(),
        cancel.clone(),
    );
    let hotkeys = HotkeyDispatcher::new(Arc::clone(&store), chords);

    let tasks = vec![
        tokio::spawn(watcher.run(cancel.clone())),
        tokio::spawn(navigation.run(cancel.clone())),
        tokio::spawn(hotkeys.run(cancel.clone())),
    ];

    tracing::info!(
        "✅ clipcycle started (history size {}, clipboard poll {:?})",
        store.capacity(),
        settings.clipboard_poll_interval()
    );
    for line in constants::USAGE.lines() {
        tracing::info!("📋 {}", line);
    }

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            if let Err(e) = res {
                tracing::warn!("Failed to listen for Ctrl-C: {}", e);
            }
            tracing::info!("Shutting down");
        }
        _ = cancel.cancelled() => {}
    }
    cancel.cancel();

    for task in tasks {
        if let Err(e) = task.await {
            tracing::error!("Task ended abnormally: {}", e);
        }
    }

    Ok(())
}
