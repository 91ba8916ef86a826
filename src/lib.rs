//! Clipboard history for the notch panel
//!
//! A [`ClipboardMonitor`] polls the OS clipboard's change counter and feeds
//! new text into a shared [`HistoryStore`], which keeps a deduplicated,
//! most-recent-first, capacity-bounded list persisted in redb. The panel
//! reads the list and calls `activate`, `remove` and `clear` on the store.

pub mod core;
pub mod shared;
pub mod system;
#[cfg(feature = "tauri")]
pub mod api;

use std::sync::Arc;

pub use crate::core::clipboard::{
    ClipboardHistory, ClipboardMonitor, HistoryStore, MonitorHandle, PollOutcome, MAX_HISTORY_SIZE,
};
pub use crate::core::storage::{HistoryStorage, InMemoryStorage, RedbStorage, HISTORY_KEY};
pub use crate::shared::errors::{HistoryError, HistoryResult};
pub use crate::shared::settings::ClipboardSettings;
pub use crate::shared::types::{ClipboardEntry, EntryView, HistoryView};
pub use crate::system::pasteboard::{platform_clipboard, MemoryClipboard, SystemClipboard};

/// Open persistent storage as configured and build the shared store on top
/// of the platform clipboard. Falls back to in-memory storage when the
/// database cannot be opened.
pub fn open_store(settings: &ClipboardSettings) -> Arc<HistoryStore> {
    open_store_with(settings, platform_clipboard())
}

pub fn open_store_with(
    settings: &ClipboardSettings,
    clipboard: Arc<dyn SystemClipboard>,
) -> Arc<HistoryStore> {
    let storage: Arc<dyn HistoryStorage> =
        match settings.storage_path().and_then(|path| RedbStorage::open(&path)) {
            Ok(storage) => Arc::new(storage),
            Err(e) => {
                tracing::warn!("failed to open history database, using in-memory fallback: {}", e);
                Arc::new(InMemoryStorage::new())
            }
        };
    Arc::new(HistoryStore::open(storage, clipboard, settings.capacity))
}

/// Run the headless history daemon until Ctrl-C
pub fn run() -> HistoryResult<()> {
    shared::logging::init_default();
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(run_daemon())
}

async fn run_daemon() -> HistoryResult<()> {
    let settings = ClipboardSettings::load().await.unwrap_or_else(|e| {
        tracing::warn!("failed to load settings, using defaults: {}", e);
        ClipboardSettings::default()
    });
    let store = open_store(&settings);

    store.subscribe(|change, entries| {
        let top = entries.first().map(|entry| entry.preview(40)).unwrap_or_default();
        tracing::info!(?change, entries = entries.len(), %top, "clipboard history updated");
    });

    let monitor = ClipboardMonitor::new(store.clone())
        .with_interval(settings.poll_interval())
        .enabled(settings.monitoring_enabled)
        .start();

    tokio::signal::ctrl_c().await?;
    tracing::info!("shutting down");
    monitor.stop().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_store_persists_to_configured_path() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ClipboardSettings {
            storage_path: Some(dir.path().join("history.redb")),
            capacity: 2,
            ..Default::default()
        };
        let clipboard = Arc::new(MemoryClipboard::new());

        {
            let store = open_store_with(&settings, clipboard.clone());
            store.record("a");
            store.record("b");
            store.record("c");
        }

        let store = open_store_with(&settings, clipboard);
        let contents: Vec<_> = store.entries().into_iter().map(|e| e.content).collect();
        assert_eq!(contents, vec!["c", "b"]);
    }

    #[test]
    fn unusable_path_falls_back_to_memory() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "not a directory").unwrap();
        let settings = ClipboardSettings {
            storage_path: Some(blocker.join("history.redb")),
            ..Default::default()
        };

        let store = open_store_with(&settings, Arc::new(MemoryClipboard::new()));

        assert!(store.record("still recorded"));
        assert_eq!(store.len(), 1);
    }
}
