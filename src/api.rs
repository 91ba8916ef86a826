//! Tauri plugin exposing the clipboard history to the webview
//!
//! Register with `tauri::Builder::default().plugin(notch_clipboard_lib::api::init())`.

pub mod commands;

use std::sync::Arc;

use tauri::plugin::{Builder, TauriPlugin};
use tauri::{AppHandle, Manager, Runtime};

use crate::core::clipboard::ClipboardMonitor;
use crate::shared::emit::emit_event;
use crate::shared::events::AppEvent;
use crate::shared::settings::ClipboardSettings;
use crate::shared::types::HistoryView;
use crate::system::pasteboard::{platform_clipboard, SystemClipboard};

pub const PLUGIN_NAME: &str = "clipboard-history";

/// Plugin backed by the user's settings file and the platform clipboard
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    builder()
        .setup(|app, _api| {
            let settings = tauri::async_runtime::block_on(ClipboardSettings::load())
                .unwrap_or_else(|e| {
                    tracing::warn!("failed to load settings, using defaults: {}", e);
                    ClipboardSettings::default()
                });
            install(app, settings, platform_clipboard())
        })
        .build()
}

/// Plugin with explicit settings and clipboard backend
pub fn init_with<R: Runtime>(
    settings: ClipboardSettings,
    clipboard: Arc<dyn SystemClipboard>,
) -> TauriPlugin<R> {
    builder()
        .setup(move |app, _api| install(app, settings, clipboard))
        .build()
}

fn builder<R: Runtime>() -> Builder<R> {
    Builder::new(PLUGIN_NAME).invoke_handler(tauri::generate_handler![
        commands::clipboard::get_clipboard_history,
        commands::clipboard::activate_clipboard_entry,
        commands::clipboard::remove_clipboard_entry,
        commands::clipboard::clear_clipboard_history,
        commands::settings::set_clipboard_monitoring,
        commands::settings::get_clipboard_settings,
    ])
}

fn install<R: Runtime>(
    app: &AppHandle<R>,
    settings: ClipboardSettings,
    clipboard: Arc<dyn SystemClipboard>,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = crate::open_store_with(&settings, clipboard);

    let handle = app.clone();
    store.subscribe(move |change, entries| {
        emit_event(
            &handle,
            AppEvent::ClipboardHistoryUpdated {
                change,
                history: HistoryView::from_entries(entries),
            },
        );
    });

    // tokio::spawn needs a runtime context; tauri's runtime provides one
    let monitor_store = store.clone();
    let monitor = tauri::async_runtime::block_on(async move {
        ClipboardMonitor::new(monitor_store)
            .with_interval(settings.poll_interval())
            .enabled(settings.monitoring_enabled)
            .start()
    });

    app.manage(store);
    app.manage(monitor);
    Ok(())
}

#[cfg(all(test, feature = "tauri-test"))]
mod tests {
    use super::*;
    use crate::core::clipboard::{HistoryStore, MonitorHandle};
    use crate::system::pasteboard::MemoryClipboard;

    #[test]
    fn plugin_manages_store_and_monitor() {
        let dir = tempfile::tempdir().unwrap();
        let settings = ClipboardSettings {
            storage_path: Some(dir.path().join("history.redb")),
            ..Default::default()
        };
        let clipboard = Arc::new(MemoryClipboard::new());

        let app = tauri::test::mock_builder()
            .plugin(init_with(settings, clipboard.clone()))
            .build(tauri::test::mock_context(tauri::test::noop_assets()))
            .unwrap();

        let store = app.state::<Arc<HistoryStore>>();
        assert!(store.record("from the panel"));
        assert_eq!(store.view().count, 1);

        let monitor = app.state::<MonitorHandle>();
        assert!(monitor.is_enabled());
        monitor.disable();
        assert!(!monitor.is_enabled());
    }
}
