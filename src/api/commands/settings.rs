//! Settings command module

use tauri::{AppHandle, Runtime, State};

use crate::core::clipboard::MonitorHandle;
use crate::shared::emit::emit_event;
use crate::shared::events::AppEvent;
use crate::shared::settings::ClipboardSettings;
use crate::shared::errors::HistoryResult;

/// Pause or resume clipboard capture
#[tauri::command]
pub fn set_clipboard_monitoring<R: Runtime>(
    app: AppHandle<R>,
    enabled: bool,
    monitor: State<'_, MonitorHandle>,
) -> bool {
    if enabled {
        monitor.enable();
    } else {
        monitor.disable();
    }
    emit_event(&app, AppEvent::MonitoringChanged(enabled));
    monitor.is_enabled()
}

#[tauri::command]
pub async fn get_clipboard_settings() -> HistoryResult<ClipboardSettings> {
    ClipboardSettings::load().await
}
