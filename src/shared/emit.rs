use tauri::{AppHandle, Emitter, Runtime};

use super::events::AppEvent;

/// Emit an application event to all windows
pub fn emit_event<R: Runtime>(app: &AppHandle<R>, event: AppEvent) {
    match &event {
        AppEvent::ClipboardHistoryUpdated { change, history } => {
            let payload = serde_json::json!({ "change": change, "history": history });
            if let Err(e) = app.emit("clipboard://updated", payload) {
                tracing::warn!(?change, "failed to emit clipboard update: {}", e);
            }
        }
        AppEvent::MonitoringChanged(enabled) => {
            if let Err(e) = app.emit("clipboard://monitoring", enabled) {
                tracing::warn!("failed to emit monitoring state: {}", e);
            }
        }
    }
}
