//! Clipboard history command module
//!
//! The panel renders `get_clipboard_history` and calls back into the store
//! through the other three commands.

use std::sync::Arc;

use tauri::State;

use crate::core::clipboard::HistoryStore;
use crate::shared::types::HistoryView;

#[tauri::command]
pub fn get_clipboard_history(store: State<'_, Arc<HistoryStore>>) -> HistoryView {
    store.view()
}

/// Copy an entry back to the system clipboard and move it to the top
#[tauri::command]
pub fn activate_clipboard_entry(id: String, store: State<'_, Arc<HistoryStore>>) -> bool {
    match store.get(&id) {
        Some(entry) => store.activate(&entry),
        None => {
            tracing::debug!(%id, "activate requested for unknown entry");
            false
        }
    }
}

#[tauri::command]
pub fn remove_clipboard_entry(id: String, store: State<'_, Arc<HistoryStore>>) -> bool {
    store.remove(&id)
}

#[tauri::command]
pub fn clear_clipboard_history(store: State<'_, Arc<HistoryStore>>) {
    store.clear();
}
