//! OS clipboard access
//!
//! The history only ever needs four things from the platform: a change
//! counter that moves whenever the clipboard changes, the current plain
//! text, and the ability to clear and write it. Each backend below provides
//! those through [`SystemClipboard`].

#[cfg(target_os = "macos")]
pub mod macos;
pub mod memory;
#[cfg(not(target_os = "macos"))]
pub mod portable;

use std::sync::Arc;

use crate::shared::errors::HistoryResult;

pub use memory::MemoryClipboard;

pub trait SystemClipboard: Send + Sync {
    /// Counter that changes whenever the clipboard contents change
    fn change_count(&self) -> i64;

    /// Current plain text, `None` when the clipboard holds something else
    fn read_text(&self) -> Option<String>;

    fn write_text(&self, text: &str) -> HistoryResult<()>;

    fn clear(&self) -> HistoryResult<()>;
}

/// Clipboard backend for the current platform
pub fn platform_clipboard() -> Arc<dyn SystemClipboard> {
    #[cfg(target_os = "macos")]
    {
        Arc::new(macos::Pasteboard)
    }
    #[cfg(not(target_os = "macos"))]
    {
        Arc::new(portable::PortableClipboard::new())
    }
}
