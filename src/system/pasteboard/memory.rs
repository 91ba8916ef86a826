use std::sync::Mutex;

use super::SystemClipboard;
use crate::shared::errors::HistoryResult;
use crate::shared::lock_or_recover;

/// In-process clipboard with a real change counter
///
/// Useful for headless embedding and tests. `copy_external` and
/// `copy_non_text` stand in for other applications touching the clipboard.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    inner: Mutex<Contents>,
}

#[derive(Debug, Default)]
struct Contents {
    text: Option<String>,
    count: i64,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Another application copied `text`
    pub fn copy_external(&self, text: &str) {
        let mut inner = lock_or_recover(&self.inner);
        inner.text = Some(text.to_string());
        inner.count += 1;
    }

    /// Another application copied something that is not plain text
    pub fn copy_non_text(&self) {
        let mut inner = lock_or_recover(&self.inner);
        inner.text = None;
        inner.count += 1;
    }

    pub fn text(&self) -> Option<String> {
        lock_or_recover(&self.inner).text.clone()
    }
}

impl SystemClipboard for MemoryClipboard {
    fn change_count(&self) -> i64 {
        lock_or_recover(&self.inner).count
    }

    fn read_text(&self) -> Option<String> {
        self.text()
    }

    fn write_text(&self, text: &str) -> HistoryResult<()> {
        self.copy_external(text);
        Ok(())
    }

    fn clear(&self) -> HistoryResult<()> {
        self.copy_non_text();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_change_moves_the_counter() {
        let clipboard = MemoryClipboard::new();
        assert_eq!(clipboard.change_count(), 0);

        clipboard.copy_external("a");
        assert_eq!(clipboard.change_count(), 1);
        assert_eq!(clipboard.read_text().as_deref(), Some("a"));

        clipboard.clear().unwrap();
        clipboard.write_text("b").unwrap();
        assert_eq!(clipboard.change_count(), 3);
        assert_eq!(clipboard.text().as_deref(), Some("b"));

        clipboard.copy_non_text();
        assert_eq!(clipboard.read_text(), None);
    }
}
