use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use cli_clipboard::{ClipboardContext, ClipboardProvider};

use super::SystemClipboard;
use crate::shared::errors::{HistoryError, HistoryResult};
use crate::shared::lock_or_recover;

/// Clipboard backed by `cli-clipboard` for platforms without a native
/// change counter.
///
/// The counter is synthesized: every sample hashes the current text and
/// bumps a local count when the hash differs from the previous sample.
/// Writes and clears made through this type bump it as well.
pub struct PortableClipboard {
    sample: Mutex<Sample>,
}

#[derive(Debug, Default)]
struct Sample {
    digest: Option<u64>,
    count: i64,
}

impl Sample {
    fn observe(&mut self, digest: Option<u64>) -> i64 {
        if digest != self.digest {
            self.digest = digest;
            self.count += 1;
        }
        self.count
    }
}

fn digest(text: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    hasher.finish()
}

fn read_contents() -> Option<String> {
    ClipboardContext::new()
        .and_then(|mut ctx| ctx.get_contents())
        .ok()
}

impl PortableClipboard {
    pub fn new() -> Self {
        Self {
            sample: Mutex::new(Sample::default()),
        }
    }
}

impl Default for PortableClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClipboard for PortableClipboard {
    fn change_count(&self) -> i64 {
        let current = read_contents().map(|text| digest(&text));
        lock_or_recover(&self.sample).observe(current)
    }

    fn read_text(&self) -> Option<String> {
        read_contents()
    }

    fn write_text(&self, text: &str) -> HistoryResult<()> {
        ClipboardContext::new()
            .and_then(|mut ctx| ctx.set_contents(text.to_owned()))
            .map_err(|e| HistoryError::Clipboard(format!("Failed to write clipboard: {}", e)))?;
        lock_or_recover(&self.sample).observe(Some(digest(text)));
        Ok(())
    }

    fn clear(&self) -> HistoryResult<()> {
        ClipboardContext::new()
            .and_then(|mut ctx| ctx.clear())
            .map_err(|e| HistoryError::Clipboard(format!("Failed to clear clipboard: {}", e)))?;
        lock_or_recover(&self.sample).observe(None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_counts_distinct_digests() {
        let mut sample = Sample::default();
        assert_eq!(sample.observe(None), 0);
        assert_eq!(sample.observe(Some(digest("a"))), 1);
        assert_eq!(sample.observe(Some(digest("a"))), 1);
        assert_eq!(sample.observe(Some(digest("b"))), 2);
        assert_eq!(sample.observe(None), 3);
    }
}
