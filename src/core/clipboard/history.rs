use std::collections::HashSet;

use crate::shared::types::ClipboardEntry;

/// Maximum number of clipboard entries to keep
pub const MAX_HISTORY_SIZE: usize = 50;

/// Ordered, deduplicated, capacity-bounded list of clipboard entries
///
/// Position 0 is the most recent entry. No two entries share the same
/// content and the list never grows past `capacity`. This type holds no
/// I/O; persistence and notification live in [`super::store::HistoryStore`].
#[derive(Debug, Clone)]
pub struct ClipboardHistory {
    entries: Vec<ClipboardEntry>,
    capacity: usize,
}

impl ClipboardHistory {
    pub fn new() -> Self {
        Self::with_capacity(MAX_HISTORY_SIZE)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::new(),
            capacity: capacity.max(1),
        }
    }

    /// Rebuild from persisted entries, dropping anything that breaks the
    /// list invariants. Earlier positions win over later duplicates.
    pub fn from_entries(entries: Vec<ClipboardEntry>, capacity: usize) -> Self {
        let mut history = Self::with_capacity(capacity);
        let mut seen_content = HashSet::new();
        let mut seen_ids = HashSet::new();

        for mut entry in entries {
            let trimmed = entry.content.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.len() != entry.content.len() {
                entry.content = trimmed.to_string();
            }
            if !seen_content.insert(entry.content.clone()) || !seen_ids.insert(entry.id.clone()) {
                continue;
            }
            history.entries.push(entry);
            if history.entries.len() == history.capacity {
                break;
            }
        }

        history
    }

    pub fn entries(&self) -> &[ClipboardEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Most recent entry
    pub fn top(&self) -> Option<&ClipboardEntry> {
        self.entries.first()
    }

    pub fn get(&self, id: &str) -> Option<&ClipboardEntry> {
        self.entries.iter().find(|entry| entry.id == id)
    }

    /// Record newly copied text.
    ///
    /// Returns the inserted entry, or `None` when the text is blank or
    /// already the most recent entry. Text found further down the list is
    /// moved to the top with a fresh id and timestamp.
    pub fn record(&mut self, content: &str) -> Option<&ClipboardEntry> {
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return None;
        }
        if self.top().is_some_and(|top| top.content == trimmed) {
            return None;
        }

        self.entries.retain(|entry| entry.content != trimmed);
        self.push_front(ClipboardEntry::new(trimmed));
        self.top()
    }

    /// Move an entry's content to the top under a new identity.
    ///
    /// Unlike [`record`](Self::record) this always reinserts, even when the
    /// entry is already first. Returns `None` only for blank content.
    pub fn promote(&mut self, entry: &ClipboardEntry) -> Option<&ClipboardEntry> {
        let trimmed = entry.content.trim();
        if trimmed.is_empty() {
            return None;
        }

        self.entries
            .retain(|existing| existing.id != entry.id && existing.content != trimmed);
        self.push_front(ClipboardEntry::new(trimmed));
        self.top()
    }

    pub fn remove(&mut self, id: &str) -> Option<ClipboardEntry> {
        let pos = self.entries.iter().position(|entry| entry.id == id)?;
        Some(self.entries.remove(pos))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn push_front(&mut self, entry: ClipboardEntry) {
        self.entries.insert(0, entry);
        // at most one net insertion per call, so one pop restores the bound
        if self.entries.len() > self.capacity {
            self.entries.pop();
        }
    }
}

impl Default for ClipboardHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contents(history: &ClipboardHistory) -> Vec<&str> {
        history.entries().iter().map(|e| e.content.as_str()).collect()
    }

    #[test]
    fn test_record_orders_most_recent_first() {
        let mut history = ClipboardHistory::new();

        history.record("hello");
        assert_eq!(contents(&history), vec!["hello"]);

        history.record("world");
        assert_eq!(contents(&history), vec!["world", "hello"]);

        history.record("hello");
        assert_eq!(contents(&history), vec!["hello", "world"]);

        let before = history.entries().to_vec();
        assert!(history.record("hello").is_none());
        assert_eq!(history.entries(), before.as_slice());
    }

    #[test]
    fn test_blank_content_is_ignored() {
        let mut history = ClipboardHistory::new();
        assert!(history.record("").is_none());
        assert!(history.record("   ").is_none());
        assert!(history.record("\n\t ").is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_content_is_trimmed_before_dedup() {
        let mut history = ClipboardHistory::new();
        history.record("  padded  ");
        assert_eq!(contents(&history), vec!["padded"]);

        assert!(history.record("padded\n").is_none());
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_dedup_is_case_sensitive() {
        let mut history = ClipboardHistory::new();
        history.record("Rust");
        history.record("rust");
        assert_eq!(contents(&history), vec!["rust", "Rust"]);
    }

    #[test]
    fn test_existing_content_moves_to_top_once() {
        let mut history = ClipboardHistory::new();
        for word in ["a", "b", "c", "d"] {
            history.record(word);
        }
        let old_id = history.entries()[2].id.clone();

        history.record("b");

        assert_eq!(contents(&history), vec!["b", "d", "c", "a"]);
        assert_ne!(history.entries()[0].id, old_id);
        assert_eq!(history.entries().iter().filter(|e| e.content == "b").count(), 1);
    }

    #[test]
    fn test_max_history_size() {
        let mut history = ClipboardHistory::new();
        for i in 0..MAX_HISTORY_SIZE {
            history.record(&format!("item {}", i));
        }
        assert_eq!(history.len(), MAX_HISTORY_SIZE);
        assert_eq!(history.entries()[MAX_HISTORY_SIZE - 1].content, "item 0");

        history.record("new");

        assert_eq!(history.len(), MAX_HISTORY_SIZE);
        assert_eq!(history.entries()[0].content, "new");
        assert!(history.entries().iter().all(|e| e.content != "item 0"));
        assert_eq!(history.entries()[MAX_HISTORY_SIZE - 1].content, "item 1");
    }

    #[test]
    fn test_invariants_hold_under_mixed_input() {
        let mut history = ClipboardHistory::with_capacity(5);
        let inputs = ["x", " y", "x", "z ", "", "w", "v", "y", "u", "x", "   ", "t"];

        for input in inputs {
            history.record(input);
            assert!(history.len() <= 5);
            let mut seen = HashSet::new();
            assert!(history.entries().iter().all(|e| seen.insert(e.content.clone())));
        }
        assert_eq!(contents(&history), vec!["t", "x", "u", "y", "v"]);
    }

    #[test]
    fn test_promote_always_moves_to_top() {
        let mut history = ClipboardHistory::new();
        history.record("first");
        history.record("second");
        let top = history.entries()[0].clone();

        let promoted = history.promote(&top).cloned().unwrap();

        assert_eq!(contents(&history), vec!["second", "first"]);
        assert_ne!(promoted.id, top.id);
        assert!(promoted.timestamp >= top.timestamp);

        let bottom = history.entries()[1].clone();
        history.promote(&bottom);
        assert_eq!(contents(&history), vec!["first", "second"]);
        assert!(history.get(&bottom.id).is_none());
    }

    #[test]
    fn test_promote_of_stale_entry_keeps_content_unique() {
        let mut history = ClipboardHistory::new();
        history.record("shared");
        let stale = history.entries()[0].clone();
        history.remove(&stale.id);
        history.record("shared");
        history.record("other");

        history.promote(&stale);

        assert_eq!(contents(&history), vec!["shared", "other"]);
    }

    #[test]
    fn test_remove_unknown_id_is_noop() {
        let mut history = ClipboardHistory::new();
        history.record("keep");
        let before = history.entries().to_vec();

        assert!(history.remove("missing").is_none());
        assert_eq!(history.entries(), before.as_slice());
    }

    #[test]
    fn test_clear() {
        let mut history = ClipboardHistory::new();
        history.record("Item 1");
        history.record("Item 2");
        assert_eq!(history.len(), 2);

        history.clear();

        assert!(history.is_empty());
    }

    #[test]
    fn test_from_entries_normalizes() {
        let mut a = ClipboardEntry::new("a");
        a.content = " a ".to_string();
        let dup = ClipboardEntry::new("a");
        let blank = ClipboardEntry::new("   ");
        let b = ClipboardEntry::new("b");
        let c = ClipboardEntry::new("c");

        let history = ClipboardHistory::from_entries(vec![a.clone(), dup, blank, b, c], 2);

        assert_eq!(contents(&history), vec!["a", "b"]);
        assert_eq!(history.entries()[0].id, a.id);
    }
}
