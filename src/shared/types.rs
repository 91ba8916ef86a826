use chrono::{DateTime, Local, Utc};
use serde::{Deserialize, Serialize};

/// Number of characters shown in a panel row before truncating
pub const PREVIEW_CHARS: usize = 100;

/// A single recorded clipboard snippet
///
/// `content` is always trimmed and non-empty; entries are only built by the
/// history once its insertion checks have passed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClipboardEntry {
    pub id: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ClipboardEntry {
    /// Create an entry with a fresh id, stamped now
    pub(crate) fn new(content: impl Into<String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            content: content.into(),
            timestamp: Utc::now(),
        }
    }

    /// One-line preview, cut on a char boundary
    pub fn preview(&self, max_chars: usize) -> String {
        let flat = self.content.split_whitespace().collect::<Vec<_>>().join(" ");
        if flat.chars().count() > max_chars {
            let cut: String = flat.chars().take(max_chars).collect();
            format!("{}...", cut)
        } else {
            flat
        }
    }

    /// Row model for the history panel
    pub fn view(&self) -> EntryView {
        EntryView {
            id: self.id.clone(),
            preview: self.preview(PREVIEW_CHARS),
            content: self.content.clone(),
            timestamp: self.timestamp,
            time_label: self.timestamp.with_timezone(&Local).format("%H:%M").to_string(),
        }
    }
}

/// Read-only row handed to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct EntryView {
    pub id: String,
    pub preview: String,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub time_label: String,
}

/// Whole panel snapshot, most recent first
#[derive(Debug, Clone, Serialize)]
pub struct HistoryView {
    pub count: usize,
    pub entries: Vec<EntryView>,
}

impl HistoryView {
    pub fn from_entries(entries: &[ClipboardEntry]) -> Self {
        Self {
            count: entries.len(),
            entries: entries.iter().map(ClipboardEntry::view).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_entries_get_distinct_ids() {
        let a = ClipboardEntry::new("same");
        let b = ClipboardEntry::new("same");
        assert_ne!(a.id, b.id);
        assert_eq!(a.content, b.content);
    }

    #[test]
    fn preview_flattens_whitespace() {
        let entry = ClipboardEntry::new("fn main() {\n    println!(\"hi\");\n}");
        assert_eq!(entry.preview(100), "fn main() { println!(\"hi\"); }");
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        let entry = ClipboardEntry::new("héllo wörld");
        assert_eq!(entry.preview(4), "héll...");
    }

    #[test]
    fn view_counts_entries() {
        let entries = vec![ClipboardEntry::new("b"), ClipboardEntry::new("a")];
        let view = HistoryView::from_entries(&entries);
        assert_eq!(view.count, 2);
        assert_eq!(view.entries[0].content, "b");
        assert_eq!(view.entries[0].time_label.len(), 5);
        assert_eq!(view.entries.len(), view.count);
    }

    #[test]
    fn serde_roundtrip_keeps_timestamp() {
        let entry = ClipboardEntry::new("stamp");
        let json = serde_json::to_string(&entry).unwrap();
        let back: ClipboardEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
