use serde::Serialize;

use super::types::HistoryView;

/// What kind of mutation produced a history change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryChange {
    Recorded,
    Activated,
    Removed,
    Cleared,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "payload")] // Tagged enum for easier frontend parsing
pub enum AppEvent {
    #[serde(rename = "clipboard://updated")]
    ClipboardHistoryUpdated {
        change: HistoryChange,
        history: HistoryView,
    },

    #[serde(rename = "clipboard://monitoring")]
    MonitoringChanged(bool),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_channel_name() {
        let event = AppEvent::ClipboardHistoryUpdated {
            change: HistoryChange::Cleared,
            history: HistoryView::from_entries(&[]),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["event"], "clipboard://updated");
        assert_eq!(json["payload"]["change"], "cleared");
        assert_eq!(json["payload"]["history"]["count"], 0);
    }
}
