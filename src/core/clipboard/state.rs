use super::history::ClipboardHistory;

/// Last clipboard change counter seen by this process
///
/// Used to tell external clipboard changes apart from ones already handled,
/// including the writes made when an entry is activated. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeCursor {
    last_seen: i64,
}

impl ChangeCursor {
    pub fn new(current: i64) -> Self {
        Self { last_seen: current }
    }

    pub fn last_seen(&self) -> i64 {
        self.last_seen
    }

    /// Advance to `current`; returns true when it differs from the last value
    pub fn advance(&mut self, current: i64) -> bool {
        if current == self.last_seen {
            return false;
        }
        self.last_seen = current;
        true
    }
}

/// Everything guarded by the store's single lock
#[derive(Debug)]
pub struct ClipboardState {
    pub history: ClipboardHistory,
    pub cursor: ChangeCursor,
}

impl ClipboardState {
    pub fn new(history: ClipboardHistory, current_change_count: i64) -> Self {
        Self {
            history,
            cursor: ChangeCursor::new(current_change_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_reports_only_changes() {
        let mut cursor = ChangeCursor::new(7);
        assert!(!cursor.advance(7));
        assert!(cursor.advance(8));
        assert_eq!(cursor.last_seen(), 8);
        assert!(!cursor.advance(8));
    }

    #[test]
    fn any_different_value_counts_as_change() {
        // counters can reset, e.g. after the pasteboard server restarts
        let mut cursor = ChangeCursor::new(40);
        assert!(cursor.advance(3));
        assert_eq!(cursor.last_seen(), 3);
    }
}
