use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use super::history::ClipboardHistory;
use super::state::ClipboardState;
use crate::core::storage::{HistoryStorage, HISTORY_KEY};
use crate::shared::events::HistoryChange;
use crate::shared::lock_or_recover;
use crate::shared::types::{ClipboardEntry, HistoryView};
use crate::system::pasteboard::SystemClipboard;

pub type SubscriptionId = u64;

type Observer = Arc<dyn Fn(HistoryChange, &[ClipboardEntry]) + Send + Sync>;

/// Committed changes waiting to be delivered, in mutation order
#[derive(Default)]
struct Outbox {
    queue: VecDeque<(HistoryChange, Vec<ClipboardEntry>)>,
    delivering: bool,
}

/// Result of sampling the OS clipboard once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// Change counter did not move
    Unchanged,
    /// New text was added to the history
    Recorded,
    /// Text was blank or already the most recent entry
    Ignored,
    /// Clipboard changed but holds no plain text
    NonText,
    /// Clipboard changed while capture was paused
    Skipped,
}

/// Clipboard history shared by the monitor and the UI
///
/// One lock guards the entry list together with the change cursor, so poll
/// ticks and user commands never interleave. Every committed mutation is
/// written to storage and then pushed to observers. None of the public
/// operations fail; storage and clipboard errors are logged and the
/// in-memory list stays authoritative.
///
/// Observers run after the lock is released and may call back into the
/// store. A change committed from inside an observer is delivered once the
/// current round of observers returns.
pub struct HistoryStore {
    state: Mutex<ClipboardState>,
    storage: Arc<dyn HistoryStorage>,
    clipboard: Arc<dyn SystemClipboard>,
    observers: Mutex<Vec<(SubscriptionId, Observer)>>,
    outbox: Mutex<Outbox>,
    next_subscription: AtomicU64,
}

impl HistoryStore {
    /// Load persisted history and prime the cursor with the current
    /// clipboard counter, so whatever is on the clipboard at launch is not
    /// recorded.
    pub fn open(
        storage: Arc<dyn HistoryStorage>,
        clipboard: Arc<dyn SystemClipboard>,
        capacity: usize,
    ) -> Self {
        let persisted = match storage.load(HISTORY_KEY) {
            Ok(entries) => entries.unwrap_or_default(),
            Err(e) => {
                tracing::warn!("failed to load clipboard history, starting empty: {}", e);
                Vec::new()
            }
        };
        let history = ClipboardHistory::from_entries(persisted, capacity);
        tracing::info!(
            entries = history.len(),
            capacity = history.capacity(),
            "clipboard history loaded"
        );

        let state = ClipboardState::new(history, clipboard.change_count());
        Self {
            state: Mutex::new(state),
            storage,
            clipboard,
            observers: Mutex::new(Vec::new()),
            outbox: Mutex::new(Outbox::default()),
            next_subscription: AtomicU64::new(1),
        }
    }

    /// Snapshot of all entries, most recent first
    pub fn entries(&self) -> Vec<ClipboardEntry> {
        lock_or_recover(&self.state).history.entries().to_vec()
    }

    pub fn view(&self) -> HistoryView {
        HistoryView::from_entries(lock_or_recover(&self.state).history.entries())
    }

    pub fn len(&self) -> usize {
        lock_or_recover(&self.state).history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<ClipboardEntry> {
        lock_or_recover(&self.state).history.get(id).cloned()
    }

    /// Record copied text. Returns false when the text was rejected
    /// (blank, or identical to the most recent entry).
    pub fn record(&self, content: &str) -> bool {
        let recorded = {
            let mut state = lock_or_recover(&self.state);
            self.record_locked(&mut state, content)
        };
        self.deliver();
        recorded
    }

    /// Put `entry` back on the OS clipboard and move it to the top.
    ///
    /// The cursor is advanced to the counter produced by our own write before
    /// the lock is released, so the next poll does not record it again.
    pub fn activate(&self, entry: &ClipboardEntry) -> bool {
        let content = entry.content.trim();
        if content.is_empty() {
            return false;
        }

        {
            let mut state = lock_or_recover(&self.state);
            if let Err(e) = self.clipboard.clear() {
                tracing::warn!("failed to clear clipboard: {}", e);
            }
            if let Err(e) = self.clipboard.write_text(content) {
                tracing::warn!("failed to write clipboard: {}", e);
            }
            state.cursor.advance(self.clipboard.change_count());

            if state.history.promote(entry).is_none() {
                return false;
            }
            tracing::debug!(id = %entry.id, "activated clipboard entry");
            self.commit(&state, HistoryChange::Activated);
        }
        self.deliver();
        true
    }

    /// Remove the entry with `id`; unknown ids are ignored
    pub fn remove(&self, id: &str) -> bool {
        {
            let mut state = lock_or_recover(&self.state);
            if state.history.remove(id).is_none() {
                return false;
            }
            self.commit(&state, HistoryChange::Removed);
        }
        self.deliver();
        true
    }

    pub fn clear(&self) {
        {
            let mut state = lock_or_recover(&self.state);
            state.history.clear();
            tracing::info!("clipboard history cleared");
            self.commit(&state, HistoryChange::Cleared);
        }
        self.deliver();
    }

    /// Register an observer called after every committed change
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(HistoryChange, &[ClipboardEntry]) + Send + Sync + 'static,
    {
        let id = self.next_subscription.fetch_add(1, Ordering::Relaxed);
        lock_or_recover(&self.observers).push((id, Arc::new(observer)));
        id
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut observers = lock_or_recover(&self.observers);
        let before = observers.len();
        observers.retain(|(existing, _)| *existing != id);
        observers.len() != before
    }

    /// Sample the OS clipboard and record new text if its counter moved.
    ///
    /// The cursor is advanced before the text is read, so a change is
    /// handled at most once even when it turns out not to be text.
    pub fn poll_clipboard(&self) -> PollOutcome {
        let outcome = {
            let mut state = lock_or_recover(&self.state);
            if !state.cursor.advance(self.clipboard.change_count()) {
                return PollOutcome::Unchanged;
            }

            match self.clipboard.read_text() {
                Some(text) if self.record_locked(&mut state, &text) => PollOutcome::Recorded,
                Some(_) => PollOutcome::Ignored,
                None => {
                    tracing::debug!(
                        change_count = state.cursor.last_seen(),
                        "clipboard changed to non-text content"
                    );
                    PollOutcome::NonText
                }
            }
        };
        self.deliver();
        outcome
    }

    /// Consume a pending clipboard change without recording it
    pub fn skip_clipboard_change(&self) -> PollOutcome {
        let mut state = lock_or_recover(&self.state);
        if state.cursor.advance(self.clipboard.change_count()) {
            PollOutcome::Skipped
        } else {
            PollOutcome::Unchanged
        }
    }

    fn record_locked(&self, state: &mut ClipboardState, content: &str) -> bool {
        match state.history.record(content) {
            Some(entry) => tracing::debug!(
                id = %entry.id,
                chars = entry.content.chars().count(),
                "recorded clipboard entry"
            ),
            None => return false,
        }
        self.commit(state, HistoryChange::Recorded);
        true
    }

    /// Persist the full list and queue the change for observers. Must be
    /// called with the state lock held so the queue follows mutation order.
    fn commit(&self, state: &ClipboardState, change: HistoryChange) {
        let entries = state.history.entries();
        if let Err(e) = self.storage.save(HISTORY_KEY, entries) {
            tracing::warn!(?change, "failed to persist clipboard history: {}", e);
        }
        lock_or_recover(&self.outbox)
            .queue
            .push_back((change, entries.to_vec()));
    }

    /// Drain queued changes to observers, outside the state lock.
    ///
    /// Only one thread delivers at a time; a commit made while another
    /// delivery is running (from an observer or another thread) is picked
    /// up by that running loop.
    fn deliver(&self) {
        {
            let mut outbox = lock_or_recover(&self.outbox);
            if outbox.delivering || outbox.queue.is_empty() {
                return;
            }
            outbox.delivering = true;
        }
        let _delivering = DeliveryGuard(&self.outbox);

        loop {
            let (change, entries) = {
                let mut outbox = lock_or_recover(&self.outbox);
                match outbox.queue.pop_front() {
                    Some(next) => next,
                    None => {
                        outbox.delivering = false;
                        return;
                    }
                }
            };
            let observers: Vec<Observer> = lock_or_recover(&self.observers)
                .iter()
                .map(|(_, observer)| Arc::clone(observer))
                .collect();
            for observer in observers {
                observer(change, &entries);
            }
        }
    }
}

/// Releases delivery when an observer panics, so later changes still go out
struct DeliveryGuard<'a>(&'a Mutex<Outbox>);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        if std::thread::panicking() {
            lock_or_recover(self.0).delivering = false;
        }
    }
}
