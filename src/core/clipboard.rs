//! Clipboard module
//!
//! Provides clipboard history tracking and monitoring functionality.
//!
//! - `history`: ordering, deduplication and capacity policy
//! - `store`: shared, persisted, observable history
//! - `monitor`: background task that polls the OS clipboard for changes

pub mod history;
pub mod monitor;
pub mod state;
pub mod store;

pub use history::{ClipboardHistory, MAX_HISTORY_SIZE};
pub use monitor::{ClipboardMonitor, MonitorHandle};
pub use store::{HistoryStore, PollOutcome, SubscriptionId};
