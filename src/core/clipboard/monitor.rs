use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::store::{HistoryStore, PollOutcome};

/// How often the OS clipboard counter is sampled
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// Clipboard monitor that polls for changes
///
/// `start` consumes the monitor, so a single monitor can only ever run one
/// poll loop. The returned [`MonitorHandle`] controls and stops it.
pub struct ClipboardMonitor {
    store: Arc<HistoryStore>,
    interval: Duration,
    enabled: bool,
}

impl ClipboardMonitor {
    pub fn new(store: Arc<HistoryStore>) -> Self {
        Self {
            store,
            interval: DEFAULT_POLL_INTERVAL,
            enabled: true,
        }
    }

    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Start paused or capturing
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Spawn the poll loop on the current tokio runtime
    pub fn start(self) -> MonitorHandle {
        let enabled = Arc::new(AtomicBool::new(self.enabled));
        let (shutdown_tx, mut shutdown_rx) = oneshot::channel::<()>();
        let store = self.store;
        let interval = self.interval;
        let flag = Arc::clone(&enabled);

        let task = tokio::spawn(async move {
            tracing::info!(
                interval_ms = interval.as_millis() as u64,
                "clipboard monitoring started"
            );

            let mut ticker = tokio::time::interval(interval.max(Duration::from_millis(1)));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                tokio::select! {
                    // fires on an explicit stop and when the handle is dropped
                    _ = &mut shutdown_rx => break,
                    _ = ticker.tick() => {
                        // clipboard reads and the redb commit block
                        let store = Arc::clone(&store);
                        let capturing = flag.load(Ordering::Relaxed);
                        let outcome = tokio::task::spawn_blocking(move || {
                            if capturing {
                                store.poll_clipboard()
                            } else {
                                store.skip_clipboard_change()
                            }
                        })
                        .await;
                        match outcome {
                            Ok(PollOutcome::Unchanged) => {}
                            Ok(PollOutcome::Skipped) => {
                                tracing::debug!("clipboard change skipped while paused")
                            }
                            Ok(other) => tracing::debug!(?other, "clipboard changed"),
                            Err(e) => tracing::warn!("clipboard poll failed: {}", e),
                        }
                    }
                }
            }

            tracing::info!("clipboard monitoring stopped");
        });

        MonitorHandle {
            enabled,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }
}

/// Control handle for a running [`ClipboardMonitor`]
///
/// Dropping the handle stops the poll loop; `stop` does the same and waits
/// for the task to finish.
pub struct MonitorHandle {
    enabled: Arc<AtomicBool>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

impl MonitorHandle {
    pub fn enable(&self) {
        self.enabled.store(true, Ordering::Relaxed);
        tracing::info!("clipboard monitoring enabled");
    }

    /// Pause capture; changes made while paused are consumed, not recorded
    pub fn disable(&self) {
        self.enabled.store(false, Ordering::Relaxed);
        tracing::info!("clipboard monitoring disabled");
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    /// Flip capture on/off, returning the new state
    pub fn toggle(&self) -> bool {
        let enabled = !self.enabled.fetch_xor(true, Ordering::Relaxed);
        tracing::info!(enabled, "clipboard monitoring toggled");
        enabled
    }

    #[cfg(test)]
    fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stop polling and wait for the loop to exit
    pub async fn stop(mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::warn!("clipboard monitor task ended abnormally: {}", e);
            }
        }
    }
}
