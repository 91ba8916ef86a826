pub mod types;
pub mod settings;
pub mod errors;
pub mod events;
pub mod logging;
#[cfg(feature = "tauri")]
pub mod emit;

pub use errors::{HistoryError, HistoryResult};

use std::sync::{Mutex, MutexGuard};

/// Lock a mutex, recovering the guard if a previous holder panicked
pub(crate) fn lock_or_recover<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            tracing::warn!("mutex poisoned, recovering");
            poisoned.into_inner()
        }
    }
}
