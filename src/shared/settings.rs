use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::core::clipboard::history::MAX_HISTORY_SIZE;
use crate::core::clipboard::monitor::DEFAULT_POLL_INTERVAL;
use crate::shared::errors::{HistoryError, HistoryResult};

/// Lower bound for the poll interval; anything faster just burns CPU
const MIN_POLL_INTERVAL_MS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipboardSettings {
    /// Maximum number of entries kept in history
    pub capacity: usize,
    pub poll_interval_ms: u64,
    pub monitoring_enabled: bool,
    /// Overrides the database location under the platform data dir
    pub storage_path: Option<PathBuf>,
}

impl Default for ClipboardSettings {
    fn default() -> Self {
        Self {
            capacity: MAX_HISTORY_SIZE,
            poll_interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
            monitoring_enabled: true,
            storage_path: None,
        }
    }
}

fn project_dirs() -> HistoryResult<ProjectDirs> {
    ProjectDirs::from("com", "notch", "notch-clipboard")
        .ok_or_else(|| HistoryError::Config("Failed to determine project directories".to_string()))
}

impl ClipboardSettings {
    pub fn get_settings_path() -> HistoryResult<PathBuf> {
        Ok(project_dirs()?.config_dir().join("settings.json"))
    }

    /// Database file used when `storage_path` is not set
    pub fn default_storage_path() -> HistoryResult<PathBuf> {
        Ok(project_dirs()?.data_dir().join("clipboard_history.redb"))
    }

    pub fn storage_path(&self) -> HistoryResult<PathBuf> {
        match &self.storage_path {
            Some(path) => Ok(path.clone()),
            None => Self::default_storage_path(),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub async fn load() -> HistoryResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_from(&path).await
    }

    /// Read settings from `path`, writing defaults there if it does not exist
    pub async fn load_from(path: &Path) -> HistoryResult<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(path).await?;
            return Ok(settings);
        }

        let content = fs::read_to_string(path).await?;
        let settings: Self = serde_json::from_str(&content)
            .map_err(|e| HistoryError::Config(format!("Failed to parse settings: {}", e)))?;
        Ok(settings.sanitized())
    }

    pub async fn save_to(&self, path: &Path) -> HistoryResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    fn sanitized(mut self) -> Self {
        self.capacity = self.capacity.max(1);
        self.poll_interval_ms = self.poll_interval_ms.max(MIN_POLL_INTERVAL_MS);
        self
    }
}
