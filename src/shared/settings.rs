use serde::{Deserialize, Serialize};
use tokio::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use directories::ProjectDirs;

use crate::constants::{
    APP_NAME, APP_ORGANIZATION, APP_QUALIFIER, DEFAULT_CLIPBOARD_POLL_MS,
    DEFAULT_MAX_HISTORY_SIZE, DEFAULT_NAVIGATION_POLL_MS, SETTINGS_FILENAME,
};
use crate::shared::errors::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AppSettings {
    pub history: HistorySettings,
    pub navigation: NavigationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    pub max_size: usize,
    pub poll_interval_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationSettings {
    pub poll_interval_ms: u64,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_MAX_HISTORY_SIZE,
            poll_interval_ms: DEFAULT_CLIPBOARD_POLL_MS,
        }
    }
}

impl Default for NavigationSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_NAVIGATION_POLL_MS,
        }
    }
}

impl AppSettings {
    pub fn get_settings_path() -> AppResult<PathBuf> {
        ProjectDirs::from(APP_QUALIFIER, APP_ORGANIZATION, APP_NAME)
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILENAME))
            .ok_or_else(|| AppError::Settings("Failed to determine config directory".to_string()))
    }

    /// Load from the platform config directory, writing defaults on first run
    pub async fn load() -> AppResult<Self> {
        let path = Self::get_settings_path()?;
        Self::load_from(&path).await
    }

    pub async fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            let settings = Self::default();
            settings.save_to(path).await?;
            tracing::info!("[Settings] Wrote defaults to {}", path.display());
            return Ok(settings);
        }

        let content = fs::read_to_string(path).await
            .map_err(|e| AppError::Settings(format!("Failed to read settings file: {}", e)))?;

        let settings: Self = serde_json::from_str(&content)?;
        Ok(settings.validated())
    }

    pub async fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Replace zero values with defaults
    pub fn validated(mut self) -> Self {
        if self.history.max_size == 0 {
            tracing::warn!("[Settings] history.max_size must be positive, using {}", DEFAULT_MAX_HISTORY_SIZE);
            self.history.max_size = DEFAULT_MAX_HISTORY_SIZE;
        }
        if self.history.poll_interval_ms == 0 {
            tracing::warn!("[Settings] history.poll_interval_ms must be positive, using {}", DEFAULT_CLIPBOARD_POLL_MS);
            self.history.poll_interval_ms = DEFAULT_CLIPBOARD_POLL_MS;
        }
        if self.navigation.poll_interval_ms == 0 {
            tracing::warn!("[Settings] navigation.poll_interval_ms must be positive, using {}", DEFAULT_NAVIGATION_POLL_MS);
            self.navigation.poll_interval_ms = DEFAULT_NAVIGATION_POLL_MS;
        }
        self
    }

    pub fn clipboard_poll_interval(&self) -> Duration {
        Duration::from_millis(self.history.poll_interval_ms)
    }

    pub fn navigation_poll_interval(&self) -> Duration {
        Duration::from_millis(self.navigation.poll_interval_ms)
    }
}
