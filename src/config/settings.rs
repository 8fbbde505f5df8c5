//! User configuration settings
//!
//! Layered configuration: defaults → config file → environment variables

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Error, Result};
use crate::page::ButtonLabels;
use crate::store::DEFAULT_STORAGE_KEY;

/// Highest refresh rate honoured; a 1ms tick is the floor
pub const MAX_UI_REFRESH_FPS: u32 = 1000;

/// Prefix for environment overrides (`TOPIC_TRACKER_STORAGE_KEY`, `TOPIC_TRACKER_LABELS__COMPLETED`, ...)
pub const ENV_PREFIX: &str = "TOPIC_TRACKER_";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Key the completed topic list is stored under
    pub storage_key: String,

    /// Set to false to run as if no storage were available
    pub storage_enabled: bool,

    /// Path to the storage file (defaults to the data directory)
    pub storage_file: Option<PathBuf>,

    /// Path to the topic catalog (defaults to the config directory)
    pub catalog_file: Option<PathBuf>,

    /// Button texts
    pub labels: ButtonLabels,

    /// UI refresh rate in FPS
    pub ui_refresh_fps: u32,

    /// Enable debug logging
    pub debug: bool,

    /// Log file path used in TUI mode
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            storage_enabled: true,
            storage_file: None,
            catalog_file: None,
            labels: ButtonLabels::default(),
            ui_refresh_fps: 10,
            debug: false,
            log_file: None,
        }
    }
}

impl Config {
    /// Load configuration from all sources
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration using `path` as the config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let config: Config = Figment::new()
            // Start with defaults
            .merge(Serialized::defaults(Config::default()))
            // Layer config file if it exists
            .merge(Toml::file(path))
            // Layer environment variables
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        Ok(config)
    }

    /// Get the configuration file path
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Get the data directory path
    pub fn data_dir() -> Result<PathBuf> {
        let dirs = Self::project_dirs()?;
        Ok(dirs.data_dir().to_path_buf())
    }

    /// Resolve the storage file path
    pub fn storage_file(&self) -> Result<PathBuf> {
        match &self.storage_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join("local_storage.json")),
        }
    }

    /// Resolve the catalog file path
    pub fn catalog_file(&self) -> Result<PathBuf> {
        match &self.catalog_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::project_dirs()?.config_dir().join("topics.toml")),
        }
    }

    /// Interval between UI ticks, with `ui_refresh_fps` clamped to `1..=1000`
    pub fn tick_rate(&self) -> Duration {
        let fps = self.ui_refresh_fps.clamp(1, MAX_UI_REFRESH_FPS);
        Duration::from_millis(1000 / u64::from(fps))
    }

    /// Resolve the log file path
    pub fn log_file(&self) -> PathBuf {
        self.log_file
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join("topic-tracker.log"))
    }

    /// Save current configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|_e| {
                Error::Config(ConfigError::DirectoryCreationFailed(parent.to_path_buf()))
            })?;
        }

        let toml = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        std::fs::write(path, toml).map_err(|e| ConfigError::SaveFailed(e.to_string()))?;

        Ok(())
    }

    fn project_dirs() -> Result<ProjectDirs> {
        ProjectDirs::from("dev", "topic-tracker", "topic-tracker").ok_or_else(|| {
            Error::Config(ConfigError::LoadFailed(
                "Could not determine home directory".to_string(),
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.storage_key, "topicsCompleted");
        assert!(config.storage_enabled);
        assert_eq!(config.labels.completed, "Completed!");
        assert_eq!(config.labels.not_completed, "Mark as completed");
        assert_eq!(config.ui_refresh_fps, 10);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config).unwrap();
        assert!(toml.contains("storage_key"));
        assert!(toml.contains("topicsCompleted"));
        assert!(toml.contains("[labels]"));
    }

    #[test]
    fn test_file_layer_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "storage_key = \"progress\"\nstorage_enabled = false\n\n[labels]\ncompleted = \"Done\"\n",
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.storage_key, "progress");
        assert!(!config.storage_enabled);
        assert_eq!(config.labels.completed, "Done");
        // Untouched keys keep their defaults
        assert_eq!(config.labels.not_completed, "Mark as completed");
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = Config::load_from(&temp_dir.path().join("absent.toml")).unwrap();
        assert_eq!(config.storage_key, Config::default().storage_key);
    }

    #[test]
    fn test_save_load_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.storage_file = Some(temp_dir.path().join("storage.json"));
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.storage_file, config.storage_file);
        assert_eq!(loaded.storage_file().unwrap(), temp_dir.path().join("storage.json"));
    }

    #[test]
    fn test_tick_rate_is_never_zero() {
        let tick = |fps| {
            Config {
                ui_refresh_fps: fps,
                ..Config::default()
            }
            .tick_rate()
        };

        assert_eq!(tick(10), Duration::from_millis(100));
        assert_eq!(tick(0), Duration::from_millis(1000));
        assert_eq!(tick(2000), Duration::from_millis(1));
        assert_eq!(tick(u32::MAX), Duration::from_millis(1));
    }
}
