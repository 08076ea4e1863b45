//! Application paths and persisted settings.
//!
//! Directory priority:
//! 1. CLI `--config-dir` argument
//! 2. `TIMELANE_CONFIG_DIR` environment variable
//! 3. Local folder IF any config files exist (timelane.json, timelane.log)
//! 4. Platform-specific directory from dirs-next (default)
//!
//! Platform paths:
//! - Linux: ~/.config/timelane/{name}, ~/.local/share/timelane/{name}
//! - macOS: ~/Library/Application Support/timelane/{name}
//! - Windows: %APPDATA%\timelane\{name}

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::entities::ItemStore;
use crate::widgets::timeline::TimelineState;

/// Settings file name inside the config directory
pub const SETTINGS_FILE: &str = "timelane.json";
/// Default log file name inside the data directory
pub const LOG_FILE: &str = "timelane.log";

/// Configuration for overriding default application paths
#[derive(Debug, Clone, Default)]
pub struct PathConfig {
    /// Custom config directory (from CLI or ENV)
    pub config_dir: Option<PathBuf>,
}

impl PathConfig {
    /// Priority: CLI args → ENV var (TIMELANE_CONFIG_DIR) → None (use defaults)
    pub fn from_env_and_cli(cli_dir: Option<PathBuf>) -> Self {
        let config_dir = cli_dir.or_else(|| std::env::var("TIMELANE_CONFIG_DIR").ok().map(PathBuf::from));
        Self { config_dir }
    }
}

/// Get path to a configuration file
pub fn config_file(name: &str, config: &PathConfig) -> PathBuf {
    get_config_dir(config).join(name)
}

/// Get path to a data file (logs)
pub fn data_file(name: &str, config: &PathConfig) -> PathBuf {
    get_data_dir(config).join(name)
}

/// Ensure that configuration and data directories exist
pub fn ensure_dirs(config: &PathConfig) -> Result<()> {
    let config_dir = get_config_dir(config);
    let data_dir = get_data_dir(config);

    if !config_dir.exists() {
        fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory: {}", config_dir.display()))?;
    }
    if data_dir != config_dir && !data_dir.exists() {
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    }
    Ok(())
}

fn has_local_config_files(dir: &Path) -> bool {
    [SETTINGS_FILE, LOG_FILE].iter().any(|f| dir.join(f).exists())
}

fn get_config_dir(config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::config_dir())
}

fn get_data_dir(config: &PathConfig) -> PathBuf {
    resolve_dir(config, dirs_next::data_dir())
}

fn resolve_dir(config: &PathConfig, platform: Option<PathBuf>) -> PathBuf {
    if let Some(dir) = &config.config_dir {
        return dir.clone();
    }
    if let Ok(current_dir) = std::env::current_dir() {
        if has_local_config_files(&current_dir) {
            return current_dir;
        }
    }
    platform
        .map(|dir| dir.join("timelane"))
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Persisted application settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Last viewed window and grid width
    pub timeline: TimelineState,
    /// Items file opened when none is given on the command line
    pub items_file: Option<PathBuf>,
}

impl AppSettings {
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Read settings error: {}", path.display()))?;
        let settings: Self =
            serde_json::from_str(&json).with_context(|| format!("Parse settings error: {}", path.display()))?;
        Ok(Self {
            timeline: settings.timeline.sanitized(),
            ..settings
        })
    }

    /// Load settings, falling back to defaults when missing or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            debug!("No settings at {}, using defaults", path.display());
            return Self::default();
        }
        Self::load(path).unwrap_or_else(|e| {
            warn!("{:#}; using defaults", e);
            Self::default()
        })
    }

    /// Open the items collection.
    ///
    /// A file named on the command line must load. The file remembered from
    /// an earlier run may have moved; then the bundled demo items are used.
    pub fn open_items(&self, cli_file: Option<&Path>) -> Result<ItemStore> {
        if let Some(path) = cli_file {
            return ItemStore::from_json(path);
        }
        match &self.items_file {
            Some(path) => match ItemStore::from_json(path) {
                Ok(store) => return Ok(store),
                Err(e) => warn!("{:#}; using bundled demo items", e),
            },
            None => info!("No items file given, using bundled demo items"),
        }
        ItemStore::seed()
    }

    /// Remember an items file as an absolute path so later runs find it from any directory.
    pub fn remember_items_file(&mut self, path: &Path) {
        let absolute = fs::canonicalize(path).unwrap_or_else(|e| {
            warn!("Cannot resolve {}: {}", path.display(), e);
            path.to_path_buf()
        });
        self.items_file = Some(absolute);
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let settings = Self {
            timeline: self.timeline.clone().sanitized(),
            items_file: self.items_file.clone(),
        };
        let json = serde_json::to_string_pretty(&settings).context("Serialize settings error")?;
        fs::write(path, json).with_context(|| format!("Write settings error: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::timeline::{Granularity, Window};
    use chrono::NaiveDate;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("timelane-test-{}-{}", tag, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_cli_dir_wins() {
        let dir = PathBuf::from("/tmp/custom-timelane");
        let config = PathConfig::from_env_and_cli(Some(dir.clone()));
        assert_eq!(config_file(SETTINGS_FILE, &config), dir.join(SETTINGS_FILE));
        assert_eq!(data_file(LOG_FILE, &config), dir.join(LOG_FILE));
    }

    #[test]
    fn test_settings_roundtrip() {
        let dir = temp_dir("settings");
        let config = PathConfig {
            config_dir: Some(dir.clone()),
        };
        ensure_dirs(&config).unwrap();

        let focus = NaiveDate::from_ymd_opt(2024, 2, 15).unwrap();
        let settings = AppSettings {
            timeline: TimelineState::new(Window::new(focus, Granularity::Week), 700.0),
            items_file: Some(PathBuf::from("items.json")),
        };
        let path = config_file(SETTINGS_FILE, &config);
        settings.save(&path).unwrap();
        assert_eq!(AppSettings::load(&path).unwrap(), settings);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_remembered_items_fall_back_to_demo() {
        let settings = AppSettings {
            items_file: Some(temp_dir("gone").join("items.json")),
            ..AppSettings::default()
        };
        let store = settings.open_items(None).unwrap();
        assert_eq!(store.len(), ItemStore::seed().unwrap().len());

        // Named on the command line, the same file is an error
        let missing = settings.items_file.clone().unwrap();
        assert!(settings.open_items(Some(missing.as_path())).is_err());
    }

    #[test]
    fn test_remembered_items_file_is_absolute() {
        let dir = temp_dir("remember");
        fs::create_dir_all(&dir).unwrap();
        let file = dir.join("items.json");
        fs::write(&file, r#"[{"id": 1, "name": "A", "start": "2024-01-02", "end": "2024-01-05"}]"#).unwrap();

        let mut settings = AppSettings::default();
        settings.remember_items_file(&dir.join(".").join("items.json"));
        let saved = settings.items_file.clone().unwrap();
        assert!(saved.is_absolute());
        assert_eq!(saved, fs::canonicalize(&file).unwrap());
        assert_eq!(settings.open_items(None).unwrap().len(), 1);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_bad_grid_width_never_saved() {
        let dir = temp_dir("width");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(SETTINGS_FILE);
        let focus = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let settings = AppSettings {
            timeline: TimelineState::new(Window::new(focus, Granularity::Week), f32::NAN),
            items_file: None,
        };
        settings.save(&path).unwrap();

        let loaded = AppSettings::load(&path).unwrap();
        assert_eq!(loaded.timeline.window, settings.timeline.window);
        assert_eq!(loaded.timeline.grid_width, 840.0);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_broken_settings_fall_back() {
        let dir = temp_dir("broken");
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join(SETTINGS_FILE);
        fs::write(&path, "{ not json").unwrap();
        assert!(AppSettings::load(&path).is_err());
        assert_eq!(AppSettings::load_or_default(&path).items_file, None);
        assert!(AppSettings::load_or_default(&dir.join("missing.json")).items_file.is_none());
        let _ = fs::remove_dir_all(&dir);
    }
}
