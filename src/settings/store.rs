//! Settings persistence backends.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, info};

use super::Settings;
use super::error::SettingsError;

/// File name of the persisted settings inside the config directory.
const SETTINGS_FILE_NAME: &str = "settings.json";

/// Key-value style persistence for [`Settings`].
///
/// Loading when nothing has been saved yet yields [`Settings::default`].
pub trait SettingsStore: Send + Sync {
    /// Loads the stored settings, or defaults when none exist.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when stored settings exist but cannot be read.
    fn load(&self) -> Result<Settings, SettingsError>;

    /// Persists `settings`, replacing what was stored.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError`] when the settings cannot be written.
    fn save(&self, settings: &Settings) -> Result<(), SettingsError>;
}

/// Resolves the default settings path.
///
/// Priority:
/// 1. `$XDG_CONFIG_HOME/doclinks/settings.json`
/// 2. `$HOME/.config/doclinks/settings.json`
#[must_use]
pub fn resolve_default_settings_path() -> Option<PathBuf> {
    if let Some(xdg_config_home) = env_var_non_empty_os("XDG_CONFIG_HOME") {
        return Some(
            PathBuf::from(xdg_config_home)
                .join("doclinks")
                .join(SETTINGS_FILE_NAME),
        );
    }

    let home = env_var_non_empty_os("HOME")?;
    Some(
        PathBuf::from(home)
            .join(".config")
            .join("doclinks")
            .join(SETTINGS_FILE_NAME),
    )
}

fn env_var_non_empty_os(name: &str) -> Option<std::ffi::OsString> {
    let value = env::var_os(name)?;
    if value.is_empty() { None } else { Some(value) }
}

/// Settings stored as pretty-printed JSON on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSettingsStore {
    path: PathBuf,
}

impl JsonFileSettingsStore {
    /// Creates a store backed by `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Creates a store at the default location.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::NoLocation`] when no config directory is known.
    pub fn at_default_location() -> Result<Self, SettingsError> {
        resolve_default_settings_path()
            .map(Self::new)
            .ok_or(SettingsError::NoLocation)
    }

    /// Path of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the backing file exists.
    #[must_use]
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

impl SettingsStore for JsonFileSettingsStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "settings file not found; using defaults");
            return Ok(Settings::default());
        }
        let raw =
            fs::read_to_string(&self.path).map_err(|e| SettingsError::io(self.path.clone(), e))?;
        let settings: Settings =
            serde_json::from_str(&raw).map_err(|e| SettingsError::parse(self.path.clone(), e))?;
        debug!(path = %self.path.display(), "settings loaded");
        Ok(settings)
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| SettingsError::io(parent, e))?;
        }
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| SettingsError::parse(self.path.clone(), e))?;
        fs::write(&self.path, json).map_err(|e| SettingsError::io(self.path.clone(), e))?;
        info!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// In-memory store, used by tests and embedders without a filesystem.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    stored: Mutex<Option<Settings>>,
}

impl MemorySettingsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemorySettingsStore {
    fn load(&self) -> Result<Settings, SettingsError> {
        let guard = self
            .stored
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        Ok(guard.clone().unwrap_or_default())
    }

    fn save(&self, settings: &Settings) -> Result<(), SettingsError> {
        let mut guard = self
            .stored
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(settings.clone());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::settings::DuplicatePolicy;
    use tempfile::TempDir;

    #[test]
    fn test_json_store_missing_file_loads_defaults() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileSettingsStore::new(dir.path().join("settings.json"));
        assert!(!store.exists());
        assert_eq!(store.load().unwrap(), Settings::default());
    }

    #[test]
    fn test_json_store_save_then_load() {
        let dir = TempDir::new().unwrap();
        let store = JsonFileSettingsStore::new(dir.path().join("nested").join("settings.json"));
        let settings = Settings {
            file_extensions: vec!["pdf".into()],
            duplicate_policy: DuplicatePolicy::FirstWins,
            href_prefix: "/files/".into(),
            ..Settings::default()
        };
        store.save(&settings).unwrap();
        assert!(store.exists());
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_json_store_invalid_json_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{not json").unwrap();
        let store = JsonFileSettingsStore::new(&path);
        assert!(matches!(store.load(), Err(SettingsError::Parse { .. })));
    }

    #[test]
    fn test_memory_store_defaults_then_saved_value() {
        let store = MemorySettingsStore::new();
        assert_eq!(store.load().unwrap(), Settings::default());
        let settings = Settings {
            inner_content: false,
            ..Settings::default()
        };
        store.save(&settings).unwrap();
        assert!(!store.load().unwrap().inner_content);
    }
}
