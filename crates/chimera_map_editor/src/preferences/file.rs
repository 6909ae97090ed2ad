//! Preferences file save/load operations

use super::EditorPreferences;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use thiserror::Error;

const PREFERENCES_FILE: &str = "preferences.json";

#[derive(Debug, Error)]
pub enum PreferencesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("map {0:?} is already open")]
    MapAlreadyOpen(PathBuf),

    #[error("map {0:?} is not open")]
    MapNotOpen(PathBuf),
}

impl EditorPreferences {
    /// Get the config directory path for the editor
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("rpg", "chimera", "chimera_map_editor")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the preferences file path
    pub fn preferences_path() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join(PREFERENCES_FILE))
    }

    /// Load preferences from the config directory, returning defaults if
    /// they cannot be read
    pub fn load() -> Self {
        let result = Self::preferences_path()
            .ok_or(PreferencesError::NoConfigDir)
            .and_then(|path| Self::load_from(&path));
        match result {
            Ok(prefs) => prefs,
            Err(e) => {
                tracing::warn!("Could not load preferences: {}. Using defaults.", e);
                Self::default()
            }
        }
    }

    /// Load preferences from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, PreferencesError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(PreferencesError::Parse)
    }

    /// Save preferences to the config directory
    pub fn save(&self) -> Result<(), PreferencesError> {
        let path = Self::preferences_path().ok_or(PreferencesError::NoConfigDir)?;
        self.save_to(&path)
    }

    /// Save preferences to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> Result<(), PreferencesError> {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir)?;
        }

        let content = serde_json::to_string_pretty(self).map_err(PreferencesError::Serialize)?;
        std::fs::write(path, content)?;

        tracing::info!("Saved preferences to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("chimera_prefs_{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_save_and_load() {
        let dir = temp_dir();
        let path = dir.join(PREFERENCES_FILE);
        let mut prefs = EditorPreferences::default();
        prefs.add_map("maps/start.map.yaml").unwrap();
        prefs.unique_tile_visits = false;

        prefs.save_to(&path).unwrap();
        let loaded = EditorPreferences::load_from(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();
        assert_eq!(loaded, prefs);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_dir().join(PREFERENCES_FILE);
        assert_eq!(
            EditorPreferences::load_from(&path).unwrap(),
            EditorPreferences::default()
        );
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(PREFERENCES_FILE);
        std::fs::write(&path, r#"{ "open_maps": ["a.map.yaml"] }"#).unwrap();

        let loaded = EditorPreferences::load_from(&path).unwrap();
        std::fs::remove_dir_all(&dir).ok();
        assert_eq!(loaded.open_maps, vec![PathBuf::from("a.map.yaml")]);
        assert!(loaded.keep_same_tile);
    }

    #[test]
    fn test_invalid_file() {
        let dir = temp_dir();
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(PREFERENCES_FILE);
        std::fs::write(&path, "not json").unwrap();

        let result = EditorPreferences::load_from(&path);
        std::fs::remove_dir_all(&dir).ok();
        assert!(matches!(result, Err(PreferencesError::Parse(_))));
    }
}
