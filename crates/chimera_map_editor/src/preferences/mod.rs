//! Editor preferences persisted between sessions

mod file;

pub use file::PreferencesError;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// User preferences for the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[serde(default)]
pub struct EditorPreferences {
    /// Map files reopened at startup
    pub open_maps: Vec<PathBuf>,
    /// Default for new sessions' keep-same-tile policy
    pub keep_same_tile: bool,
    /// Default for new sessions' unique-tile-visits policy
    pub unique_tile_visits: bool,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            open_maps: Vec::new(),
            keep_same_tile: true,
            unique_tile_visits: true,
        }
    }
}

impl EditorPreferences {
    /// Remember `path` as open
    pub fn add_map(&mut self, path: impl Into<PathBuf>) -> Result<(), PreferencesError> {
        let path = path.into();
        if self.open_maps.contains(&path) {
            return Err(PreferencesError::MapAlreadyOpen(path));
        }
        self.open_maps.push(path);
        Ok(())
    }

    /// Forget `path`
    pub fn remove_map(&mut self, path: &Path) -> Result<(), PreferencesError> {
        let index = self
            .open_maps
            .iter()
            .position(|p| p == path)
            .ok_or_else(|| PreferencesError::MapNotOpen(path.to_path_buf()))?;
        self.open_maps.remove(index);
        Ok(())
    }

    /// Apply the session policies to a newly opened map set
    pub fn apply_to(&self, mapset: &mut crate::Mapset) {
        mapset.keep_same_tile = self.keep_same_tile;
        mapset.unique_tile_visits = self.unique_tile_visits;
    }
}
