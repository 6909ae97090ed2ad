//! Mapset file save/load operations

use super::Mapset;
use chimera_map_core::{load_maps, save_maps, MapCollection, MapFileError};
use std::path::Path;

impl Mapset {
    /// Load every map in the file at `path` into a new session
    pub fn open(path: &Path) -> Result<Self, MapFileError> {
        let maps = load_maps(path)?;
        Ok(Self::new(path, maps))
    }

    /// Snapshot every map and write the whole file.
    ///
    /// Maps are marked saved before the write. If the write fails the session
    /// stays flagged unsaved so the change is not lost silently.
    pub fn save_all(&mut self) -> Result<(), MapFileError> {
        let mut collection = MapCollection::new();
        for map in &mut self.maps {
            if map.unsaved() {
                map.save();
            }
            collection.insert(map.data_name().to_string(), map.saved_map().clone());
        }

        match save_maps(&self.filename, &collection) {
            Ok(()) => {
                self.unsaved = false;
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to save maps to {:?}: {}", self.filename, e);
                self.unsaved = true;
                Err(e)
            }
        }
    }
}
