//! Undoable wrappers tracking saved state for maps and archetypes

use crate::{Archetype, ArchetypeSourceError, Coord, History, Map, TileSource};
use uuid::Uuid;

/// A map with undo/redo history and a saved snapshot.
///
/// Edits follow clone, mutate, commit: take [`VersionedMap::clone_map`],
/// change the copy, then hand it to [`VersionedMap::set`]. Every history
/// motion marks the map unsaved, even an undo that lands on the saved state.
#[derive(Debug, Clone)]
pub struct VersionedMap {
    id: Uuid,
    history: History<Map>,
    data_name: String,
    saved_map: Map,
    unsaved: bool,
}

impl VersionedMap {
    pub fn new(map: Map, data_name: impl Into<String>) -> Self {
        let saved_map = map.clone();
        Self {
            id: Uuid::new_v4(),
            history: History::new(map),
            data_name: data_name.into(),
            saved_map,
            unsaved: false,
        }
    }

    /// Session-local identifier, stable across renames
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The current map state
    pub fn get(&self) -> &Map {
        self.history.current()
    }

    /// Commit a new state as an undoable step
    pub fn set(&mut self, map: Map) {
        self.unsaved = true;
        self.history.push(map);
    }

    /// Swap the current state in place. Adds no history step and leaves the
    /// unsaved flag alone.
    pub fn replace(&mut self, map: Map) {
        self.history.replace(map);
    }

    pub fn undo(&mut self) -> bool {
        self.unsaved = true;
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.unsaved = true;
        self.history.redo()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Snapshot the current state as saved
    pub fn save(&mut self) {
        self.saved_map = self.clone_map();
        self.unsaved = false;
    }

    /// Return to the last saved state by overwriting the current history
    /// entry with it. Other history entries are left in place.
    pub fn reset(&mut self) {
        self.history.replace(self.saved_map.clone());
        self.save();
    }

    pub fn saved_map(&self) -> &Map {
        &self.saved_map
    }

    pub fn unsaved(&self) -> bool {
        self.unsaved
    }

    pub fn set_unsaved(&mut self, unsaved: bool) {
        self.unsaved = unsaved;
    }

    /// Key of this map inside its file
    pub fn data_name(&self) -> &str {
        &self.data_name
    }

    pub fn set_data_name(&mut self, data_name: impl Into<String>) {
        self.data_name = data_name.into();
    }

    /// Independent copy of the current state, ready to be edited
    pub fn clone_map(&self) -> Map {
        self.get().clone()
    }

    /// Placements at `coord` in the current state
    pub fn get_archs(&self, coord: Coord) -> Option<&[Archetype]> {
        self.get().tiles_at(coord)
    }
}

impl TileSource for VersionedMap {
    fn tiles_at(&self, coord: Coord) -> Option<&[Archetype]> {
        self.get().tiles_at(coord)
    }
}

/// One archetype revision together with its YAML text
#[derive(Debug, Clone, PartialEq)]
struct ArchetypeRevision {
    archetype: Archetype,
    source: String,
}

impl ArchetypeRevision {
    fn from_archetype(archetype: Archetype) -> Result<Self, ArchetypeSourceError> {
        let source = serde_yaml::to_string(&archetype).map_err(ArchetypeSourceError::Serialize)?;
        Ok(Self { archetype, source })
    }
}

/// An archetype under edit, kept alongside its YAML source text.
///
/// The structured value and the text always describe the same revision:
/// [`VersionedArchetype::set`] re-serializes, [`VersionedArchetype::set_source`]
/// parses, and undo/redo move both together.
#[derive(Debug, Clone)]
pub struct VersionedArchetype {
    history: History<ArchetypeRevision>,
    data_name: String,
    saved: ArchetypeRevision,
    unsaved: bool,
}

impl VersionedArchetype {
    pub fn new(
        archetype: Archetype,
        data_name: impl Into<String>,
    ) -> Result<Self, ArchetypeSourceError> {
        let revision = ArchetypeRevision::from_archetype(archetype)?;
        Ok(Self {
            history: History::new(revision.clone()),
            data_name: data_name.into(),
            saved: revision,
            unsaved: false,
        })
    }

    pub fn get(&self) -> &Archetype {
        &self.history.current().archetype
    }

    /// YAML text of the current revision
    pub fn source(&self) -> &str {
        &self.history.current().source
    }

    /// Commit a new archetype value; nothing changes if it cannot be serialized
    pub fn set(&mut self, archetype: Archetype) -> Result<(), ArchetypeSourceError> {
        let revision = ArchetypeRevision::from_archetype(archetype)?;
        self.history.push(revision);
        self.unsaved = true;
        Ok(())
    }

    /// Commit edited YAML text. The text is parsed and then re-serialized so
    /// the stored source is canonical.
    pub fn set_source(&mut self, source: &str) -> Result<(), ArchetypeSourceError> {
        let archetype: Archetype =
            serde_yaml::from_str(source).map_err(ArchetypeSourceError::Parse)?;
        self.set(archetype)
    }

    pub fn undo(&mut self) -> bool {
        self.unsaved = true;
        self.history.undo()
    }

    pub fn redo(&mut self) -> bool {
        self.unsaved = true;
        self.history.redo()
    }

    pub fn save(&mut self) {
        self.saved = self.history.current().clone();
        self.unsaved = false;
    }

    /// Overwrite the current revision with the saved one
    pub fn reset(&mut self) {
        self.history.replace(self.saved.clone());
        self.save();
    }

    pub fn saved_archetype(&self) -> &Archetype {
        &self.saved.archetype
    }

    pub fn unsaved(&self) -> bool {
        self.unsaved
    }

    pub fn data_name(&self) -> &str {
        &self.data_name
    }

    pub fn set_data_name(&mut self, data_name: impl Into<String>) {
        self.data_name = data_name.into();
    }
}
