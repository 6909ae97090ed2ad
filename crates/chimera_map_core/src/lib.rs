//! Core data structures for the chimera map editor
//!
//! This crate provides the editing model behind the editor:
//! - `Map` - A 3-D grid of tiles, each an ordered stack of archetype placements
//! - `Archetype` - A placement record referencing prototypes by name
//! - `History` - Linear undo/redo over whole-state snapshots
//! - `SelectedCoords` - Coordinate sets with range, line, flood and border builders
//! - `VersionedMap` / `VersionedArchetype` - Undoable wrappers tracking saved state
//! - `ArchetypeLibrary` - Prototype lookup and field inheritance
//! - Map and archetype file persistence as YAML

mod archetype;
mod archetype_library;
mod archetype_tree;
mod coord;
mod error;
mod history;
mod map;
mod map_file;
mod selection;
mod versioned;

pub use archetype::{same_top, Archetype};
pub use archetype_library::ArchetypeLibrary;
pub use archetype_tree::ArchetypeTreeNode;
pub use coord::Coord;
pub use error::{ArchetypeSourceError, MapError, MapFileError};
pub use history::History;
pub use map::{Map, Tile, TileSource};
pub use map_file::{
    load_archetypes, load_maps, maps_from_str, maps_to_string, save_archetypes, save_maps,
    ArchetypeCollection, MapCollection,
};
pub use selection::{Adjacency, SelectedCoords};
pub use versioned::{VersionedArchetype, VersionedMap};
