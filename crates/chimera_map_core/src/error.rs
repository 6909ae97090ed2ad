//! Error types for map mutation and map file access

use crate::Coord;
use thiserror::Error;

/// Errors returned by tile-stack operations on a [`crate::Map`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MapError {
    #[error("tile {0} is outside the map")]
    TileOutOfBounds(Coord),

    #[error("position {pos} is outside the tile stack at {coord} (len {len})")]
    PositionOutOfBounds { coord: Coord, pos: usize, len: usize },

    #[error("tile array does not match map dimensions {height}x{width}x{depth}")]
    MalformedTiles {
        height: usize,
        width: usize,
        depth: usize,
    },
}

/// Errors that can occur while reading or writing a map file
#[derive(Debug, Error)]
pub enum MapFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("map \"{name}\" is invalid: {source}")]
    Invalid {
        name: String,
        #[source]
        source: MapError,
    },
}

/// Errors converting an archetype to or from its editable YAML source
#[derive(Debug, Error)]
pub enum ArchetypeSourceError {
    #[error("Failed to parse archetype source: {0}")]
    Parse(serde_yaml::Error),

    #[error("Failed to serialize archetype: {0}")]
    Serialize(serde_yaml::Error),
}
