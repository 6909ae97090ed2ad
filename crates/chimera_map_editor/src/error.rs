//! Error types for editing sessions

use chimera_map_core::{ArchetypeSourceError, MapError, MapFileError};
use thiserror::Error;
use uuid::Uuid;

/// Errors returned by tool dispatch and session edits
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("no current map")]
    NoActiveMap,

    #[error("no map with id {0}")]
    UnknownMap(Uuid),

    #[error("a map named {0:?} already exists")]
    DuplicateDataName(String),

    #[error(transparent)]
    Map(#[from] MapError),

    #[error(transparent)]
    File(#[from] MapFileError),

    #[error(transparent)]
    Archetype(#[from] ArchetypeSourceError),
}
