//! Archetype editing sessions

use crate::ToolError;
use chimera_map_core::{
    load_archetypes, save_archetypes, Archetype, ArchetypeCollection, ArchetypeSourceError,
    MapFileError, VersionedArchetype,
};
use std::path::{Path, PathBuf};

/// Editing session over the archetypes of one file
#[derive(Debug)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct Archset {
    filename: PathBuf,
    archs: Vec<VersionedArchetype>,
    current_arch_index: usize,
    unsaved: bool,
}

impl Archset {
    pub fn new(
        filename: impl Into<PathBuf>,
        archetypes: ArchetypeCollection,
    ) -> Result<Self, ArchetypeSourceError> {
        let archs = archetypes
            .into_iter()
            .map(|(data_name, archetype)| VersionedArchetype::new(archetype, data_name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            filename: filename.into(),
            archs,
            current_arch_index: 0,
            unsaved: false,
        })
    }

    pub fn open(path: &Path) -> Result<Self, ToolError> {
        let archetypes = load_archetypes(path)?;
        Ok(Self::new(path, archetypes)?)
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn archs(&self) -> &[VersionedArchetype] {
        &self.archs
    }

    /// Add a new archetype and make it current.
    ///
    /// Returns false without changes if `data_name` is already used.
    pub fn create_arch(
        &mut self,
        data_name: &str,
        archetype: Archetype,
    ) -> Result<bool, ArchetypeSourceError> {
        if self.archs.iter().any(|a| a.data_name() == data_name) {
            tracing::warn!("Archetype {:?} already exists", data_name);
            return Ok(false);
        }
        self.archs.push(VersionedArchetype::new(archetype, data_name)?);
        self.current_arch_index = self.archs.len() - 1;
        self.unsaved = true;
        Ok(true)
    }

    pub fn current(&self) -> Option<&VersionedArchetype> {
        self.archs.get(self.current_arch_index)
    }

    pub fn current_mut(&mut self) -> Option<&mut VersionedArchetype> {
        self.archs.get_mut(self.current_arch_index)
    }

    pub fn set_current(&mut self, index: usize) -> bool {
        if index < self.archs.len() {
            self.current_arch_index = index;
            true
        } else {
            false
        }
    }

    /// Snapshot every archetype and write the whole file
    pub fn save_all(&mut self) -> Result<(), MapFileError> {
        let mut collection = ArchetypeCollection::new();
        for arch in &mut self.archs {
            if arch.unsaved() {
                arch.save();
            }
            collection.insert(arch.data_name().to_string(), arch.saved_archetype().clone());
        }
        let result = save_archetypes(&self.filename, &collection);
        self.unsaved = result.is_err();
        if let Err(e) = &result {
            tracing::error!("Failed to save archetypes to {:?}: {}", self.filename, e);
        }
        result
    }

    /// Whether the file or any of its archetypes has changes not yet saved
    pub fn unsaved(&self) -> bool {
        self.unsaved || self.archs.iter().any(VersionedArchetype::unsaved)
    }
}
