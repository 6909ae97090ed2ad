//! Prototype lookup and inheritance resolution for archetypes

use crate::{Archetype, ArchetypeSourceError};
use std::collections::{BTreeMap, HashMap, HashSet};

/// Named archetype prototypes, as loaded from archetype files.
///
/// Placements inherit from prototypes through `Arch` (one parent) and
/// `Archs` (ordered parents). Resolution walks that graph depth-first, `Arch`
/// before `Archs`, and the first archetype that defines a field wins.
#[derive(Debug, Clone, Default)]
pub struct ArchetypeLibrary {
    archetypes: HashMap<String, Archetype>,
}

impl ArchetypeLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an archetype file: a YAML mapping of name to archetype
    pub fn from_yaml(content: &str) -> Result<Self, ArchetypeSourceError> {
        let archetypes: BTreeMap<String, Archetype> =
            serde_yaml::from_str(content).map_err(ArchetypeSourceError::Parse)?;
        Ok(Self {
            archetypes: archetypes.into_iter().collect(),
        })
    }

    /// Add or replace a prototype, returning the previous one
    pub fn insert(&mut self, name: impl Into<String>, archetype: Archetype) -> Option<Archetype> {
        self.archetypes.insert(name.into(), archetype)
    }

    pub fn get(&self, name: &str) -> Option<&Archetype> {
        self.archetypes.get(name)
    }

    pub fn len(&self) -> usize {
        self.archetypes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.archetypes.is_empty()
    }

    /// All prototype names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.archetypes.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Every known ancestor of `archetype` in resolution order.
    ///
    /// Each prototype appears once even if reachable by several paths, so
    /// cyclic definitions terminate. Unknown names are skipped.
    pub fn ancestors<'a>(&'a self, archetype: &'a Archetype) -> Vec<&'a Archetype> {
        let mut found = Vec::new();
        let mut visited = HashSet::new();
        self.collect_ancestors(archetype, &mut visited, &mut found);
        found
    }

    fn collect_ancestors<'a>(
        &'a self,
        archetype: &'a Archetype,
        visited: &mut HashSet<&'a str>,
        found: &mut Vec<&'a Archetype>,
    ) {
        let parents = std::iter::once(archetype.arch.as_str())
            .filter(|name| !name.is_empty())
            .chain(archetype.archs.iter().map(String::as_str));

        for name in parents {
            if !visited.insert(name) {
                continue;
            }
            if let Some(parent) = self.get(name) {
                found.push(parent);
                self.collect_ancestors(parent, visited, found);
            }
        }
    }

    /// First value of `field` defined on `archetype` or one of its ancestors
    pub fn resolve<'a, T, F>(&'a self, archetype: &'a Archetype, field: F) -> Option<T>
    where
        F: Fn(&'a Archetype) -> Option<T>,
    {
        field(archetype).or_else(|| self.ancestors(archetype).into_iter().find_map(&field))
    }

    /// Whether `archetype` sets `field` to a value that differs from every
    /// value its ancestors define
    pub fn is_overridden<'a, T, F>(&'a self, archetype: &'a Archetype, field: F) -> bool
    where
        T: PartialEq,
        F: Fn(&'a Archetype) -> Option<T>,
    {
        let Some(local) = field(archetype) else {
            return false;
        };
        self.ancestors(archetype)
            .into_iter()
            .filter_map(&field)
            .all(|inherited| inherited != local)
    }

    /// Display name for a placement: its resolved `Name`, falling back to the
    /// prototype it references
    pub fn display_name(&self, archetype: &Archetype) -> String {
        self.resolve(archetype, |a| a.name.as_deref())
            .or_else(|| archetype.primary_arch())
            .unwrap_or_default()
            .to_string()
    }
}
