//! Map and archetype file save/load operations
//!
//! A map file is a YAML mapping from data name to [`Map`]. An archetype file
//! maps data names to [`Archetype`] prototypes the same way.

use crate::{Archetype, Map, MapFileError};
use std::collections::BTreeMap;
use std::path::Path;

/// Maps of one file keyed by data name
pub type MapCollection = BTreeMap<String, Map>;

/// Parse a map collection and check every map's tile array
pub fn maps_from_str(content: &str) -> Result<MapCollection, MapFileError> {
    let maps: MapCollection = serde_yaml::from_str(content)?;
    for (name, map) in &maps {
        map.validate().map_err(|source| MapFileError::Invalid {
            name: name.clone(),
            source,
        })?;
    }
    Ok(maps)
}

pub fn maps_to_string(maps: &MapCollection) -> Result<String, MapFileError> {
    Ok(serde_yaml::to_string(maps)?)
}

/// Load every map stored in the file at `path`
pub fn load_maps(path: &Path) -> Result<MapCollection, MapFileError> {
    let content = std::fs::read_to_string(path)?;
    let maps = maps_from_str(&content)?;
    tracing::debug!("Loaded {} map(s) from {:?}", maps.len(), path);
    Ok(maps)
}

/// Write `maps` to `path`, replacing the file
pub fn save_maps(path: &Path, maps: &MapCollection) -> Result<(), MapFileError> {
    let content = maps_to_string(maps)?;
    std::fs::write(path, content)?;
    tracing::info!("Saved {} map(s) to {:?}", maps.len(), path);
    Ok(())
}

/// Archetypes of one file keyed by data name
pub type ArchetypeCollection = BTreeMap<String, Archetype>;

pub fn load_archetypes(path: &Path) -> Result<ArchetypeCollection, MapFileError> {
    let content = std::fs::read_to_string(path)?;
    let archetypes: ArchetypeCollection = serde_yaml::from_str(&content)?;
    tracing::debug!("Loaded {} archetype(s) from {:?}", archetypes.len(), path);
    Ok(archetypes)
}

pub fn save_archetypes(path: &Path, archetypes: &ArchetypeCollection) -> Result<(), MapFileError> {
    let content = serde_yaml::to_string(archetypes)?;
    std::fs::write(path, content)?;
    tracing::info!("Saved {} archetype(s) to {:?}", archetypes.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Coord, MapError};

    fn sample() -> MapCollection {
        let mut cave = Map::new("Cave", "Dark and damp", "Dug by goblins", 3, 60, 2, 2, 3);
        cave.y = 1;
        cave.script = "on_enter()".to_string();
        cave.insert_archetype("floor", Coord::new(0, 1, 2), None).unwrap();
        cave.insert_archetype("torch", Coord::new(0, 1, 2), None).unwrap();

        let mut maps = MapCollection::new();
        maps.insert("cave".to_string(), cave);
        maps.insert("empty".to_string(), Map::new("Empty", "", "", 0, 0, 1, 1, 1));
        maps
    }

    #[test]
    fn test_round_trip() {
        let maps = sample();
        let text = maps_to_string(&maps).unwrap();
        assert_eq!(maps_from_str(&text).unwrap(), maps);
    }

    #[test]
    fn test_uses_map_field_names() {
        let text = maps_to_string(&sample()).unwrap();
        for key in [
            "Name:", "Description:", "Darkness:", "ResetTime:", "Lore:", "Height:", "Width:",
            "Depth:", "Script:", "Tiles:", "Archs:",
        ] {
            assert!(text.contains(key), "missing {key}");
        }
    }

    #[test]
    fn test_reads_hand_written_map() {
        let text = "\
start:
  Name: Start
  Height: 1
  Width: 1
  Depth: 2
  Tiles:
  - - - []
      - - Arch: grass
        - Archs: [tree, old]
";
        let maps = maps_from_str(text).unwrap();
        let start = &maps["start"];
        assert_eq!(start.description, "");
        let tiles = start.tiles(Coord::new(0, 0, 1)).unwrap();
        assert_eq!(tiles.len(), 2);
        assert_eq!(tiles[0].arch, "grass");
        assert_eq!(tiles[1].archs, vec!["tree".to_string(), "old".to_string()]);
    }

    #[test]
    fn test_missing_fields_default() {
        let text = "\
unnamed:
  Height: 1
  Width: 1
  Depth: 1
  Tiles:
  - - - []
blank: {}
";
        let maps = maps_from_str(text).unwrap();
        assert_eq!(maps["unnamed"].name, "");
        assert_eq!(maps["unnamed"].depth, 1);
        let blank = &maps["blank"];
        assert_eq!((blank.height, blank.width, blank.depth), (0, 0, 0));
        assert!(blank.tiles.is_empty());
    }

    #[test]
    fn test_rejects_inconsistent_dimensions() {
        let text = "bad:\n  Name: Bad\n  Height: 2\n  Width: 1\n  Depth: 1\n  Tiles:\n  - - - []\n";
        match maps_from_str(text) {
            Err(MapFileError::Invalid { name, source }) => {
                assert_eq!(name, "bad");
                assert!(matches!(source, MapError::MalformedTiles { height: 2, .. }));
            }
            other => panic!("Expected invalid map error, got {:?}", other),
        }
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("chimera_maps_{}.yaml", uuid::Uuid::new_v4()));
        let maps = sample();
        save_maps(&path, &maps).unwrap();
        let loaded = load_maps(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, maps);
    }

    #[test]
    fn test_missing_file() {
        let path = std::env::temp_dir().join(format!("chimera_missing_{}.yaml", uuid::Uuid::new_v4()));
        assert!(matches!(load_maps(&path), Err(MapFileError::Io(_))));
    }

    #[test]
    fn test_archetype_file_round_trip() {
        let path = std::env::temp_dir().join(format!("chimera_archs_{}.yaml", uuid::Uuid::new_v4()));
        let mut archetypes = ArchetypeCollection::new();
        let mut wall = Archetype::from_arch("base");
        wall.name = Some("Wall".to_string());
        archetypes.insert("wall".to_string(), wall);
        archetypes.insert("floor".to_string(), Archetype::default());

        save_archetypes(&path, &archetypes).unwrap();
        let loaded = load_archetypes(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(loaded, archetypes);
    }
}
