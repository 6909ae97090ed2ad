//! Map containing a 3D grid of tile stacks

use crate::{Archetype, Coord, MapError};
use serde::{Deserialize, Serialize};

/// An ordered stack of placements; the last entry is the topmost
pub type Tile = Vec<Archetype>;

/// Read access to tile stacks, used by selection algorithms that need to
/// look at map contents (flood select)
pub trait TileSource {
    /// The stack at `coord`, or `None` if the coordinate is outside the source
    fn tiles_at(&self, coord: Coord) -> Option<&[Archetype]>;
}

/// A map: a `Height x Width x Depth` volume of tiles plus metadata.
///
/// `tiles[y][x][z]` always matches the declared dimensions for maps built
/// through this API; maps read from disk are checked with [`Map::validate`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Map {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub darkness: i32,
    #[serde(default)]
    pub reset_time: i32,
    #[serde(default)]
    pub lore: String,
    #[serde(default)]
    pub height: usize,
    #[serde(default)]
    pub width: usize,
    #[serde(default)]
    pub depth: usize,
    /// Origin offsets
    #[serde(default)]
    pub y: i32,
    #[serde(default)]
    pub x: i32,
    #[serde(default)]
    pub z: i32,
    /// Attached script source, opaque to the editor core
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub script: String,
    #[serde(default)]
    pub tiles: Vec<Vec<Vec<Tile>>>,
}

fn empty_tiles(height: usize, width: usize, depth: usize) -> Vec<Vec<Vec<Tile>>> {
    vec![vec![vec![Vec::new(); depth]; width]; height]
}

fn resized_dim(dim: usize, before: i32, after: i32) -> usize {
    (dim as i64 + before as i64 + after as i64).max(0) as usize
}

impl Map {
    /// Create a map with every tile empty
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        lore: impl Into<String>,
        darkness: i32,
        reset_time: i32,
        height: usize,
        width: usize,
        depth: usize,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            darkness,
            reset_time,
            lore: lore.into(),
            height,
            width,
            depth,
            y: 0,
            x: 0,
            z: 0,
            script: String::new(),
            tiles: empty_tiles(height, width, depth),
        }
    }

    /// Array indices for `coord`, if it lies inside the tile array
    fn index(&self, coord: Coord) -> Option<(usize, usize, usize)> {
        let y = usize::try_from(coord.y).ok()?;
        let x = usize::try_from(coord.x).ok()?;
        let z = usize::try_from(coord.z).ok()?;
        let column = self.tiles.get(y)?.get(x)?;
        (z < column.len()).then_some((y, x, z))
    }

    /// Whether `coord` addresses a tile of this map
    pub fn contains(&self, coord: Coord) -> bool {
        self.index(coord).is_some()
    }

    /// The tile stack at `coord`, `None` if out of range
    pub fn tiles(&self, coord: Coord) -> Option<&Tile> {
        let (y, x, z) = self.index(coord)?;
        Some(&self.tiles[y][x][z])
    }

    /// Mutable tile stack at `coord`, `None` if out of range
    pub fn tiles_mut(&mut self, coord: Coord) -> Option<&mut Tile> {
        let (y, x, z) = self.index(coord)?;
        Some(&mut self.tiles[y][x][z])
    }

    /// Topmost placement at `coord`
    pub fn top_archetype(&self, coord: Coord) -> Option<&Archetype> {
        self.tiles(coord).and_then(|t| t.last())
    }

    /// Check that the tile array matches `height`, `width` and `depth`
    pub fn validate(&self) -> Result<(), MapError> {
        let consistent = self.tiles.len() == self.height
            && self.tiles.iter().all(|plane| {
                plane.len() == self.width && plane.iter().all(|col| col.len() == self.depth)
            });
        if consistent {
            Ok(())
        } else {
            Err(MapError::MalformedTiles {
                height: self.height,
                width: self.width,
                depth: self.depth,
            })
        }
    }

    /// Build a copy of this map grown or shrunk on each side.
    ///
    /// Positive values add cells on that side, negative values remove them.
    /// Content moves by `down` on Y, `left` on X and `top` on Z. Tiles that
    /// end up outside the new bounds are dropped without any warning; undo is
    /// the only way back.
    pub fn resized(&self, up: i32, down: i32, left: i32, right: i32, top: i32, bottom: i32) -> Map {
        let height = resized_dim(self.height, up, down);
        let width = resized_dim(self.width, left, right);
        let depth = resized_dim(self.depth, top, bottom);

        let mut resized = Map {
            height,
            width,
            depth,
            tiles: empty_tiles(height, width, depth),
            ..self.clone_metadata()
        };

        for (y, plane) in self.tiles.iter().enumerate() {
            for (x, column) in plane.iter().enumerate() {
                for (z, tile) in column.iter().enumerate() {
                    let target = Coord::new(
                        y as i32 + down,
                        x as i32 + left,
                        z as i32 + top,
                    );
                    if let Some(slot) = resized.tiles_mut(target) {
                        *slot = tile.clone();
                    }
                }
            }
        }
        resized
    }

    fn clone_metadata(&self) -> Map {
        Map {
            name: self.name.clone(),
            description: self.description.clone(),
            darkness: self.darkness,
            reset_time: self.reset_time,
            lore: self.lore.clone(),
            height: self.height,
            width: self.width,
            depth: self.depth,
            y: self.y,
            x: self.x,
            z: self.z,
            script: self.script.clone(),
            tiles: Vec::new(),
        }
    }

    /// Insert a new placement of `arch` into the stack at `coord`.
    ///
    /// `pos` of `None` appends on top, `Some(i)` splices in at index `i`.
    pub fn insert_archetype(
        &mut self,
        arch: &str,
        coord: Coord,
        pos: Option<usize>,
    ) -> Result<(), MapError> {
        let tiles = self
            .tiles_mut(coord)
            .ok_or(MapError::TileOutOfBounds(coord))?;
        let len = tiles.len();
        let pos = pos.unwrap_or(len);
        if pos > len {
            return Err(MapError::PositionOutOfBounds { coord, pos, len });
        }
        tiles.insert(pos, Archetype::from_arch(arch));
        Ok(())
    }

    /// Remove a placement from the stack at `coord`.
    ///
    /// `pos` of `None` removes the topmost entry. Removing from an empty
    /// stack is a `PositionOutOfBounds` error.
    pub fn remove_archetype(
        &mut self,
        coord: Coord,
        pos: Option<usize>,
    ) -> Result<Archetype, MapError> {
        let tiles = self
            .tiles_mut(coord)
            .ok_or(MapError::TileOutOfBounds(coord))?;
        let len = tiles.len();
        let pos = pos.unwrap_or(len.saturating_sub(1));
        if pos >= len {
            return Err(MapError::PositionOutOfBounds { coord, pos, len });
        }
        Ok(tiles.remove(pos))
    }

    /// Move a placement from one stack position to another.
    ///
    /// `from_pos` of `None` takes the topmost entry, `to_pos` of `None` puts
    /// it on top of the destination. Both ends are validated against the
    /// stacks as they are before the move; nothing changes on error.
    pub fn move_archetype(
        &mut self,
        from: Coord,
        from_pos: Option<usize>,
        to: Coord,
        to_pos: Option<usize>,
    ) -> Result<(), MapError> {
        let src_len = self
            .tiles(from)
            .ok_or(MapError::TileOutOfBounds(from))?
            .len();
        let src_pos = from_pos.unwrap_or(src_len.saturating_sub(1));
        if src_pos >= src_len {
            return Err(MapError::PositionOutOfBounds {
                coord: from,
                pos: src_pos,
                len: src_len,
            });
        }

        let dst_len = self.tiles(to).ok_or(MapError::TileOutOfBounds(to))?.len();
        let dst_pos = to_pos.unwrap_or(dst_len);
        if dst_pos > dst_len {
            return Err(MapError::PositionOutOfBounds {
                coord: to,
                pos: dst_pos,
                len: dst_len,
            });
        }

        let archetype = self.remove_archetype(from, Some(src_pos))?;
        let dst = self.tiles_mut(to).ok_or(MapError::TileOutOfBounds(to))?;
        // Same-stack moves shrink the destination by one.
        let dst_pos = dst_pos.min(dst.len());
        dst.insert(dst_pos, archetype);
        Ok(())
    }

    /// Total number of placements across all tiles
    pub fn placement_count(&self) -> usize {
        self.tiles
            .iter()
            .flatten()
            .flatten()
            .map(|tile| tile.len())
            .sum()
    }
}

impl TileSource for Map {
    fn tiles_at(&self, coord: Coord) -> Option<&[Archetype]> {
        self.tiles(coord).map(Vec::as_slice)
    }
}
