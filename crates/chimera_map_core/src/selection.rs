//! Coordinate-set algebra used to drive selections and bulk edits
//!
//! [`SelectedCoords`] is purely geometric. Only [`SelectedCoords::flood_select`]
//! looks at map contents, through the [`TileSource`] trait.

use crate::archetype::same_top;
use crate::{Coord, TileSource};
use std::collections::HashSet;

/// Which neighbours count as adjacent for grow/shrink/border.
///
/// A neighbour is one step along a single enabled axis. With `diagonal`,
/// steps along two enabled axes at once are adjacent too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacency {
    pub diagonal: bool,
    pub y: bool,
    pub x: bool,
    pub z: bool,
}

impl Adjacency {
    /// Orthogonal X/Z neighbours within one layer
    pub const PLANAR: Adjacency = Adjacency {
        diagonal: false,
        y: false,
        x: true,
        z: true,
    };

    pub const fn new(diagonal: bool, y: bool, x: bool, z: bool) -> Self {
        Self { diagonal, y, x, z }
    }

    fn offsets(&self) -> Vec<(i32, i32, i32)> {
        let mut offsets = Vec::new();
        for dy in -1..=1 {
            for dx in -1..=1 {
                for dz in -1..=1 {
                    let steps = [(dy, self.y), (dx, self.x), (dz, self.z)];
                    if steps.iter().any(|&(d, enabled)| d != 0 && !enabled) {
                        continue;
                    }
                    let moved = steps.iter().filter(|(d, _)| *d != 0).count();
                    if moved == 1 || (moved == 2 && self.diagonal) {
                        offsets.push((dy, dx, dz));
                    }
                }
            }
        }
        offsets
    }
}

fn neighbours(coord: Coord, offsets: &[(i32, i32, i32)]) -> impl Iterator<Item = Coord> + '_ {
    offsets
        .iter()
        .map(move |&(dy, dx, dz)| coord.offset(dy, dx, dz))
}

/// A set of selected map coordinates
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedCoords {
    selected: HashSet<Coord>,
}

impl SelectedCoords {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, coord: Coord) {
        self.selected.insert(coord);
    }

    pub fn unselect(&mut self, coord: Coord) {
        self.selected.remove(&coord);
    }

    fn apply(&mut self, do_select: bool, coord: Coord) {
        if do_select {
            self.select(coord);
        } else {
            self.unselect(coord);
        }
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, coord: Coord) -> bool {
        self.selected.contains(&coord)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Iterate the selected coordinates in no particular order
    pub fn iter(&self) -> impl Iterator<Item = Coord> + '_ {
        self.selected.iter().copied()
    }

    /// Selected coordinates in (y, x, z) order
    pub fn sorted(&self) -> Vec<Coord> {
        let mut coords: Vec<Coord> = self.iter().collect();
        coords.sort();
        coords
    }

    /// Replace the contents with a copy of `other`
    pub fn set(&mut self, other: &SelectedCoords) {
        self.selected.clone_from(&other.selected);
    }

    /// Union with `other`
    pub fn add(&mut self, other: &SelectedCoords) {
        self.selected.extend(other.iter());
    }

    /// Difference with `other`
    pub fn remove(&mut self, other: &SelectedCoords) {
        self.selected.retain(|c| !other.selected.contains(c));
    }

    /// Select or unselect the inclusive box between two corners
    pub fn range(&mut self, do_select: bool, a: Coord, b: Coord) {
        for y in a.y.min(b.y)..=a.y.max(b.y) {
            for x in a.x.min(b.x)..=a.x.max(b.x) {
                for z in a.z.min(b.z)..=a.z.max(b.z) {
                    self.apply(do_select, Coord::new(y, x, z));
                }
            }
        }
    }

    /// Select or unselect a Bresenham line in the X/Z plane at `from.y`.
    ///
    /// The endpoints are ordered before rasterising so swapping them yields
    /// the same cells.
    pub fn line(&mut self, do_select: bool, from: Coord, to: Coord) {
        let y = from.y;
        let (mut start, mut end) = ((from.x, from.z), (to.x, to.z));
        if end < start {
            std::mem::swap(&mut start, &mut end);
        }
        let (x2, z2) = end;
        let (mut x, mut z) = start;

        let dx = (x2 - x).abs();
        let dz = (z2 - z).abs();
        let sx = if x < x2 { 1 } else { -1 };
        let sz = if z < z2 { 1 } else { -1 };
        let mut v = dx - dz;

        loop {
            self.apply(do_select, Coord::new(y, x, z));
            if x == x2 && z == z2 {
                break;
            }
            let e2 = 2 * v;
            if e2 > -dz {
                v -= dz;
                x += sx;
            }
            if e2 < dx {
                v += dx;
                z += sz;
            }
        }
    }

    /// Select or unselect an ellipse inscribed in the X/Z box between two
    /// corners, at `a.y`.
    ///
    /// Best-effort shape: a cell is inside when its centre falls in the
    /// ellipse whose radii reach the outer edges of the box.
    pub fn range_circle(&mut self, do_select: bool, a: Coord, b: Coord) {
        let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
        let (min_z, max_z) = (a.z.min(b.z), a.z.max(b.z));
        let cx = f64::from(min_x + max_x) / 2.0;
        let cz = f64::from(min_z + max_z) / 2.0;
        let rx = f64::from(max_x - min_x) / 2.0 + 0.5;
        let rz = f64::from(max_z - min_z) / 2.0 + 0.5;

        for x in min_x..=max_x {
            for z in min_z..=max_z {
                let nx = (f64::from(x) - cx) / rx;
                let nz = (f64::from(z) - cz) / rz;
                if nx * nx + nz * nz <= 1.0 {
                    self.apply(do_select, Coord::new(a.y, x, z));
                }
            }
        }
    }

    /// Flood select from `start` within its Y layer.
    ///
    /// Spreads 4-connected along X and Z through every tile whose topmost
    /// placement has the same identity as the start tile (or which is empty
    /// when the start tile is empty). Tiles outside `source` never match.
    pub fn flood_select<S: TileSource + ?Sized>(&mut self, do_select: bool, start: Coord, source: &S) {
        let Some(target) = source.tiles_at(start) else {
            return;
        };

        let mut stack = vec![start];
        let mut visited = HashSet::new();

        while let Some(coord) = stack.pop() {
            if !visited.insert(coord) {
                continue;
            }
            let Some(tiles) = source.tiles_at(coord) else {
                continue;
            };
            if !same_top(tiles, target) {
                continue;
            }

            self.apply(do_select, coord);

            stack.push(coord.offset(0, -1, 0));
            stack.push(coord.offset(0, 1, 0));
            stack.push(coord.offset(0, 0, -1));
            stack.push(coord.offset(0, 0, 1));
        }
    }

    fn has_empty_adjacent(&self, coord: Coord, offsets: &[(i32, i32, i32)]) -> bool {
        neighbours(coord, offsets).any(|n| !self.selected.contains(&n))
    }

    /// Grow (`do_select`) or shrink the selection `size` times.
    ///
    /// Growing selects every unselected neighbour of the selection. Shrinking
    /// unselects every coordinate that has an unselected neighbour.
    pub fn grow(&mut self, size: usize, do_select: bool, adjacency: Adjacency) {
        let offsets = adjacency.offsets();
        for _ in 0..size {
            if do_select {
                let ring: Vec<Coord> = self
                    .selected
                    .iter()
                    .flat_map(|&c| neighbours(c, &offsets))
                    .filter(|n| !self.selected.contains(n))
                    .collect();
                self.selected.extend(ring);
            } else {
                let edge: Vec<Coord> = self
                    .iter()
                    .filter(|&c| self.has_empty_adjacent(c, &offsets))
                    .collect();
                for c in edge {
                    self.selected.remove(&c);
                }
            }
        }
    }

    /// Reduce the selection to its border.
    ///
    /// With `outer`, the selection first grows by one so the border sits just
    /// outside the original region. `edges` counts diagonal neighbours.
    pub fn border(&mut self, outer: bool, edges: bool, check_y: bool, check_x: bool, check_z: bool) {
        let adjacency = Adjacency::new(edges, check_y, check_x, check_z);
        if outer {
            self.grow(1, true, adjacency);
        }
        let offsets = adjacency.offsets();
        let interior: Vec<Coord> = self
            .iter()
            .filter(|&c| !self.has_empty_adjacent(c, &offsets))
            .collect();
        for c in interior {
            self.selected.remove(&c);
        }
    }

    /// Translate every selected coordinate
    pub fn shift(&mut self, dy: i32, dx: i32, dz: i32) {
        self.selected = self.iter().map(|c| c.offset(dy, dx, dz)).collect();
    }

    /// The selected coordinates on layer `y`
    pub fn y_slice(&self, y: i32) -> SelectedCoords {
        self.iter().filter(|c| c.y == y).collect()
    }

    /// Select or unselect the X/Z footprint of `slice` on layer `target_y`
    pub fn replicate_y_slice(&mut self, do_select: bool, slice: &SelectedCoords, target_y: i32) {
        for c in slice.iter() {
            self.apply(do_select, c.with_y(target_y));
        }
    }
}

impl FromIterator<Coord> for SelectedCoords {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self {
            selected: iter.into_iter().collect(),
        }
    }
}

impl Extend<Coord> for SelectedCoords {
    fn extend<I: IntoIterator<Item = Coord>>(&mut self, iter: I) {
        self.selected.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Map;

    fn c(y: i32, x: i32, z: i32) -> Coord {
        Coord::new(y, x, z)
    }

    fn single(coord: Coord) -> SelectedCoords {
        std::iter::once(coord).collect()
    }

    #[test]
    fn test_select_unselect() {
        let mut s = SelectedCoords::new();
        s.select(c(1, 2, 3));
        assert!(s.is_selected(c(1, 2, 3)));
        s.unselect(c(1, 2, 3));
        assert!(!s.is_selected(c(1, 2, 3)));
        assert!(s.is_empty());
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original = single(c(0, 0, 0));
        let mut copy = original.clone();
        copy.select(c(0, 1, 0));
        copy.unselect(c(0, 0, 0));
        assert!(original.is_selected(c(0, 0, 0)));
        assert!(!original.is_selected(c(0, 1, 0)));

        original.clear();
        assert_eq!(copy.len(), 1);
    }

    #[test]
    fn test_set_algebra() {
        let a: SelectedCoords = [c(0, 0, 0), c(0, 1, 0)].into_iter().collect();
        let b: SelectedCoords = [c(0, 1, 0), c(0, 2, 0)].into_iter().collect();

        let mut union = a.clone();
        union.add(&b);
        assert_eq!(union.len(), 3);

        let mut diff = a.clone();
        diff.remove(&b);
        assert_eq!(diff.sorted(), vec![c(0, 0, 0)]);

        let mut replaced = a.clone();
        replaced.set(&b);
        assert_eq!(replaced, b);
    }

    #[test]
    fn test_range_selects_box() {
        let mut s = SelectedCoords::new();
        s.range(true, c(0, 0, 0), c(0, 2, 2));
        assert_eq!(s.len(), 9);
        for x in 0..3 {
            for z in 0..3 {
                assert!(s.is_selected(c(0, x, z)));
            }
        }
        assert!(!s.is_selected(c(1, 0, 0)));
    }

    #[test]
    fn test_range_is_idempotent_and_order_free() {
        let mut once = SelectedCoords::new();
        once.range(true, c(2, 3, 1), c(0, 1, 4));
        let mut twice = once.clone();
        twice.range(true, c(0, 1, 4), c(2, 3, 1));
        assert_eq!(once, twice);
        assert_eq!(once.len(), 3 * 3 * 4);

        twice.range(false, c(0, 1, 1), c(2, 3, 4));
        assert!(twice.is_empty());
    }

    #[test]
    fn test_line_is_undirected() {
        let pairs = [
            (c(0, 0, 0), c(0, 1, 2)),
            (c(0, 0, 0), c(0, 5, 3)),
            (c(0, -2, 4), c(0, 3, -1)),
            (c(0, 7, 0), c(0, 0, 2)),
        ];
        for (a, b) in pairs {
            let mut forward = SelectedCoords::new();
            forward.line(true, a, b);
            let mut backward = SelectedCoords::new();
            backward.line(true, b, a);
            assert_eq!(forward, backward, "line {a} -> {b}");
        }
    }

    #[test]
    fn test_line_is_connected() {
        let mut s = SelectedCoords::new();
        s.line(true, c(3, 0, 0), c(3, 6, 2));
        let cells = s.sorted();
        assert_eq!(cells.first(), Some(&c(3, 0, 0)));
        assert_eq!(cells.last(), Some(&c(3, 6, 2)));
        // One cell per X step for a shallow line.
        assert_eq!(cells.len(), 7);
        assert!(cells.iter().all(|p| p.y == 3));
        for pair in cells.windows(2) {
            assert!((pair[1].x - pair[0].x).abs() <= 1);
            assert!((pair[1].z - pair[0].z).abs() <= 1);
        }
    }

    #[test]
    fn test_line_single_point_and_unselect() {
        let mut s = SelectedCoords::new();
        s.line(true, c(0, 2, 2), c(0, 2, 2));
        assert_eq!(s.sorted(), vec![c(0, 2, 2)]);

        s.range(true, c(0, 0, 0), c(0, 4, 0));
        s.line(false, c(0, 1, 0), c(0, 3, 0));
        assert_eq!(s.sorted(), vec![c(0, 0, 0), c(0, 2, 2), c(0, 4, 0)]);
    }

    #[test]
    fn test_range_circle_stays_in_bounds() {
        // The exact ellipse is not a contract; only check containment.
        let mut s = SelectedCoords::new();
        s.range_circle(true, c(1, 0, 0), c(1, 6, 4));
        assert!(s.is_selected(c(1, 3, 2)));
        assert!(s.iter().all(|p| p.y == 1 && (0..=6).contains(&p.x) && (0..=4).contains(&p.z)));

        let mut point = SelectedCoords::new();
        point.range_circle(true, c(0, 2, 2), c(0, 2, 2));
        assert_eq!(point.sorted(), vec![c(0, 2, 2)]);
    }

    #[test]
    fn test_flood_uniform_layer() {
        let map = Map::new("Flat", "", "", 0, 0, 1, 5, 5);
        let mut s = SelectedCoords::new();
        s.flood_select(true, c(0, 2, 2), &map);
        assert_eq!(s.len(), 25);
    }

    #[test]
    fn test_flood_stops_at_different_tiles() {
        let mut map = Map::new("Walled", "", "", 0, 0, 2, 5, 5);
        for z in 0..5 {
            map.insert_archetype("wall", c(0, 2, z), None).unwrap();
        }

        let mut empty_side = SelectedCoords::new();
        empty_side.flood_select(true, c(0, 0, 0), &map);
        assert_eq!(empty_side.len(), 10);
        assert!(empty_side.iter().all(|p| p.y == 0 && p.x < 2));

        let mut walls = SelectedCoords::new();
        walls.flood_select(true, c(0, 2, 4), &map);
        assert_eq!(walls.len(), 5);
        assert!(walls.iter().all(|p| p.x == 2));
    }

    #[test]
    fn test_flood_matches_topmost_identity() {
        let mut map = Map::new("Stacks", "", "", 0, 0, 1, 3, 1);
        map.insert_archetype("floor", c(0, 0, 0), None).unwrap();
        map.insert_archetype("grass", c(0, 1, 0), None).unwrap();
        map.insert_archetype("floor", c(0, 1, 0), None).unwrap();
        map.insert_archetype("floor", c(0, 2, 0), None).unwrap();
        map.insert_archetype("rug", c(0, 2, 0), None).unwrap();

        let mut s = SelectedCoords::new();
        s.flood_select(true, c(0, 0, 0), &map);
        assert_eq!(s.sorted(), vec![c(0, 0, 0), c(0, 1, 0)]);
    }

    #[test]
    fn test_flood_unselect_and_outside_start() {
        let map = Map::new("Flat", "", "", 0, 0, 1, 3, 3);
        let mut s = SelectedCoords::new();
        s.range(true, c(0, 0, 0), c(0, 4, 4));
        s.flood_select(false, c(0, 1, 1), &map);
        assert_eq!(s.len(), 25 - 9);

        let mut none = SelectedCoords::new();
        none.flood_select(true, c(0, 9, 9), &map);
        assert!(none.is_empty());
    }

    #[test]
    fn test_grow_planar() {
        let mut s = single(c(0, 0, 0));
        s.grow(1, true, Adjacency::PLANAR);
        assert_eq!(s.len(), 5);
        assert!(s.is_selected(c(0, 1, 0)));
        assert!(s.is_selected(c(0, 0, -1)));
        assert!(!s.is_selected(c(1, 0, 0)));

        s.grow(1, true, Adjacency::PLANAR);
        assert_eq!(s.len(), 13);
    }

    #[test]
    fn test_grow_axes_and_diagonal() {
        let mut diagonal = single(c(0, 0, 0));
        diagonal.grow(1, true, Adjacency::new(true, false, true, true));
        assert_eq!(diagonal.len(), 9);

        let mut with_y = single(c(0, 0, 0));
        with_y.grow(1, true, Adjacency::new(false, true, true, true));
        assert_eq!(with_y.len(), 7);

        let mut x_only = single(c(0, 0, 0));
        x_only.grow(2, true, Adjacency::new(true, false, true, false));
        assert_eq!(x_only.sorted(), (-2..=2).map(|x| c(0, x, 0)).collect::<Vec<_>>());
    }

    #[test]
    fn test_shrink() {
        let mut s = SelectedCoords::new();
        s.range(true, c(0, 0, 0), c(0, 4, 4));
        s.grow(1, false, Adjacency::PLANAR);
        assert_eq!(s.len(), 9);
        s.grow(1, false, Adjacency::PLANAR);
        assert_eq!(s.sorted(), vec![c(0, 2, 2)]);
        s.grow(3, false, Adjacency::PLANAR);
        assert!(s.is_empty());
    }

    #[test]
    fn test_inner_border() {
        let mut s = SelectedCoords::new();
        s.range(true, c(0, 0, 0), c(0, 2, 2));
        s.border(false, false, false, true, true);
        assert_eq!(s.len(), 8);
        assert!(!s.is_selected(c(0, 1, 1)));
    }

    #[test]
    fn test_outer_border_is_grow_ring() {
        let mut region = SelectedCoords::new();
        region.range(true, c(0, 0, 0), c(0, 2, 3));

        let mut grown = region.clone();
        grown.grow(1, true, Adjacency::PLANAR);
        let mut ring = grown.clone();
        ring.remove(&region);

        let mut border = region.clone();
        border.border(true, false, false, true, true);
        assert_eq!(border, ring);
        assert!(border.iter().all(|p| !region.is_selected(p)));
    }

    #[test]
    fn test_shift() {
        let mut s: SelectedCoords = [c(0, 0, 0), c(0, 1, 1)].into_iter().collect();
        s.shift(1, -1, 2);
        assert_eq!(s.sorted(), vec![c(1, -1, 2), c(1, 0, 3)]);
    }

    #[test]
    fn test_y_slices() {
        let mut s = SelectedCoords::new();
        s.range(true, c(0, 0, 0), c(1, 1, 0));
        let slice = s.y_slice(1);
        assert_eq!(slice.len(), 2);
        assert!(slice.iter().all(|p| p.y == 1));

        s.replicate_y_slice(true, &slice, 3);
        assert!(s.is_selected(c(3, 0, 0)));
        assert!(s.is_selected(c(3, 1, 0)));
        assert_eq!(s.len(), 6);

        s.replicate_y_slice(false, &slice, 0);
        assert!(s.y_slice(0).is_empty());
    }
}
