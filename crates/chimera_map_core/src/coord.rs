//! Map coordinates

use serde::{Deserialize, Serialize};
use std::fmt;

/// A (Y, X, Z) cell address.
///
/// Y is the vertical layer (height), X is width and Z is depth. Coordinates
/// carry no bounds of their own; a [`crate::Map`] decides whether one is
/// inside it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct Coord {
    pub y: i32,
    pub x: i32,
    pub z: i32,
}

impl Coord {
    pub const fn new(y: i32, x: i32, z: i32) -> Self {
        Self { y, x, z }
    }

    /// Returns this coordinate translated by the given deltas
    pub const fn offset(self, dy: i32, dx: i32, dz: i32) -> Self {
        Self {
            y: self.y + dy,
            x: self.x + dx,
            z: self.z + dz,
        }
    }

    /// Same X/Z cell on another layer
    pub const fn with_y(self, y: i32) -> Self {
        Self { y, ..self }
    }
}

impl From<(i32, i32, i32)> for Coord {
    fn from((y, x, z): (i32, i32, i32)) -> Self {
        Self { y, x, z }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.y, self.x, self.z)
    }
}
