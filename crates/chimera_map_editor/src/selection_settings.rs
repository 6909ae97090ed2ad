//! Settings of the selection operations panel

use serde::{Deserialize, Serialize};

/// Parameters for growing, shrinking and bordering the selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSettings {
    /// Number of grow or shrink passes
    pub grow_size: usize,
    pub grow_diagonal: bool,
    pub grow_y: bool,
    pub grow_x: bool,
    pub grow_z: bool,
    /// Place the border just outside the selected region
    pub border_outer: bool,
    /// Count diagonal neighbours when finding the border
    pub border_edges: bool,
    pub border_y: bool,
    pub border_x: bool,
    pub border_z: bool,
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            grow_size: 1,
            grow_diagonal: true,
            grow_y: false,
            grow_x: true,
            grow_z: true,
            border_outer: false,
            border_edges: true,
            border_y: false,
            border_x: true,
            border_z: true,
        }
    }
}

impl SelectionSettings {
    pub fn reset_grow(&mut self) {
        let defaults = Self::default();
        self.grow_size = defaults.grow_size;
        self.grow_diagonal = defaults.grow_diagonal;
        self.grow_y = defaults.grow_y;
        self.grow_x = defaults.grow_x;
        self.grow_z = defaults.grow_z;
    }

    pub fn reset_border(&mut self) {
        let defaults = Self::default();
        self.border_outer = defaults.border_outer;
        self.border_edges = defaults.border_edges;
        self.border_y = defaults.border_y;
        self.border_x = defaults.border_x;
        self.border_z = defaults.border_z;
    }
}
