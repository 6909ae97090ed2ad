//! Map editing sessions
//!
//! A [`Mapset`] holds every map of one map file, the current map, the focus
//! cursor and the selection state that the editing tools operate on.

mod file;

use crate::tools::{EditorTool, Modifiers, MouseButton};
use crate::{SelectionSettings, ToolError};
use chimera_map_core::{
    Adjacency, Archetype, Coord, Map, MapCollection, MapError, SelectedCoords, VersionedMap,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use uuid::Uuid;

/// Descriptive fields of a map, edited together from the properties panel
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MapProperties {
    pub name: String,
    pub description: String,
    pub lore: String,
    pub darkness: i32,
    pub reset_time: i32,
}

impl MapProperties {
    pub fn from_map(map: &Map) -> Self {
        Self {
            name: map.name.clone(),
            description: map.description.clone(),
            lore: map.lore.clone(),
            darkness: map.darkness,
            reset_time: map.reset_time,
        }
    }
}

/// Editing session over the maps of one file
#[derive(Debug)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct Mapset {
    filename: PathBuf,
    pub(crate) maps: Vec<VersionedMap>,
    pub(crate) current_map_index: usize,
    focus: Coord,
    /// Stack position of the focused placement
    focus_index: usize,
    pub selected: SelectedCoords,
    /// Shape being dragged out, merged into `selected` on release
    pub selecting: SelectedCoords,
    pub(crate) visited: SelectedCoords,
    pub(crate) selecting_start: Option<Coord>,
    pub(crate) selecting_end: Option<Coord>,
    is_wheel_selecting: bool,
    /// Skip inserting an archetype onto a tile whose top already references it
    pub keep_same_tile: bool,
    /// Apply a tool at most once per tile during a single drag
    pub unique_tile_visits: bool,
    pub modifiers: Modifiers,
    /// Archetype placed by the insert and fill tools
    pub selected_arch: Option<String>,
    pub(crate) tool_binds: HashMap<MouseButton, EditorTool>,
    unsaved: bool,
}

impl Mapset {
    /// Start a session over `maps`, ordered by data name
    pub fn new(filename: impl Into<PathBuf>, maps: MapCollection) -> Self {
        let mut mapset = Self {
            filename: filename.into(),
            maps: maps
                .into_iter()
                .map(|(data_name, map)| VersionedMap::new(map, data_name))
                .collect(),
            current_map_index: 0,
            focus: Coord::default(),
            focus_index: 0,
            selected: SelectedCoords::new(),
            selecting: SelectedCoords::new(),
            visited: SelectedCoords::new(),
            selecting_start: None,
            selecting_end: None,
            is_wheel_selecting: false,
            keep_same_tile: true,
            unique_tile_visits: true,
            modifiers: Modifiers::default(),
            selected_arch: None,
            tool_binds: HashMap::new(),
            unsaved: false,
        };
        mapset.bind_mouse_to_tool(MouseButton::Left, EditorTool::Select);
        mapset.bind_mouse_to_tool(MouseButton::Middle, EditorTool::Erase);
        mapset.bind_mouse_to_tool(MouseButton::Right, EditorTool::Insert);
        mapset
    }

    pub fn filename(&self) -> &Path {
        &self.filename
    }

    pub fn maps(&self) -> &[VersionedMap] {
        &self.maps
    }

    pub fn current_map_index(&self) -> usize {
        self.current_map_index
    }

    pub fn current_map(&self) -> Option<&VersionedMap> {
        self.maps.get(self.current_map_index)
    }

    pub(crate) fn current_map_mut(&mut self) -> Option<&mut VersionedMap> {
        self.maps.get_mut(self.current_map_index)
    }

    /// Make the map with `id` current. Returns false if no such map exists.
    pub fn set_current_map(&mut self, id: Uuid) -> bool {
        match self.maps.iter().position(|m| m.id() == id) {
            Some(index) => {
                self.current_map_index = index;
                self.move_cursor(self.focus, self.focus_index);
                true
            }
            None => false,
        }
    }

    fn check_data_name(&self, data_name: &str) -> Result<(), ToolError> {
        if self.maps.iter().any(|m| m.data_name() == data_name) {
            tracing::warn!("Map {:?} already exists", data_name);
            return Err(ToolError::DuplicateDataName(data_name.to_string()));
        }
        Ok(())
    }

    /// Add a new empty map under `data_name` and make it current.
    /// Data names are unique within a file.
    pub fn create_map(
        &mut self,
        data_name: impl Into<String>,
        properties: MapProperties,
        height: usize,
        width: usize,
        depth: usize,
    ) -> Result<Uuid, ToolError> {
        let data_name = data_name.into();
        self.check_data_name(&data_name)?;
        let map = Map::new(
            properties.name,
            properties.description,
            properties.lore,
            properties.darkness,
            properties.reset_time,
            height,
            width,
            depth,
        );
        let versioned = VersionedMap::new(map, data_name);
        let id = versioned.id();
        tracing::info!("Created map {:?} ({}x{}x{})", versioned.data_name(), height, width, depth);
        self.maps.push(versioned);
        self.current_map_index = self.maps.len() - 1;
        self.unsaved = true;
        Ok(id)
    }

    /// Change the data name of the map with `id`
    pub fn rename_map(&mut self, id: Uuid, data_name: impl Into<String>) -> Result<(), ToolError> {
        let data_name = data_name.into();
        let index = self
            .maps
            .iter()
            .position(|m| m.id() == id)
            .ok_or(ToolError::UnknownMap(id))?;
        if self.maps[index].data_name() == data_name {
            return Ok(());
        }
        self.check_data_name(&data_name)?;
        tracing::info!("Renamed map {:?} to {:?}", self.maps[index].data_name(), data_name);
        self.maps[index].set_data_name(data_name);
        self.unsaved = true;
        Ok(())
    }

    /// Remove the map at `index`. Out-of-range indices are ignored.
    pub fn delete_map(&mut self, index: usize) -> Option<VersionedMap> {
        if index >= self.maps.len() {
            return None;
        }
        let removed = self.maps.remove(index);
        if self.current_map_index > index {
            self.current_map_index -= 1;
        }
        self.unsaved = true;
        tracing::info!("Deleted map {:?}", removed.data_name());
        Some(removed)
    }

    /// Commit an edit of the current map: clone, let `edit` mutate the
    /// copy, then push it as one undo step. Nothing is committed on error.
    pub fn edit_current_map<R, F>(&mut self, edit: F) -> Result<R, ToolError>
    where
        F: FnOnce(&mut Map) -> Result<R, ToolError>,
    {
        let current = self.current_map_mut().ok_or(ToolError::NoActiveMap)?;
        let mut map = current.clone_map();
        let result = edit(&mut map)?;
        current.set(map);
        Ok(result)
    }

    /// Grow or shrink the current map on each side; see [`Map::resized`]
    pub fn resize_current_map(
        &mut self,
        up: i32,
        down: i32,
        left: i32,
        right: i32,
        top: i32,
        bottom: i32,
    ) -> Result<(), ToolError> {
        let current = self.current_map_mut().ok_or(ToolError::NoActiveMap)?;
        let resized = current.get().resized(up, down, left, right, top, bottom);
        tracing::debug!(
            "Resizing map {:?} to {}x{}x{}",
            current.data_name(),
            resized.height,
            resized.width,
            resized.depth
        );
        current.set(resized);
        self.move_cursor(self.focus, self.focus_index);
        Ok(())
    }

    pub fn set_map_properties(&mut self, properties: MapProperties) -> Result<(), ToolError> {
        self.edit_current_map(|map| {
            map.name = properties.name;
            map.description = properties.description;
            map.lore = properties.lore;
            map.darkness = properties.darkness;
            map.reset_time = properties.reset_time;
            Ok(())
        })
    }

    pub fn set_map_script(&mut self, script: impl Into<String>) -> Result<(), ToolError> {
        let script = script.into();
        self.edit_current_map(|map| {
            map.script = script;
            Ok(())
        })
    }

    /// Remove one placement from the current map as an undoable step
    pub fn remove_archetype(
        &mut self,
        coord: Coord,
        pos: Option<usize>,
    ) -> Result<Archetype, ToolError> {
        self.edit_current_map(|map| Ok(map.remove_archetype(coord, pos)?))
            .inspect_err(|e| tracing::warn!("Could not remove archetype: {}", e))
    }

    /// Move one placement within the current map as an undoable step
    pub fn move_archetype(
        &mut self,
        from: Coord,
        from_pos: Option<usize>,
        to: Coord,
        to_pos: Option<usize>,
    ) -> Result<(), ToolError> {
        self.edit_current_map(|map| Ok(map.move_archetype(from, from_pos, to, to_pos)?))
    }

    /// Raise the focused placement one step. From the top of its stack it
    /// moves to the bottom of the stack one layer up.
    pub fn move_focused_up(&mut self) -> Result<(), ToolError> {
        let (focus, index) = (self.focus, self.focus_index);
        let len = self.focused_stack_len()?;
        if index + 1 >= len {
            self.move_archetype(focus, Some(index), focus.offset(1, 0, 0), Some(0))?;
            self.focus = focus.offset(1, 0, 0);
            self.focus_index = 0;
        } else {
            self.move_archetype(focus, Some(index), focus, Some(index + 1))?;
            self.focus_index = index + 1;
        }
        Ok(())
    }

    /// Lower the focused placement one step. From the bottom of its stack it
    /// moves to the top of the stack one layer down.
    pub fn move_focused_down(&mut self) -> Result<(), ToolError> {
        let (focus, index) = (self.focus, self.focus_index);
        self.focused_stack_len()?;
        if index == 0 {
            let below = focus.offset(-1, 0, 0);
            self.move_archetype(focus, Some(index), below, None)?;
            self.focus = below;
            self.focus_index = self.focused_stack_len()?.saturating_sub(1);
        } else {
            self.move_archetype(focus, Some(index), focus, Some(index - 1))?;
            self.focus_index = index - 1;
        }
        Ok(())
    }

    /// Remove the focused placement as an undoable step
    pub fn remove_focused(&mut self) -> Result<Archetype, ToolError> {
        self.remove_archetype(self.focus, Some(self.focus_index))
    }

    fn focused_stack_len(&self) -> Result<usize, ToolError> {
        let current = self.current_map().ok_or(ToolError::NoActiveMap)?;
        let tiles = current
            .get_archs(self.focus)
            .ok_or(MapError::TileOutOfBounds(self.focus))?;
        Ok(tiles.len())
    }

    pub fn undo(&mut self) -> bool {
        self.current_map_mut().is_some_and(VersionedMap::undo)
    }

    pub fn redo(&mut self) -> bool {
        self.current_map_mut().is_some_and(VersionedMap::redo)
    }

    pub fn focus(&self) -> Coord {
        self.focus
    }

    pub fn focus_index(&self) -> usize {
        self.focus_index
    }

    /// Move the focus cursor, clamped to the current map's bounds
    pub fn move_cursor(&mut self, coord: Coord, index: usize) {
        let coord = match self.current_map() {
            Some(current) => {
                let map = current.get();
                Coord::new(
                    clamp_axis(coord.y, map.height),
                    clamp_axis(coord.x, map.width),
                    clamp_axis(coord.z, map.depth),
                )
            }
            None => coord,
        };
        self.focus = coord;
        self.focus_index = index;
    }

    /// Move the focus `delta` layers along Y
    pub fn scroll_focus(&mut self, delta: i32) {
        if delta == 0 {
            return;
        }
        self.move_cursor(self.focus.offset(delta, 0, 0), self.focus_index);
    }

    /// Translate the committed selection
    pub fn shift_selection(&mut self, dy: i32, dx: i32, dz: i32) {
        self.selected.shift(dy, dx, dz);
    }

    /// Extend or trim the selection across layers while scrolling.
    ///
    /// Selecting copies the focused layer's footprint (committed and pending)
    /// onto the layer being scrolled to. Unselecting drops the focused layer
    /// from both sets. Pending cells are merged by
    /// [`Mapset::finish_wheel_select`].
    pub fn wheel_select(&mut self, delta: i32, do_select: bool) {
        if delta == 0 {
            return;
        }
        self.is_wheel_selecting = true;
        let y = self.focus.y;
        if do_select {
            let target = y + delta;
            let pending = self.selecting.y_slice(y);
            self.selecting.replicate_y_slice(true, &pending, target);
            let committed = self.selected.y_slice(y);
            self.selecting.replicate_y_slice(true, &committed, target);
        } else {
            let committed = self.selected.y_slice(y);
            self.selected.remove(&committed);
            let pending = self.selecting.y_slice(y);
            self.selecting.remove(&pending);
        }
        self.scroll_focus(delta);
    }

    /// Commit cells gathered by [`Mapset::wheel_select`]
    pub fn finish_wheel_select(&mut self) {
        if !self.is_wheel_selecting {
            return;
        }
        self.selected.add(&self.selecting);
        self.selecting.clear();
        self.is_wheel_selecting = false;
    }

    pub fn is_wheel_selecting(&self) -> bool {
        self.is_wheel_selecting
    }

    /// Grow or shrink the selection by the panel's resize settings
    pub fn apply_grow(&mut self, settings: &SelectionSettings, shrink: bool) {
        let adjacency = Adjacency::new(
            settings.grow_diagonal,
            settings.grow_y,
            settings.grow_x,
            settings.grow_z,
        );
        self.selected.grow(settings.grow_size, !shrink, adjacency);
    }

    /// Reduce the selection to its border using the panel's settings
    pub fn apply_border(&mut self, settings: &SelectionSettings) {
        self.selected.border(
            settings.border_outer,
            settings.border_edges,
            settings.border_y,
            settings.border_x,
            settings.border_z,
        );
    }

    /// Whether the file or any of its maps has changes not yet saved
    pub fn unsaved(&self) -> bool {
        self.unsaved || self.maps.iter().any(VersionedMap::unsaved)
    }
}

fn clamp_axis(value: i32, len: usize) -> i32 {
    let max = i32::try_from(len).unwrap_or(i32::MAX).saturating_sub(1).max(0);
    value.clamp(0, max)
}
