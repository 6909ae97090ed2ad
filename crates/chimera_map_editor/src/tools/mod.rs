//! Editor tools - selection, insert, erase, fill and pick
//!
//! Tools are driven by a [`ButtonState`] per tile coordinate. Mouse buttons
//! map to tools through the session's bindings; keyboard shortcuts call
//! [`Mapset::handle_tool`] directly with [`ButtonState::Trigger`].

use crate::{Mapset, ToolError};
use chimera_map_core::{Archetype, Coord, Map, MapError};
use serde::{Deserialize, Serialize};

/// Phase of a press-drag-release gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// Released
    Up,
    /// Pressed
    Down,
    /// Held while moving across tiles
    Held,
    /// Fired directly, e.g. from a keyboard shortcut
    Trigger,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Short label shown next to a bound tool
    pub fn label(&self) -> &'static str {
        match self {
            MouseButton::Left => "L",
            MouseButton::Middle => "M",
            MouseButton::Right => "R",
        }
    }
}

/// Available editor tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum EditorTool {
    #[default]
    Select,
    CircleSelect,
    LineSelect,
    Wand,
    Insert,
    Pick,
    Erase,
    Fill,
}

impl EditorTool {
    pub const ALL: [EditorTool; 8] = [
        EditorTool::Select,
        EditorTool::CircleSelect,
        EditorTool::LineSelect,
        EditorTool::Wand,
        EditorTool::Insert,
        EditorTool::Pick,
        EditorTool::Erase,
        EditorTool::Fill,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            EditorTool::Select => "Select",
            EditorTool::CircleSelect => "Circle Select",
            EditorTool::LineSelect => "Line Select",
            EditorTool::Wand => "Wand",
            EditorTool::Insert => "Insert",
            EditorTool::Pick => "Pick",
            EditorTool::Erase => "Erase",
            EditorTool::Fill => "Fill",
        }
    }

    /// Returns true for the tools that build a selection shape
    pub fn is_selection(&self) -> bool {
        matches!(
            self,
            EditorTool::Select | EditorTool::CircleSelect | EditorTool::LineSelect | EditorTool::Wand
        )
    }
}

/// Keyboard modifiers held while a tool runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
}

/// How a finished selection shape combines with the current selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SelectMode {
    Replace,
    Add,
    Remove,
}

impl SelectMode {
    fn from_modifiers(modifiers: Modifiers) -> Self {
        if modifiers.ctrl {
            SelectMode::Remove
        } else if modifiers.shift {
            SelectMode::Add
        } else {
            SelectMode::Replace
        }
    }
}

/// Whether the topmost placement of `tiles` already references `arch`
fn top_refers_to(tiles: Option<&[Archetype]>, arch: &str) -> bool {
    tiles
        .and_then(|t| t.last())
        .is_some_and(|top| top.refers_to(arch))
}

impl Mapset {
    /// Bind `button` to `tool`, dropping any other binding of either
    pub fn bind_mouse_to_tool(&mut self, button: MouseButton, tool: EditorTool) {
        self.tool_binds.retain(|b, t| *b != button && *t != tool);
        self.tool_binds.insert(button, tool);
    }

    pub fn mouse_tool(&self, button: MouseButton) -> Option<EditorTool> {
        self.tool_binds.get(&button).copied()
    }

    pub fn is_tool_bound(&self, tool: EditorTool) -> bool {
        self.tool_binds.values().any(|t| *t == tool)
    }

    /// Label of the button bound to `tool`, `"_"` when unbound
    pub fn tool_button_label(&self, tool: EditorTool) -> &'static str {
        self.tool_binds
            .iter()
            .find(|(_, t)| **t == tool)
            .map_or("_", |(b, _)| b.label())
    }

    /// Run the tool bound to `button` at `coord`.
    ///
    /// With unique tile visits enabled, a drag applies the tool at most once
    /// per tile; releasing the button forgets the visited tiles.
    pub fn handle_mouse_tool(
        &mut self,
        button: MouseButton,
        state: ButtonState,
        coord: Coord,
    ) -> Result<(), ToolError> {
        let Some(tool) = self.mouse_tool(button) else {
            return Ok(());
        };
        if self.current_map().is_none() {
            return Err(ToolError::NoActiveMap);
        }

        if self.unique_tile_visits {
            match state {
                ButtonState::Down | ButtonState::Held => {
                    if self.visited.is_selected(coord) {
                        return Ok(());
                    }
                    self.visited.select(coord);
                }
                ButtonState::Up => self.visited.clear(),
                ButtonState::Trigger => {}
            }
        }

        self.handle_tool(tool, state, coord)
    }

    /// Run `tool` at `coord` without going through the mouse bindings
    pub fn handle_tool(
        &mut self,
        tool: EditorTool,
        state: ButtonState,
        coord: Coord,
    ) -> Result<(), ToolError> {
        if self.current_map().is_none() {
            return Err(ToolError::NoActiveMap);
        }
        match tool {
            EditorTool::Select
            | EditorTool::CircleSelect
            | EditorTool::LineSelect
            | EditorTool::Wand => {
                self.tool_select(tool, state, coord);
                Ok(())
            }
            EditorTool::Insert => self.tool_insert(state, coord),
            EditorTool::Erase => self.tool_erase(state, coord),
            EditorTool::Fill => self.tool_fill(state),
            EditorTool::Pick => {
                self.tool_pick(state, coord);
                Ok(())
            }
        }
    }

    /// Recompute the pending shape between the anchor and the drag end
    fn compute_selecting(&mut self, tool: EditorTool) {
        let (Some(start), Some(end)) = (self.selecting_start, self.selecting_end) else {
            return;
        };
        match tool {
            EditorTool::CircleSelect => self.selecting.range_circle(true, start, end),
            EditorTool::LineSelect => self.selecting.line(true, start, end),
            EditorTool::Wand => {
                if let Some(map) = self.maps.get(self.current_map_index) {
                    self.selecting.flood_select(true, start, map);
                }
            }
            _ => self.selecting.range(true, start, end),
        }
    }

    fn tool_select(&mut self, tool: EditorTool, state: ButtonState, coord: Coord) {
        match state {
            ButtonState::Down => {
                self.selecting_start = Some(coord);
                self.selecting_end = Some(coord);
                self.selecting.clear();
                self.compute_selecting(tool);
            }
            ButtonState::Held => {
                self.selecting_end = Some(coord);
                // The wand keeps the region flooded on press.
                if tool != EditorTool::Wand {
                    self.selecting.clear();
                    self.compute_selecting(tool);
                }
            }
            ButtonState::Up => {
                self.selecting_end = Some(coord);
                if tool != EditorTool::Wand {
                    self.selecting.clear();
                    self.compute_selecting(tool);
                }
                match SelectMode::from_modifiers(self.modifiers) {
                    SelectMode::Replace => self.selected.set(&self.selecting),
                    SelectMode::Add => self.selected.add(&self.selecting),
                    SelectMode::Remove => self.selected.remove(&self.selecting),
                }
                self.selecting.clear();
                self.selecting_start = None;
                self.selecting_end = None;
                self.move_cursor(coord, self.focus_index());
            }
            ButtonState::Trigger => {
                self.selected.clear();
                self.selected.select(coord);
                self.move_cursor(coord, self.focus_index());
            }
        }
    }

    fn tool_insert(&mut self, state: ButtonState, coord: Coord) -> Result<(), ToolError> {
        if state == ButtonState::Up {
            return Ok(());
        }
        let Some(arch) = self.selected_arch.clone() else {
            return Ok(());
        };
        let keep_same_tile = self.keep_same_tile;
        let current = self.current_map_mut().ok_or(ToolError::NoActiveMap)?;
        if keep_same_tile && top_refers_to(current.get_archs(coord), &arch) {
            return Ok(());
        }
        let mut map = current.clone_map();
        map.insert_archetype(&arch, coord, None)?;
        current.set(map);
        Ok(())
    }

    fn tool_erase(&mut self, state: ButtonState, coord: Coord) -> Result<(), ToolError> {
        match state {
            ButtonState::Down => {
                let current = self.current_map_mut().ok_or(ToolError::NoActiveMap)?;
                let mut map = current.clone_map();
                map.remove_archetype(coord, None)?;
                current.set(map);
            }
            ButtonState::Trigger => {
                let targets = self.selected.sorted();
                let current = self.current_map_mut().ok_or(ToolError::NoActiveMap)?;
                let mut map = current.clone_map();
                let changed = apply_each(&mut map, &targets, |map, c| {
                    map.remove_archetype(c, None).map(|_| true)
                });
                if changed {
                    current.set(map);
                }
            }
            ButtonState::Held | ButtonState::Up => {}
        }
        Ok(())
    }

    fn tool_fill(&mut self, state: ButtonState) -> Result<(), ToolError> {
        if !matches!(state, ButtonState::Trigger | ButtonState::Up) {
            return Ok(());
        }
        let Some(arch) = self.selected_arch.clone() else {
            return Ok(());
        };
        let keep_same_tile = self.keep_same_tile;
        let targets = self.selected.sorted();
        let current = self.current_map_mut().ok_or(ToolError::NoActiveMap)?;
        let original = current.get();
        let mut map = current.clone_map();
        let changed = apply_each(&mut map, &targets, |map, c| {
            if keep_same_tile && top_refers_to(original.tiles(c).map(Vec::as_slice), &arch) {
                return Ok(false);
            }
            map.insert_archetype(&arch, c, None).map(|_| true)
        });
        if changed {
            current.set(map);
        }
        Ok(())
    }

    fn tool_pick(&mut self, state: ButtonState, coord: Coord) {
        if !matches!(state, ButtonState::Trigger | ButtonState::Up) {
            return;
        }
        let picked = self
            .current_map()
            .and_then(|m| m.get().top_archetype(coord))
            .and_then(Archetype::primary_arch)
            .map(str::to_string);
        if let Some(arch) = picked {
            tracing::debug!("Picked archetype {:?} at {}", arch, coord);
            self.selected_arch = Some(arch);
        }
    }
}

/// Apply `op` at every coordinate, logging and skipping failures.
/// Returns true if any call reported a change.
fn apply_each<F>(map: &mut Map, coords: &[Coord], mut op: F) -> bool
where
    F: FnMut(&mut Map, Coord) -> Result<bool, MapError>,
{
    let mut changed = false;
    for &coord in coords {
        match op(map, coord) {
            Ok(applied) => changed |= applied,
            Err(e) => tracing::warn!("Skipping {}: {}", coord, e),
        }
    }
    changed
}
