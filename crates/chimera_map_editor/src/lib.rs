//! chimera_map_editor - Editing sessions for chimera RPG maps
//!
//! This crate drives the map model from `chimera_map_core`:
//! - Map sessions with a current map, focus cursor and selection
//! - Selection, insert, erase, fill and pick tools with mouse bindings
//! - Selection panel operations (grow, shrink, border, shift)
//! - Archetype sessions with YAML source editing
//! - Editor preferences
//!
//! Every edit is committed as one undo step on the affected map.
//!
//! # Usage
//!
//! ```rust,ignore
//! use chimera_map_editor::{ButtonState, Mapset, MouseButton};
//! use chimera_map_core::Coord;
//!
//! let mut mapset = Mapset::open("maps/start.map.yaml".as_ref())?;
//! mapset.selected_arch = Some("grass".to_string());
//! mapset.handle_mouse_tool(MouseButton::Right, ButtonState::Down, Coord::new(0, 2, 3))?;
//! mapset.save_all()?;
//! ```
//!
//! With the `bevy` feature, [`Mapset`], [`Archset`] and [`EditorPreferences`]
//! are Bevy resources.

pub mod archset;
pub mod error;
pub mod mapset;
pub mod preferences;
pub mod selection_settings;
pub mod tools;

pub use chimera_map_core;

pub use archset::Archset;
pub use error::ToolError;
pub use mapset::{MapProperties, Mapset};
pub use preferences::{EditorPreferences, PreferencesError};
pub use selection_settings::SelectionSettings;
pub use tools::{ButtonState, EditorTool, Modifiers, MouseButton};
