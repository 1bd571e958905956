//! Configurable keyboard mapping for the grid
//!
//! This module provides a data-driven keybinding system that:
//! - Maps keystrokes to grid commands
//! - Switches bindings depending on whether a cell editor is open
//! - Enables user customization via YAML config files
//!
//! # Architecture
//!
//! ```text
//! host key event → Keystroke → Keymap::lookup_with_context() → Command → Vec<Msg>
//! ```

mod binding;
mod command;
mod config;
mod context;
mod defaults;
#[allow(clippy::module_inception)]
mod keymap;
mod types;

pub use binding::Keybinding;
pub use command::Command;
pub use config::{load_keymap_file, parse_key_string, parse_keymap_yaml, KeymapError};
pub use context::{Condition, KeyContext};
pub use defaults::{
    default_bindings, embedded_bindings, get_default_keymap_yaml, load_default_keymap,
    load_with_overrides, merge_bindings,
};
pub use keymap::Keymap;
pub use types::{KeyCode, Keystroke, Modifiers};
