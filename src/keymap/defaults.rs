//! Default keybindings for the grid
//!
//! The shipped bindings live in keymap.yaml at the crate root and are embedded
//! at compile time; a hardcoded table backs them up if the YAML fails to parse.

use std::path::Path;

use super::binding::Keybinding;
use super::command::Command;
use super::config::{load_keymap_file, parse_keymap_yaml};
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};
use crate::config_paths;

/// Default keymap YAML embedded at compile time
const DEFAULT_KEYMAP_YAML: &str = include_str!("../../keymap.yaml");

/// Get the embedded default keymap source
pub fn get_default_keymap_yaml() -> &'static str {
    DEFAULT_KEYMAP_YAML
}

/// Load and merge keymaps: defaults + user overrides
///
/// Loading order (each layer overrides the previous):
/// 1. Embedded default keymap (compiled into binary)
/// 2. User config at ~/.config/gridpad/keymap.yaml
///
/// User bindings with `command: Unbound` will remove matching default bindings.
pub fn load_default_keymap() -> Vec<Keybinding> {
    let bindings = embedded_bindings();

    let Some(user_path) = config_paths::keymap_file() else {
        return bindings;
    };
    if !user_path.exists() {
        return bindings;
    }
    load_with_overrides(bindings, &user_path)
}

/// Merge a keymap file over `base`, keeping `base` if the file is invalid
pub fn load_with_overrides(base: Vec<Keybinding>, path: &Path) -> Vec<Keybinding> {
    match load_keymap_file(path) {
        Ok(user_bindings) => {
            tracing::info!(
                "Merging user keymap from {} ({} bindings)",
                path.display(),
                user_bindings.len()
            );
            merge_bindings(base, user_bindings)
        }
        Err(e) => {
            tracing::warn!("Failed to load user keymap from {}: {}", path.display(), e);
            base
        }
    }
}

/// Parse the embedded keymap, falling back to the hardcoded table
pub fn embedded_bindings() -> Vec<Keybinding> {
    match parse_keymap_yaml(DEFAULT_KEYMAP_YAML) {
        Ok(b) => {
            tracing::debug!("Loaded embedded default keymap ({} bindings)", b.len());
            b
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse embedded keymap: {}, using hardcoded defaults",
                e
            );
            default_bindings()
        }
    }
}

/// Merge user bindings into base bindings
///
/// User bindings override or extend base bindings:
/// - If user binding has same keystroke + conditions → replaces base
/// - If user binding command is `Unbound` → removes matching base bindings
/// - Otherwise → user binding is added
pub fn merge_bindings(base: Vec<Keybinding>, user: Vec<Keybinding>) -> Vec<Keybinding> {
    let mut result = base;

    for user_binding in user {
        if user_binding.command == Command::Unbound {
            result.retain(|b| b.keystroke != user_binding.keystroke);
            continue;
        }

        let existing_idx = result
            .iter()
            .position(|b| b.keystroke == user_binding.keystroke && b.when == user_binding.when);

        if let Some(idx) = existing_idx {
            result[idx] = user_binding;
        } else {
            result.push(user_binding);
        }
    }

    result
}

/// Hardcoded core bindings
///
/// Ctrl and Meta are both accepted for the clipboard, undo and select-all so
/// the grid behaves the same on every platform.
pub fn default_bindings() -> Vec<Keybinding> {
    let ctrl = Modifiers::CTRL;
    let meta = Modifiers::META;
    let shift = Modifiers::SHIFT;
    let ctrl_shift = Modifiers::CTRL | Modifiers::SHIFT;
    let ctrl_alt = Modifiers::CTRL | Modifiers::ALT;
    let none = Modifiers::NONE;

    let mut bindings = vec![
        grid(KeyCode::Up, none, Command::MoveUp),
        grid(KeyCode::Down, none, Command::MoveDown),
        grid(KeyCode::Left, none, Command::MoveLeft),
        grid(KeyCode::Right, none, Command::MoveRight),
        grid(KeyCode::Up, shift, Command::ExtendUp),
        grid(KeyCode::Down, shift, Command::ExtendDown),
        grid(KeyCode::Left, shift, Command::ExtendLeft),
        grid(KeyCode::Right, shift, Command::ExtendRight),
        grid(KeyCode::Escape, none, Command::ClearSelection),
        grid(KeyCode::Delete, none, Command::ClearCells),
        grid(KeyCode::Backspace, none, Command::ClearCells),
        grid(KeyCode::Enter, none, Command::StartEditing),
        grid(KeyCode::F(2), none, Command::StartEditing),
        editing(KeyCode::Enter, Command::CommitEdit),
        editing(KeyCode::Tab, Command::CommitEditNext),
        editing(KeyCode::Escape, Command::CancelEdit),
        editing(KeyCode::Backspace, Command::EditDeleteBackward),
        editing(KeyCode::Delete, Command::EditDeleteForward),
        editing(KeyCode::Left, Command::EditCursorLeft),
        editing(KeyCode::Right, Command::EditCursorRight),
        editing(KeyCode::Home, Command::EditCursorHome),
        editing(KeyCode::End, Command::EditCursorEnd),
    ];

    for mods in [ctrl, meta] {
        bindings.push(grid(KeyCode::Char('a'), mods, Command::SelectAll));
        bindings.push(grid(KeyCode::Char('c'), mods, Command::Copy));
        bindings.push(grid(KeyCode::Char('x'), mods, Command::Cut));
        bindings.push(grid(KeyCode::Char('z'), mods, Command::Undo));
        bindings.push(bind(KeyCode::Char('v'), mods, Command::Paste));
    }

    for key in [KeyCode::Char('+'), KeyCode::Char('='), KeyCode::NumpadAdd] {
        bindings.push(grid(key, ctrl_shift, Command::InsertRowAfter));
        bindings.push(grid(key, ctrl_alt, Command::InsertColumnAfter));
    }
    for key in [KeyCode::Char('-'), KeyCode::Char('_'), KeyCode::NumpadSubtract] {
        bindings.push(grid(key, ctrl_shift, Command::DeleteRow));
        bindings.push(grid(key, ctrl_alt, Command::DeleteColumn));
    }

    bindings
}

fn bind(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    Keybinding::new(Keystroke::new(key, mods), command)
}

fn grid(key: KeyCode, mods: Modifiers, command: Command) -> Keybinding {
    bind(key, mods, command).when_single(Condition::NotEditing)
}

fn editing(key: KeyCode, command: Command) -> Keybinding {
    bind(key, Modifiers::NONE, command).when_single(Condition::Editing)
}
