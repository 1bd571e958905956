//! YAML configuration parsing for keymaps
//!
//! Parses keymap.yaml files into Keybinding structs.

use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use super::binding::Keybinding;
use super::command::Command;
use super::context::Condition;
use super::types::{KeyCode, Keystroke, Modifiers};

/// Root structure of a keymap YAML file
#[derive(Debug, Deserialize)]
pub struct KeymapConfig {
    pub bindings: Vec<BindingConfig>,
}

/// A single binding entry from YAML
#[derive(Debug, Deserialize)]
pub struct BindingConfig {
    pub key: String,
    pub command: String,
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub when: Option<Vec<String>>,
}

/// Load keybindings from a YAML file
pub fn load_keymap_file(path: &Path) -> Result<Vec<Keybinding>, KeymapError> {
    let content = std::fs::read_to_string(path).map_err(|e| KeymapError::IoError(e.to_string()))?;

    parse_keymap_yaml(&content)
}

/// Parse keybindings from YAML string
pub fn parse_keymap_yaml(yaml: &str) -> Result<Vec<Keybinding>, KeymapError> {
    let config: KeymapConfig =
        serde_yaml::from_str(yaml).map_err(|e| KeymapError::ParseError(e.to_string()))?;

    let current_platform = get_current_platform();
    let mut bindings = Vec::new();

    for entry in config.bindings {
        // Skip if platform-specific and doesn't match current platform
        if let Some(ref platform) = entry.platform {
            if platform != current_platform {
                continue;
            }
        }

        let keystroke = parse_key_string(&entry.key)?;
        let command = parse_command(&entry.command)?;
        let conditions = parse_conditions(&entry.when)?;

        let mut binding = Keybinding::new(keystroke, command);
        if let Some(conds) = conditions {
            binding = binding.when(conds);
        }
        bindings.push(binding);
    }

    Ok(bindings)
}

/// Parse a key string like "cmd+shift+s" into a Keystroke
pub fn parse_key_string(key_str: &str) -> Result<Keystroke, KeymapError> {
    let parts: Vec<&str> = key_str.split('+').collect();

    if parts.is_empty() {
        return Err(KeymapError::InvalidKey(key_str.to_string()));
    }

    let mut mods = Modifiers::NONE;
    let mut key_part = None;

    for part in parts {
        let part_lower = part.to_lowercase();
        match part_lower.as_str() {
            "cmd" => {
                // Platform command key
                mods = mods | Modifiers::cmd();
            }
            "ctrl" | "control" => {
                mods = mods | Modifiers::CTRL;
            }
            "shift" => {
                mods = mods | Modifiers::SHIFT;
            }
            "alt" | "option" | "opt" => {
                mods = mods | Modifiers::ALT;
            }
            "meta" | "super" | "win" => {
                mods = mods | Modifiers::META;
            }
            _ => {
                // This should be the key itself
                if key_part.is_some() {
                    return Err(KeymapError::InvalidKey(format!(
                        "Multiple keys in binding: {}",
                        key_str
                    )));
                }
                key_part = Some(parse_key_code(&part_lower)?);
            }
        }
    }

    let key = key_part
        .ok_or_else(|| KeymapError::InvalidKey(format!("No key found in binding: {}", key_str)))?;

    Ok(Keystroke::new(key, mods))
}

/// Parse a key code from string
pub fn parse_key_code(key: &str) -> Result<KeyCode, KeymapError> {
    let mut chars = key.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c.to_ascii_lowercase()));
    }

    match key {
        "enter" | "return" => Ok(KeyCode::Enter),
        "escape" | "esc" => Ok(KeyCode::Escape),
        "tab" => Ok(KeyCode::Tab),
        "backspace" | "back" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "space" => Ok(KeyCode::Space),

        // '+' can't appear literally since it separates modifiers
        "plus" => Ok(KeyCode::Char('+')),
        "minus" => Ok(KeyCode::Char('-')),
        "equal" | "equals" => Ok(KeyCode::Char('=')),
        "underscore" => Ok(KeyCode::Char('_')),

        "up" | "arrowup" => Ok(KeyCode::Up),
        "down" | "arrowdown" => Ok(KeyCode::Down),
        "left" | "arrowleft" => Ok(KeyCode::Left),
        "right" | "arrowright" => Ok(KeyCode::Right),

        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),

        "numpad_add" | "numadd" | "numplus" => Ok(KeyCode::NumpadAdd),
        "numpad_subtract" | "numsub" | "numminus" => Ok(KeyCode::NumpadSubtract),
        "numpad_enter" | "numenter" => Ok(KeyCode::NumpadEnter),

        _ => match key.strip_prefix('f').map(str::parse::<u8>) {
            Some(Ok(n)) if (1..=12).contains(&n) => Ok(KeyCode::F(n)),
            _ => Err(KeymapError::InvalidKey(format!("Unknown key: {}", key))),
        },
    }
}

/// Parse a command name string into a Command enum
fn parse_command(cmd: &str) -> Result<Command, KeymapError> {
    Command::from_str(cmd).map_err(|_| KeymapError::InvalidCommand(cmd.to_string()))
}

/// Parse condition strings into Condition enums
fn parse_conditions(when: &Option<Vec<String>>) -> Result<Option<Vec<Condition>>, KeymapError> {
    let Some(conditions) = when else {
        return Ok(None);
    };

    let mut result = Vec::with_capacity(conditions.len());
    for cond_str in conditions {
        let condition = parse_condition(cond_str)?;
        result.push(condition);
    }
    Ok(Some(result))
}

/// Parse a single condition string
fn parse_condition(cond: &str) -> Result<Condition, KeymapError> {
    match cond.to_lowercase().as_str() {
        "editing" => Ok(Condition::Editing),
        "not_editing" | "notediting" | "grid" => Ok(Condition::NotEditing),
        "has_selection" | "hasselection" | "selection" => Ok(Condition::HasSelection),
        "no_selection" | "noselection" => Ok(Condition::NoSelection),
        "has_active_cell" | "hasactivecell" | "active_cell" => Ok(Condition::HasActiveCell),
        _ => Err(KeymapError::InvalidCondition(cond.to_string())),
    }
}

/// Get the current platform identifier
fn get_current_platform() -> &'static str {
    if cfg!(target_os = "macos") {
        "macos"
    } else if cfg!(target_os = "windows") {
        "windows"
    } else {
        "linux"
    }
}

/// Errors that can occur when parsing keymaps
#[derive(Debug, Clone)]
pub enum KeymapError {
    IoError(String),
    ParseError(String),
    InvalidKey(String),
    InvalidCommand(String),
    InvalidCondition(String),
}

impl std::fmt::Display for KeymapError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeymapError::IoError(e) => write!(f, "IO error: {}", e),
            KeymapError::ParseError(e) => write!(f, "Parse error: {}", e),
            KeymapError::InvalidKey(k) => write!(f, "Invalid key: {}", k),
            KeymapError::InvalidCommand(c) => write!(f, "Invalid command: {}", c),
            KeymapError::InvalidCondition(c) => write!(f, "Invalid condition: {}", c),
        }
    }
}

impl std::error::Error for KeymapError {}

// Implement FromStr for Command to parse from YAML
impl FromStr for Command {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "MoveUp" => Ok(Command::MoveUp),
            "MoveDown" => Ok(Command::MoveDown),
            "MoveLeft" => Ok(Command::MoveLeft),
            "MoveRight" => Ok(Command::MoveRight),

            "ExtendUp" => Ok(Command::ExtendUp),
            "ExtendDown" => Ok(Command::ExtendDown),
            "ExtendLeft" => Ok(Command::ExtendLeft),
            "ExtendRight" => Ok(Command::ExtendRight),

            "SelectAll" => Ok(Command::SelectAll),
            "ClearSelection" => Ok(Command::ClearSelection),
            "ClearCells" => Ok(Command::ClearCells),

            "Copy" => Ok(Command::Copy),
            "Cut" => Ok(Command::Cut),
            "Paste" => Ok(Command::Paste),
            "Undo" => Ok(Command::Undo),

            "InsertRowAfter" => Ok(Command::InsertRowAfter),
            "InsertColumnAfter" => Ok(Command::InsertColumnAfter),
            "DeleteRow" => Ok(Command::DeleteRow),
            "DeleteColumn" => Ok(Command::DeleteColumn),

            "StartEditing" => Ok(Command::StartEditing),
            "CommitEdit" => Ok(Command::CommitEdit),
            "CommitEditNext" => Ok(Command::CommitEditNext),
            "CancelEdit" => Ok(Command::CancelEdit),
            "EditDeleteBackward" => Ok(Command::EditDeleteBackward),
            "EditDeleteForward" => Ok(Command::EditDeleteForward),
            "EditCursorLeft" => Ok(Command::EditCursorLeft),
            "EditCursorRight" => Ok(Command::EditCursorRight),
            "EditCursorHome" => Ok(Command::EditCursorHome),
            "EditCursorEnd" => Ok(Command::EditCursorEnd),

            "Unbound" => Ok(Command::Unbound),

            _ => Err(()),
        }
    }
}
