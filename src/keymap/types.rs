//! Key input types: Keystroke, Modifiers, KeyCode

use std::fmt;

/// Held modifier keys, one bit each
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const CTRL: Modifiers = Modifiers(0b0001);
    pub const SHIFT: Modifiers = Modifiers(0b0010);
    pub const ALT: Modifiers = Modifiers(0b0100);
    pub const META: Modifiers = Modifiers(0b1000); // Cmd on macOS, Win on Windows

    #[inline]
    const fn has(self, flag: Modifiers) -> bool {
        self.0 & flag.0 != 0
    }

    #[inline]
    pub const fn ctrl(self) -> bool {
        self.has(Self::CTRL)
    }

    #[inline]
    pub const fn shift(self) -> bool {
        self.has(Self::SHIFT)
    }

    #[inline]
    pub const fn alt(self) -> bool {
        self.has(Self::ALT)
    }

    #[inline]
    pub const fn meta(self) -> bool {
        self.has(Self::META)
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Ctrl/Cmd toggles a cell into the selection instead of replacing it
    #[inline]
    pub const fn toggles(self) -> bool {
        self.ctrl() || self.meta()
    }

    /// A key held with any of these never types text into a cell
    #[inline]
    pub const fn is_chord(self) -> bool {
        self.ctrl() || self.meta() || self.alt()
    }

    /// The platform "command" modifier: Cmd on macOS, Ctrl elsewhere
    pub fn cmd() -> Modifiers {
        if cfg!(target_os = "macos") {
            Modifiers::META
        } else {
            Modifiers::CTRL
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Modifiers;

    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl fmt::Display for Modifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names = [
            (Self::CTRL, "ctrl"),
            (Self::SHIFT, "shift"),
            (Self::ALT, "alt"),
            (Self::META, "meta"),
        ];
        let held: Vec<&str> = names
            .iter()
            .filter(|(flag, _)| self.has(*flag))
            .map(|(_, name)| *name)
            .collect();
        write!(f, "{}", held.join("+"))
    }
}

/// A logical key
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// A character key (normalized to lowercase)
    Char(char),

    Enter,
    Escape,
    Tab,
    Backspace,
    Delete,
    Space,

    Up,
    Down,
    Left,
    Right,

    Home,
    End,

    F(u8),

    // Numpad keys that double as structural shortcuts
    NumpadAdd,
    NumpadSubtract,
    NumpadEnter,
}

impl KeyCode {
    /// Text the key would type into a cell, if any
    pub fn typed_char(self) -> Option<char> {
        match self {
            KeyCode::Char(c) => Some(c),
            KeyCode::Space => Some(' '),
            KeyCode::NumpadAdd => Some('+'),
            KeyCode::NumpadSubtract => Some('-'),
            _ => None,
        }
    }
}

/// Written the way `keymap.yaml` spells keys
impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            KeyCode::Char('+') => "plus",
            KeyCode::Char('-') => "minus",
            KeyCode::Char('=') => "equal",
            KeyCode::Char('_') => "underscore",
            KeyCode::Char(c) => return write!(f, "{}", c),
            KeyCode::F(n) => return write!(f, "f{}", n),
            KeyCode::Enter => "enter",
            KeyCode::Escape => "escape",
            KeyCode::Tab => "tab",
            KeyCode::Backspace => "backspace",
            KeyCode::Delete => "delete",
            KeyCode::Space => "space",
            KeyCode::Up => "up",
            KeyCode::Down => "down",
            KeyCode::Left => "left",
            KeyCode::Right => "right",
            KeyCode::Home => "home",
            KeyCode::End => "end",
            KeyCode::NumpadAdd => "numpad_add",
            KeyCode::NumpadSubtract => "numpad_subtract",
            KeyCode::NumpadEnter => "numpad_enter",
        };
        f.write_str(name)
    }
}

/// A key with the modifiers held while it was pressed
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Keystroke {
    pub key: KeyCode,
    pub mods: Modifiers,
}

impl Keystroke {
    pub const fn new(key: KeyCode, mods: Modifiers) -> Self {
        Self { key, mods }
    }

    pub const fn key(key: KeyCode) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    pub fn char(c: char) -> Self {
        Self::char_with_mods(c, Modifiers::NONE)
    }

    pub fn char_with_mods(c: char, mods: Modifiers) -> Self {
        Self::new(KeyCode::Char(c.to_ascii_lowercase()), mods)
    }
}

impl fmt::Display for Keystroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.mods.is_empty() {
            write!(f, "{}", self.key)
        } else {
            write!(f, "{}+{}", self.mods, self.key)
        }
    }
}
