//! Command types for the Elm-style architecture
//!
//! Commands represent side effects that should be performed after an update:
//! host notifications and clipboard access.

use crate::grid::{CellPosition, Grid};

/// Side effect requested by `update`
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Cmd {
    /// No command - do nothing
    #[default]
    None,
    /// Visual state changed without a notification (pointer phase, editor buffer)
    Redraw,
    /// One cell received a new value
    CellChanged {
        row: usize,
        col: usize,
        value: String,
    },
    /// A logical operation finished; carries the resulting grid
    DataChanged(Grid),
    /// The cell selection changed; carries every selected cell
    SelectionChanged(Vec<CellPosition>),
    /// Write text to the clipboard (best effort)
    WriteClipboard(String),
    /// Read clipboard text; the reply is `ClipboardMsg::PasteText`
    ReadClipboard,
    /// Execute multiple commands
    Batch(Vec<Cmd>),
}

impl Cmd {
    /// Create a batch of commands
    pub fn batch(cmds: Vec<Cmd>) -> Self {
        Cmd::Batch(cmds)
    }

    /// Collapse a list of commands, dropping `None`s
    ///
    /// Returns `None` for an empty list and the bare command for a single one.
    pub fn from_vec(cmds: Vec<Cmd>) -> Option<Cmd> {
        let mut cmds: Vec<Cmd> = cmds.into_iter().filter(|c| *c != Cmd::None).collect();
        match cmds.len() {
            0 => None,
            1 => cmds.pop(),
            _ => Some(Cmd::Batch(cmds)),
        }
    }

    /// Append another command, merging batches
    pub fn and(self, other: Option<Cmd>) -> Cmd {
        let Some(other) = other else {
            return self;
        };
        let mut cmds = self.flatten();
        cmds.extend(other.flatten());
        Cmd::from_vec(cmds).unwrap_or_default()
    }

    /// Flatten nested batches into a list
    pub fn flatten(self) -> Vec<Cmd> {
        match self {
            Cmd::None => vec![],
            Cmd::Batch(cmds) => cmds.into_iter().flat_map(Cmd::flatten).collect(),
            other => vec![other],
        }
    }

    /// Check if this command requires a redraw
    pub fn needs_redraw(&self) -> bool {
        match self {
            Cmd::None => false,
            Cmd::Redraw => true,
            Cmd::CellChanged { .. } => true,
            Cmd::DataChanged(_) => true,
            Cmd::SelectionChanged(_) => true,
            // Clipboard traffic doesn't change what's on screen by itself
            Cmd::WriteClipboard(_) => false,
            Cmd::ReadClipboard => false,
            Cmd::Batch(cmds) => cmds.iter().any(|c| c.needs_redraw()),
        }
    }
}
