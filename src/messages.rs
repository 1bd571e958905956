//! Message types for the Elm-style architecture
//!
//! All state changes flow through these message types.

use std::time::Instant;

use crate::clipboard::ClipboardError;
use crate::grid::{CellPosition, Grid, Side};
use crate::keymap::Modifiers;

/// Direction for active-cell movement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Pointer input over grid cells
///
/// Every message that may arm or reschedule a timer carries the instant it
/// happened; timers then fire on [`Msg::Tick`].
#[derive(Debug, Clone)]
pub enum PointerMsg {
    /// Button pressed over a cell
    Down {
        cell: CellPosition,
        mods: Modifiers,
        at: Instant,
    },
    /// Pointer moved over a cell
    Move { cell: CellPosition, at: Instant },
    /// Button released
    Up,
    /// Pointer left the grid
    Leave { button_held: bool },
    /// Second click of a double-click
    DoubleClick { cell: CellPosition, mods: Modifiers },
}

/// Keyboard selection and navigation (only while no cell is being edited)
#[derive(Debug, Clone)]
pub enum SelectionMsg {
    /// Move the active cell one step (Arrow)
    Move(Direction),
    /// Move the active cell and extend a rectangle from the anchor (Shift+Arrow)
    Extend(Direction),
    /// Select every cell (Ctrl/Cmd+A)
    SelectAll,
    /// Cancel a drag/shift session, or clear the selection (Escape)
    Escape,
    /// Shift key went down
    ShiftPressed,
    /// Shift key went up
    ShiftReleased { at: Instant },
    /// Toggle one row in the bulk row selection
    ToggleRow(usize),
    /// Select or deselect every row for bulk operations
    SelectAllRows(bool),
}

/// Cell content editing
#[derive(Debug, Clone)]
pub enum EditMsg {
    /// Open the editor on the active cell (Enter/F2)
    Start,
    /// Open the editor on a specific cell
    StartAt(CellPosition),
    /// Open the editor replacing the content with a typed character
    StartWithChar(char),
    InsertChar(char),
    InsertText(String),
    DeleteBackward,
    DeleteForward,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    /// Commit and move down (Enter)
    Commit,
    /// Commit and move to the next cell (Tab)
    CommitNext,
    /// Editor lost focus; commits like Enter
    Blur,
    /// Discard the edit (Escape)
    Cancel,
    /// Clear every selected cell (Delete)
    ClearSelected,
    /// Restore the newest snapshot (Ctrl/Cmd+Z)
    Undo,
}

/// Clipboard operations and their asynchronous replies
#[derive(Debug, Clone)]
pub enum ClipboardMsg {
    Copy,
    Cut,
    Paste,
    /// Reply to `Cmd::ReadClipboard`
    PasteText(Result<String, ClipboardError>),
    /// A `Cmd::WriteClipboard` could not be delivered
    WriteFailed(ClipboardError),
}

/// Row/column structure changes
#[derive(Debug, Clone)]
pub enum StructureMsg {
    InsertColumn { index: usize, side: Side },
    DeleteColumn(usize),
    DuplicateColumn(usize),
    MoveColumn { index: usize, toward: Side },
    InsertRow { index: usize, side: Side },
    DeleteRow(usize),
    DuplicateRow(usize),
    MoveRow { index: usize, toward: Side },
    /// Delete every row in the row selection
    DeleteSelectedRows,
    /// Duplicate every row in the row selection
    DuplicateSelectedRows,
    /// Insert a row after the active cell's row (Ctrl+Shift+'+')
    InsertRowAfterActive,
    /// Insert a column after the active cell's column (Ctrl+Alt+'+')
    InsertColumnAfterActive,
    /// Delete the active cell's row (Ctrl+Shift+'-')
    DeleteActiveRow,
    /// Delete the active cell's column (Ctrl+Alt+'-')
    DeleteActiveColumn,
}

/// Top-level message type
#[derive(Debug, Clone)]
pub enum Msg {
    Pointer(PointerMsg),
    Selection(SelectionMsg),
    Edit(EditMsg),
    Clipboard(ClipboardMsg),
    Structure(StructureMsg),
    /// Replace the grid with a new external payload; history is discarded
    Load(Grid),
    /// Fire any timer whose deadline is at or before this instant
    Tick(Instant),
    /// The editor is going away; cancel every timer
    Unmount,
}
