//! Command enum representing all executable grid actions
//!
//! Commands are the bridge between keybindings and the message system.
//! Each command maps to one or more `Msg` values for the Elm-style update loop.

use crate::messages::{ClipboardMsg, Direction, EditMsg, Msg, SelectionMsg, StructureMsg};

/// All grid commands that can be bound to keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    // ========================================================================
    // Active cell movement
    // ========================================================================
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,

    // ========================================================================
    // Rectangle extension from the anchor
    // ========================================================================
    ExtendUp,
    ExtendDown,
    ExtendLeft,
    ExtendRight,

    // ========================================================================
    // Selection
    // ========================================================================
    SelectAll,
    /// Cancel a drag or shift session, otherwise clear the selection
    ClearSelection,
    /// Clear the content of every selected cell
    ClearCells,

    // ========================================================================
    // Clipboard and history
    // ========================================================================
    Copy,
    Cut,
    Paste,
    Undo,

    // ========================================================================
    // Structure at the active cell
    // ========================================================================
    InsertRowAfter,
    InsertColumnAfter,
    DeleteRow,
    DeleteColumn,

    // ========================================================================
    // Cell editor
    // ========================================================================
    StartEditing,
    /// Commit and move down (Enter)
    CommitEdit,
    /// Commit and move to the next cell (Tab)
    CommitEditNext,
    CancelEdit,
    EditDeleteBackward,
    EditDeleteForward,
    EditCursorLeft,
    EditCursorRight,
    EditCursorHome,
    EditCursorEnd,

    /// Removes a default binding when used in a user keymap
    Unbound,
}

impl Command {
    /// Convert this command to message(s) for the Elm update loop
    pub fn to_msgs(self) -> Vec<Msg> {
        use Command::*;

        let msg = match self {
            MoveUp => Msg::Selection(SelectionMsg::Move(Direction::Up)),
            MoveDown => Msg::Selection(SelectionMsg::Move(Direction::Down)),
            MoveLeft => Msg::Selection(SelectionMsg::Move(Direction::Left)),
            MoveRight => Msg::Selection(SelectionMsg::Move(Direction::Right)),

            ExtendUp => Msg::Selection(SelectionMsg::Extend(Direction::Up)),
            ExtendDown => Msg::Selection(SelectionMsg::Extend(Direction::Down)),
            ExtendLeft => Msg::Selection(SelectionMsg::Extend(Direction::Left)),
            ExtendRight => Msg::Selection(SelectionMsg::Extend(Direction::Right)),

            SelectAll => Msg::Selection(SelectionMsg::SelectAll),
            ClearSelection => Msg::Selection(SelectionMsg::Escape),
            ClearCells => Msg::Edit(EditMsg::ClearSelected),

            Copy => Msg::Clipboard(ClipboardMsg::Copy),
            Cut => Msg::Clipboard(ClipboardMsg::Cut),
            Paste => Msg::Clipboard(ClipboardMsg::Paste),
            Undo => Msg::Edit(EditMsg::Undo),

            InsertRowAfter => Msg::Structure(StructureMsg::InsertRowAfterActive),
            InsertColumnAfter => Msg::Structure(StructureMsg::InsertColumnAfterActive),
            DeleteRow => Msg::Structure(StructureMsg::DeleteActiveRow),
            DeleteColumn => Msg::Structure(StructureMsg::DeleteActiveColumn),

            StartEditing => Msg::Edit(EditMsg::Start),
            CommitEdit => Msg::Edit(EditMsg::Commit),
            CommitEditNext => Msg::Edit(EditMsg::CommitNext),
            CancelEdit => Msg::Edit(EditMsg::Cancel),
            EditDeleteBackward => Msg::Edit(EditMsg::DeleteBackward),
            EditDeleteForward => Msg::Edit(EditMsg::DeleteForward),
            EditCursorLeft => Msg::Edit(EditMsg::CursorLeft),
            EditCursorRight => Msg::Edit(EditMsg::CursorRight),
            EditCursorHome => Msg::Edit(EditMsg::CursorHome),
            EditCursorEnd => Msg::Edit(EditMsg::CursorEnd),

            Unbound => return vec![],
        };
        vec![msg]
    }

}
