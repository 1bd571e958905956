//! Cell content changes: the cell editor, clear-selected and undo

use crate::cell_editor::CellEditState;
use crate::commands::Cmd;
use crate::grid::CellPosition;
use crate::messages::EditMsg;
use crate::model::GridModel;

use super::write_cells;

/// Where the active cell goes after a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Advance {
    /// One row down, clamped (Enter, blur)
    Down,
    /// One column right, wrapping to the next row's first column (Tab)
    NextCell,
}

/// Handle cell editing messages
pub fn update_edit(model: &mut GridModel, msg: EditMsg) -> Option<Cmd> {
    match msg {
        EditMsg::Start => {
            let active = model.selection.active?;
            start_at(model, active)
        }
        EditMsg::StartAt(cell) => start_at(model, cell),
        EditMsg::StartWithChar(ch) => start_with_char(model, ch),

        EditMsg::InsertChar(ch) => with_editor(model, |e| e.insert_char(ch)),
        EditMsg::InsertText(text) => with_editor(model, |e| e.insert_text(&text)),
        EditMsg::DeleteBackward => with_editor(model, CellEditState::delete_backward),
        EditMsg::DeleteForward => with_editor(model, CellEditState::delete_forward),
        EditMsg::CursorLeft => with_editor(model, CellEditState::cursor_left),
        EditMsg::CursorRight => with_editor(model, CellEditState::cursor_right),
        EditMsg::CursorHome => with_editor(model, CellEditState::cursor_home),
        EditMsg::CursorEnd => with_editor(model, CellEditState::cursor_end),

        EditMsg::Commit | EditMsg::Blur => commit(model, Advance::Down),
        EditMsg::CommitNext => commit(model, Advance::NextCell),
        EditMsg::Cancel => {
            let edit = model.editing.take()?;
            tracing::debug!(row = edit.position.row, col = edit.position.col, "edit cancelled");
            Some(Cmd::Redraw)
        }

        EditMsg::ClearSelected => clear_selected(model),
        EditMsg::Undo => undo(model),
    }
}

/// Open the editor on `cell`, which also becomes the only selected cell
pub(crate) fn start_at(model: &mut GridModel, cell: CellPosition) -> Option<Cmd> {
    if model.is_editing() {
        return None;
    }
    let value = model.grid.get(cell.row, cell.col)?.to_string();
    model.selection.cells.select_single(cell);
    model.selection.active = Some(cell);
    model.editing = Some(CellEditState::new(cell, value));
    Some(Cmd::Redraw)
}

/// Typing on a selected cell replaces its content
fn start_with_char(model: &mut GridModel, ch: char) -> Option<Cmd> {
    if model.is_editing() {
        return with_editor(model, |e| e.insert_char(ch));
    }
    let cell = model.selection.active?;
    let original = model.grid.get(cell.row, cell.col)?.to_string();
    model.selection.cells.select_single(cell);
    model.editing = Some(CellEditState::with_char(cell, original, ch));
    Some(Cmd::Redraw)
}

fn with_editor(model: &mut GridModel, f: impl FnOnce(&mut CellEditState)) -> Option<Cmd> {
    let edit = model.editing.as_mut()?;
    f(edit);
    Some(Cmd::Redraw)
}

/// Write the editor buffer back and move the active cell
///
/// Always one snapshot, even when the value is unchanged.
pub(crate) fn commit(model: &mut GridModel, advance: Advance) -> Option<Cmd> {
    let edit = model.editing.take()?;
    let pos = edit.position;
    let modified = edit.is_modified();
    let value = edit.into_value();
    tracing::debug!(row = pos.row, col = pos.col, modified, "edit committed");

    let mut cmds = write_cells(model, vec![(pos, value)]);

    if let Some(next) = advance_from(model, pos, advance) {
        model.selection.cells.select_single(next);
        model.selection.active = Some(next);
        cmds.push(Cmd::Redraw);
    }
    Cmd::from_vec(cmds)
}

fn advance_from(model: &GridModel, pos: CellPosition, advance: Advance) -> Option<CellPosition> {
    let rows = model.grid.row_count();
    let cols = model.grid.column_count();
    if rows == 0 || cols == 0 {
        return None;
    }
    let next = match advance {
        Advance::Down => CellPosition::new((pos.row + 1).min(rows - 1), pos.col),
        Advance::NextCell if pos.col + 1 < cols => CellPosition::new(pos.row, pos.col + 1),
        // Wrap to the next row; the last cell stays put
        Advance::NextCell if pos.row + 1 < rows => CellPosition::new(pos.row + 1, 0),
        Advance::NextCell => pos,
    };
    Some(next)
}

/// Clear every selected cell as one undoable operation
fn clear_selected(model: &mut GridModel) -> Option<Cmd> {
    if model.selection.cells.is_empty() {
        return None;
    }
    let writes = model
        .selection
        .cells
        .iter()
        .map(|&pos| (pos, String::new()))
        .collect();
    Cmd::from_vec(write_cells(model, writes))
}

/// Restore the newest snapshot
pub(crate) fn undo(model: &mut GridModel) -> Option<Cmd> {
    let Some(previous) = model.history.pop() else {
        tracing::debug!(target: "history", "nothing to undo");
        return None;
    };
    tracing::debug!(target: "history", depth = model.history.len(), "undo");

    model.grid = previous;
    model.editing = None;
    let rows = model.grid.row_count();
    let cols = model.grid.column_count();
    model.selection.retain_within(rows, cols);

    Some(Cmd::DataChanged(model.grid.clone()))
}
