//! Keyboard selection, the shift session and row selection

use std::time::Instant;

use crate::commands::Cmd;
use crate::grid::CellPosition;
use crate::messages::{Direction, SelectionMsg};
use crate::model::{GridModel, ShiftSession};

/// Handle selection messages
///
/// Navigation is inert while a cell editor is open.
pub fn update_selection(model: &mut GridModel, msg: SelectionMsg) -> Option<Cmd> {
    match msg {
        SelectionMsg::Move(dir) if !model.is_editing() => move_active(model, dir),
        SelectionMsg::Extend(dir) if !model.is_editing() => extend(model, dir),
        SelectionMsg::SelectAll if !model.is_editing() => select_all(model),
        SelectionMsg::Escape if !model.is_editing() => escape(model),
        SelectionMsg::Move(_)
        | SelectionMsg::Extend(_)
        | SelectionMsg::SelectAll
        | SelectionMsg::Escape => None,

        SelectionMsg::ShiftPressed => shift_pressed(model),
        SelectionMsg::ShiftReleased { at } => shift_released(model, at),

        SelectionMsg::ToggleRow(row) => {
            if row >= model.grid.row_count() {
                return None;
            }
            model.selection.rows.select_row(row);
            Some(Cmd::Redraw)
        }
        SelectionMsg::SelectAllRows(selected) => {
            let count = model.grid.row_count();
            model.selection.rows.select_all_rows(selected, count);
            Some(Cmd::Redraw)
        }
    }
}

fn step(model: &GridModel, from: CellPosition, dir: Direction) -> Option<CellPosition> {
    let from = model.clamp(from)?;
    let rows = model.grid.row_count();
    let cols = model.grid.column_count();
    let next = match dir {
        Direction::Up => CellPosition::new(from.row.saturating_sub(1), from.col),
        Direction::Down => CellPosition::new((from.row + 1).min(rows - 1), from.col),
        Direction::Left => CellPosition::new(from.row, from.col.saturating_sub(1)),
        Direction::Right => CellPosition::new(from.row, (from.col + 1).min(cols - 1)),
    };
    Some(next)
}

/// Arrow: move the active cell one step; without one, land on (0,0)
fn move_active(model: &mut GridModel, dir: Direction) -> Option<Cmd> {
    let next = match model.selection.active {
        Some(active) => step(model, active, dir)?,
        None => model.clamp(CellPosition::new(0, 0))?,
    };
    model.selection.cells.select_single(next);
    model.selection.active = Some(next);
    Some(Cmd::Redraw)
}

/// Shift+Arrow: rectangle from the anchor to the moved active cell
///
/// The anchor is the shift session's when one is open, otherwise the first
/// selected cell, otherwise the active cell itself.
fn extend(model: &mut GridModel, dir: Direction) -> Option<Cmd> {
    let Some(active) = model.selection.active else {
        return move_active(model, dir);
    };
    let anchor = model
        .shift_session
        .map(|s| s.anchor)
        .or(model.selection.cells.first())
        .unwrap_or(active);
    let anchor = model.clamp(anchor)?;
    let next = step(model, active, dir)?;

    model.selection.cells.select_rectangle(anchor, next);
    model.selection.active = Some(next);
    Some(Cmd::Redraw)
}

fn select_all(model: &mut GridModel) -> Option<Cmd> {
    let rows = model.grid.row_count();
    let cols = model.grid.column_count();
    model.selection.cells.select_all(rows, cols);
    if model.selection.active.is_none() {
        model.selection.active = model.clamp(CellPosition::new(0, 0));
    }
    Some(Cmd::Redraw)
}

/// Cancel a drag or shift session if one is running, else clear the selection
fn escape(model: &mut GridModel) -> Option<Cmd> {
    let in_gesture = !model.pointer.is_idle()
        || model.shift_session.is_some()
        || !model.timers.is_empty();
    if in_gesture {
        tracing::debug!("escape: gesture cancelled");
        model.cancel_gestures();
        return Some(Cmd::Redraw);
    }
    if model.selection.cells.is_empty() {
        return None;
    }
    model.selection.cells.clear();
    Some(Cmd::Redraw)
}

fn shift_pressed(model: &mut GridModel) -> Option<Cmd> {
    if model.timers.shift_release.take().is_some() {
        // Shift came back within the grace period: same session
        return None;
    }
    if model.shift_session.is_none() {
        if let Some(anchor) = model.selection.active {
            tracing::debug!(row = anchor.row, col = anchor.col, "shift session started");
            model.shift_session = Some(ShiftSession { anchor });
        }
    }
    None
}

fn shift_released(model: &mut GridModel, at: Instant) -> Option<Cmd> {
    if model.shift_session.is_some() {
        model.timers.shift_release = Some(at + model.config.shift_grace());
    }
    None
}
