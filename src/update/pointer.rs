//! Pointer gestures: click, ctrl/shift-click, long-press drag, double-click
//!
//! Long-press, drag debounce and shift grace are deadlines on the model;
//! [`tick`] fires whichever are due.

use std::time::Instant;

use crate::commands::Cmd;
use crate::grid::CellPosition;
use crate::keymap::Modifiers;
use crate::messages::PointerMsg;
use crate::model::{GridModel, PendingMove, PointerPhase};
use crate::selection::{CellRect, Selection};

use super::edit::{self, Advance};

/// Handle pointer messages
pub fn update_pointer(model: &mut GridModel, msg: PointerMsg) -> Option<Cmd> {
    match msg {
        PointerMsg::Down { cell, mods, at } => pointer_down(model, cell, mods, at),
        PointerMsg::Move { cell, at } => pointer_move(model, cell, at),
        PointerMsg::Up => release(model),
        PointerMsg::Leave { button_held } => {
            if button_held {
                release(model)
            } else {
                None
            }
        }
        PointerMsg::DoubleClick { cell, mods } => double_click(model, cell, mods),
    }
}

fn pointer_down(
    model: &mut GridModel,
    cell: CellPosition,
    mods: Modifiers,
    at: Instant,
) -> Option<Cmd> {
    // Any press starts a new interaction, on the grid or not
    if model.timers.shift_release.take().is_some() {
        tracing::debug!("shift grace cut short by pointer-down");
        model.shift_session = None;
    }
    model.timers.clear();
    model.pointer = PointerPhase::Idle;

    if !model.grid.contains(cell) {
        return None;
    }

    // Clicking away from an open editor commits it
    let committed = if model.is_editing() {
        edit::commit(model, Advance::Down)
    } else {
        None
    };

    let selection = &mut model.selection;
    if mods.toggles() {
        selection.cells.toggle_cell(cell);
        selection.active = Some(cell);
    } else if mods.shift() && !selection.cells.is_empty() {
        let anchor = model
            .shift_session
            .map(|s| s.anchor)
            .or(selection.cells.last())
            .unwrap_or(cell);
        selection.cells.select_range(anchor, cell);
        selection.active = Some(cell);
    } else {
        selection.cells.select_single(cell);
        selection.active = Some(cell);
        model.pointer = PointerPhase::Pressed { cell };
        model.timers.long_press = Some(at + model.config.long_press());
    }

    Some(Cmd::Redraw.and(committed))
}

fn pointer_move(model: &mut GridModel, cell: CellPosition, at: Instant) -> Option<Cmd> {
    if !model.pointer.is_dragging() {
        return None;
    }
    let cell = model.clamp(cell)?;
    // Last call wins: each move pushes the deadline out again
    model.timers.drag_move = Some(PendingMove {
        due: at + model.config.drag_debounce(),
        cell,
    });
    None
}

/// Pointer-up, or leave with the button held
fn release(model: &mut GridModel) -> Option<Cmd> {
    let pending = model.timers.drag_move.take();
    model.timers.long_press = None;

    let mut cmd = None;
    if let (PointerPhase::Dragging { anchor, .. }, Some(pending)) = (model.pointer, pending) {
        cmd = apply_drag(model, anchor, pending.cell);
    }

    let was_idle = model.pointer.is_idle();
    model.pointer = PointerPhase::Idle;
    if was_idle {
        cmd
    } else {
        Some(Cmd::Redraw.and(cmd))
    }
}

/// Rectangle between the drag anchor and `cell`, skipped when unchanged
fn apply_drag(model: &mut GridModel, anchor: CellPosition, cell: CellPosition) -> Option<Cmd> {
    model.pointer = PointerPhase::Dragging {
        anchor,
        current: cell,
    };
    let candidate = Selection::from_rect(CellRect::spanning(anchor, cell));
    if candidate == model.selection.cells {
        return None;
    }
    model.selection.cells = candidate;
    Some(Cmd::Redraw)
}

fn double_click(model: &mut GridModel, cell: CellPosition, mods: Modifiers) -> Option<Cmd> {
    if !model.grid.contains(cell) {
        return None;
    }
    // The second press armed a long-press; a double-click is never a drag
    model.timers.long_press = None;
    model.timers.drag_move = None;
    model.pointer = PointerPhase::Idle;

    let rows = model.grid.row_count();
    let cols = model.grid.column_count();
    if mods.toggles() {
        model.selection.cells.select_column(cell.col, rows);
        model.selection.active = Some(cell);
        Some(Cmd::Redraw)
    } else if mods.shift() {
        model.selection.cells.select_grid_row(cell.row, cols);
        model.selection.active = Some(cell);
        Some(Cmd::Redraw)
    } else {
        edit::start_at(model, cell)
    }
}

/// Fire every timer due at `now`
///
/// Long-press is handled before the debounce so a move scheduled in the same
/// tick lands on the new drag.
pub fn tick(model: &mut GridModel, now: Instant) -> Option<Cmd> {
    let mut cmds = Vec::new();

    if model.timers.long_press.is_some_and(|due| due <= now) {
        model.timers.long_press = None;
        if let PointerPhase::Pressed { cell } = model.pointer {
            tracing::debug!(row = cell.row, col = cell.col, "long-press: drag armed");
            model.pointer = PointerPhase::Dragging {
                anchor: cell,
                current: cell,
            };
            cmds.push(Cmd::Redraw);
        }
    }

    if let Some(pending) = model.timers.drag_move.filter(|m| m.due <= now) {
        model.timers.drag_move = None;
        if let PointerPhase::Dragging { anchor, .. } = model.pointer {
            cmds.extend(apply_drag(model, anchor, pending.cell));
        }
    }

    if model.timers.shift_release.is_some_and(|due| due <= now) {
        model.timers.shift_release = None;
        model.shift_session = None;
        tracing::debug!("shift session ended");
    }

    Cmd::from_vec(cmds)
}
