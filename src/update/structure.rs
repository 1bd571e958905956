//! Row and column structure changes
//!
//! Every change that actually happens is one undo snapshot and one data
//! notification. Refused changes (edges, the one-row/one-column floor,
//! out-of-range indices) leave history untouched.

use crate::commands::Cmd;
use crate::grid::{Grid, Side};
use crate::messages::StructureMsg;
use crate::model::GridModel;

/// What a change does to the selection afterwards
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stale {
    /// Indices still point at the same data
    Nothing,
    /// Cell selection and active cell no longer mean anything
    Cells,
    /// The row selection was consumed
    Rows,
    /// Both of the above
    All,
}

/// Handle structure messages
pub fn update_structure(model: &mut GridModel, msg: StructureMsg) -> Option<Cmd> {
    if model.is_editing() {
        return None;
    }
    match msg {
        StructureMsg::InsertColumn { index, side } => {
            apply(model, "insert column", Stale::Nothing, |g| g.insert_column(index, side))
        }
        StructureMsg::DeleteColumn(index) => {
            apply(model, "delete column", Stale::Cells, |g| g.delete_column(index))
        }
        StructureMsg::DuplicateColumn(index) => {
            apply(model, "duplicate column", Stale::Nothing, |g| g.duplicate_column(index))
        }
        StructureMsg::MoveColumn { index, toward } => {
            apply(model, "move column", Stale::Nothing, |g| g.move_column(index, toward))
        }
        StructureMsg::InsertRow { index, side } => {
            apply(model, "insert row", Stale::Nothing, |g| g.insert_row(index, side))
        }
        StructureMsg::DeleteRow(index) => {
            apply(model, "delete row", Stale::All, |g| g.delete_row(index))
        }
        StructureMsg::DuplicateRow(index) => {
            apply(model, "duplicate row", Stale::Nothing, |g| g.duplicate_row(index))
        }
        StructureMsg::MoveRow { index, toward } => {
            apply(model, "move row", Stale::Nothing, |g| g.move_row(index, toward))
        }

        StructureMsg::DeleteSelectedRows => {
            let rows = model.selection.rows.indices().clone();
            apply(model, "delete selected rows", Stale::All, |g| {
                !g.delete_rows(&rows).is_empty()
            })
        }
        StructureMsg::DuplicateSelectedRows => {
            let rows = model.selection.rows.indices().clone();
            apply(model, "duplicate selected rows", Stale::Rows, |g| {
                g.duplicate_rows(&rows) > 0
            })
        }

        StructureMsg::InsertRowAfterActive => {
            let row = model.selection.active?.row;
            update_structure(
                model,
                StructureMsg::InsertRow {
                    index: row,
                    side: Side::After,
                },
            )
        }
        StructureMsg::InsertColumnAfterActive => {
            let col = model.selection.active?.col;
            update_structure(
                model,
                StructureMsg::InsertColumn {
                    index: col,
                    side: Side::After,
                },
            )
        }
        StructureMsg::DeleteActiveRow => {
            let row = model.selection.active?.row;
            update_structure(model, StructureMsg::DeleteRow(row))
        }
        StructureMsg::DeleteActiveColumn => {
            let col = model.selection.active?.col;
            update_structure(model, StructureMsg::DeleteColumn(col))
        }
    }
}

/// Run `change` on a working copy; commit it with a snapshot if it applied
fn apply(
    model: &mut GridModel,
    what: &str,
    stale: Stale,
    change: impl FnOnce(&mut Grid) -> bool,
) -> Option<Cmd> {
    let mut next = model.grid.clone();
    if !change(&mut next) {
        tracing::debug!("{} refused", what);
        return None;
    }

    model.snapshot();
    model.grid = next;
    tracing::debug!(
        target: "history",
        depth = model.history.len(),
        rows = model.grid.row_count(),
        cols = model.grid.column_count(),
        "{}",
        what
    );

    match stale {
        Stale::Nothing => {}
        Stale::Cells => model.selection.clear_cells(),
        Stale::Rows => model.selection.rows.clear(),
        Stale::All => {
            model.selection.clear_cells();
            model.selection.rows.clear();
        }
    }

    Some(Cmd::DataChanged(model.grid.clone()))
}
