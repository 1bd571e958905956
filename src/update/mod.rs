//! Update functions for the Elm-style architecture
//!
//! All state transformations flow through these functions.

mod clipboard;
mod edit;
mod pointer;
mod selection;
mod structure;

use crate::commands::Cmd;
use crate::grid::{CellPosition, Grid};
use crate::messages::Msg;
use crate::model::GridModel;

#[cfg(debug_assertions)]
use crate::tracing::SelectionSnapshot;
#[cfg(debug_assertions)]
use tracing::{debug, span, Level};

pub use clipboard::update_clipboard;
pub use edit::update_edit;
pub use pointer::{tick, update_pointer};
pub use selection::update_selection;
pub use structure::update_structure;

/// Main update function - dispatches to sub-handlers
///
/// In debug builds, this wraps with tracing instrumentation.
/// In release builds, it's a direct dispatch with zero overhead.
#[inline]
pub fn update(model: &mut GridModel, msg: Msg) -> Option<Cmd> {
    #[cfg(debug_assertions)]
    {
        update_traced(model, msg)
    }
    #[cfg(not(debug_assertions))]
    {
        update_inner(model, msg)
    }
}

/// Inner update logic (no tracing)
///
/// A selection notification is appended whenever the message changed the
/// selected set, whichever handler did it.
fn update_inner(model: &mut GridModel, msg: Msg) -> Option<Cmd> {
    let before = model.selection.cells.clone();

    let result = match msg {
        Msg::Pointer(m) => pointer::update_pointer(model, m),
        Msg::Selection(m) => selection::update_selection(model, m),
        Msg::Edit(m) => edit::update_edit(model, m),
        Msg::Clipboard(m) => clipboard::update_clipboard(model, m),
        Msg::Structure(m) => structure::update_structure(model, m),
        Msg::Load(grid) => load(model, grid),
        Msg::Tick(now) => pointer::tick(model, now),
        Msg::Unmount => {
            model.cancel_gestures();
            None
        }
    };

    if model.selection.cells == before {
        return result;
    }
    let notify = Cmd::SelectionChanged(model.selection.cells.cells().to_vec());
    Some(result.unwrap_or_default().and(Some(notify)))
}

/// Replace the payload; everything derived from the old grid is dropped
fn load(model: &mut GridModel, grid: Grid) -> Option<Cmd> {
    tracing::debug!(
        rows = grid.row_count(),
        cols = grid.column_count(),
        "loading new payload"
    );
    model.grid = grid;
    model.history.clear();
    model.selection.reset();
    model.editing = None;
    model.cancel_gestures();
    Some(Cmd::Redraw)
}

/// Write new values as one undoable operation
///
/// Pushes a single snapshot, then emits one cell notification per write and a
/// closing data notification. Out-of-range writes are dropped; nothing happens
/// when no write lands.
pub(crate) fn write_cells(model: &mut GridModel, writes: Vec<(CellPosition, String)>) -> Vec<Cmd> {
    let writes: Vec<_> = writes
        .into_iter()
        .filter(|(pos, _)| model.grid.contains(*pos))
        .collect();
    if writes.is_empty() {
        return vec![];
    }

    model.snapshot();
    tracing::debug!(
        target: "history",
        depth = model.history.len(),
        cells = writes.len(),
        "snapshot before write"
    );

    let mut cmds = Vec::with_capacity(writes.len() + 1);
    for (pos, value) in writes {
        model.grid.set(pos.row, pos.col, &value);
        cmds.push(Cmd::CellChanged {
            row: pos.row,
            col: pos.col,
            value,
        });
    }
    cmds.push(Cmd::DataChanged(model.grid.clone()));
    cmds
}

/// Traced update wrapper (debug builds only)
///
/// Captures before/after selection state and logs diffs for debugging.
/// Ticks with no due timer are not logged.
#[cfg(debug_assertions)]
fn update_traced(model: &mut GridModel, msg: Msg) -> Option<Cmd> {
    let is_noisy = match &msg {
        Msg::Tick(now) => !model.next_deadline().is_some_and(|due| due <= *now),
        _ => false,
    };

    let msg_name = msg_type_name(&msg);
    let _span = if is_noisy {
        None
    } else {
        Some(span!(Level::DEBUG, "update", msg = %msg_name).entered())
    };

    let before = SelectionSnapshot::from_model(model);

    if !is_noisy {
        debug!(target: "message", msg = %msg_name, "processing");
    }

    let result = update_inner(model, msg);

    let after = SelectionSnapshot::from_model(model);
    if let Some(diff) = before.diff(&after) {
        debug!(target: "selection", %diff, "state changed");
    }

    model.assert_invariants_with_context(&msg_name);

    result
}

/// Get a display name for a message type
///
/// Example outputs:
/// - `Pointer::Up`
/// - `Selection::Move(Down)`
/// - `Load(3x4)`
#[cfg(debug_assertions)]
fn msg_type_name(msg: &Msg) -> String {
    match msg {
        Msg::Pointer(m) => format!("Pointer::{:?}", m),
        Msg::Selection(m) => format!("Selection::{:?}", m),
        Msg::Edit(m) => format!("Edit::{:?}", m),
        Msg::Clipboard(m) => format!("Clipboard::{:?}", m),
        Msg::Structure(m) => format!("Structure::{:?}", m),
        Msg::Load(grid) => format!("Load({}x{})", grid.row_count(), grid.column_count()),
        Msg::Tick(_) => "Tick".to_string(),
        Msg::Unmount => "Unmount".to_string(),
    }
}
