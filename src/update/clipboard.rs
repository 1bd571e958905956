//! Copy, cut and paste against the grid

use crate::clipboard::ClipboardMatrix;
use crate::commands::Cmd;
use crate::messages::{ClipboardMsg, EditMsg};
use crate::model::GridModel;

use super::edit::update_edit;
use super::write_cells;

/// Handle clipboard messages
pub fn update_clipboard(model: &mut GridModel, msg: ClipboardMsg) -> Option<Cmd> {
    match msg {
        ClipboardMsg::Copy => copy(model),
        ClipboardMsg::Cut => {
            let copied = copy(model)?;
            let cleared = update_edit(model, EditMsg::ClearSelected);
            Some(copied.and(cleared))
        }
        ClipboardMsg::Paste => {
            // The reply lands in the editor while one is open
            if model.is_editing() || model.selection.active.is_some() {
                Some(Cmd::ReadClipboard)
            } else {
                None
            }
        }
        ClipboardMsg::PasteText(Ok(text)) => paste_text(model, &text),
        ClipboardMsg::PasteText(Err(e)) => {
            tracing::warn!("Clipboard read failed: {}", e);
            None
        }
        ClipboardMsg::WriteFailed(e) => {
            tracing::warn!("Clipboard write failed: {}", e);
            None
        }
    }
}

fn copy(model: &GridModel) -> Option<Cmd> {
    let matrix = ClipboardMatrix::capture(&model.grid, &model.selection.cells)?;
    tracing::debug!(
        rows = matrix.height(),
        cols = matrix.width(),
        "copied selection"
    );
    Some(Cmd::WriteClipboard(matrix.to_text()))
}

/// Paste at the active cell, clamped to the grid
///
/// The selection becomes exactly the written cells.
fn paste_text(model: &mut GridModel, text: &str) -> Option<Cmd> {
    if model.is_editing() {
        return update_edit(model, EditMsg::InsertText(text.to_string()));
    }
    let anchor = model.selection.active?;
    let matrix = ClipboardMatrix::parse(text);

    let writes: Vec<_> = matrix
        .paste_targets(&model.grid, anchor)
        .into_iter()
        .map(|(pos, value)| (pos, value.to_string()))
        .collect();
    if writes.is_empty() {
        return None;
    }
    model
        .selection
        .cells
        .set_cells(writes.iter().map(|(pos, _)| *pos));

    Cmd::from_vec(write_cells(model, writes))
}
