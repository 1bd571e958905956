//! Context system for conditional keybindings
//!
//! The same key does different things while a cell editor is open,
//! e.g. Escape cancels the edit instead of clearing the selection.

use serde::Deserialize;

/// Context extracted from the grid model for keybinding evaluation
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyContext {
    /// Whether a cell editor is open
    pub editing: bool,
    /// Whether at least one cell is selected
    pub has_selection: bool,
    /// Whether there is an active cell
    pub has_active_cell: bool,
}

impl KeyContext {
    /// Context while a cell editor is open
    pub fn editing() -> Self {
        Self {
            editing: true,
            has_selection: true,
            has_active_cell: true,
        }
    }
}

/// Conditions that can be attached to keybindings
///
/// Multiple conditions on a binding are ANDed together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Editing,
    NotEditing,
    HasSelection,
    NoSelection,
    HasActiveCell,
}

impl Condition {
    /// Evaluate this condition against the current context
    pub fn evaluate(self, ctx: &KeyContext) -> bool {
        match self {
            Condition::Editing => ctx.editing,
            Condition::NotEditing => !ctx.editing,
            Condition::HasSelection => ctx.has_selection,
            Condition::NoSelection => !ctx.has_selection,
            Condition::HasActiveCell => ctx.has_active_cell,
        }
    }

    /// Evaluate all conditions (AND logic)
    pub fn evaluate_all(conditions: &[Condition], ctx: &KeyContext) -> bool {
        conditions.iter().all(|c| c.evaluate(ctx))
    }
}
