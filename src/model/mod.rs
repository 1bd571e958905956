//! Grid model - the complete state of one grid editor
//!
//! Everything `update` reads or writes lives here, following the Elm
//! Architecture pattern.

pub mod pointer;

pub use pointer::{PendingMove, PointerPhase, ShiftSession, Timers};

use std::time::Instant;

use crate::cell_editor::CellEditState;
use crate::config::GridConfig;
use crate::grid::{CellPosition, Grid};
use crate::history::GridHistory;
use crate::selection::SelectionState;

/// The complete grid editor model
#[derive(Debug, Clone)]
pub struct GridModel {
    pub grid: Grid,
    pub selection: SelectionState,
    pub history: GridHistory,
    /// Open cell editor, if any
    pub editing: Option<CellEditState>,
    pub pointer: PointerPhase,
    pub timers: Timers,
    pub shift_session: Option<ShiftSession>,
    pub config: GridConfig,
}

impl GridModel {
    pub fn new(grid: Grid, config: GridConfig) -> Self {
        Self {
            grid,
            selection: SelectionState::default(),
            history: GridHistory::with_max_size(config.history_limit),
            editing: None,
            pointer: PointerPhase::Idle,
            timers: Timers::default(),
            shift_session: None,
            config,
        }
    }

    /// Model with default configuration
    pub fn with_grid(grid: Grid) -> Self {
        Self::new(grid, GridConfig::default())
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn active_cell(&self) -> Option<CellPosition> {
        self.selection.active
    }

    /// Store the current grid as an undo snapshot
    pub fn snapshot(&mut self) {
        self.history.push(&self.grid);
    }

    /// Earliest timer deadline the host should tick at
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Clamp a position into the grid, `None` for an empty grid
    pub fn clamp(&self, pos: CellPosition) -> Option<CellPosition> {
        let rows = self.grid.row_count();
        let cols = self.grid.column_count();
        if rows == 0 || cols == 0 {
            return None;
        }
        Some(CellPosition::new(pos.row.min(rows - 1), pos.col.min(cols - 1)))
    }

    /// Return to the initial gesture state, cancelling every timer
    pub fn cancel_gestures(&mut self) {
        self.pointer = PointerPhase::Idle;
        self.timers.clear();
        self.shift_session = None;
    }

    /// Verify model invariants (debug builds only)
    ///
    /// Panics with context if an invariant is violated.
    #[cfg(debug_assertions)]
    pub fn assert_invariants_with_context(&self, context: &str) {
        let rows = self.grid.row_count();
        let cols = self.grid.column_count();
        assert!(
            self.grid.is_rectangular(),
            "[{}] grid rows differ in length from headers",
            context
        );
        for cell in self.selection.cells.iter() {
            assert!(
                cell.row < rows && cell.col < cols,
                "[{}] selected cell {:?} outside {}x{} grid",
                context,
                cell,
                rows,
                cols
            );
        }
        if let Some(edit) = &self.editing {
            assert!(
                self.grid.contains(edit.position),
                "[{}] editor open on missing cell {:?}",
                context,
                edit.position
            );
        }
        assert!(
            self.history.len() <= self.history.max_size(),
            "[{}] history over its limit",
            context
        );
    }
}
