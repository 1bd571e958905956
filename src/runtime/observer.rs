//! Host notification sink

use crate::grid::{CellPosition, Grid};

/// Receives change notifications from a running grid
///
/// Every method has an empty default so hosts implement only what they need.
pub trait GridObserver {
    /// One cell received a new value
    fn on_cell_change(&mut self, _row: usize, _col: usize, _value: &str) {}
    /// A logical operation finished
    fn on_data_change(&mut self, _grid: &Grid) {}
    /// The cell selection changed
    fn on_selection_change(&mut self, _selection: &[CellPosition]) {}
}

impl GridObserver for () {}

/// A notification as delivered to an observer
#[derive(Debug, Clone, PartialEq)]
pub enum Notification {
    CellChanged {
        row: usize,
        col: usize,
        value: String,
    },
    DataChanged(Grid),
    SelectionChanged(Vec<CellPosition>),
}

/// Observer that keeps every notification in order
#[derive(Debug, Clone, Default)]
pub struct RecordingObserver {
    pub events: Vec<Notification>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Notification::CellChanged { .. }))
            .count()
    }

    pub fn data_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, Notification::DataChanged(_)))
            .count()
    }

    /// Most recent selection reported
    pub fn last_selection(&self) -> Option<&[CellPosition]> {
        self.events.iter().rev().find_map(|e| match e {
            Notification::SelectionChanged(cells) => Some(cells.as_slice()),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl GridObserver for RecordingObserver {
    fn on_cell_change(&mut self, row: usize, col: usize, value: &str) {
        self.events.push(Notification::CellChanged {
            row,
            col,
            value: value.to_string(),
        });
    }

    fn on_data_change(&mut self, grid: &Grid) {
        self.events.push(Notification::DataChanged(grid.clone()));
    }

    fn on_selection_change(&mut self, selection: &[CellPosition]) {
        self.events
            .push(Notification::SelectionChanged(selection.to_vec()));
    }
}

/// Observer that logs notifications through `tracing`
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver;

impl GridObserver for TracingObserver {
    fn on_cell_change(&mut self, row: usize, col: usize, value: &str) {
        tracing::info!(target: "notify", row, col, value, "cell changed");
    }

    fn on_data_change(&mut self, grid: &Grid) {
        tracing::info!(
            target: "notify",
            rows = grid.row_count(),
            cols = grid.column_count(),
            "data changed"
        );
    }

    fn on_selection_change(&mut self, selection: &[CellPosition]) {
        tracing::info!(target: "notify", cells = selection.len(), "selection changed");
    }
}
