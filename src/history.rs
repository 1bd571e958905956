//! Snapshot-based undo history for grid edits
//!
//! Every content or structure mutation stores the grid as it was *before*
//! the mutation. Undo pops the newest snapshot and the caller swaps it in
//! wholesale. There is no redo stack: undoing discards forward state.

use std::collections::VecDeque;

use crate::grid::Grid;

/// Default number of snapshots kept
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

/// Bounded stack of grid snapshots, newest first
#[derive(Debug, Clone)]
pub struct GridHistory {
    snapshots: VecDeque<Grid>,
    max_size: usize,
}

impl Default for GridHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl GridHistory {
    /// Create a history with the default limit
    pub fn new() -> Self {
        Self::with_max_size(DEFAULT_HISTORY_LIMIT)
    }

    /// Create a history keeping at most `max_size` snapshots
    pub fn with_max_size(max_size: usize) -> Self {
        Self {
            snapshots: VecDeque::new(),
            max_size: max_size.max(1),
        }
    }

    /// Store a pre-mutation snapshot, dropping the oldest on overflow
    ///
    /// Cloning a `Grid` shares unchanged rows, so this is a cheap copy that
    /// later writes to the live grid cannot reach.
    pub fn push(&mut self, grid: &Grid) {
        self.snapshots.push_front(grid.clone());
        self.snapshots.truncate(self.max_size);
    }

    /// Take the newest snapshot
    pub fn pop(&mut self) -> Option<Grid> {
        self.snapshots.pop_front()
    }

    pub fn can_undo(&self) -> bool {
        !self.snapshots.is_empty()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Drop every snapshot (payload replaced)
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}
