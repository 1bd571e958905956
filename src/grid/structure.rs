//! Structural mutations: insert, delete, duplicate and move rows/columns
//!
//! Header and row changes that alter the column count always happen inside
//! the same call, so a grid never leaves one of these functions ragged.
//! Every operation returns `false` (or an empty result) when it is a no-op.

use std::collections::BTreeSet;
use std::sync::Arc;

use super::Grid;

/// Which neighbour of an index an operation targets
///
/// For columns `Before` is left and `After` is right; for rows `Before` is up
/// and `After` is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Before,
    After,
}

impl Side {
    fn insert_index(self, index: usize) -> usize {
        match self {
            Side::Before => index,
            Side::After => index + 1,
        }
    }
}

impl Grid {
    /// Name given to a freshly inserted column
    pub fn default_column_name(&self) -> String {
        format!("Column {}", self.column_count() + 1)
    }

    // === Columns ===

    /// Insert an empty, default-named column before or after `index`
    ///
    /// A grid without headers accepts an insert at index 0.
    pub fn insert_column(&mut self, index: usize, side: Side) -> bool {
        let at = if self.headers.is_empty() && index == 0 {
            0
        } else if index < self.column_count() {
            side.insert_index(index)
        } else {
            return false;
        };
        let name = self.default_column_name();

        Arc::make_mut(&mut self.headers).insert(at, name);
        for row in Arc::make_mut(&mut self.rows) {
            Arc::make_mut(row).insert(at, String::new());
        }
        true
    }

    /// Remove a column; refuses to remove the last one
    pub fn delete_column(&mut self, index: usize) -> bool {
        if index >= self.column_count() || self.column_count() <= 1 {
            return false;
        }

        Arc::make_mut(&mut self.headers).remove(index);
        for row in Arc::make_mut(&mut self.rows) {
            Arc::make_mut(row).remove(index);
        }
        true
    }

    /// Copy a column (header and values) to `index + 1`
    pub fn duplicate_column(&mut self, index: usize) -> bool {
        if index >= self.column_count() {
            return false;
        }
        let name = format!("{} (copy)", self.headers[index]);

        Arc::make_mut(&mut self.headers).insert(index + 1, name);
        for row in Arc::make_mut(&mut self.rows) {
            let cells = Arc::make_mut(row);
            let value = cells[index].clone();
            cells.insert(index + 1, value);
        }
        true
    }

    /// Swap a column with its left (`Before`) or right (`After`) neighbour
    pub fn move_column(&mut self, index: usize, toward: Side) -> bool {
        let Some(target) = neighbour(index, toward, self.column_count()) else {
            return false;
        };

        Arc::make_mut(&mut self.headers).swap(index, target);
        for row in Arc::make_mut(&mut self.rows) {
            Arc::make_mut(row).swap(index, target);
        }
        true
    }

    // === Rows ===

    /// Insert an empty row before or after `index`
    ///
    /// An empty grid (no rows yet) accepts an insert at index 0.
    pub fn insert_row(&mut self, index: usize, side: Side) -> bool {
        let at = if self.rows.is_empty() && index == 0 {
            0
        } else if index < self.row_count() {
            side.insert_index(index)
        } else {
            return false;
        };

        let blank = Arc::new(vec![String::new(); self.column_count()]);
        Arc::make_mut(&mut self.rows).insert(at, blank);
        true
    }

    /// Remove a row; refuses to remove the last one
    pub fn delete_row(&mut self, index: usize) -> bool {
        if index >= self.row_count() || self.row_count() <= 1 {
            return false;
        }
        Arc::make_mut(&mut self.rows).remove(index);
        true
    }

    /// Copy a row to `index + 1`
    pub fn duplicate_row(&mut self, index: usize) -> bool {
        if index >= self.row_count() {
            return false;
        }
        // The duplicate gets its own storage so later edits don't alias.
        let copy = Arc::new(self.rows[index].as_ref().clone());
        Arc::make_mut(&mut self.rows).insert(index + 1, copy);
        true
    }

    /// Swap a row with the one above (`Before`) or below (`After`)
    pub fn move_row(&mut self, index: usize, toward: Side) -> bool {
        let Some(target) = neighbour(index, toward, self.row_count()) else {
            return false;
        };
        Arc::make_mut(&mut self.rows).swap(index, target);
        true
    }

    // === Bulk row operations ===

    /// Delete every listed row, highest index first
    ///
    /// Descending order keeps the remaining indices valid while removing.
    /// The one-row floor still applies, so deleting every row leaves the
    /// first one in place. Returns the indices actually removed, in the order
    /// they were removed.
    pub fn delete_rows(&mut self, indices: &BTreeSet<usize>) -> Vec<usize> {
        let mut removed = Vec::new();
        for &index in indices.iter().rev() {
            if self.delete_row(index) {
                removed.push(index);
            }
        }
        removed
    }

    /// Duplicate every listed row, lowest index first
    ///
    /// Each copy lands directly after its original. Indices refer to the grid
    /// as it was before the call. Returns the number of rows duplicated.
    pub fn duplicate_rows(&mut self, indices: &BTreeSet<usize>) -> usize {
        let mut inserted = 0;
        for &index in indices {
            if self.duplicate_row(index + inserted) {
                inserted += 1;
            }
        }
        inserted
    }
}

fn neighbour(index: usize, toward: Side, len: usize) -> Option<usize> {
    if index >= len {
        return None;
    }
    match toward {
        Side::Before => index.checked_sub(1),
        Side::After => (index + 1 < len).then_some(index + 1),
    }
}
