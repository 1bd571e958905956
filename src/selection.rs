//! Selection engine
//!
//! Pure state: the set of selected cells, the active cell, and the row
//! selection used by bulk row operations. Nothing here touches grid contents;
//! operations that need grid extents take them as arguments.

use std::collections::{BTreeSet, HashSet};

use crate::grid::CellPosition;

/// Inclusive rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl CellRect {
    /// Rectangle spanning two corners, in any order
    pub fn spanning(a: CellPosition, b: CellPosition) -> Self {
        Self {
            top: a.row.min(b.row),
            left: a.col.min(b.col),
            bottom: a.row.max(b.row),
            right: a.col.max(b.col),
        }
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        (self.top..=self.bottom).contains(&pos.row) && (self.left..=self.right).contains(&pos.col)
    }

    /// All positions, row-major, top-left first
    ///
    /// Enumeration order never depends on which corner a drag started from.
    pub fn positions(self) -> impl Iterator<Item = CellPosition> {
        let (left, right) = (self.left, self.right);
        (self.top..=self.bottom)
            .flat_map(move |row| (left..=right).map(move |col| CellPosition::new(row, col)))
    }
}

/// A set of selected cells
///
/// Insertion order is kept because the shift anchors read "first" and "last"
/// selected cell, but equality is set equality.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    cells: Vec<CellPosition>,
    index: HashSet<CellPosition>,
}

impl PartialEq for Selection {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for Selection {}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a selection from positions, dropping duplicates
    pub fn from_cells(cells: impl IntoIterator<Item = CellPosition>) -> Self {
        let mut selection = Self::new();
        for cell in cells {
            selection.insert(cell);
        }
        selection
    }

    /// Build a selection covering a rectangle
    pub fn from_rect(rect: CellRect) -> Self {
        Self::from_cells(rect.positions())
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        self.index.contains(&pos)
    }

    /// Selected cells in insertion order
    pub fn cells(&self) -> &[CellPosition] {
        &self.cells
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellPosition> {
        self.cells.iter()
    }

    pub fn first(&self) -> Option<CellPosition> {
        self.cells.first().copied()
    }

    pub fn last(&self) -> Option<CellPosition> {
        self.cells.last().copied()
    }

    /// Smallest rectangle containing every selected cell
    pub fn bounding_rect(&self) -> Option<CellRect> {
        let first = self.first()?;
        let mut rect = CellRect::spanning(first, first);
        for cell in &self.cells[1..] {
            rect.top = rect.top.min(cell.row);
            rect.left = rect.left.min(cell.col);
            rect.bottom = rect.bottom.max(cell.row);
            rect.right = rect.right.max(cell.col);
        }
        Some(rect)
    }

    pub fn clear(&mut self) {
        self.cells.clear();
        self.index.clear();
    }

    fn insert(&mut self, pos: CellPosition) -> bool {
        if self.index.insert(pos) {
            self.cells.push(pos);
            true
        } else {
            false
        }
    }

    fn remove(&mut self, pos: CellPosition) -> bool {
        if self.index.remove(&pos) {
            self.cells.retain(|c| *c != pos);
            true
        } else {
            false
        }
    }

    fn replace_with(&mut self, cells: impl IntoIterator<Item = CellPosition>) {
        self.clear();
        for cell in cells {
            self.insert(cell);
        }
    }

    // === Selection engine operations ===

    /// Plain click: exactly one cell
    pub fn select_single(&mut self, pos: CellPosition) {
        self.replace_with([pos]);
    }

    /// Ctrl-click: add the cell if absent, remove it if present
    pub fn toggle_cell(&mut self, pos: CellPosition) {
        if !self.remove(pos) {
            self.insert(pos);
        }
    }

    /// Shift-click: rectangle between `anchor` and `pos`, inclusive
    pub fn select_range(&mut self, anchor: CellPosition, pos: CellPosition) {
        self.select_rectangle(anchor, pos);
    }

    /// Drag: rectangle between two corners
    pub fn select_rectangle(&mut self, a: CellPosition, b: CellPosition) {
        self.replace_with(CellRect::spanning(a, b).positions());
    }

    /// Every cell of a `rows` x `cols` grid, row-major
    pub fn select_all(&mut self, rows: usize, cols: usize) {
        self.clear();
        if rows == 0 || cols == 0 {
            return;
        }
        let rect = CellRect::spanning(CellPosition::new(0, 0), CellPosition::new(rows - 1, cols - 1));
        self.replace_with(rect.positions());
    }

    /// Every cell of one column
    pub fn select_column(&mut self, col: usize, rows: usize) {
        self.replace_with((0..rows).map(|row| CellPosition::new(row, col)));
    }

    /// Every cell of one grid row
    pub fn select_grid_row(&mut self, row: usize, cols: usize) {
        self.replace_with((0..cols).map(|col| CellPosition::new(row, col)));
    }

    /// Replace the selection with explicit cells
    pub fn set_cells(&mut self, cells: impl IntoIterator<Item = CellPosition>) {
        self.replace_with(cells);
    }
}

/// Row indices picked for bulk row operations
///
/// Independent of the cell selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RowSelection {
    rows: BTreeSet<usize>,
}

impl RowSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle one row's membership
    pub fn select_row(&mut self, row: usize) {
        if !self.rows.remove(&row) {
            self.rows.insert(row);
        }
    }

    /// Select every row of the grid, or none
    pub fn select_all_rows(&mut self, selected: bool, row_count: usize) {
        if selected {
            self.rows = (0..row_count).collect();
        } else {
            self.rows.clear();
        }
    }

    pub fn contains(&self, row: usize) -> bool {
        self.rows.contains(&row)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Selected rows in ascending order
    pub fn indices(&self) -> &BTreeSet<usize> {
        &self.rows
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }
}

/// Cell selection plus the active cell and the row selection
#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    pub cells: Selection,
    pub active: Option<CellPosition>,
    pub rows: RowSelection,
}

impl SelectionState {
    /// Forget every selection
    pub fn reset(&mut self) {
        self.cells.clear();
        self.active = None;
        self.rows.clear();
    }

    /// Drop anything that no longer addresses a cell of a `rows` x `cols` grid
    pub fn retain_within(&mut self, rows: usize, cols: usize) {
        let inside = |p: &CellPosition| p.row < rows && p.col < cols;
        if self.cells.iter().any(|p| !inside(p)) {
            let kept: Vec<CellPosition> = self.cells.iter().copied().filter(inside).collect();
            self.cells.set_cells(kept);
        }
        if self.active.is_some_and(|p| !inside(&p)) {
            self.active = None;
        }
        let stale: Vec<usize> = self.rows.indices().range(rows..).copied().collect();
        for row in stale {
            self.rows.select_row(row);
        }
    }

    /// Clear the cell selection and active cell (indices went stale)
    pub fn clear_cells(&mut self) {
        self.cells.clear();
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(row: usize, col: usize) -> CellPosition {
        CellPosition::new(row, col)
    }

    #[test]
    fn test_select_single_is_idempotent() {
        let mut sel = Selection::new();
        sel.select_single(pos(1, 1));
        let once = sel.clone();
        sel.select_single(pos(1, 1));

        assert_eq!(sel, once);
        assert_eq!(sel.cells(), &[pos(1, 1)]);
    }

    #[test]
    fn test_toggle_cell() {
        let mut sel = Selection::new();
        sel.select_single(pos(0, 0));
        sel.toggle_cell(pos(2, 2));
        assert_eq!(sel.len(), 2);

        sel.toggle_cell(pos(0, 0));
        assert_eq!(sel.cells(), &[pos(2, 2)]);
    }

    #[test]
    fn test_rectangle_is_direction_agnostic() {
        let mut forward = Selection::new();
        forward.select_rectangle(pos(0, 1), pos(2, 3));
        let mut backward = Selection::new();
        backward.select_rectangle(pos(2, 3), pos(0, 1));
        let mut diagonal = Selection::new();
        diagonal.select_rectangle(pos(2, 1), pos(0, 3));

        assert_eq!(forward.cells(), backward.cells());
        assert_eq!(forward.cells(), diagonal.cells());
        assert_eq!(forward.len(), 9);
        assert_eq!(forward.first(), Some(pos(0, 1)));
        assert_eq!(forward.last(), Some(pos(2, 3)));
    }

    #[test]
    fn test_equality_ignores_order() {
        let a = Selection::from_cells([pos(0, 0), pos(1, 1)]);
        let b = Selection::from_cells([pos(1, 1), pos(0, 0)]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_bounding_rect() {
        let sel = Selection::from_cells([pos(3, 1), pos(0, 4), pos(2, 2)]);
        assert_eq!(
            sel.bounding_rect(),
            Some(CellRect {
                top: 0,
                left: 1,
                bottom: 3,
                right: 4
            })
        );
        assert_eq!(Selection::new().bounding_rect(), None);
    }

    #[test]
    fn test_select_all_and_lines() {
        let mut sel = Selection::new();
        sel.select_all(2, 3);
        assert_eq!(sel.len(), 6);

        sel.select_column(1, 2);
        assert_eq!(sel.cells(), &[pos(0, 1), pos(1, 1)]);

        sel.select_grid_row(1, 3);
        assert_eq!(sel.cells(), &[pos(1, 0), pos(1, 1), pos(1, 2)]);

        sel.select_all(0, 3);
        assert!(sel.is_empty());
    }

    #[test]
    fn test_row_selection() {
        let mut rows = RowSelection::new();
        rows.select_row(3);
        rows.select_row(1);
        assert_eq!(rows.indices().iter().copied().collect::<Vec<_>>(), vec![1, 3]);

        rows.select_row(3);
        assert!(!rows.contains(3));

        rows.select_all_rows(true, 4);
        assert_eq!(rows.len(), 4);
        rows.select_all_rows(false, 4);
        assert!(rows.is_empty());
    }
}
