//! Grid data model
//!
//! A grid is an ordered list of column headers plus an ordered list of rows,
//! each row holding exactly one string per header.
//!
//! # Storage
//!
//! ```text
//! Grid
//! ├── headers: Arc<Vec<String>>
//! └── rows:    Arc<Vec<Arc<Vec<String>>>>
//! ```
//!
//! Every mutation goes through `Arc::make_mut`, so cloning a `Grid` (for an
//! undo snapshot or a renderer) is cheap and the clone never observes a later
//! write. Only the rows that are actually touched get copied.

mod structure;

use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use structure::Side;

/// A single row of cell values
pub type Row = Arc<Vec<String>>;

/// Position of a cell in the grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: usize,
    pub col: usize,
}

impl CellPosition {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl From<(usize, usize)> for CellPosition {
    fn from((row, col): (usize, usize)) -> Self {
        Self::new(row, col)
    }
}

/// The external payload shape: plain nested vectors, possibly ragged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPayload {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

/// Tabular data under edit
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "GridPayload", into = "GridPayload")]
pub struct Grid {
    headers: Arc<Vec<String>>,
    rows: Arc<Vec<Row>>,
}

impl Grid {
    /// Build a grid, padding or truncating rows to the header count
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let width = headers.len();
        let mut ragged = 0usize;

        let rows = rows
            .into_iter()
            .map(|mut row| {
                if row.len() != width {
                    ragged += 1;
                    row.resize(width, String::new());
                }
                Arc::new(row)
            })
            .collect();

        if ragged > 0 {
            tracing::warn!(
                "Normalized {} row(s) whose length did not match {} header(s)",
                ragged,
                width
            );
        }

        Self {
            headers: Arc::new(headers),
            rows: Arc::new(rows),
        }
    }

    /// Convenience constructor from string slices (mostly for tests and demos)
    pub fn from_strs(headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            headers.iter().map(|h| h.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// True when there is no cell to address
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.headers.is_empty()
    }

    /// Check whether a position addresses an existing cell
    pub fn contains(&self, pos: CellPosition) -> bool {
        pos.row < self.row_count() && pos.col < self.column_count()
    }

    /// Get a row's cells
    pub fn row(&self, row: usize) -> Option<&[String]> {
        self.rows.get(row).map(|r| r.as_slice())
    }

    /// Iterate over all rows
    pub fn rows(&self) -> impl Iterator<Item = &[String]> {
        self.rows.iter().map(|r| r.as_slice())
    }

    /// Get cell value at position
    pub fn get(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(|s| s.as_str())
    }

    /// Set cell value at position
    ///
    /// Returns false when the position is out of range. Only the touched row
    /// is copied.
    pub fn set(&mut self, row: usize, col: usize, value: &str) -> bool {
        if !self.contains(CellPosition::new(row, col)) {
            return false;
        }
        let rows = Arc::make_mut(&mut self.rows);
        let cells = Arc::make_mut(&mut rows[row]);
        cells[col] = value.to_string();
        true
    }

    /// Check that every row is as wide as the header list
    pub fn is_rectangular(&self) -> bool {
        let width = self.column_count();
        self.rows.iter().all(|r| r.len() == width)
    }

    /// Whether two grids share the same row storage for `row`
    ///
    /// Useful to verify that a mutation copied only what it touched.
    pub fn shares_row_with(&self, other: &Grid, row: usize) -> bool {
        match (self.rows.get(row), other.rows.get(row)) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<GridPayload> for Grid {
    fn from(payload: GridPayload) -> Self {
        Self::new(payload.headers, payload.rows)
    }
}

impl From<Grid> for GridPayload {
    fn from(grid: Grid) -> Self {
        Self {
            headers: grid.headers.as_ref().clone(),
            rows: grid.rows.iter().map(|r| r.as_ref().clone()).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_new_normalizes_ragged_rows() {
        let grid = Grid::new(
            vec!["a".into(), "b".into()],
            vec![vec!["1".into()], vec!["1".into(), "2".into(), "3".into()]],
        );

        assert!(grid.is_rectangular());
        assert_eq!(grid.row(0), Some(&["1".to_string(), String::new()][..]));
        assert_eq!(grid.row(1).map(|r| r.len()), Some(2));
    }

    #[test]
    fn test_grid_get_and_set() {
        let mut grid = Grid::from_strs(&["name", "year"], &[&["Alien", "1979"]]);

        assert_eq!(grid.get(0, 0), Some("Alien"));
        assert_eq!(grid.get(0, 2), None);
        assert_eq!(grid.get(1, 0), None);

        assert!(grid.set(0, 1, "1986"));
        assert_eq!(grid.get(0, 1), Some("1986"));

        assert!(!grid.set(3, 0, "x"));
        assert!(!grid.set(0, 5, "x"));
    }

    #[test]
    fn test_set_copies_only_touched_row() {
        let original = Grid::from_strs(&["a"], &[&["1"], &["2"]]);
        let mut edited = original.clone();

        edited.set(1, 0, "changed");

        assert_eq!(original.get(1, 0), Some("2"));
        assert!(edited.shares_row_with(&original, 0));
        assert!(!edited.shares_row_with(&original, 1));
    }

    #[test]
    fn test_payload_roundtrip_through_serde() {
        let json = r#"{"headers":["a","b"],"rows":[["1"]]}"#;
        let grid: Grid = serde_json::from_str(json).unwrap();

        assert_eq!(grid.get(0, 1), Some(""));
        let back = serde_json::to_string(&grid).unwrap();
        assert_eq!(back, r#"{"headers":["a","b"],"rows":[["1",""]]}"#);
    }

    #[test]
    fn test_contains() {
        let grid = Grid::from_strs(&["a", "b"], &[&["1", "2"]]);
        assert!(grid.contains(CellPosition::new(0, 1)));
        assert!(!grid.contains(CellPosition::new(1, 0)));
        assert!(!Grid::default().contains(CellPosition::new(0, 0)));
    }
}
