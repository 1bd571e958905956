//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::time::{Duration, Instant};

use gridpad::clipboard::MemoryClipboard;
use gridpad::config::GridConfig;
use gridpad::grid::{CellPosition, Grid};
use gridpad::keymap::{embedded_bindings, parse_key_string, Keymap, Modifiers};
use gridpad::runtime::{GridRuntime, RecordingObserver};

pub type TestRuntime = GridRuntime<MemoryClipboard, RecordingObserver>;

pub fn pos(row: usize, col: usize) -> CellPosition {
    CellPosition::new(row, col)
}

/// Grid whose every cell holds `fill`
pub fn filled_grid(rows: usize, cols: usize, fill: &str) -> Grid {
    let headers = (0..cols).map(|c| format!("H{}", c)).collect();
    let rows = (0..rows).map(|_| vec![fill.to_string(); cols]).collect();
    Grid::new(headers, rows)
}

/// Grid whose cells read `r{row}c{col}`
pub fn numbered_grid(rows: usize, cols: usize) -> Grid {
    let headers = (0..cols).map(|c| format!("H{}", c)).collect();
    let rows = (0..rows)
        .map(|r| (0..cols).map(|c| format!("r{}c{}", r, c)).collect())
        .collect();
    Grid::new(headers, rows)
}

/// Runtime with the embedded keymap, an in-memory clipboard and a recorder
pub fn test_runtime(grid: Grid) -> TestRuntime {
    test_runtime_with(grid, MemoryClipboard::new())
}

pub fn test_runtime_with(grid: Grid, clipboard: MemoryClipboard) -> TestRuntime {
    GridRuntime::new(
        grid,
        GridConfig::default(),
        Keymap::with_bindings(embedded_bindings()),
        clipboard,
        RecordingObserver::new(),
    )
}

/// Press a key described like the keymap file does ("ctrl+c", "shift+down")
pub fn key(rt: &mut TestRuntime, key: &str) -> bool {
    let keystroke = parse_key_string(key).expect("valid key string");
    rt.handle_key(keystroke, None)
}

/// Type text as individual key presses
pub fn type_text(rt: &mut TestRuntime, text: &str) {
    for c in text.chars() {
        let mut buf = [0u8; 4];
        rt.handle_key(
            gridpad::keymap::Keystroke::char(c),
            Some(c.encode_utf8(&mut buf)),
        );
    }
}

/// Press and release without moving
pub fn click(rt: &mut TestRuntime, cell: CellPosition, mods: Modifiers, at: Instant) {
    rt.pointer_down(cell, mods, at);
    rt.pointer_up();
}

/// Long-press at `from`, move to `to`, release; returns the clock afterwards
pub fn drag(rt: &mut TestRuntime, from: CellPosition, to: CellPosition, start: Instant) -> Instant {
    let config = rt.model().config.clone();
    rt.pointer_down(from, Modifiers::NONE, start);
    let mut now = start + config.long_press();
    rt.tick(now);
    rt.pointer_move(to, now);
    now += config.drag_debounce();
    rt.tick(now);
    rt.pointer_up();
    now + Duration::from_millis(1)
}

/// Every row has one value per header
pub fn assert_rectangular(grid: &Grid) {
    for (i, row) in grid.rows().enumerate() {
        assert_eq!(
            row.len(),
            grid.column_count(),
            "row {} has {} cells, expected {}",
            i,
            row.len(),
            grid.column_count()
        );
    }
}

/// Selected cells as (row, col) tuples in selection order
pub fn selected(rt: &TestRuntime) -> Vec<(usize, usize)> {
    rt.model()
        .selection
        .cells
        .iter()
        .map(|p| (p.row, p.col))
        .collect()
}

/// Cell values of one row
pub fn row_values(grid: &Grid, row: usize) -> Vec<String> {
    grid.row(row).map(|r| r.to_vec()).unwrap_or_default()
}
