//! End-to-end grid behavior: invariants and the reference scenarios

mod common;

use std::time::{Duration, Instant};

use common::{
    assert_rectangular, click, drag, filled_grid, key, numbered_grid, pos, row_values, selected,
    test_runtime, test_runtime_with,
};
use gridpad::clipboard::MemoryClipboard;
use gridpad::grid::{Grid, Side};
use gridpad::keymap::Modifiers;
use gridpad::messages::{EditMsg, Msg, SelectionMsg, StructureMsg};

// ========================================================================
// Grid shape
// ========================================================================

#[test]
fn test_every_operation_keeps_rows_rectangular() {
    let mut rt = test_runtime(numbered_grid(4, 3));
    let t0 = Instant::now();

    let ops = vec![
        Msg::Structure(StructureMsg::InsertColumn { index: 0, side: Side::Before }),
        Msg::Structure(StructureMsg::DuplicateColumn(2)),
        Msg::Structure(StructureMsg::MoveColumn { index: 1, toward: Side::After }),
        Msg::Structure(StructureMsg::InsertRow { index: 3, side: Side::After }),
        Msg::Structure(StructureMsg::DuplicateRow(0)),
        Msg::Structure(StructureMsg::DeleteColumn(0)),
        Msg::Structure(StructureMsg::DeleteRow(2)),
        Msg::Selection(SelectionMsg::ToggleRow(0)),
        Msg::Selection(SelectionMsg::ToggleRow(2)),
        Msg::Structure(StructureMsg::DuplicateSelectedRows),
        Msg::Selection(SelectionMsg::ToggleRow(1)),
        Msg::Structure(StructureMsg::DeleteSelectedRows),
        Msg::Edit(EditMsg::Undo),
        Msg::Edit(EditMsg::Undo),
    ];

    for msg in ops {
        rt.dispatch(msg);
        assert_rectangular(rt.grid());
    }

    drag(&mut rt, pos(0, 0), pos(1, 1), t0);
    key(&mut rt, "ctrl+x");
    assert_rectangular(rt.grid());
    click(&mut rt, pos(2, 2), Modifiers::NONE, t0 + Duration::from_secs(1));
    key(&mut rt, "ctrl+v");
    assert_rectangular(rt.grid());
}

#[test]
fn test_ragged_payload_is_normalized() {
    let grid = Grid::new(
        vec!["a".into(), "b".into()],
        vec![vec!["1".into()], vec!["1".into(), "2".into(), "3".into()]],
    );
    assert_rectangular(&grid);
    assert_eq!(row_values(&grid, 0), ["1", ""]);
    assert_eq!(row_values(&grid, 1), ["1", "2"]);
}

// ========================================================================
// Selection
// ========================================================================

#[test]
fn test_selecting_same_cell_twice_is_stable() {
    let mut rt = test_runtime(numbered_grid(3, 3));
    let t0 = Instant::now();

    click(&mut rt, pos(1, 1), Modifiers::NONE, t0);
    let first = selected(&rt);
    // Far enough apart not to count as a double-click
    click(&mut rt, pos(1, 1), Modifiers::NONE, t0 + Duration::from_secs(1));

    assert_eq!(selected(&rt), first);
    assert_eq!(selected(&rt), vec![(1, 1)]);
}

#[test]
fn test_drag_rectangle_is_direction_independent() {
    let t0 = Instant::now();

    let mut up_right = test_runtime(numbered_grid(4, 4));
    drag(&mut up_right, pos(2, 1), pos(0, 3), t0);

    let mut down_left = test_runtime(numbered_grid(4, 4));
    drag(&mut down_left, pos(0, 3), pos(2, 1), t0);

    let expected: Vec<(usize, usize)> = (0..=2)
        .flat_map(|r| (1..=3).map(move |c| (r, c)))
        .collect();
    assert_eq!(selected(&up_right), expected);
    assert_eq!(selected(&down_left), expected);
}

// ========================================================================
// Clipboard round trip
// ========================================================================

#[test]
fn test_copy_then_paste_reproduces_selected_values() {
    let original = numbered_grid(4, 4);
    let mut rt = test_runtime(original.clone());
    let t0 = Instant::now();

    let end = drag(&mut rt, pos(1, 1), pos(2, 3), t0);
    key(&mut rt, "ctrl+c");

    // Scribble over the copied region, then paste back at the same anchor
    key(&mut rt, "delete");
    assert_eq!(rt.grid().get(1, 1), Some(""));
    click(&mut rt, pos(1, 1), Modifiers::NONE, end + Duration::from_secs(1));
    key(&mut rt, "ctrl+v");

    for r in 1..=2 {
        for c in 1..=3 {
            assert_eq!(rt.grid().get(r, c), original.get(r, c));
        }
    }
    assert_eq!(selected(&rt).len(), 6);
}

// ========================================================================
// History
// ========================================================================

#[test]
fn test_history_keeps_fifty_snapshots() {
    let mut rt = test_runtime(filled_grid(1, 1, "0"));
    let t0 = Instant::now();
    click(&mut rt, pos(0, 0), Modifiers::NONE, t0);

    for i in 1..=60 {
        rt.dispatch(Msg::Edit(EditMsg::StartWithChar('v')));
        rt.dispatch(Msg::Edit(EditMsg::InsertText(i.to_string())));
        rt.dispatch(Msg::Edit(EditMsg::Commit));
    }
    assert_eq!(rt.model().history.len(), 50);

    let mut effective = 0;
    for _ in 0..51 {
        let before = rt.grid().clone();
        rt.dispatch(Msg::Edit(EditMsg::Undo));
        if rt.grid() != &before {
            effective += 1;
        }
    }

    assert_eq!(effective, 50);
    assert!(rt.model().history.is_empty());
    // Oldest surviving snapshot is the state before mutation 11
    assert_eq!(rt.grid().get(0, 0), Some("v10"));
}

// ========================================================================
// Bulk structure
// ========================================================================

#[test]
fn test_bulk_delete_keeps_unselected_rows_in_order() {
    let mut rt = test_runtime(numbered_grid(5, 2));
    for row in [1, 3, 4] {
        rt.dispatch(Msg::Selection(SelectionMsg::ToggleRow(row)));
    }
    rt.dispatch(Msg::Structure(StructureMsg::DeleteSelectedRows));

    assert_eq!(rt.grid().row_count(), 2);
    assert_eq!(row_values(rt.grid(), 0), ["r0c0", "r0c1"]);
    assert_eq!(row_values(rt.grid(), 1), ["r2c0", "r2c1"]);
    assert!(rt.model().selection.rows.is_empty());
    assert_eq!(rt.model().history.len(), 1);
}

// ========================================================================
// Scenarios
// ========================================================================

#[test]
fn test_scenario_paste_is_clamped_to_grid() {
    let mut rt = test_runtime(filled_grid(3, 3, "a"));
    let t0 = Instant::now();

    let end = drag(&mut rt, pos(0, 0), pos(1, 1), t0);
    key(&mut rt, "ctrl+c");
    assert_eq!(rt.clipboard().contents(), Some("a\ta\na\ta"));

    click(&mut rt, pos(2, 2), Modifiers::NONE, end + Duration::from_secs(1));
    let cells_before = rt.observer().cell_changes();
    let data_before = rt.observer().data_changes();
    key(&mut rt, "ctrl+v");

    // Only the top-left value of the 2x2 block fits
    assert_eq!(rt.observer().cell_changes(), cells_before + 1);
    assert_eq!(rt.grid().get(2, 2), Some("a"));
    assert_eq!(selected(&rt), vec![(2, 2)]);
    assert_eq!(rt.grid().row_count(), 3);
    assert_eq!(rt.grid().column_count(), 3);
    assert_eq!(rt.observer().data_changes(), data_before + 1);
}

#[test]
fn test_scenario_last_row_cannot_be_deleted() {
    let mut rt = test_runtime(Grid::from_strs(&["a", "b"], &[&["1", "2"]]));
    rt.dispatch(Msg::Structure(StructureMsg::DeleteRow(0)));

    assert_eq!(rt.grid().row_count(), 1);
    assert!(rt.model().history.is_empty());
    assert_eq!(rt.observer().data_changes(), 0);
}

#[test]
fn test_scenario_insert_column_after() {
    let mut rt = test_runtime(Grid::from_strs(&["A", "B"], &[&["1", "2"]]));
    rt.dispatch(Msg::Structure(StructureMsg::InsertColumn {
        index: 1,
        side: Side::After,
    }));

    assert_eq!(rt.grid().headers(), ["A", "B", "Column 3"]);
    assert_eq!(row_values(rt.grid(), 0), ["1", "2", ""]);
}

#[test]
fn test_scenario_delete_then_single_undo() {
    let mut rt = test_runtime(Grid::from_strs(&["h1", "h2"], &[&["x", "y"]]));
    let t0 = Instant::now();

    click(&mut rt, pos(0, 0), Modifiers::NONE, t0);
    click(&mut rt, pos(0, 1), Modifiers::CTRL, t0 + Duration::from_millis(50));
    assert_eq!(selected(&rt), vec![(0, 0), (0, 1)]);

    key(&mut rt, "delete");
    assert_eq!(row_values(rt.grid(), 0), ["", ""]);
    assert_eq!(rt.model().history.len(), 1);

    key(&mut rt, "ctrl+z");
    assert_eq!(row_values(rt.grid(), 0), ["x", "y"]);
}

#[test]
fn test_denied_clipboard_leaves_state_unchanged() {
    let mut rt = test_runtime_with(filled_grid(2, 2, "a"), MemoryClipboard::denied());
    let t0 = Instant::now();
    click(&mut rt, pos(0, 0), Modifiers::NONE, t0);

    key(&mut rt, "ctrl+c");
    let before = rt.grid().clone();
    key(&mut rt, "ctrl+v");

    assert_eq!(rt.grid(), &before);
    assert!(rt.model().history.is_empty());
    assert_eq!(selected(&rt), vec![(0, 0)]);
}
