//! Pointer gestures, the shift session and keyboard handling through the runtime

mod common;

use std::time::{Duration, Instant};

use common::{click, drag, key, numbered_grid, pos, selected, test_runtime, type_text};
use gridpad::keymap::Modifiers;

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ========================================================================
// Long-press and drag
// ========================================================================

#[test]
fn test_drag_needs_long_press() {
    let mut rt = test_runtime(numbered_grid(4, 4));
    let t0 = Instant::now();

    rt.pointer_down(pos(0, 0), Modifiers::NONE, t0);
    rt.tick(t0 + ms(199));
    // Not dragging yet, so the move is dropped
    rt.pointer_move(pos(2, 2), t0 + ms(199));
    assert!(!rt.model().pointer.is_dragging());
    assert_eq!(selected(&rt), vec![(0, 0)]);

    rt.tick(t0 + ms(200));
    assert!(rt.model().pointer.is_dragging());
    rt.pointer_up();
    assert!(rt.model().pointer.is_idle());
    assert_eq!(selected(&rt), vec![(0, 0)]);
}

#[test]
fn test_drag_moves_are_debounced_last_call_wins() {
    let mut rt = test_runtime(numbered_grid(4, 4));
    let t0 = Instant::now();

    rt.pointer_down(pos(0, 0), Modifiers::NONE, t0);
    let t = t0 + ms(200);
    rt.tick(t);
    rt.pointer_move(pos(1, 1), t);
    rt.pointer_move(pos(2, 2), t + ms(5));

    // First deadline was pushed out by the second move
    rt.tick(t + ms(16));
    assert_eq!(selected(&rt), vec![(0, 0)]);

    rt.tick(t + ms(21));
    assert_eq!(selected(&rt).len(), 9);
    assert_eq!(rt.model().selection.active, Some(pos(0, 0)));
}

#[test]
fn test_pointer_up_flushes_pending_move() {
    let mut rt = test_runtime(numbered_grid(4, 4));
    let t0 = Instant::now();

    rt.pointer_down(pos(3, 3), Modifiers::NONE, t0);
    rt.tick(t0 + ms(200));
    rt.pointer_move(pos(2, 2), t0 + ms(201));
    rt.pointer_up();

    assert_eq!(selected(&rt), vec![(2, 2), (2, 3), (3, 2), (3, 3)]);
    assert!(rt.next_deadline().is_none());
}

#[test]
fn test_leave_with_button_held_ends_drag() {
    let mut rt = test_runtime(numbered_grid(4, 4));
    let t0 = Instant::now();

    rt.pointer_down(pos(0, 0), Modifiers::NONE, t0);
    rt.tick(t0 + ms(200));
    rt.pointer_move(pos(0, 3), t0 + ms(201));
    rt.pointer_leave(true);

    assert!(rt.model().pointer.is_idle());
    assert_eq!(selected(&rt).len(), 4);
}

#[test]
fn test_leave_without_button_is_ignored() {
    let mut rt = test_runtime(numbered_grid(4, 4));
    let t0 = Instant::now();

    rt.pointer_down(pos(0, 0), Modifiers::NONE, t0);
    rt.pointer_leave(false);
    assert_eq!(rt.next_deadline(), Some(t0 + ms(200)));
}

#[test]
fn test_drag_is_clamped_to_grid() {
    let mut rt = test_runtime(numbered_grid(2, 2));
    drag(&mut rt, pos(0, 0), pos(9, 9), Instant::now());
    assert_eq!(selected(&rt), vec![(0, 0), (0, 1), (1, 0), (1, 1)]);
}

#[test]
fn test_unmount_clears_timers() {
    let mut rt = test_runtime(numbered_grid(3, 3));
    let t0 = Instant::now();

    rt.pointer_down(pos(1, 1), Modifiers::NONE, t0);
    assert!(rt.next_deadline().is_some());
    rt.unmount();

    assert!(rt.next_deadline().is_none());
    rt.tick(t0 + ms(500));
    assert!(rt.model().pointer.is_idle());
}

// ========================================================================
// Modifier clicks and the shift session
// ========================================================================

#[test]
fn test_shift_click_ranges_from_last_selected() {
    let mut rt = test_runtime(numbered_grid(4, 4));
    let t0 = Instant::now();

    click(&mut rt, pos(1, 1), Modifiers::NONE, t0);
    click(&mut rt, pos(2, 3), Modifiers::SHIFT, t0 + ms(500));

    assert_eq!(selected(&rt), vec![(1, 1), (1, 2), (1, 3), (2, 1), (2, 2), (2, 3)]);
    assert_eq!(rt.model().selection.active, Some(pos(2, 3)));
    assert!(rt.next_deadline().is_none());
}

#[test]
fn test_shift_click_with_empty_selection_is_plain_click() {
    let mut rt = test_runtime(numbered_grid(4, 4));
    let t0 = Instant::now();

    click(&mut rt, pos(2, 2), Modifiers::SHIFT, t0);
    assert_eq!(selected(&rt), vec![(2, 2)]);
}

#[test]
fn test_shift_session_keeps_anchor() {
    let mut rt = test_runtime(numbered_grid(4, 4));
    let t0 = Instant::now();

    click(&mut rt, pos(0, 0), Modifiers::NONE, t0);
    rt.shift_pressed();
    click(&mut rt, pos(1, 1), Modifiers::SHIFT, t0 + ms(20));
    click(&mut rt, pos(2, 2), Modifiers::SHIFT, t0 + ms(400));

    // Anchored at (0,0), not at the last selected (1,1)
    assert_eq!(selected(&rt).len(), 9);
    assert_eq!(selected(&rt)[0], (0, 0));
}

#[test]
fn test_shift_release_grace_period() {
    let mut rt = test_runtime(numbered_grid(4, 4));
    let t0 = Instant::now();

    click(&mut rt, pos(0, 0), Modifiers::NONE, t0);
    rt.shift_pressed();
    rt.shift_released(t0 + ms(100));

    rt.tick(t0 + ms(1599));
    assert!(rt.model().shift_session.is_some());
    rt.tick(t0 + ms(1600));
    assert!(rt.model().shift_session.is_none());
}

#[test]
fn test_shift_pressed_again_cancels_pending_end() {
    let mut rt = test_runtime(numbered_grid(4, 4));
    let t0 = Instant::now();

    click(&mut rt, pos(1, 1), Modifiers::NONE, t0);
    rt.shift_pressed();
    rt.shift_released(t0 + ms(100));
    rt.shift_pressed();

    rt.tick(t0 + ms(5000));
    let session = rt.model().shift_session.expect("session survives");
    assert_eq!(session.anchor, pos(1, 1));
}

#[test]
fn test_pointer_down_applies_pending_shift_end() {
    let mut rt = test_runtime(numbered_grid(4, 4));
    let t0 = Instant::now();

    click(&mut rt, pos(0, 0), Modifiers::NONE, t0);
    rt.shift_pressed();
    rt.shift_released(t0 + ms(10));
    click(&mut rt, pos(3, 3), Modifiers::NONE, t0 + ms(500));

    assert!(rt.model().shift_session.is_none());
    assert!(rt.next_deadline().is_none());
}

#[test]
fn test_ctrl_click_toggles() {
    let mut rt = test_runtime(numbered_grid(3, 3));
    let t0 = Instant::now();

    click(&mut rt, pos(0, 0), Modifiers::NONE, t0);
    click(&mut rt, pos(2, 2), Modifiers::CTRL, t0 + ms(500));
    click(&mut rt, pos(0, 0), Modifiers::CTRL, t0 + ms(1000));

    assert_eq!(selected(&rt), vec![(2, 2)]);
    assert_eq!(rt.model().selection.active, Some(pos(0, 0)));
}

// ========================================================================
// Double-click
// ========================================================================

#[test]
fn test_double_click_opens_editor() {
    let mut rt = test_runtime(numbered_grid(3, 3));
    let t0 = Instant::now();

    click(&mut rt, pos(1, 2), Modifiers::NONE, t0);
    click(&mut rt, pos(1, 2), Modifiers::NONE, t0 + ms(120));

    let editor = rt.model().editing.as_ref().expect("editor open");
    assert_eq!(editor.position, pos(1, 2));
    assert_eq!(editor.buffer(), "r1c2");
    assert!(rt.next_deadline().is_none());
}

#[test]
fn test_slow_second_click_is_not_double() {
    let mut rt = test_runtime(numbered_grid(3, 3));
    let t0 = Instant::now();

    click(&mut rt, pos(1, 2), Modifiers::NONE, t0);
    click(&mut rt, pos(1, 2), Modifiers::NONE, t0 + ms(301));
    assert!(!rt.model().is_editing());
}

#[test]
fn test_ctrl_double_click_selects_column() {
    let mut rt = test_runtime(numbered_grid(3, 3));
    let t0 = Instant::now();

    click(&mut rt, pos(1, 1), Modifiers::CTRL, t0);
    click(&mut rt, pos(1, 1), Modifiers::CTRL, t0 + ms(100));
    assert_eq!(selected(&rt), vec![(0, 1), (1, 1), (2, 1)]);
}

#[test]
fn test_shift_double_click_selects_row() {
    let mut rt = test_runtime(numbered_grid(3, 3));
    let t0 = Instant::now();

    click(&mut rt, pos(2, 0), Modifiers::SHIFT, t0);
    click(&mut rt, pos(2, 0), Modifiers::SHIFT, t0 + ms(100));
    assert_eq!(selected(&rt), vec![(2, 0), (2, 1), (2, 2)]);
}

// ========================================================================
// Keyboard navigation
// ========================================================================

#[test]
fn test_arrow_without_active_cell_lands_on_origin() {
    let mut rt = test_runtime(numbered_grid(3, 3));
    assert!(key(&mut rt, "right"));
    assert_eq!(rt.model().selection.active, Some(pos(0, 0)));
    assert_eq!(selected(&rt), vec![(0, 0)]);
}

#[test]
fn test_arrows_move_and_clamp() {
    let mut rt = test_runtime(numbered_grid(3, 3));
    click(&mut rt, pos(1, 1), Modifiers::NONE, Instant::now());

    key(&mut rt, "down");
    key(&mut rt, "down");
    key(&mut rt, "down");
    assert_eq!(rt.model().selection.active, Some(pos(2, 1)));

    key(&mut rt, "left");
    key(&mut rt, "left");
    assert_eq!(rt.model().selection.active, Some(pos(2, 0)));
    assert_eq!(selected(&rt), vec![(2, 0)]);
}

#[test]
fn test_shift_arrows_extend_rectangle() {
    let mut rt = test_runtime(numbered_grid(4, 4));
    click(&mut rt, pos(1, 1), Modifiers::NONE, Instant::now());

    key(&mut rt, "shift+right");
    key(&mut rt, "shift+down");
    assert_eq!(selected(&rt), vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
    assert_eq!(rt.model().selection.active, Some(pos(2, 2)));

    key(&mut rt, "shift+up");
    assert_eq!(selected(&rt), vec![(1, 1), (1, 2)]);
}

#[test]
fn test_select_all() {
    let mut rt = test_runtime(numbered_grid(2, 3));
    key(&mut rt, "ctrl+a");
    assert_eq!(selected(&rt).len(), 6);
    assert_eq!(rt.model().selection.active, Some(pos(0, 0)));
}

#[test]
fn test_escape_clears_selection_but_keeps_active() {
    let mut rt = test_runtime(numbered_grid(3, 3));
    click(&mut rt, pos(1, 1), Modifiers::NONE, Instant::now());
    key(&mut rt, "shift+right");

    key(&mut rt, "escape");
    assert!(selected(&rt).is_empty());
    assert_eq!(rt.model().selection.active, Some(pos(1, 2)));
}

#[test]
fn test_escape_cancels_drag_first() {
    let mut rt = test_runtime(numbered_grid(3, 3));
    let t0 = Instant::now();

    rt.pointer_down(pos(0, 0), Modifiers::NONE, t0);
    rt.tick(t0 + ms(200));
    rt.pointer_move(pos(2, 2), t0 + ms(201));
    key(&mut rt, "escape");

    assert!(rt.model().pointer.is_idle());
    assert!(rt.next_deadline().is_none());
    assert_eq!(selected(&rt), vec![(0, 0)]);

    key(&mut rt, "escape");
    assert!(selected(&rt).is_empty());
}

// ========================================================================
// Cell editing from the keyboard
// ========================================================================

#[test]
fn test_enter_edits_then_commits_and_moves_down() {
    let mut rt = test_runtime(numbered_grid(3, 2));
    click(&mut rt, pos(0, 1), Modifiers::NONE, Instant::now());

    key(&mut rt, "enter");
    assert!(rt.model().is_editing());
    key(&mut rt, "backspace");
    type_text(&mut rt, "X");
    key(&mut rt, "enter");

    assert!(!rt.model().is_editing());
    assert_eq!(rt.grid().get(0, 1), Some("r0cX"));
    assert_eq!(rt.model().selection.active, Some(pos(1, 1)));
    assert_eq!(rt.model().history.len(), 1);
}

#[test]
fn test_typing_replaces_cell_content() {
    let mut rt = test_runtime(numbered_grid(2, 2));
    click(&mut rt, pos(1, 0), Modifiers::NONE, Instant::now());

    type_text(&mut rt, "hi");
    assert_eq!(rt.model().editing.as_ref().map(|e| e.buffer()), Some("hi"));

    // Arrow keys edit the buffer rather than moving the active cell
    key(&mut rt, "left");
    type_text(&mut rt, "-");
    key(&mut rt, "enter");

    assert_eq!(rt.grid().get(1, 0), Some("h-i"));
    // Already on the last row: stays put
    assert_eq!(rt.model().selection.active, Some(pos(1, 0)));
}

#[test]
fn test_escape_discards_edit() {
    let mut rt = test_runtime(numbered_grid(2, 2));
    click(&mut rt, pos(0, 0), Modifiers::NONE, Instant::now());

    type_text(&mut rt, "zzz");
    key(&mut rt, "escape");

    assert!(!rt.model().is_editing());
    assert_eq!(rt.grid().get(0, 0), Some("r0c0"));
    assert!(rt.model().history.is_empty());
}

#[test]
fn test_tab_commits_and_wraps_to_next_row() {
    let mut rt = test_runtime(numbered_grid(2, 2));
    click(&mut rt, pos(0, 1), Modifiers::NONE, Instant::now());

    key(&mut rt, "f2");
    key(&mut rt, "tab");
    assert_eq!(rt.model().selection.active, Some(pos(1, 0)));
}

#[test]
fn test_blur_commits() {
    let mut rt = test_runtime(numbered_grid(3, 2));
    click(&mut rt, pos(0, 0), Modifiers::NONE, Instant::now());

    type_text(&mut rt, "new");
    rt.blur();

    assert_eq!(rt.grid().get(0, 0), Some("new"));
    assert_eq!(rt.model().selection.active, Some(pos(1, 0)));
}

#[test]
fn test_clicking_elsewhere_commits_open_editor() {
    let mut rt = test_runtime(numbered_grid(3, 3));
    let t0 = Instant::now();
    click(&mut rt, pos(0, 0), Modifiers::NONE, t0);
    type_text(&mut rt, "q");

    click(&mut rt, pos(2, 2), Modifiers::NONE, t0 + ms(500));
    assert_eq!(rt.grid().get(0, 0), Some("q"));
    assert_eq!(rt.model().selection.active, Some(pos(2, 2)));
}

#[test]
fn test_modified_unbound_keys_do_not_type() {
    let mut rt = test_runtime(numbered_grid(2, 2));
    click(&mut rt, pos(0, 0), Modifiers::NONE, Instant::now());

    assert!(!key(&mut rt, "ctrl+q"));
    assert!(!rt.model().is_editing());
}

// ========================================================================
// Structural shortcuts
// ========================================================================

#[test]
fn test_structural_shortcuts_follow_active_cell() {
    let mut rt = test_runtime(numbered_grid(2, 2));
    click(&mut rt, pos(0, 1), Modifiers::NONE, Instant::now());

    key(&mut rt, "ctrl+shift+plus");
    assert_eq!(rt.grid().row_count(), 3);
    assert_eq!(rt.grid().get(1, 0), Some(""));
    assert_eq!(rt.grid().get(2, 0), Some("r1c0"));

    key(&mut rt, "ctrl+alt+equal");
    assert_eq!(rt.grid().headers(), ["H0", "H1", "Column 3"]);

    key(&mut rt, "ctrl+alt+minus");
    assert_eq!(rt.grid().column_count(), 2);
    // Deleting a column clears the active cell, so this is a no-op
    key(&mut rt, "ctrl+shift+underscore");
    assert_eq!(rt.grid().row_count(), 3);
}

#[test]
fn test_structural_shortcuts_respect_floor() {
    let mut rt = test_runtime(numbered_grid(1, 1));
    click(&mut rt, pos(0, 0), Modifiers::NONE, Instant::now());

    key(&mut rt, "ctrl+shift+minus");
    key(&mut rt, "ctrl+alt+minus");
    assert_eq!(rt.grid().row_count(), 1);
    assert_eq!(rt.grid().column_count(), 1);
    assert!(rt.model().history.is_empty());
}
