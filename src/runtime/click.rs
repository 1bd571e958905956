//! Double-click detection for hosts that only report presses

use std::time::{Duration, Instant};

use crate::grid::CellPosition;

/// Presses closer together than this on the same cell form a double-click
pub const DOUBLE_CLICK_TIME: Duration = Duration::from_millis(300);

/// Click tracking state for detecting double-clicks
#[derive(Debug, Clone, Default)]
pub struct ClickTracker {
    last_click: Option<(Instant, CellPosition)>,
    click_count: u8,
}

impl ClickTracker {
    /// Update click count based on timing and position
    ///
    /// Returns 1 for a single click and 2 for the second click of a
    /// double-click; a third rapid click starts over at 1.
    pub fn track_click(&mut self, cell: CellPosition, at: Instant) -> u8 {
        let is_repeat = self.last_click.is_some_and(|(time, last)| {
            last == cell && at.saturating_duration_since(time) < DOUBLE_CLICK_TIME
        });

        self.click_count = if is_repeat && self.click_count == 1 {
            2
        } else {
            1
        };
        self.last_click = Some((at, cell));
        self.click_count
    }

    /// Reset click tracking (e.g., on unmount)
    pub fn reset(&mut self) {
        self.click_count = 0;
        self.last_click = None;
    }
}
