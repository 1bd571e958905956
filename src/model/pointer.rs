//! Pointer gesture state and deadline timers
//!
//! Timers are plain deadlines. Nothing fires on its own: the update loop
//! checks them when a `Msg::Tick` arrives, so tests drive time explicitly.

use std::time::Instant;

use crate::grid::CellPosition;

/// Pointer gesture phase
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointerPhase {
    /// No button held over the grid
    #[default]
    Idle,
    /// Button held, long-press not yet elapsed
    Pressed { cell: CellPosition },
    /// Long-press elapsed; movement extends a rectangle from `anchor`
    Dragging {
        anchor: CellPosition,
        current: CellPosition,
    },
}

impl PointerPhase {
    pub fn is_dragging(&self) -> bool {
        matches!(self, PointerPhase::Dragging { .. })
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PointerPhase::Idle)
    }
}

/// A pointer move waiting out the drag debounce
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMove {
    pub due: Instant,
    pub cell: CellPosition,
}

/// Outstanding deadlines
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timers {
    /// Press that turns into a drag
    pub long_press: Option<Instant>,
    /// Latest pointer move during a drag (trailing edge)
    pub drag_move: Option<PendingMove>,
    /// End of the shift session after Shift was released
    pub shift_release: Option<Instant>,
}

impl Timers {
    /// Cancel every timer
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        self.long_press.is_none() && self.drag_move.is_none() && self.shift_release.is_none()
    }

    /// Earliest outstanding deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        [
            self.long_press,
            self.drag_move.map(|m| m.due),
            self.shift_release,
        ]
        .into_iter()
        .flatten()
        .min()
    }
}

/// Shift-click session
///
/// Opened when Shift goes down with an active cell; shift-clicks extend
/// from `anchor` until the session ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftSession {
    pub anchor: CellPosition,
}
