//! Scripted input for the command-line host
//!
//! A script is YAML: an optional clipboard seed and a list of steps, each a
//! single-key map (or a bare name for steps without arguments):
//!
//! ```yaml
//! clipboard: "x\ty"
//! steps:
//!   - click: { row: 0, col: 0 }
//!   - click: { row: 1, col: 1, mods: [shift] }
//!   - key: "ctrl+c"
//!   - drag: { from: [0, 0], to: [2, 1] }
//!   - type: "hello"
//!   - key: enter
//!   - wait: 200
//!   - delete_row: 3
//!   - undo
//! ```
//!
//! Replay uses a virtual clock: every step advances it by one millisecond and
//! fires due timers, `wait` advances it further, `drag` waits out the
//! long-press and debounce on its own.

use std::fmt;
use std::path::Path;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::clipboard::{ClipboardBackend, ClipboardError};
use crate::grid::{CellPosition, Side};
use crate::keymap::{parse_key_string, KeymapError, Keystroke, Modifiers};
use crate::messages::{EditMsg, Msg, PointerMsg, SelectionMsg, StructureMsg};
use crate::runtime::{GridObserver, GridRuntime};

/// Time that passes between two steps
const STEP: Duration = Duration::from_millis(1);

/// A parsed input script
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Script {
    /// Text placed on the clipboard before the first step
    #[serde(default)]
    pub clipboard: Option<String>,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub steps: Vec<Step>,
}

/// `[row, col]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRef(pub usize, pub usize);

impl From<CellRef> for CellPosition {
    fn from(r: CellRef) -> Self {
        CellPosition::new(r.0, r.1)
    }
}

/// A click target with optional modifiers (`ctrl`, `shift`, `alt`, `meta`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClickStep {
    pub row: usize,
    pub col: usize,
    #[serde(default)]
    pub mods: Vec<String>,
}

/// Index plus side, for inserts and moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub index: usize,
    #[serde(default = "default_side", alias = "toward")]
    pub side: Side,
}

fn default_side() -> Side {
    Side::After
}

/// One scripted input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Press and release
    Click(ClickStep),
    /// Two quick presses, then release
    DoubleClick(ClickStep),
    /// Press, hold past the long-press, move, release
    Drag { from: CellRef, to: CellRef },
    /// A keystroke such as `ctrl+c` or `shift+down`
    Key(String),
    /// Typed text, one character at a time
    Type(String),
    ShiftDown,
    ShiftUp,
    /// Advance the clock by this many milliseconds
    Wait(u64),
    /// Move focus away from an open cell editor
    Blur,
    Undo,
    ToggleRow(usize),
    SelectAllRows(bool),
    InsertRow(Placement),
    DeleteRow(usize),
    DuplicateRow(usize),
    MoveRow(Placement),
    InsertColumn(Placement),
    DeleteColumn(usize),
    DuplicateColumn(usize),
    MoveColumn(Placement),
    DeleteSelectedRows,
    DuplicateSelectedRows,
}

/// Errors from loading or replaying a script
#[derive(Debug)]
pub enum ScriptError {
    Io(std::io::Error),
    Parse(serde_yaml::Error),
    /// Bad key string in step `index`
    Key { index: usize, error: KeymapError },
    /// Unknown modifier name in step `index`
    Modifier { index: usize, name: String },
    Clipboard(ClipboardError),
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io(e) => write!(f, "IO error: {}", e),
            ScriptError::Parse(e) => write!(f, "Parse error: {}", e),
            ScriptError::Key { index, error } => write!(f, "step {}: {}", index + 1, error),
            ScriptError::Modifier { index, name } => {
                write!(f, "step {}: unknown modifier '{}'", index + 1, name)
            }
            ScriptError::Clipboard(e) => write!(f, "could not seed clipboard: {}", e),
        }
    }
}

impl std::error::Error for ScriptError {}

impl From<std::io::Error> for ScriptError {
    fn from(e: std::io::Error) -> Self {
        ScriptError::Io(e)
    }
}

impl From<serde_yaml::Error> for ScriptError {
    fn from(e: serde_yaml::Error) -> Self {
        ScriptError::Parse(e)
    }
}

impl Script {
    pub fn parse(yaml: &str) -> Result<Self, ScriptError> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Replay every step against `runtime`, starting the clock at `start`
    ///
    /// Returns the clock value after the last step.
    pub fn replay<C, O>(
        &self,
        runtime: &mut GridRuntime<C, O>,
        start: Instant,
    ) -> Result<Instant, ScriptError>
    where
        C: ClipboardBackend,
        O: GridObserver,
    {
        if let Some(text) = &self.clipboard {
            runtime
                .clipboard_mut()
                .set_text(text)
                .map_err(ScriptError::Clipboard)?;
        }

        let mut now = start;
        for (index, step) in self.steps.iter().enumerate() {
            tracing::debug!(target: "script", step = index + 1, ?step, "replaying");
            now = run_step(runtime, index, step, now)?;
            now += STEP;
            runtime.tick(now);
        }
        Ok(now)
    }
}

fn run_step<C, O>(
    runtime: &mut GridRuntime<C, O>,
    index: usize,
    step: &Step,
    mut now: Instant,
) -> Result<Instant, ScriptError>
where
    C: ClipboardBackend,
    O: GridObserver,
{
    match step {
        Step::Click(click) => {
            let cell = CellPosition::new(click.row, click.col);
            let mods = parse_mods(index, &click.mods)?;
            runtime.dispatch(Msg::Pointer(PointerMsg::Down {
                cell,
                mods,
                at: now,
            }));
            runtime.pointer_up();
        }
        Step::DoubleClick(click) => {
            let cell = CellPosition::new(click.row, click.col);
            let mods = parse_mods(index, &click.mods)?;
            runtime.pointer_down(cell, mods, now);
            runtime.pointer_up();
            now += STEP;
            runtime.pointer_down(cell, mods, now);
            runtime.pointer_up();
        }
        Step::Drag { from, to } => {
            let config = runtime.model().config.clone();
            runtime.dispatch(Msg::Pointer(PointerMsg::Down {
                cell: (*from).into(),
                mods: Modifiers::NONE,
                at: now,
            }));
            now += config.long_press();
            runtime.tick(now);
            runtime.pointer_move((*to).into(), now);
            now += config.drag_debounce();
            runtime.tick(now);
            runtime.pointer_up();
        }
        Step::Key(key) => {
            let keystroke =
                parse_key_string(key).map_err(|error| ScriptError::Key { index, error })?;
            runtime.handle_key(keystroke, None);
        }
        Step::Type(text) => {
            for c in text.chars() {
                let mut buf = [0u8; 4];
                runtime.handle_key(Keystroke::char(c), Some(c.encode_utf8(&mut buf)));
            }
        }
        Step::ShiftDown => {
            runtime.shift_pressed();
        }
        Step::ShiftUp => {
            runtime.shift_released(now);
        }
        Step::Wait(ms) => {
            now += Duration::from_millis(*ms);
            runtime.tick(now);
        }
        Step::Blur => {
            runtime.blur();
        }
        Step::Undo => {
            runtime.dispatch(Msg::Edit(EditMsg::Undo));
        }
        Step::ToggleRow(row) => {
            runtime.dispatch(Msg::Selection(SelectionMsg::ToggleRow(*row)));
        }
        Step::SelectAllRows(selected) => {
            runtime.dispatch(Msg::Selection(SelectionMsg::SelectAllRows(*selected)));
        }
        Step::InsertRow(p) => structure(runtime, StructureMsg::InsertRow {
            index: p.index,
            side: p.side,
        }),
        Step::DeleteRow(i) => structure(runtime, StructureMsg::DeleteRow(*i)),
        Step::DuplicateRow(i) => structure(runtime, StructureMsg::DuplicateRow(*i)),
        Step::MoveRow(p) => structure(runtime, StructureMsg::MoveRow {
            index: p.index,
            toward: p.side,
        }),
        Step::InsertColumn(p) => structure(runtime, StructureMsg::InsertColumn {
            index: p.index,
            side: p.side,
        }),
        Step::DeleteColumn(i) => structure(runtime, StructureMsg::DeleteColumn(*i)),
        Step::DuplicateColumn(i) => structure(runtime, StructureMsg::DuplicateColumn(*i)),
        Step::MoveColumn(p) => structure(runtime, StructureMsg::MoveColumn {
            index: p.index,
            toward: p.side,
        }),
        Step::DeleteSelectedRows => structure(runtime, StructureMsg::DeleteSelectedRows),
        Step::DuplicateSelectedRows => structure(runtime, StructureMsg::DuplicateSelectedRows),
    }
    Ok(now)
}

fn structure<C: ClipboardBackend, O: GridObserver>(
    runtime: &mut GridRuntime<C, O>,
    msg: StructureMsg,
) {
    runtime.dispatch(Msg::Structure(msg));
}

fn parse_mods(index: usize, names: &[String]) -> Result<Modifiers, ScriptError> {
    names.iter().try_fold(Modifiers::NONE, |mods, name| {
        let m = match name.to_lowercase().as_str() {
            "ctrl" | "control" => Modifiers::CTRL,
            "shift" => Modifiers::SHIFT,
            "alt" | "option" => Modifiers::ALT,
            "meta" | "cmd" | "super" => Modifiers::META,
            _ => {
                return Err(ScriptError::Modifier {
                    index,
                    name: name.clone(),
                })
            }
        };
        Ok(mods | m)
    })
}
