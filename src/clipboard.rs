//! Clipboard adapter
//!
//! Converts a cell selection to and from the tab/newline text format used by
//! spreadsheet applications, and abstracts the clipboard itself behind
//! [`ClipboardBackend`] so hosts without an OS clipboard (tests, headless
//! runs) can plug in [`MemoryClipboard`].

use std::fmt;

use crate::grid::{CellPosition, Grid};
use crate::selection::Selection;

/// Rectangular block of cell text captured from (or destined for) the grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardMatrix {
    rows: Vec<Vec<String>>,
}

impl ClipboardMatrix {
    pub fn new(rows: Vec<Vec<String>>) -> Self {
        Self { rows }
    }

    /// Capture the bounding rectangle of `selection`
    ///
    /// Cells inside the rectangle that are not selected (ctrl-click gaps)
    /// become `""`. Returns `None` for an empty selection.
    pub fn capture(grid: &Grid, selection: &Selection) -> Option<Self> {
        let rect = selection.bounding_rect()?;
        let rows = (rect.top..=rect.bottom)
            .map(|row| {
                (rect.left..=rect.right)
                    .map(|col| {
                        if selection.contains(CellPosition::new(row, col)) {
                            grid.get(row, col).unwrap_or_default().to_string()
                        } else {
                            String::new()
                        }
                    })
                    .collect()
            })
            .collect();
        Some(Self { rows })
    }

    /// Parse clipboard text: lines on `\n`, cells on `\t`
    ///
    /// A `\r` left at the end of a line by `\r\n` endings is dropped. Every
    /// line counts, so a trailing newline is an empty last row and `""` is a
    /// single empty cell. Text without any tab or newline becomes a 1x1 matrix
    /// holding the raw text.
    pub fn parse(text: &str) -> Self {
        let rows = text
            .split('\n')
            .map(|line| {
                line.strip_suffix('\r')
                    .unwrap_or(line)
                    .split('\t')
                    .map(str::to_string)
                    .collect()
            })
            .collect();
        Self { rows }
    }

    /// Serialize as tab-separated cells and newline-separated rows
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.join("\t"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.iter().map(|r| r.len()).max().unwrap_or(0)
    }

    /// Destination cells when pasting at `anchor`, clipped to the grid
    ///
    /// The grid never grows; values that would land outside it are dropped.
    /// Targets are in row-major order.
    pub fn paste_targets(&self, grid: &Grid, anchor: CellPosition) -> Vec<(CellPosition, &str)> {
        let mut targets = Vec::new();
        for (dr, row) in self.rows.iter().enumerate() {
            for (dc, value) in row.iter().enumerate() {
                let pos = CellPosition::new(anchor.row + dr, anchor.col + dc);
                if grid.contains(pos) {
                    targets.push((pos, value.as_str()));
                }
            }
        }
        targets
    }
}

/// Failure talking to a clipboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// The platform clipboard could not be opened or refused access
    Unavailable(String),
    /// The clipboard holds no text
    Empty,
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClipboardError::Unavailable(e) => write!(f, "clipboard unavailable: {}", e),
            ClipboardError::Empty => write!(f, "clipboard holds no text"),
        }
    }
}

impl std::error::Error for ClipboardError {}

/// Something that can store and return clipboard text
pub trait ClipboardBackend {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
    fn get_text(&mut self) -> Result<String, ClipboardError>;
}

/// The OS clipboard, opened lazily on first use
#[derive(Default)]
pub struct SystemClipboard {
    inner: Option<arboard::Clipboard>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn clipboard(&mut self) -> Result<&mut arboard::Clipboard, ClipboardError> {
        if self.inner.is_none() {
            let clipboard =
                arboard::Clipboard::new().map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            self.inner = Some(clipboard);
        }
        self.inner
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard not initialized".to_string()))
    }
}

impl fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemClipboard")
            .field("open", &self.inner.is_some())
            .finish()
    }
}

impl ClipboardBackend for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.clipboard()?
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }

    fn get_text(&mut self) -> Result<String, ClipboardError> {
        match self.clipboard()?.get_text() {
            Ok(text) => Ok(text),
            Err(arboard::Error::ContentNotAvailable) => Err(ClipboardError::Empty),
            Err(e) => Err(ClipboardError::Unavailable(e.to_string())),
        }
    }
}

/// In-process clipboard
///
/// `denied` makes every call fail the way a locked-down platform would.
#[derive(Debug, Clone, Default)]
pub struct MemoryClipboard {
    text: Option<String>,
    pub denied: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            denied: false,
        }
    }

    /// A clipboard that rejects every read and write
    pub fn denied() -> Self {
        Self {
            text: None,
            denied: true,
        }
    }

    pub fn contents(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.denied {
            return Err(ClipboardError::Unavailable("permission denied".to_string()));
        }
        self.text = Some(text.to_string());
        Ok(())
    }

    fn get_text(&mut self) -> Result<String, ClipboardError> {
        if self.denied {
            return Err(ClipboardError::Unavailable("permission denied".to_string()));
        }
        self.text.clone().ok_or(ClipboardError::Empty)
    }
}
