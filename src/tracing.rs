//! Tracing setup and debug snapshots of selection state
//!
//! # Usage
//!
//! Configure via RUST_LOG environment variable:
//! - `RUST_LOG=debug` - all debug logs
//! - `RUST_LOG=selection=debug,history=trace` - scoped filtering
//! - `RUST_LOG=gridpad::update=debug` - module-level filtering
//!
//! # Log Files
//!
//! Logs are written to `~/.config/gridpad/logs/gridpad.log` with daily rotation.
//! File logging uses debug level by default for more verbose troubleshooting.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::grid::CellPosition;
use crate::model::GridModel;

/// Initialize tracing subscriber with console and file logging
///
/// Console output goes to stderr (stdout carries grid output) and respects
/// RUST_LOG, defaulting to `warn`. The file layer always logs at debug.
pub fn init() {
    let console_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_line_number(true)
        .with_filter(console_filter);

    let file_layer = match crate::config_paths::ensure_logs_dir() {
        Ok(logs_dir) => {
            let file_appender = tracing_appender::rolling::daily(logs_dir, "gridpad.log");
            Some(
                fmt::layer()
                    .with_writer(file_appender)
                    .with_ansi(false)
                    .with_target(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new("debug")),
            )
        }
        Err(e) => {
            eprintln!("Warning: Could not initialize file logging: {}", e);
            None
        }
    };

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}

/// Lightweight snapshot of selection state for diffing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot {
    pub selected: usize,
    pub first: Option<CellPosition>,
    pub last: Option<CellPosition>,
    pub active: Option<CellPosition>,
    pub rows_selected: usize,
    pub dragging: bool,
    pub editing: Option<CellPosition>,
    pub undo_depth: usize,
}

impl SelectionSnapshot {
    pub fn from_model(model: &GridModel) -> Self {
        Self {
            selected: model.selection.cells.len(),
            first: model.selection.cells.first(),
            last: model.selection.cells.last(),
            active: model.selection.active,
            rows_selected: model.selection.rows.len(),
            dragging: model.pointer.is_dragging(),
            editing: model.editing.as_ref().map(|e| e.position),
            undo_depth: model.history.len(),
        }
    }

    /// Generate a diff description between two snapshots
    pub fn diff(&self, other: &SelectionSnapshot) -> Option<String> {
        let mut changes = Vec::new();

        if self.selected != other.selected || self.first != other.first || self.last != other.last
        {
            changes.push(format!(
                "selection: {} {} → {} {}",
                self.selected,
                span(self.first, self.last),
                other.selected,
                span(other.first, other.last)
            ));
        }
        if self.active != other.active {
            changes.push(format!(
                "active: {} → {}",
                cell(self.active),
                cell(other.active)
            ));
        }
        if self.rows_selected != other.rows_selected {
            changes.push(format!(
                "rows: {} → {}",
                self.rows_selected, other.rows_selected
            ));
        }
        if self.dragging != other.dragging {
            changes.push(if other.dragging {
                "drag started".to_string()
            } else {
                "drag ended".to_string()
            });
        }
        if self.editing != other.editing {
            changes.push(format!(
                "editing: {} → {}",
                cell(self.editing),
                cell(other.editing)
            ));
        }
        if self.undo_depth != other.undo_depth {
            changes.push(format!(
                "undo depth: {} → {}",
                self.undo_depth, other.undo_depth
            ));
        }

        if changes.is_empty() {
            None
        } else {
            Some(changes.join("; "))
        }
    }
}

fn cell(pos: Option<CellPosition>) -> String {
    match pos {
        Some(p) => format!("({},{})", p.row, p.col),
        None => "-".to_string(),
    }
}

fn span(first: Option<CellPosition>, last: Option<CellPosition>) -> String {
    format!("[{}..{}]", cell(first), cell(last))
}
