//! gridpad - Elm-style embeddable grid editor
//!
//! This crate provides the data model, selection engine, interaction state
//! machine and undo history for editing tabular data, driven by messages
//! and reporting changes through commands.

pub mod cell_editor;
pub mod cli;
pub mod clipboard;
pub mod commands;
pub mod config;
pub mod config_paths;
pub mod grid;
pub mod history;
pub mod keymap;
pub mod messages;
pub mod model;
pub mod payload;
pub mod runtime;
pub mod script;
pub mod selection;
pub mod tracing;
pub mod update;

// Re-export commonly used types
pub use commands::Cmd;
pub use config::GridConfig;
pub use grid::{CellPosition, Grid};
pub use messages::Msg;
pub use model::GridModel;
pub use runtime::GridRuntime;
