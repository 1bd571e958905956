//! Command-line argument parsing for the headless host
//!
//! Supports:
//! - Loading a delimited or JSON grid
//! - Replaying an input script against it
//! - Writing the result as delimited text or JSON

use clap::Parser;
use std::path::PathBuf;

use crate::payload::{Delimiter, Format};

/// Drive the grid editor from a script
#[derive(Parser, Debug)]
#[command(name = "gridpad", version, about = "Headless grid editor driven by input scripts")]
pub struct CliArgs {
    /// Grid to load (CSV/TSV, or JSON with `headers` and `rows`)
    #[arg(value_name = "INPUT")]
    pub input: Option<PathBuf>,

    /// YAML input script to replay
    #[arg(short, long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Write the resulting grid here instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Output encoding
    #[arg(short, long, value_enum, default_value_t = Format::Csv)]
    pub format: Format,

    /// Field separator for delimited input and output (guessed when omitted)
    #[arg(short, long, value_enum)]
    pub delimiter: Option<Delimiter>,

    /// Config file to use instead of ~/.config/gridpad/config.yaml
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Use the system clipboard instead of an in-memory one
    #[arg(long)]
    pub system_clipboard: bool,
}

/// Where the grid comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// Start from an empty grid
    Empty,
    Delimited(PathBuf),
    Json(PathBuf),
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: InputSource,
    pub script: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub format: Format,
    pub delimiter: Option<Delimiter>,
    pub config: Option<PathBuf>,
    pub system_clipboard: bool,
}

impl CliArgs {
    /// Convert parsed CLI args into a run configuration
    pub fn into_config(self) -> Result<RunConfig, String> {
        let input = match self.input {
            None => InputSource::Empty,
            Some(path) if path.is_dir() => {
                return Err(format!("{} is a directory", path.display()));
            }
            Some(path) => {
                let is_json = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .is_some_and(|e| e.eq_ignore_ascii_case("json"));
                if is_json {
                    InputSource::Json(path)
                } else {
                    InputSource::Delimited(path)
                }
            }
        };

        if input == InputSource::Empty && self.script.is_none() {
            return Err("nothing to do: pass an INPUT grid, a --script, or both".to_string());
        }

        Ok(RunConfig {
            input,
            script: self.script,
            output: self.output,
            format: self.format,
            delimiter: self.delimiter,
            config: self.config,
            system_clipboard: self.system_clipboard,
        })
    }
}
