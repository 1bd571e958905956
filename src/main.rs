use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use gridpad::cli::{CliArgs, InputSource, RunConfig};
use gridpad::clipboard::{ClipboardBackend, MemoryClipboard, SystemClipboard};
use gridpad::config::GridConfig;
use gridpad::grid::Grid;
use gridpad::keymap::{load_default_keymap, Keymap};
use gridpad::payload::{self, Delimiter, Format};
use gridpad::runtime::{GridRuntime, TracingObserver};
use gridpad::script::Script;

fn main() -> Result<()> {
    gridpad::tracing::init();

    let config = CliArgs::parse()
        .into_config()
        .map_err(anyhow::Error::msg)?;

    if config.system_clipboard {
        run(&config, SystemClipboard::new())
    } else {
        run(&config, MemoryClipboard::new())
    }
}

fn run<C: ClipboardBackend>(config: &RunConfig, clipboard: C) -> Result<()> {
    let (grid, input_delimiter) = load_grid(config)?;
    tracing::info!(
        rows = grid.row_count(),
        cols = grid.column_count(),
        "Loaded grid"
    );

    let grid_config = match &config.config {
        Some(path) => GridConfig::load_from(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => GridConfig::load(),
    };
    let keymap = Keymap::with_bindings(load_default_keymap());

    let mut runtime = GridRuntime::new(grid, grid_config, keymap, clipboard, TracingObserver);

    if let Some(path) = &config.script {
        let script = Script::load(path)
            .with_context(|| format!("failed to load script {}", path.display()))?;
        script
            .replay(&mut runtime, Instant::now())
            .with_context(|| format!("failed to replay script {}", path.display()))?;
    }

    runtime.unmount();
    let (grid, _, _) = runtime.into_parts();

    let delimiter = config.delimiter.or(input_delimiter).unwrap_or_default();
    match &config.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_grid(&grid, config.format, delimiter, BufWriter::new(file))
                .with_context(|| format!("failed to write {}", path.display()))
        }
        None => write_grid(&grid, config.format, delimiter, io::stdout().lock())
            .context("failed to write grid to stdout"),
    }
}

/// Read the input grid, returning the delimiter it was read with
fn load_grid(config: &RunConfig) -> Result<(Grid, Option<Delimiter>)> {
    match &config.input {
        InputSource::Empty => Ok((Grid::default(), None)),
        InputSource::Json(path) => {
            let content = read(path)?;
            let grid = payload::parse_json(&content)
                .with_context(|| format!("invalid grid JSON in {}", path.display()))?;
            Ok((grid, None))
        }
        InputSource::Delimited(path) => {
            let content = read(path)?;
            let delimiter = config
                .delimiter
                .unwrap_or_else(|| Delimiter::for_file(path, &content));
            let grid = payload::parse_delimited(&content, delimiter)
                .with_context(|| format!("failed to parse {}", path.display()))?;
            Ok((grid, Some(delimiter)))
        }
    }
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_grid<W: Write>(grid: &Grid, format: Format, delimiter: Delimiter, mut out: W) -> Result<()> {
    match format {
        Format::Csv => payload::write_delimited(grid, delimiter, &mut out)?,
        Format::Json => {
            payload::write_json(grid, &mut out)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
