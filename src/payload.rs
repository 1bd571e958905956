//! Reading and writing grid payloads
//!
//! Delimited text goes through the csv crate (RFC 4180 quoting). The first
//! record is the header row. JSON uses the `{ headers, rows }` shape that
//! `Grid` serializes to.

use std::io::{Cursor, Write};
use std::path::Path;

use crate::grid::Grid;

/// Field separator for delimited text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Delimiter {
    #[default]
    Comma,
    Tab,
    Pipe,
    Semicolon,
}

impl Delimiter {
    pub fn char(self) -> char {
        match self {
            Delimiter::Comma => ',',
            Delimiter::Tab => '\t',
            Delimiter::Pipe => '|',
            Delimiter::Semicolon => ';',
        }
    }

    /// Delimiter implied by a file extension, if any
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" => Some(Delimiter::Comma),
            "tsv" => Some(Delimiter::Tab),
            "psv" => Some(Delimiter::Pipe),
            _ => None,
        }
    }

    /// Guess from the first few lines by counting candidate separators
    pub fn detect(content: &str) -> Self {
        let head: String = content.lines().take(5).collect::<Vec<_>>().join("\n");

        let comma = head.matches(',').count();
        let tab = head.matches('\t').count();
        let pipe = head.matches('|').count();
        let semi = head.matches(';').count();
        let max = comma.max(tab).max(pipe).max(semi);

        if max == 0 || comma == max {
            Delimiter::Comma
        } else if tab == max {
            Delimiter::Tab
        } else if pipe == max {
            Delimiter::Pipe
        } else {
            Delimiter::Semicolon
        }
    }

    /// Extension first, then content sniffing
    pub fn for_file(path: &Path, content: &str) -> Self {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .unwrap_or_else(|| Self::detect(content))
    }
}

/// Output encoding for a grid
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Csv,
    Json,
}

/// Error from reading delimited text
#[derive(Debug, Clone)]
pub struct ParseError {
    pub message: String,
    pub line: Option<usize>,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.line {
            Some(line) => write!(f, "CSV parse error at line {}: {}", line, self.message),
            None => write!(f, "CSV parse error: {}", self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// Parse delimited text into a grid, taking the first record as headers
///
/// Ragged records are accepted and normalized by `Grid::new`.
pub fn parse_delimited(content: &str, delimiter: Delimiter) -> Result<Grid, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter.char() as u8)
        .has_headers(false)
        .flexible(true)
        .from_reader(Cursor::new(content.as_bytes()));

    let mut records = Vec::new();
    for (line_num, result) in reader.records().enumerate() {
        let record = result.map_err(|e| ParseError {
            message: e.to_string(),
            line: Some(line_num + 1),
        })?;
        records.push(record.iter().map(str::to_string).collect::<Vec<_>>());
    }

    let mut records = records.into_iter();
    let headers = records.next().unwrap_or_default();
    Ok(Grid::new(headers, records.collect()))
}

/// Write headers then rows as delimited text
pub fn write_delimited<W: Write>(
    grid: &Grid,
    delimiter: Delimiter,
    out: W,
) -> Result<(), csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter.char() as u8)
        .from_writer(out);

    writer.write_record(grid.headers())?;
    for row in grid.rows() {
        writer.write_record(row)?;
    }
    writer.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(grid: &Grid, out: W) -> Result<(), serde_json::Error> {
    serde_json::to_writer_pretty(out, grid)
}

pub fn parse_json(content: &str) -> Result<Grid, serde_json::Error> {
    serde_json::from_str(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_headers_and_rows() {
        let grid = parse_delimited("name,qty\napple,3\npear,5\n", Delimiter::Comma).unwrap();
        assert_eq!(grid.headers(), ["name", "qty"]);
        assert_eq!(grid.row_count(), 2);
        assert_eq!(grid.get(1, 1), Some("5"));
    }

    #[test]
    fn test_parse_quoted_fields() {
        let content = "a,b\n\"hello, world\",\"with \"\"quotes\"\"\"\n";
        let grid = parse_delimited(content, Delimiter::Comma).unwrap();
        assert_eq!(grid.get(0, 0), Some("hello, world"));
        assert_eq!(grid.get(0, 1), Some("with \"quotes\""));
    }

    #[test]
    fn test_parse_ragged_rows_are_normalized() {
        let grid = parse_delimited("a,b,c\n1\n1,2,3,4\n", Delimiter::Comma).unwrap();
        assert_eq!(grid.row(0).unwrap(), ["1", "", ""]);
        assert_eq!(grid.row(1).unwrap(), ["1", "2", "3"]);
    }

    #[test]
    fn test_parse_empty() {
        let grid = parse_delimited("", Delimiter::Comma).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.column_count(), 0);
    }

    #[test]
    fn test_write_quotes_when_needed() {
        let grid = Grid::from_strs(&["a", "b"], &[&["x,y", "z"]]);
        let mut out = Vec::new();
        write_delimited(&grid, Delimiter::Comma, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a,b\n\"x,y\",z\n");
    }

    #[test]
    fn test_json_shape() {
        let grid = Grid::from_strs(&["a"], &[&["1"]]);
        let mut out = Vec::new();
        write_json(&grid, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["headers"][0], "a");
        assert_eq!(value["rows"][0][0], "1");
        assert_eq!(parse_json(&String::from_utf8(out).unwrap()).unwrap(), grid);
    }

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(Delimiter::detect("a\tb\tc\n1\t2\t3"), Delimiter::Tab);
        assert_eq!(Delimiter::detect("a|b|c"), Delimiter::Pipe);
        assert_eq!(Delimiter::detect("a;b"), Delimiter::Semicolon);
        assert_eq!(Delimiter::detect("plain"), Delimiter::Comma);
        assert_eq!(
            Delimiter::for_file(Path::new("data.tsv"), "a,b"),
            Delimiter::Tab
        );
    }
}
