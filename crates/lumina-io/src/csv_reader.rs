//! Delimited-text reader with dynamic typing of cells

use crate::reader::{IoError, IoResult};
use crate::schema::{ParsedGrid, Record, Value};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// CSV/TSV reader
///
/// The first record is the header. Blank lines are skipped, short rows
/// leave their trailing columns absent, and cells beyond the header are
/// dropped.
#[derive(Debug, Clone, Copy)]
pub struct CsvReader {
    delimiter: u8,
}

impl Default for CsvReader {
    fn default() -> Self {
        Self::new(b',')
    }
}

impl CsvReader {
    /// Create a reader for the given delimiter
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }

    /// Parse a file
    pub fn read_path(&self, path: &Path) -> IoResult<ParsedGrid> {
        let file = File::open(path).map_err(|e| IoError::OpenFailed(e.to_string()))?;
        self.read(BufReader::new(file))
    }

    /// Parse any reader
    pub fn read<R: Read>(&self, input: R) -> IoResult<ParsedGrid> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(self.delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(input);

        let headers: Vec<String> = reader
            .headers()
            .map_err(|e| IoError::InvalidFormat(e.to_string()))?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result.map_err(|e| {
                let line = e.position().map(|p| p.line()).unwrap_or(0);
                IoError::InvalidFormat(format!("line {}: {}", line, e))
            })?;

            if record.iter().all(|cell| cell.is_empty()) && record.len() <= 1 {
                continue;
            }

            let row: Record = headers
                .iter()
                .zip(record.iter())
                .map(|(name, cell)| (name.clone(), Value::from_cell(cell)))
                .collect();
            rows.push(row);
        }

        Ok(ParsedGrid::new(headers, rows))
    }
}

/// Parse comma-separated text held in memory
pub fn parse_csv_str(text: &str) -> IoResult<ParsedGrid> {
    CsvReader::default().read(text.as_bytes())
}
