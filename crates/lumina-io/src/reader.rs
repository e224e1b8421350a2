//! Grid readers and common I/O types
//!
//! `read_grid` picks a reader from the file extension and returns the
//! parsed grid together with a display name derived from the file name.

use crate::schema::ParsedGrid;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur during I/O operations
#[derive(Debug, Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Failed to open file: {0}")]
    OpenFailed(String),

    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for I/O operations
pub type IoResult<T> = Result<T, IoError>;

/// A parsed grid with the display name of its source
#[derive(Debug, Clone, PartialEq)]
pub struct NamedGrid {
    /// Display name (file stem)
    pub name: String,

    /// Parsed content
    pub grid: ParsedGrid,
}

/// Open a file and parse it into a grid
///
/// The format is auto-detected from the file extension.
pub fn read_grid(path: impl AsRef<Path>) -> IoResult<NamedGrid> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(IoError::FileNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    let grid = match extension.as_str() {
        #[cfg(feature = "csv")]
        "csv" => crate::csv_reader::CsvReader::new(b',').read_path(path)?,

        #[cfg(feature = "csv")]
        "tsv" | "tab" => crate::csv_reader::CsvReader::new(b'\t').read_path(path)?,

        _ => {
            return Err(IoError::InvalidFormat(format!(
                "Unknown file extension: {}",
                extension
            )))
        }
    };

    tracing::debug!(
        path = %path.display(),
        rows = grid.num_rows(),
        columns = grid.num_columns(),
        "parsed grid"
    );

    Ok(NamedGrid {
        name: dataset_name(path),
        grid,
    })
}

/// Display name for a dataset loaded from `path`: the file name without
/// its final extension
pub fn dataset_name(path: impl AsRef<Path>) -> String {
    let path = path.as_ref();
    path.file_stem()
        .or_else(|| path.file_name())
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Untitled".to_string())
}

/// List supported file extensions
pub fn supported_extensions() -> Vec<&'static str> {
    let mut extensions = Vec::new();

    #[cfg(feature = "csv")]
    {
        extensions.push("csv");
        extensions.push("tsv");
        extensions.push("tab");
    }

    extensions
}
