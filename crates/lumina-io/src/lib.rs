//! lumina-io - Data I/O for tabular datasets
//!
//! This crate provides the row model shared by every lumina crate and the
//! readers that turn files into it:
//!
//! - **Value / Record**: a typed cell (number, text, boolean, null) and a
//!   row keyed by column name
//! - **ParsedGrid**: an ordered header list plus ordered rows, the hand-off
//!   format for type inference
//! - **CSV**: delimited text with dynamic typing of cells
//!
//! # Design
//!
//! Readers never decide column types. They only coerce individual cells
//! (blank to null, numeric literals to numbers, `true`/`false` to booleans)
//! and leave classification to `lumina-core`.

pub mod reader;
pub mod schema;

#[cfg(feature = "csv")]
pub mod csv_reader;

pub use reader::*;
pub use schema::*;

#[cfg(feature = "csv")]
pub use csv_reader::{parse_csv_str, CsvReader};
