//! lumina-core - Core analytics engine for tabular datasets
//!
//! This crate turns a parsed grid of rows into a typed dataset and computes
//! everything the lumina dashboard shows about it.
//!
//! # Key Components
//!
//! - **Dataset**: Rows tagged with numeric/categorical column sets, inferred
//!   once from the first row
//! - **Analysis**: Numeric summaries, pairwise Pearson correlations and
//!   equal-width histograms, all pure and recomputed on demand
//! - **RowView**: Case-insensitive substring filtering that borrows rows
//!   instead of copying them
//! - **Workspace**: An injected dataset repository plus the active selection
//! - **LiveFeed**: A sliding-window simulator that turns a static dataset
//!   into a moving series on a cancellable timer
//! - **ChartConfig**: Dashboard chart descriptors and ingestion defaults
//!
//! # Example
//!
//! ```
//! use lumina_core::{analysis, Dataset};
//! use lumina_io::{record, ParsedGrid};
//!
//! let rows = vec![
//!     record([("x", 1.0), ("y", 10.0)]),
//!     record([("x", 2.0), ("y", 20.0)]),
//!     record([("x", 3.0), ("y", 30.0)]),
//! ];
//! let ds = Dataset::from_grid("demo", ParsedGrid::new(vec!["x".into(), "y".into()], rows));
//!
//! let summary = analysis::summarize(&ds);
//! assert_eq!(summary[0].mean, 2.0);
//! // three paired points are too few for a correlation
//! assert!(analysis::correlate(&ds).is_empty());
//! ```

pub mod analysis;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod error;
pub mod repository;
pub mod stream;
pub mod view;
pub mod workspace;

pub use analysis::{
    CorrelationMatrix, CorrelationResult, HistogramBucket, NumericSummary,
    MIN_CORRELATION_SAMPLES,
};
pub use chart::*;
pub use config::*;
pub use dataset::*;
pub use error::*;
pub use repository::*;
pub use stream::*;
pub use view::{filter, row_matches, RowView};
pub use workspace::*;

pub use lumina_io::{ParsedGrid, Record, Value, ValueKind};
