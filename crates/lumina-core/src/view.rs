//! Row views and filtering
//!
//! A [`RowView`] borrows a subset of a dataset's rows. Filtering produces a
//! new view and never touches the dataset, and every statistic available on
//! a dataset is available on a view.

use lumina_io::{Record, Value};

use crate::analysis::{
    self, CorrelationResult, HistogramBucket, NumericSummary, MIN_CORRELATION_SAMPLES,
};
use crate::config::AnalysisConfig;
use crate::dataset::Dataset;

/// Whether `row` passes a case-insensitive substring match on `column`
///
/// Null and absent values never match.
pub fn row_matches(row: &Record, column: &str, needle: &str) -> bool {
    let rendered = match row.get(column).and_then(Value::render) {
        Some(text) => text,
        None => return false,
    };
    rendered.to_lowercase().contains(&needle.to_lowercase())
}

/// Filter the rows of a dataset by substring on one column
///
/// An empty `column` or `needle` passes every row through.
pub fn filter<'a>(dataset: &'a Dataset, column: &str, needle: &str) -> Vec<&'a Record> {
    RowView::new(dataset).filter(column, needle).into_rows()
}

/// A borrowed, order-preserving selection of a dataset's rows
#[derive(Debug, Clone)]
pub struct RowView<'a> {
    dataset: &'a Dataset,
    rows: Vec<&'a Record>,
}

impl<'a> RowView<'a> {
    /// View over every row
    pub fn new(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            rows: dataset.rows.iter().collect(),
        }
    }

    /// Narrow the view to rows whose `column` contains `needle`,
    /// ignoring case
    ///
    /// An empty `column` or `needle` returns the view unchanged.
    pub fn filter(self, column: &str, needle: &str) -> Self {
        if column.is_empty() || needle.is_empty() {
            return self;
        }
        let needle = needle.to_lowercase();
        let rows = self
            .rows
            .into_iter()
            .filter(|row| row_matches(row, column, &needle))
            .collect();
        Self {
            dataset: self.dataset,
            rows,
        }
    }

    /// The dataset this view borrows from
    pub fn dataset(&self) -> &'a Dataset {
        self.dataset
    }

    /// Rows in the view
    pub fn rows(&self) -> &[&'a Record] {
        &self.rows
    }

    /// Consume the view, keeping the borrowed rows
    pub fn into_rows(self) -> Vec<&'a Record> {
        self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// First `limit` rows, for table display
    pub fn preview(&self, limit: usize) -> &[&'a Record] {
        &self.rows[..limit.min(self.rows.len())]
    }

    /// Whether the view holds more rows than `limit`
    pub fn is_truncated(&self, limit: usize) -> bool {
        self.rows.len() > limit
    }

    /// Numeric summaries over the rows in view
    pub fn summarize(&self) -> Vec<NumericSummary> {
        analysis::summarize_rows(&self.dataset.numeric_columns, &self.rows)
    }

    /// Correlations over the rows in view
    pub fn correlate(&self) -> Vec<CorrelationResult> {
        let columns = &self.dataset.numeric_columns;
        analysis::correlate_rows(columns, &self.rows, MIN_CORRELATION_SAMPLES)
    }

    /// Correlations over the rows in view with the threshold from `config`
    pub fn correlate_with(&self, config: &AnalysisConfig) -> Vec<CorrelationResult> {
        analysis::correlate_rows(
            &self.dataset.numeric_columns,
            &self.rows,
            config.min_correlation_samples,
        )
    }

    /// Histogram of one column over the rows in view
    pub fn histogram(&self, column: &str, bin_count: usize) -> Vec<HistogramBucket> {
        analysis::histogram_rows(column, &self.rows, bin_count)
    }
}
