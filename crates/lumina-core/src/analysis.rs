//! Dataset-level statistics
//!
//! Extracts well-formed numbers from rows and hands them to the kernels in
//! `lumina-stats`. Everything here is a pure function of the rows passed
//! in: nothing is cached and nothing mutates the dataset.
//!
//! The `*_rows` variants accept any row slice (`&[Record]` or the borrowed
//! rows of a filtered view), so filtered views share the exact same code
//! path as whole datasets.

use std::borrow::Borrow;

use lumina_io::Record;
use lumina_stats::{equal_width_bins, PairedSample, SummaryStats};
use serde::{Deserialize, Serialize};

use crate::config::AnalysisConfig;
use crate::dataset::Dataset;

/// Paired values needed (exclusive) before a correlation is reported
pub const MIN_CORRELATION_SAMPLES: usize = 5;

/// Descriptive statistics for one numeric column
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumericSummary {
    pub column: String,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub q1: f64,
    pub q3: f64,
    /// Rows whose value is not a well-formed number
    pub null_count: usize,
}

/// Pearson correlation between two numeric columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationResult {
    pub col1: String,
    pub col2: String,
    pub correlation: f64,
}

/// One histogram bucket
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBucket {
    /// Display label, e.g. `"1.0 - 2.5"`
    pub range_label: String,
    pub count: usize,
    pub range_min: f64,
    pub range_max: f64,
}

/// Well-formed numbers of `column`, in row order
pub fn numeric_values<R: Borrow<Record>>(column: &str, rows: &[R]) -> Vec<f64> {
    rows.iter()
        .filter_map(|row| row.borrow().get(column).and_then(|v| v.as_number()))
        .collect()
}

/// Summarize every numeric column of a dataset, in column order
pub fn summarize(dataset: &Dataset) -> Vec<NumericSummary> {
    summarize_rows(&dataset.numeric_columns, &dataset.rows)
}

/// Summarize `columns` over `rows`
///
/// Always returns one entry per column. A column with no well-formed
/// values reports zeros and counts every row as null.
pub fn summarize_rows<R: Borrow<Record>>(columns: &[String], rows: &[R]) -> Vec<NumericSummary> {
    columns
        .iter()
        .map(|column| {
            let values = numeric_values(column, rows);
            let stats = SummaryStats::from_data(&values);
            tracing::debug!(column = %column, valid = stats.count, "summarized column");
            NumericSummary {
                column: column.clone(),
                min: stats.min,
                max: stats.max,
                mean: stats.mean,
                median: stats.median,
                std_dev: stats.std_dev,
                q1: stats.q1,
                q3: stats.q3,
                null_count: rows.len() - stats.count,
            }
        })
        .collect()
}

/// Correlate every unordered pair of numeric columns
pub fn correlate(dataset: &Dataset) -> Vec<CorrelationResult> {
    correlate_rows(&dataset.numeric_columns, &dataset.rows, MIN_CORRELATION_SAMPLES)
}

/// Correlate with the threshold from `config`
pub fn correlate_with(dataset: &Dataset, config: &AnalysisConfig) -> Vec<CorrelationResult> {
    correlate_rows(&dataset.numeric_columns, &dataset.rows, config.min_correlation_samples)
}

/// Correlate every pair `(i, j)` with `i < j` of `columns` over `rows`
///
/// A pair is emitted only when strictly more than `min_samples` rows hold
/// well-formed numbers in both columns. A NaN coefficient (zero variance)
/// is reported as 0.
pub fn correlate_rows<R: Borrow<Record>>(
    columns: &[String],
    rows: &[R],
    min_samples: usize,
) -> Vec<CorrelationResult> {
    let mut results = Vec::new();

    for (i, col1) in columns.iter().enumerate() {
        for col2 in &columns[i + 1..] {
            let sample = PairedSample::from_options(rows.iter().map(|row| {
                let row = row.borrow();
                (
                    row.get(col1).and_then(|v| v.as_number()),
                    row.get(col2).and_then(|v| v.as_number()),
                )
            }));

            if sample.len() <= min_samples {
                tracing::debug!(
                    col1 = %col1,
                    col2 = %col2,
                    pairs = sample.len(),
                    "skipping sparse correlation pair"
                );
                continue;
            }

            let r = sample.pearson();
            results.push(CorrelationResult {
                col1: col1.clone(),
                col2: col2.clone(),
                correlation: if r.is_nan() { 0.0 } else { r },
            });
        }
    }

    results
}

/// Correlation results with order-independent lookup
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationMatrix {
    results: Vec<CorrelationResult>,
}

impl CorrelationMatrix {
    /// Wrap a list of results
    pub fn new(results: Vec<CorrelationResult>) -> Self {
        Self { results }
    }

    /// Compute the matrix for a dataset
    pub fn for_dataset(dataset: &Dataset) -> Self {
        Self::new(correlate(dataset))
    }

    /// Correlation between `a` and `b`, in either order
    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        self.results
            .iter()
            .find(|r| (r.col1 == a && r.col2 == b) || (r.col1 == b && r.col2 == a))
            .map(|r| r.correlation)
    }

    /// All results, in emission order
    pub fn results(&self) -> &[CorrelationResult] {
        &self.results
    }

    /// Pairs sorted by descending absolute correlation
    pub fn strongest(&self) -> Vec<&CorrelationResult> {
        let mut sorted: Vec<&CorrelationResult> = self.results.iter().collect();
        sorted.sort_by(|a, b| b.correlation.abs().total_cmp(&a.correlation.abs()));
        sorted
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_inner(self) -> Vec<CorrelationResult> {
        self.results
    }
}

/// Histogram of one column of a dataset
pub fn histogram(dataset: &Dataset, column: &str, bin_count: usize) -> Vec<HistogramBucket> {
    histogram_rows(column, &dataset.rows, bin_count)
}

/// Histogram of `column` over `rows` with `bin_count` equal-width buckets
///
/// Returns an empty vector when the column has no well-formed values or
/// `bin_count` is zero.
pub fn histogram_rows<R: Borrow<Record>>(
    column: &str,
    rows: &[R],
    bin_count: usize,
) -> Vec<HistogramBucket> {
    let values = numeric_values(column, rows);
    if values.is_empty() || bin_count == 0 {
        tracing::debug!(column = %column, bin_count, "histogram has no input");
        return Vec::new();
    }

    equal_width_bins(&values, bin_count)
        .into_iter()
        .map(|bin| HistogramBucket {
            range_label: format!("{:.1} - {:.1}", bin.lo, bin.hi),
            count: bin.count,
            range_min: bin.lo,
            range_max: bin.hi,
        })
        .collect()
}
