//! Summary statistics for a numeric sample
//!
//! Provides the descriptive statistics shown in the statistics panel:
//! - Min, max, mean
//! - Median and quartiles (linear interpolation between closest ranks)
//! - Sample variance and standard deviation

use serde::{Deserialize, Serialize};

/// Summary statistics for a numeric sample
///
/// An empty sample reports zeros for every statistic rather than NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStats {
    /// Number of finite values
    pub count: usize,
    /// Number of non-finite values that were skipped
    pub missing: usize,
    /// Minimum value
    pub min: f64,
    /// Maximum value
    pub max: f64,
    /// Mean (average)
    pub mean: f64,
    /// Sample variance (n - 1 denominator)
    pub variance: f64,
    /// Sample standard deviation
    pub std_dev: f64,
    /// Median (50th percentile)
    pub median: f64,
    /// First quartile (25th percentile)
    pub q1: f64,
    /// Third quartile (75th percentile)
    pub q3: f64,
}

impl SummaryStats {
    /// Compute summary statistics from data
    pub fn from_data(data: &[f64]) -> Self {
        let mut sorted: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
        let missing = data.len() - sorted.len();

        if sorted.is_empty() {
            return Self::empty(missing);
        }

        sorted.sort_by(f64::total_cmp);

        let count = sorted.len();
        let (min, max) = (sorted[0], sorted[count - 1]);
        let mean = running_mean(&sorted).clamp(min, max);
        let std_dev = scaled_std_dev(&sorted, mean);

        Self {
            count,
            missing,
            min,
            max,
            mean,
            variance: saturate(std_dev * std_dev),
            std_dev,
            median: median_sorted(&sorted),
            q1: quantile_sorted(&sorted, 0.25),
            q3: quantile_sorted(&sorted, 0.75),
        }
    }

    /// Create empty statistics (all zero)
    pub fn empty(missing: usize) -> Self {
        Self {
            count: 0,
            missing,
            min: 0.0,
            max: 0.0,
            mean: 0.0,
            variance: 0.0,
            std_dev: 0.0,
            median: 0.0,
            q1: 0.0,
            q3: 0.0,
        }
    }

    /// Get the range (max - min)
    pub fn range(&self) -> f64 {
        self.max - self.min
    }

    /// Get the interquartile range (q3 - q1)
    pub fn iqr(&self) -> f64 {
        self.q3 - self.q1
    }
}

/// Arithmetic mean of the finite values, `None` when there are none
pub fn mean(data: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    (!finite.is_empty()).then(|| running_mean(&finite))
}

/// Sample variance of the finite values (n - 1 denominator)
///
/// A single value has variance 0. Returns `None` for an empty sample.
pub fn sample_variance(data: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    let sd = sample_std_dev(&finite)?;
    Some(saturate(sd * sd))
}

/// Sample standard deviation of the finite values
///
/// Saturates at `f64::MAX` when the true value is not representable.
pub fn sample_std_dev(data: &[f64]) -> Option<f64> {
    let finite: Vec<f64> = data.iter().copied().filter(|x| x.is_finite()).collect();
    let m = mean(&finite)?;
    Some(scaled_std_dev(&finite, m))
}

/// Median of an ascending-sorted, non-empty sample
///
/// Middle element for odd lengths, average of the two middle elements for even.
pub fn median_sorted(sorted: &[f64]) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 0 {
        sorted[n / 2 - 1] / 2.0 + sorted[n / 2] / 2.0
    } else {
        sorted[n / 2]
    }
}

/// Quantile of an ascending-sorted sample by linear interpolation between
/// closest ranks
///
/// Uses h = (n - 1) * p, so p = 0 is the minimum and p = 1 the maximum.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    let p = p.clamp(0.0, 1.0);
    let h = (n - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let (a, b) = (sorted[lo], sorted[hi]);
    let frac = h - lo as f64;
    let span = b - a;
    let q = if span.is_finite() {
        a + frac * span
    } else {
        a * (1.0 - frac) + b * frac
    };
    q.clamp(a.min(b), a.max(b))
}

// Incremental mean; each step adds x/k - m/k so no partial sum leaves the
// f64 range
fn running_mean(data: &[f64]) -> f64 {
    data.iter().enumerate().fold(0.0, |m, (i, &x)| {
        let k = (i + 1) as f64;
        m + (x / k - m / k)
    })
}

// Deviations are halved and divided by the largest one before squaring,
// then scaled back, so finite input never overflows midway
fn scaled_std_dev(data: &[f64], mean: f64) -> f64 {
    let halves: Vec<f64> = data.iter().map(|x| x / 2.0 - mean / 2.0).collect();
    let scale = halves.iter().fold(0.0f64, |acc, h| acc.max(h.abs()));
    if scale == 0.0 {
        return 0.0;
    }
    let sum_sq: f64 = halves.iter().map(|h| (h / scale).powi(2)).sum();
    saturate(2.0 * scale * (sum_sq / denominator(data.len())).sqrt())
}

fn saturate(x: f64) -> f64 {
    if x.is_finite() {
        x
    } else {
        f64::MAX
    }
}

// n - 1, floored at 1 so a single value yields zero dispersion
fn denominator(n: usize) -> f64 {
    n.saturating_sub(1).max(1) as f64
}
