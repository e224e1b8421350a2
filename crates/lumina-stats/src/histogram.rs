//! Equal-width histogram binning
//!
//! Bins span `[min, max]` of the finite values. Every bin is closed-open
//! except the last, which also absorbs the maximum.

use serde::{Deserialize, Serialize};

/// One equal-width bin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    /// Lower edge
    pub lo: f64,
    /// Upper edge
    pub hi: f64,
    /// Number of values that fell into this bin
    pub count: usize,
}

/// Bin the finite values of `data` into `bin_count` equal-width bins
///
/// Returns an empty vector when there are no finite values or `bin_count`
/// is zero. When every value is identical the width is zero and all values
/// land in the first bin.
pub fn equal_width_bins(data: &[f64], bin_count: usize) -> Vec<Bin> {
    if bin_count == 0 {
        return Vec::new();
    }

    let (min, max) = data
        .iter()
        .filter(|x| x.is_finite())
        .fold(None, |acc: Option<(f64, f64)>, &x| match acc {
            None => Some((x, x)),
            Some((lo, hi)) => Some((lo.min(x), hi.max(x))),
        })
        .unwrap_or((f64::NAN, f64::NAN));

    if min.is_nan() {
        return Vec::new();
    }

    let n = bin_count as f64;
    let width = max / n - min / n;
    let mut bins: Vec<Bin> = (0..bin_count)
        .map(|i| Bin {
            lo: edge(min, max, i as f64 / n),
            hi: edge(min, max, (i + 1) as f64 / n),
            count: 0,
        })
        .collect();

    for &v in data.iter().filter(|x| x.is_finite()) {
        bins[bin_index(v, min, width, bin_count)].count += 1;
    }

    bins
}

/// Index of the bin that holds `v`
///
/// A zero (or non-finite) width maps everything to bin 0; otherwise the
/// index is `floor((v - min) / width)` clamped to the last bin.
pub fn bin_index(v: f64, min: f64, width: f64, bin_count: usize) -> usize {
    if bin_count == 0 {
        return 0;
    }
    if width <= 0.0 || !width.is_finite() {
        return 0;
    }
    let raw = ((v / 2.0 - min / 2.0) / width * 2.0).floor();
    if raw.is_nan() || raw < 0.0 {
        return 0;
    }
    (raw as usize).min(bin_count - 1)
}

// Point at fraction `t` of [min, max]; weighted so the span never overflows
fn edge(min: f64, max: f64, t: f64) -> f64 {
    if min == max || t <= 0.0 {
        min
    } else if t >= 1.0 {
        max
    } else {
        min * (1.0 - t) + max * t
    }
}
