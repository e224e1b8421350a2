//! Pearson correlation over paired samples
//!
//! Pairs are built by zipping two columns and keeping only the positions
//! where both sides are finite. The coefficient uses sample covariance and
//! sample standard deviations, matching [`crate::summary`].

/// Two equally long samples, aligned by position
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairedSample {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl PairedSample {
    /// Build from optional values, dropping any position where either side
    /// is missing or non-finite
    pub fn from_options<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Option<f64>, Option<f64>)>,
    {
        let (xs, ys) = pairs
            .into_iter()
            .filter_map(|pair| match pair {
                (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some((x, y)),
                _ => None,
            })
            .unzip();
        Self { xs, ys }
    }

    /// Number of complete pairs
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    /// Whether there are no complete pairs
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Pearson sample correlation of the pairs
    ///
    /// NaN when fewer than two pairs exist or either side has zero variance.
    pub fn pearson(&self) -> f64 {
        pearson(&self.xs, &self.ys)
    }
}

/// Sample covariance of two aligned slices (n - 1 denominator)
///
/// Only the common prefix is used. NaN when fewer than two points exist.
pub fn sample_covariance(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let (xs, ys) = (&xs[..n], &ys[..n]);
    let mx = xs.iter().sum::<f64>() / n as f64;
    let my = ys.iter().sum::<f64>() / n as f64;
    let sum: f64 = xs.iter().zip(ys).map(|(x, y)| (x - mx) * (y - my)).sum();
    sum / (n - 1) as f64
}

/// Pearson sample correlation coefficient
///
/// r = cov(X, Y) / (sd(X) * sd(Y)). Returns NaN for degenerate input;
/// callers decide how to report it.
pub fn pearson(xs: &[f64], ys: &[f64]) -> f64 {
    let n = xs.len().min(ys.len());
    if n < 2 {
        return f64::NAN;
    }
    let cov = sample_covariance(xs, ys);
    let sx = sample_covariance(&xs[..n], &xs[..n]).sqrt();
    let sy = sample_covariance(&ys[..n], &ys[..n]).sqrt();
    let r = cov / (sx * sy);
    // floating error can push perfectly linear data just past the bounds
    if r.is_finite() {
        r.clamp(-1.0, 1.0)
    } else {
        f64::NAN
    }
}

/// Pearson correlation with NaN reported as zero
pub fn pearson_or_zero(xs: &[f64], ys: &[f64]) -> f64 {
    let r = pearson(xs, ys);
    if r.is_nan() {
        0.0
    } else {
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_positive() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0];
        let ys = [10.0, 20.0, 30.0, 40.0, 50.0, 60.0];
        assert!((pearson(&xs, &ys) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_negative() {
        let xs = [1.0, 2.0, 3.0, 4.0];
        let ys = [8.0, 6.0, 4.0, 2.0];
        assert!((pearson(&xs, &ys) + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_known_value() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        let ys = [2.0, 4.0, 5.0, 4.0, 5.0];
        assert!((pearson(&xs, &ys) - 0.7745966692414834).abs() < 1e-12);
    }

    #[test]
    fn test_zero_variance_is_nan() {
        let xs = [3.0, 3.0, 3.0, 3.0];
        let ys = [1.0, 2.0, 3.0, 4.0];
        assert!(pearson(&xs, &ys).is_nan());
        assert_eq!(pearson_or_zero(&xs, &ys), 0.0);
    }

    #[test]
    fn test_paired_sample_drops_incomplete_pairs() {
        let sample = PairedSample::from_options(vec![
            (Some(1.0), Some(2.0)),
            (None, Some(3.0)),
            (Some(f64::NAN), Some(4.0)),
            (Some(5.0), None),
            (Some(6.0), Some(7.0)),
        ]);
        assert_eq!(sample.len(), 2);
        assert_eq!(sample.xs(), &[1.0, 6.0]);
        assert_eq!(sample.ys(), &[2.0, 7.0]);
    }

    #[test]
    fn test_symmetric() {
        let xs = [1.0, 5.0, 2.0, 8.0, 3.0];
        let ys = [4.0, 1.0, 7.0, 2.0, 9.0];
        assert_eq!(pearson(&xs, &ys), pearson(&ys, &xs));
    }
}
