//! Property tests for the statistical kernels

use lumina_stats::{equal_width_bins, pearson, SummaryStats};
use proptest::prelude::*;

proptest! {
    #[test]
    fn test_summary_ordering(data in prop::collection::vec(-1.0e6f64..1.0e6, 1..200)) {
        let stats = SummaryStats::from_data(&data);
        prop_assert!(stats.min <= stats.median && stats.median <= stats.max);
        prop_assert!(stats.min <= stats.q1 && stats.q1 <= stats.q3 && stats.q3 <= stats.max);
        prop_assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        prop_assert!(stats.std_dev >= 0.0);
    }

    #[test]
    fn test_summary_finite_at_any_magnitude(
        data in prop::collection::vec(prop::num::f64::NORMAL, 1..50),
    ) {
        let stats = SummaryStats::from_data(&data);
        prop_assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        prop_assert!(stats.std_dev.is_finite() && stats.variance.is_finite());
        prop_assert!(stats.median.is_finite() && stats.q1.is_finite() && stats.q3.is_finite());
        for bin in equal_width_bins(&data, 7) {
            prop_assert!(bin.lo.is_finite() && bin.hi.is_finite());
        }
    }

    #[test]
    fn test_histogram_conserves_count(
        data in prop::collection::vec(-1.0e4f64..1.0e4, 1..300),
        bins in 1usize..40,
    ) {
        let result = equal_width_bins(&data, bins);
        prop_assert_eq!(result.len(), bins);
        prop_assert_eq!(result.iter().map(|b| b.count).sum::<usize>(), data.len());
    }

    #[test]
    fn test_pearson_symmetric_and_bounded(
        pairs in prop::collection::vec((-1.0e3f64..1.0e3, -1.0e3f64..1.0e3), 2..100),
    ) {
        let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
        let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
        let r = pearson(&xs, &ys);
        let r_rev = pearson(&ys, &xs);
        prop_assert!(r.is_nan() == r_rev.is_nan());
        if !r.is_nan() {
            prop_assert_eq!(r, r_rev);
            prop_assert!((-1.0..=1.0).contains(&r));
        }
    }
}
