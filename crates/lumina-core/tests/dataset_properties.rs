//! Property tests over whole datasets

use lumina_core::{analysis, filter, CorrelationMatrix, Dataset, StreamConfig, TickSimulator};
use lumina_io::{ParsedGrid, Record, Value};
use proptest::prelude::*;

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        6 => (-1.0e4f64..1.0e4).prop_map(Value::Number),
        1 => Just(Value::Null),
        1 => "[a-z]{0,4}".prop_map(Value::Text),
    ]
}

/// Three columns whose first row is always numeric, numeric, text
fn dataset() -> impl Strategy<Value = Dataset> {
    prop::collection::vec((cell(), cell(), cell()), 1..60).prop_map(|cells| {
        let mut rows: Vec<Record> = cells
            .into_iter()
            .map(|(a, b, c)| {
                [("a", a), ("b", b), ("label", c)]
                    .into_iter()
                    .map(|(k, v)| (k.to_string(), v))
                    .collect()
            })
            .collect();
        rows[0].insert("a".into(), Value::Number(1.0));
        rows[0].insert("b".into(), Value::Number(2.0));
        rows[0].insert("label".into(), Value::from("first"));
        Dataset::from_grid(
            "prop",
            ParsedGrid::new(vec!["a".into(), "b".into(), "label".into()], rows),
        )
    })
}

proptest! {
    #[test]
    fn test_one_summary_per_numeric_column(ds in dataset()) {
        let summaries = analysis::summarize(&ds);
        let columns: Vec<&str> = summaries.iter().map(|s| s.column.as_str()).collect();
        prop_assert_eq!(columns, vec!["a", "b"]);
        for s in &summaries {
            prop_assert!(s.min <= s.median && s.median <= s.max);
            prop_assert!(s.min - 1e-6 <= s.mean && s.mean <= s.max + 1e-6);
            prop_assert!(s.null_count < ds.rows.len());
        }
    }

    #[test]
    fn test_correlation_threshold_and_symmetry(ds in dataset()) {
        let matrix = CorrelationMatrix::for_dataset(&ds);
        let paired = ds
            .rows
            .iter()
            .filter(|r| r["a"].as_number().is_some() && r["b"].as_number().is_some())
            .count();
        prop_assert_eq!(matrix.len(), usize::from(paired > 5));
        prop_assert_eq!(matrix.get("a", "b"), matrix.get("b", "a"));
        if let Some(r) = matrix.get("a", "b") {
            prop_assert!((-1.0..=1.0).contains(&r));
        }
    }

    #[test]
    fn test_histogram_counts_well_formed_values(ds in dataset(), bins in 1usize..20) {
        let buckets = analysis::histogram(&ds, "a", bins);
        let valid = ds.rows.iter().filter(|r| r["a"].as_number().is_some()).count();
        prop_assert_eq!(buckets.len(), bins);
        prop_assert_eq!(buckets.iter().map(|b| b.count).sum::<usize>(), valid);
    }

    #[test]
    fn test_filter_idempotent_and_pure(ds in dataset(), needle in "[a-z0-9.]{0,2}") {
        let before = ds.clone();
        let once: Vec<Record> = filter(&ds, "label", &needle).into_iter().cloned().collect();
        let refiltered = Dataset { rows: once.clone(), ..ds.clone() };
        let twice: Vec<Record> = filter(&refiltered, "label", &needle).into_iter().cloned().collect();
        prop_assert_eq!(once, twice);
        prop_assert_eq!(ds, before);
    }

    #[test]
    fn test_tick_preserves_shape(ds in dataset(), seed in any::<u64>()) {
        let mut ds = ds;
        let (rows, id, columns) = (ds.rows.len(), ds.id.clone(), ds.columns.clone());
        let mut sim = TickSimulator::new(StreamConfig { seed: Some(seed), ..StreamConfig::default() });
        prop_assert!(sim.tick(&mut ds, chrono::Utc::now()));
        prop_assert_eq!(ds.rows.len(), rows);
        prop_assert_eq!(ds.id, id);
        prop_assert_eq!(ds.columns, columns);
    }
}
