//! Sliding-window tick

use std::sync::{Mutex, PoisonError};

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use lumina_io::Value;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::StreamConfig;
use crate::dataset::Dataset;

/// Source of wall-clock time for synthesized timestamps
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// The system clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner) = now;
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(PoisonError::into_inner);
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Whether a dataset can be streamed: at least one numeric column and one row
pub fn can_stream(dataset: &Dataset) -> bool {
    !dataset.numeric_columns.is_empty() && !dataset.rows.is_empty()
}

/// Round `value` to `decimals` places
///
/// Values too large to scale are returned unchanged; at that magnitude they
/// carry no fractional digits anyway.
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let scale = 10f64.powi(decimals as i32);
    let scaled = value * scale;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / scale
}

/// Synthesizes one row per tick from the last row of a dataset
#[derive(Debug)]
pub struct TickSimulator {
    config: StreamConfig,
    rng: StdRng,
}

impl TickSimulator {
    /// Seeded from `config.seed`, or from entropy when unset
    pub fn new(config: StreamConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { config, rng }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    /// Advance the window by one row
    ///
    /// Copies the last row, perturbs each numeric cell, stamps the timestamp
    /// column (if the dataset has one) with `now`, appends the copy and drops
    /// the oldest row. Returns `false` without touching the dataset when it
    /// cannot be streamed.
    pub fn tick(&mut self, dataset: &mut Dataset, now: DateTime<Utc>) -> bool {
        if !can_stream(dataset) {
            return false;
        }
        let Some(mut row) = dataset.rows.last().cloned() else {
            return false;
        };

        for column in &dataset.numeric_columns {
            let Some(current) = row.get(column).and_then(Value::as_number) else {
                continue;
            };
            let delta = (self.rng.gen::<f64>() - 0.5) * (current * self.config.perturbation);
            let moved = current + delta;
            let next = if moved.is_finite() {
                round_to(moved, self.config.decimals)
            } else {
                current
            };
            row.insert(column.clone(), Value::Number(next));
        }

        let ts_column = &self.config.timestamp_column;
        if dataset.has_column(ts_column) {
            let previous = row
                .get(ts_column)
                .and_then(Value::as_text)
                .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
                .map(|ts| ts.with_timezone(&Utc));
            let stamp = match previous {
                Some(prev) if now <= prev => prev + Duration::milliseconds(1),
                _ => now,
            };
            row.insert(
                ts_column.clone(),
                Value::Text(stamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
            );
        }

        dataset.rows.remove(0);
        dataset.rows.push(row);
        tracing::trace!("Tick on dataset {} ({} rows)", dataset.id, dataset.rows.len());
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use lumina_io::{record, ParsedGrid};

    fn seeded() -> TickSimulator {
        TickSimulator::new(StreamConfig {
            seed: Some(7),
            ..StreamConfig::default()
        })
    }

    fn sensor() -> Dataset {
        let rows = (0..4)
            .map(|i| {
                record([
                    ("timestamp", Value::from(format!("2024-01-01T00:00:0{}.000Z", i))),
                    ("temp", Value::from(20.0 + i as f64)),
                    ("site", Value::from("north")),
                ])
            })
            .collect();
        Dataset::from_grid(
            "sensor",
            ParsedGrid::new(
                vec!["timestamp".into(), "temp".into(), "site".into()],
                rows,
            ),
        )
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_tick_slides_window() {
        let mut ds = sensor();
        let before = ds.rows.clone();
        assert!(seeded().tick(&mut ds, start()));

        assert_eq!(ds.rows.len(), before.len());
        assert_eq!(&ds.rows[..3], &before[1..]);
        let newest = &ds.rows[3];
        assert_eq!(newest["site"], Value::from("north"));
        assert_eq!(newest["timestamp"], Value::from("2024-06-01T12:00:00.000Z"));
    }

    #[test]
    fn test_perturbation_is_bounded_and_rounded() {
        let mut ds = sensor();
        let mut sim = seeded();
        for _ in 0..50 {
            let last = ds.rows[3]["temp"].as_number().unwrap();
            sim.tick(&mut ds, start());
            let next = ds.rows[3]["temp"].as_number().unwrap();
            assert!((next - last).abs() <= last.abs() * 0.05 + 0.005);
            assert_eq!(round_to(next, 2), next);
        }
    }

    #[test]
    fn test_timestamp_strictly_increases() {
        let mut ds = sensor();
        let mut sim = seeded();
        let now = start();
        sim.tick(&mut ds, now);
        sim.tick(&mut ds, now);
        sim.tick(&mut ds, now - Duration::seconds(5));

        let stamps: Vec<DateTime<Utc>> = ds.rows[1..]
            .iter()
            .map(|r| {
                DateTime::parse_from_rfc3339(r["timestamp"].as_text().unwrap())
                    .unwrap()
                    .with_timezone(&Utc)
            })
            .collect();
        assert!(stamps.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_same_seed_same_feed() {
        let (mut a, mut b) = (sensor(), sensor());
        let (mut sa, mut sb) = (seeded(), seeded());
        for _ in 0..5 {
            sa.tick(&mut a, start());
            sb.tick(&mut b, start());
        }
        assert_eq!(a.rows, b.rows);
    }

    #[test]
    fn test_no_numeric_columns_is_noop() {
        let rows = vec![record([("site", "north")])];
        let mut ds = Dataset::from_grid("s", ParsedGrid::new(vec!["site".into()], rows));
        let before = ds.clone();
        assert!(!seeded().tick(&mut ds, start()));
        assert_eq!(ds, before);
    }

    #[test]
    fn test_manual_clock() {
        let clock = ManualClock::new(start());
        clock.advance(Duration::milliseconds(1500));
        assert_eq!(clock.now(), start() + Duration::milliseconds(1500));
        clock.set(start());
        assert_eq!(clock.now(), start());
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.23456, 2), 1.23);
        assert_eq!(round_to(-1.235, 0), -1.0);
        assert_eq!(round_to(1e307, 2), 1e307);
    }

    #[test]
    fn test_huge_values_stay_finite() {
        for start_value in [1e307, f64::MAX, -f64::MAX] {
            let rows = vec![record([("v", start_value)]), record([("v", start_value)])];
            let mut ds = Dataset::from_grid("big", ParsedGrid::new(vec!["v".into()], rows));
            let mut sim = seeded();
            for _ in 0..10 {
                assert!(sim.tick(&mut ds, start()));
                let newest = ds.rows[1]["v"].as_number();
                assert!(newest.is_some_and(f64::is_finite), "{:?}", ds.rows[1]["v"]);
            }
        }
    }
}
