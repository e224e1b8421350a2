//! Idle/Live state machine for the active dataset
//!
//! A [`LiveFeed`] owns at most one scheduled task. Each run resolves the
//! workspace's active dataset at that moment and ticks it under the
//! workspace write lock, so readers never observe a half-built row. Stopping
//! takes the same lock before cancelling, so once [`LiveFeed::stop`] returns
//! no further tick can land.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use crate::config::StreamConfig;
use crate::error::{DatasetError, DatasetResult};
use crate::repository::{DatasetRepository, InMemoryRepository};
use crate::stream::scheduler::{Scheduler, TaskHandle, TickFn};
use crate::stream::simulator::{can_stream, Clock, SystemClock, TickSimulator};
use crate::workspace::{read_workspace, write_workspace, SharedWorkspace};

/// Whether the feed is ticking
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Idle,
    Live,
}

/// Result of asking the feed to change state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The feed is now live
    Started,
    /// The feed is now idle
    Stopped,
    /// The active dataset has no rows or no numeric columns; the feed
    /// stays idle
    Unavailable,
}

struct Running<H> {
    handle: H,
    stopped: Arc<AtomicBool>,
}

/// Drives a [`TickSimulator`] against the active dataset of a shared
/// workspace
pub struct LiveFeed<S: Scheduler, R: DatasetRepository + 'static = InMemoryRepository> {
    workspace: SharedWorkspace<R>,
    scheduler: S,
    clock: Arc<dyn Clock>,
    simulator: Arc<Mutex<TickSimulator>>,
    config: StreamConfig,
    running: Option<Running<S::Handle>>,
}

impl<S: Scheduler, R: DatasetRepository + 'static> LiveFeed<S, R> {
    /// Create an idle feed reading the system clock
    pub fn new(workspace: SharedWorkspace<R>, scheduler: S, config: StreamConfig) -> Self {
        Self {
            workspace,
            scheduler,
            clock: Arc::new(SystemClock),
            simulator: Arc::new(Mutex::new(TickSimulator::new(config.clone()))),
            config,
            running: None,
        }
    }

    /// Replace the clock used for timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn workspace(&self) -> &SharedWorkspace<R> {
        &self.workspace
    }

    pub fn state(&self) -> FeedState {
        if self.running.is_some() {
            FeedState::Live
        } else {
            FeedState::Idle
        }
    }

    pub fn is_live(&self) -> bool {
        self.running.is_some()
    }

    /// Flip between Idle and Live
    pub fn toggle(&mut self) -> ToggleOutcome {
        if self.is_live() {
            self.stop();
            ToggleOutcome::Stopped
        } else {
            self.start()
        }
    }

    /// Start ticking the active dataset
    ///
    /// Starting an already live feed is a no-op that reports `Started`.
    pub fn start(&mut self) -> ToggleOutcome {
        if self.is_live() {
            return ToggleOutcome::Started;
        }
        let ready = read_workspace(&self.workspace)
            .active()
            .map_or(false, can_stream);
        if !ready {
            tracing::debug!("Live feed unavailable: active dataset cannot be streamed");
            return ToggleOutcome::Unavailable;
        }

        let stopped = Arc::new(AtomicBool::new(false));
        let task = self.tick_task(Arc::clone(&stopped));
        let handle = self
            .scheduler
            .schedule_every(self.config.tick_interval(), task);
        self.running = Some(Running { handle, stopped });
        tracing::info!(
            "Live feed started ({}ms ticks)",
            self.config.tick_interval_ms
        );
        ToggleOutcome::Started
    }

    /// Stop ticking; returns whether the feed was live
    ///
    /// Must not be called while holding the workspace lock.
    pub fn stop(&mut self) -> bool {
        let Some(mut running) = self.running.take() else {
            return false;
        };
        {
            let _guard = write_workspace(&self.workspace);
            running.stopped.store(true, Ordering::SeqCst);
        }
        running.handle.cancel();
        tracing::info!("Live feed stopped");
        true
    }

    /// Switch the active dataset
    ///
    /// A live feed is stopped before the switch and restarted afterwards,
    /// so only one task ever targets one dataset. Returns the resulting
    /// state; a live feed falls back to Idle when the new dataset cannot be
    /// streamed.
    pub fn set_active(&mut self, id: &str) -> DatasetResult<FeedState> {
        if !read_workspace(&self.workspace).repository().contains(id) {
            return Err(DatasetError::NotFound { id: id.to_string() });
        }
        let was_live = self.stop();
        write_workspace(&self.workspace).set_active(id)?;
        tracing::info!("Active dataset switched to {}", id);
        if was_live {
            self.start();
        }
        Ok(self.state())
    }

    fn tick_task(&self, stopped: Arc<AtomicBool>) -> TickFn {
        let workspace = Arc::clone(&self.workspace);
        let simulator = Arc::clone(&self.simulator);
        let clock = Arc::clone(&self.clock);
        Box::new(move || {
            let mut ws = write_workspace(&workspace);
            if stopped.load(Ordering::SeqCst) {
                return;
            }
            let now = clock.now();
            if let Some(dataset) = ws.active_mut() {
                simulator
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner)
                    .tick(dataset, now);
            }
        })
    }
}

impl<S: Scheduler, R: DatasetRepository + 'static> Drop for LiveFeed<S, R> {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Dataset;
    use crate::stream::scheduler::{ManualScheduler, TokioScheduler};
    use crate::stream::simulator::ManualClock;
    use crate::workspace::Workspace;
    use chrono::{TimeZone, Utc};
    use lumina_io::{record, ParsedGrid, Value};
    use std::time::Duration;

    fn series(name: &str) -> Dataset {
        let rows = (0..5)
            .map(|i| {
                record([
                    ("timestamp", Value::from(format!("2024-01-01T00:00:0{}.000Z", i))),
                    ("value", Value::from(100.0 + i as f64)),
                ])
            })
            .collect();
        Dataset::from_grid(
            name,
            ParsedGrid::new(vec!["timestamp".into(), "value".into()], rows),
        )
    }

    fn labels() -> Dataset {
        Dataset::from_grid(
            "labels",
            ParsedGrid::new(vec!["tag".into()], vec![record([("tag", "a")])]),
        )
    }

    fn config() -> StreamConfig {
        StreamConfig {
            seed: Some(42),
            ..StreamConfig::default()
        }
    }

    fn feed(datasets: Vec<Dataset>) -> (LiveFeed<ManualScheduler>, ManualScheduler) {
        let workspace = Workspace::new(InMemoryRepository::with_datasets(datasets)).shared();
        let scheduler = ManualScheduler::new();
        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap(),
        ));
        let feed = LiveFeed::new(workspace, scheduler.clone(), config()).with_clock(clock);
        (feed, scheduler)
    }

    fn rows_of(feed: &LiveFeed<ManualScheduler>, id: &str) -> Vec<lumina_io::Record> {
        read_workspace(feed.workspace())
            .repository()
            .get(id)
            .map(|d| d.rows.clone())
            .unwrap_or_default()
    }

    #[test]
    fn test_toggle_live_and_back() {
        let ds = series("s");
        let id = ds.id.clone();
        let (mut feed, scheduler) = feed(vec![ds]);
        let original = rows_of(&feed, &id);

        assert_eq!(feed.toggle(), ToggleOutcome::Started);
        assert_eq!(feed.state(), FeedState::Live);
        scheduler.fire(2);
        let ticked = rows_of(&feed, &id);
        assert_eq!(ticked.len(), original.len());
        assert_eq!(&ticked[..3], &original[2..]);

        assert_eq!(feed.toggle(), ToggleOutcome::Stopped);
        assert_eq!(feed.state(), FeedState::Idle);
        scheduler.fire(5);
        assert_eq!(rows_of(&feed, &id), ticked);
        assert_eq!(scheduler.active_tasks(), 0);
    }

    #[test]
    fn test_unavailable_without_numeric_columns() {
        let (mut feed, scheduler) = feed(vec![labels()]);
        assert_eq!(feed.toggle(), ToggleOutcome::Unavailable);
        assert!(!feed.is_live());
        assert_eq!(scheduler.active_tasks(), 0);
    }

    #[test]
    fn test_unavailable_without_active_dataset() {
        let (mut feed, _) = feed(vec![]);
        assert_eq!(feed.start(), ToggleOutcome::Unavailable);
    }

    #[test]
    fn test_switch_active_retargets_feed() {
        let (a, b) = (series("a"), series("b"));
        let (a_id, b_id) = (a.id.clone(), b.id.clone());
        let (mut feed, scheduler) = feed(vec![a, b]);

        feed.start();
        scheduler.fire(1);
        let a_after_one = rows_of(&feed, &a_id);
        let b_before = rows_of(&feed, &b_id);

        assert_eq!(feed.set_active(&b_id).unwrap(), FeedState::Live);
        assert_eq!(scheduler.active_tasks(), 1);
        scheduler.fire(1);

        assert_eq!(rows_of(&feed, &a_id), a_after_one);
        assert_ne!(rows_of(&feed, &b_id), b_before);
    }

    #[test]
    fn test_switch_to_unstreamable_goes_idle() {
        let (a, l) = (series("a"), labels());
        let l_id = l.id.clone();
        let (mut feed, scheduler) = feed(vec![a, l]);

        feed.start();
        assert_eq!(feed.set_active(&l_id).unwrap(), FeedState::Idle);
        assert_eq!(scheduler.active_tasks(), 0);
        assert!(feed.set_active("missing").is_err());
    }

    #[test]
    fn test_tick_after_delete_is_noop() {
        let ds = series("s");
        let id = ds.id.clone();
        let (mut feed, scheduler) = feed(vec![ds]);
        feed.start();
        write_workspace(feed.workspace()).delete(&id);
        scheduler.fire(3);
        assert!(read_workspace(feed.workspace()).active().is_none());
    }

    #[test]
    fn test_drop_cancels() {
        let (mut feed, scheduler) = feed(vec![series("s")]);
        feed.start();
        drop(feed);
        assert_eq!(scheduler.active_tasks(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tokio_feed_ticks_on_interval() {
        let ds = series("s");
        let id = ds.id.clone();
        let workspace = Workspace::new(InMemoryRepository::with_datasets(vec![ds])).shared();
        let scheduler = TokioScheduler::try_current().unwrap();
        let mut feed = LiveFeed::new(Arc::clone(&workspace), scheduler, config());

        let original = read_workspace(&workspace).active().unwrap().rows.clone();
        assert_eq!(feed.start(), ToggleOutcome::Started);
        tokio::time::sleep(Duration::from_millis(3200)).await;
        feed.stop();

        let ws = read_workspace(&workspace);
        let rows = &ws.repository().get(&id).unwrap().rows;
        assert_eq!(rows.len(), original.len());
        assert_eq!(&rows[..3], &original[2..]);
    }
}
