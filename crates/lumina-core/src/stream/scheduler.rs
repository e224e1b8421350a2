//! Cancellable periodic tasks
//!
//! [`TokioScheduler`] drives ticks from a tokio interval in production;
//! [`ManualScheduler`] fires them on demand so feeds can be tested without
//! sleeping.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

/// Work run on every tick
pub type TickFn = Box<dyn FnMut() + Send + 'static>;

/// Handle to a scheduled task; cancelling guarantees no further runs
pub trait TaskHandle: Send {
    fn cancel(&mut self);
    fn is_cancelled(&self) -> bool;
}

/// Something that can run a task every `period`
pub trait Scheduler {
    type Handle: TaskHandle;

    /// Run `task` every `period`, first run one period from now
    fn schedule_every(&self, period: Duration, task: TickFn) -> Self::Handle;
}

/// Schedules tasks on a tokio runtime
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Use the runtime of the calling context, if there is one
    pub fn try_current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

/// A task spawned by [`TokioScheduler`]; aborted on cancel or drop
#[derive(Debug)]
pub struct TokioTaskHandle {
    cancelled: Arc<AtomicBool>,
    join: Option<JoinHandle<()>>,
}

impl TaskHandle for TokioTaskHandle {
    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Some(join) = self.join.take() {
            join.abort();
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Drop for TokioTaskHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl Scheduler for TokioScheduler {
    type Handle = TokioTaskHandle;

    fn schedule_every(&self, period: Duration, mut task: TickFn) -> TokioTaskHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&cancelled);
        let join = self.runtime.spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately
            interval.tick().await;
            loop {
                interval.tick().await;
                if flag.load(Ordering::SeqCst) {
                    break;
                }
                task();
            }
        });
        TokioTaskHandle {
            cancelled,
            join: Some(join),
        }
    }
}

struct ManualTask {
    period: Duration,
    elapsed: Duration,
    cancelled: Arc<AtomicBool>,
    run: TickFn,
}

/// A scheduler whose tasks only run when fired by hand
#[derive(Clone, Default)]
pub struct ManualScheduler {
    tasks: Arc<Mutex<Vec<ManualTask>>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run every live task `times` times
    pub fn fire(&self, times: usize) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|t| !t.cancelled.load(Ordering::SeqCst));
        for _ in 0..times {
            for task in tasks.iter_mut() {
                if !task.cancelled.load(Ordering::SeqCst) {
                    (task.run)();
                }
            }
        }
    }

    /// Pretend `by` has passed, running each task once per elapsed period
    pub fn advance_time(&self, by: Duration) {
        let mut tasks = self.tasks.lock().unwrap_or_else(PoisonError::into_inner);
        tasks.retain(|t| !t.cancelled.load(Ordering::SeqCst));
        for task in tasks.iter_mut() {
            if task.period.is_zero() {
                continue;
            }
            task.elapsed += by;
            while task.elapsed >= task.period && !task.cancelled.load(Ordering::SeqCst) {
                task.elapsed -= task.period;
                (task.run)();
            }
        }
    }

    /// Number of tasks not yet cancelled
    pub fn active_tasks(&self) -> usize {
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|t| !t.cancelled.load(Ordering::SeqCst))
            .count()
    }
}

/// A task registered with [`ManualScheduler`]
#[derive(Debug)]
pub struct ManualTaskHandle {
    cancelled: Arc<AtomicBool>,
}

impl TaskHandle for ManualTaskHandle {
    fn cancel(&mut self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Scheduler for ManualScheduler {
    type Handle = ManualTaskHandle;

    fn schedule_every(&self, period: Duration, task: TickFn) -> ManualTaskHandle {
        let cancelled = Arc::new(AtomicBool::new(false));
        self.tasks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(ManualTask {
                period,
                elapsed: Duration::ZERO,
                cancelled: Arc::clone(&cancelled),
                run: task,
            });
        ManualTaskHandle { cancelled }
    }
}
