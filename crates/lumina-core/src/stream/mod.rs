//! Live feed simulation
//!
//! A static dataset is turned into a moving window: on every tick the last
//! row is copied, its numeric cells nudged by a bounded random amount, its
//! timestamp advanced, and the copy appended while the oldest row drops off.
//!
//! - [`simulator`]: the tick itself and the wall clock it reads
//! - [`scheduler`]: cancellable periodic tasks (tokio-driven or manual)
//! - [`feed`]: the Idle/Live state machine tying the two to a workspace

pub mod feed;
pub mod scheduler;
pub mod simulator;

pub use feed::{FeedState, LiveFeed, ToggleOutcome};
pub use scheduler::{ManualScheduler, Scheduler, TaskHandle, TickFn, TokioScheduler};
pub use simulator::{can_stream, Clock, ManualClock, SystemClock, TickSimulator};
