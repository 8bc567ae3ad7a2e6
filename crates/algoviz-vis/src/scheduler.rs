//! Injectable timer scheduling.
//!
//! Players and races never own a real timer. They ask a [`Scheduler`] for a
//! periodic [`TimerId`] and receive ticks through [`Tickable::on_tick`]. Two
//! schedulers share the same timer table:
//!
//! - [`VirtualScheduler`]: a virtual clock advanced explicitly, for tests
//! - [`TokioScheduler`]: wall-clock time on `tokio::time`
//!
//! Both are single-threaded and cooperative. A tick runs to completion before
//! the next one is dispatched, and a cancelled timer never fires again.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Shortest period a timer may have.
pub const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a periodic timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerId(u64);

/// Source of time and periodic timers.
pub trait Scheduler {
    /// Time elapsed since the scheduler's epoch.
    fn now(&self) -> Duration;

    /// Start a periodic timer. The first tick fires one period from now.
    fn schedule(&mut self, period: Duration) -> TimerId;

    /// Stop a timer. Unknown or already-cancelled ids are ignored.
    fn cancel(&mut self, timer: TimerId);

    /// True if `timer` will still fire.
    fn is_live(&self, timer: TimerId) -> bool;
}

/// Something driven by timer ticks.
pub trait Tickable {
    /// Handle one tick of `timer`. The scheduler is passed back so the target
    /// can read the clock or cancel its own timer.
    fn on_tick(&mut self, timer: TimerId, scheduler: &mut dyn Scheduler);
}

#[derive(Debug, Clone, Copy)]
struct Timer {
    period: Duration,
    next_due: Duration,
}

/// Live timers ordered by id.
#[derive(Debug, Default)]
struct TimerTable {
    next_id: u64,
    timers: BTreeMap<TimerId, Timer>,
}

impl TimerTable {
    fn insert(&mut self, now: Duration, period: Duration) -> TimerId {
        let period = period.max(MIN_PERIOD);
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            Timer {
                period,
                next_due: now + period,
            },
        );
        debug!(timer = id.0, period_ms = period.as_millis() as u64, "timer scheduled");
        id
    }

    fn remove(&mut self, id: TimerId) {
        if self.timers.remove(&id).is_some() {
            debug!(timer = id.0, "timer cancelled");
        }
    }

    fn contains(&self, id: TimerId) -> bool {
        self.timers.contains_key(&id)
    }

    /// Earliest due timer; ties go to the lower id.
    fn next_due(&self) -> Option<(Duration, TimerId)> {
        self.timers
            .iter()
            .map(|(&id, timer)| (timer.next_due, id))
            .min()
    }

    /// Mark a tick as delivered and push the deadline one period forward.
    fn fire(&mut self, id: TimerId) {
        if let Some(timer) = self.timers.get_mut(&id) {
            timer.next_due += timer.period;
        }
    }

    fn len(&self) -> usize {
        self.timers.len()
    }
}

/// Deterministic scheduler with a manually advanced clock.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now: Duration,
    timers: TimerTable,
}

impl VirtualScheduler {
    /// Create a scheduler at time zero with no timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live timers.
    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    /// Advance the clock by `by`, delivering every tick that falls due to
    /// `target` in deadline order. Returns the number of ticks delivered.
    pub fn advance<T: Tickable + ?Sized>(&mut self, by: Duration, target: &mut T) -> usize {
        let deadline = self.now + by;
        let mut delivered = 0;

        while let Some((due, id)) = self.timers.next_due() {
            if due > deadline {
                break;
            }
            self.now = self.now.max(due);
            self.timers.fire(id);
            target.on_tick(id, self);
            delivered += 1;
        }

        self.now = deadline;
        delivered
    }

    /// Move the clock without delivering ticks to anyone.
    ///
    /// Due timers stay pending and fire on the next [`advance`](Self::advance).
    pub fn skip(&mut self, by: Duration) {
        self.now += by;
    }
}

impl Scheduler for VirtualScheduler {
    fn now(&self) -> Duration {
        self.now
    }

    fn schedule(&mut self, period: Duration) -> TimerId {
        self.timers.insert(self.now, period)
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.remove(timer);
    }

    fn is_live(&self, timer: TimerId) -> bool {
        self.timers.contains(timer)
    }
}

/// Wall-clock scheduler on `tokio::time`.
///
/// Under a paused tokio clock (`start_paused = true`) time auto-advances, so
/// the same code runs instantly in tests.
#[derive(Debug)]
pub struct TokioScheduler {
    epoch: tokio::time::Instant,
    timers: TimerTable,
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl TokioScheduler {
    /// Create a scheduler whose epoch is now.
    pub fn new() -> Self {
        Self {
            epoch: tokio::time::Instant::now(),
            timers: TimerTable::default(),
        }
    }

    /// Number of live timers.
    pub fn live_timers(&self) -> usize {
        self.timers.len()
    }

    /// Deliver ticks to `target` until no timers remain. Returns the number
    /// of ticks delivered.
    pub async fn run<T: Tickable + ?Sized>(&mut self, target: &mut T) -> usize {
        self.run_until(None, target).await
    }

    /// Deliver ticks for at most `limit` of wall-clock time, returning control
    /// to the caller so it can pause, reset or inspect the target.
    pub async fn run_for<T: Tickable + ?Sized>(&mut self, limit: Duration, target: &mut T) -> usize {
        let deadline = self.now() + limit;
        let delivered = self.run_until(Some(deadline), target).await;
        tokio::time::sleep_until(self.epoch + deadline).await;
        delivered
    }

    async fn run_until<T: Tickable + ?Sized>(
        &mut self,
        deadline: Option<Duration>,
        target: &mut T,
    ) -> usize {
        let mut delivered = 0;

        while let Some((due, id)) = self.timers.next_due() {
            if deadline.is_some_and(|d| due > d) {
                break;
            }
            tokio::time::sleep_until(self.epoch + due).await;
            self.timers.fire(id);
            target.on_tick(id, self);
            delivered += 1;
        }

        delivered
    }
}

impl Scheduler for TokioScheduler {
    fn now(&self) -> Duration {
        tokio::time::Instant::now().duration_since(self.epoch)
    }

    fn schedule(&mut self, period: Duration) -> TimerId {
        let now = self.now();
        self.timers.insert(now, period)
    }

    fn cancel(&mut self, timer: TimerId) {
        self.timers.remove(timer);
    }

    fn is_live(&self, timer: TimerId) -> bool {
        self.timers.contains(timer)
    }
}
