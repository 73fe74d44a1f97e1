//! Clock and scheduler - wall time for seeds and history, ticks for the timer
//!
//! The session never sleeps or registers callbacks. A [`Scheduler`] arms a
//! recurring timer and counts how many intervals have elapsed; the host loop
//! drains that count through [`crate::GameSession::poll_timer`].
//!
//! [`ManualClock`] is a virtual clock for tests: time only moves on
//! [`ManualClock::advance`]. [`SystemClock`] follows `std::time::Instant`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

/// Handle to an armed recurring timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerHandle(u64);

/// Wall-clock time in epoch milliseconds.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Recurring timers.
pub trait Scheduler {
    /// Arm a timer firing every `interval`.
    fn every(&mut self, interval: Duration) -> TimerHandle;

    /// Disarm a timer. Unknown handles are ignored.
    fn cancel(&mut self, handle: TimerHandle);

    /// Number of times `handle` fired since the previous drain.
    fn drain(&mut self, handle: TimerHandle) -> u32;
}

/// Everything the session needs from time.
pub trait SessionClock: Clock + Scheduler {}

impl<T: Clock + Scheduler> SessionClock for T {}

#[derive(Debug, Clone, Copy)]
struct VirtualTimer {
    interval_ms: u64,
    next_due_ms: u64,
    pending: u32,
}

#[derive(Debug, Default)]
struct ManualInner {
    now_ms: u64,
    next_id: u64,
    timers: BTreeMap<TimerHandle, VirtualTimer>,
}

/// Virtual clock. Clones share the same time line.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    inner: Rc<RefCell<ManualInner>>,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        let clock = Self::default();
        clock.inner.borrow_mut().now_ms = start_ms;
        clock
    }

    /// Move time forward, firing every timer whose deadline passes.
    pub fn advance(&self, by: Duration) {
        let mut inner = self.inner.borrow_mut();
        inner.now_ms += by.as_millis() as u64;
        let now = inner.now_ms;
        for timer in inner.timers.values_mut() {
            while timer.next_due_ms <= now {
                timer.pending += 1;
                timer.next_due_ms += timer.interval_ms;
            }
        }
    }

    pub fn active_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.inner.borrow().now_ms
    }
}

impl Scheduler for ManualClock {
    fn every(&mut self, interval: Duration) -> TimerHandle {
        let mut inner = self.inner.borrow_mut();
        let handle = TimerHandle(inner.next_id);
        inner.next_id += 1;

        let interval_ms = (interval.as_millis() as u64).max(1);
        let next_due_ms = inner.now_ms + interval_ms;
        inner.timers.insert(
            handle,
            VirtualTimer {
                interval_ms,
                next_due_ms,
                pending: 0,
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.inner.borrow_mut().timers.remove(&handle);
    }

    fn drain(&mut self, handle: TimerHandle) -> u32 {
        self.inner
            .borrow_mut()
            .timers
            .get_mut(&handle)
            .map(|t| std::mem::take(&mut t.pending))
            .unwrap_or(0)
    }
}

#[derive(Debug, Clone, Copy)]
struct WallTimer {
    armed_at: Instant,
    interval: Duration,
    drained: u64,
}

/// Real time.
#[derive(Debug, Default)]
pub struct SystemClock {
    next_id: u64,
    timers: BTreeMap<TimerHandle, WallTimer>,
}

impl SystemClock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }
}

impl Scheduler for SystemClock {
    fn every(&mut self, interval: Duration) -> TimerHandle {
        let handle = TimerHandle(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            handle,
            WallTimer {
                armed_at: Instant::now(),
                interval: interval.max(Duration::from_millis(1)),
                drained: 0,
            },
        );
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.timers.remove(&handle);
    }

    fn drain(&mut self, handle: TimerHandle) -> u32 {
        let Some(timer) = self.timers.get_mut(&handle) else {
            return 0;
        };
        let fired = (timer.armed_at.elapsed().as_nanos() / timer.interval.as_nanos()) as u64;
        let fresh = fired.saturating_sub(timer.drained);
        timer.drained = fired;
        fresh as u32
    }
}
