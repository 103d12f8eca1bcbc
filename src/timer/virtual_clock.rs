//! Virtual Clock - Deterministic scheduler for tests and manual stepping
//!
//! Time only moves when `advance()` or `advance_to()` is called. Due timers
//! fire in order of due time, then registration order. Intervals that come
//! due several times inside one advance fire once per period.
//!
//! The realtime clock drives this table in coalescing mode instead: an
//! interval that fell behind fires once and then skips ahead to its next
//! period after the target, like a browser `setInterval`.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use log::trace;

use super::{Scheduler, TimerCallback, TimerId};

const MIN_PERIOD: Duration = Duration::from_millis(1);

// =============================================================================
// TIMER TABLE
// =============================================================================

struct TimerEntry {
    due: Duration,
    /// `Some` for intervals, `None` for one-shot timeouts
    period: Option<Duration>,
    /// Taken out while the callback runs so it can touch the clock
    callback: Option<TimerCallback>,
}

#[derive(Default)]
struct ClockInner {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<u64, TimerEntry>,
}

impl ClockInner {
    /// Register a timer due `delay` after `base` (never before `now`).
    fn insert(&mut self, base: Duration, delay: Duration, period: Option<Duration>, callback: TimerCallback) -> TimerId {
        let id = self.next_id;
        self.next_id += 1;
        self.timers.insert(
            id,
            TimerEntry {
                due: base.max(self.now) + delay,
                period,
                callback: Some(callback),
            },
        );
        TimerId(id)
    }

    /// Earliest timer due at or before `limit` that is not currently running.
    fn next_due(&self, limit: Duration) -> Option<(u64, Duration)> {
        self.timers
            .iter()
            .filter(|(_, entry)| entry.callback.is_some() && entry.due <= limit)
            .min_by_key(|(id, entry)| (entry.due, **id))
            .map(|(id, entry)| (*id, entry.due))
    }
}

// =============================================================================
// VIRTUAL CLOCK
// =============================================================================

/// Scheduler whose time is advanced explicitly.
///
/// Cloning yields another handle to the same clock.
#[derive(Clone, Default)]
pub struct VirtualClock {
    inner: Rc<RefCell<ClockInner>>,
}

impl VirtualClock {
    /// Create a clock at t = 0 with no timers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time since creation.
    pub fn now(&self) -> Duration {
        self.inner.borrow().now
    }

    /// Move time forward by `by`, firing every timer that comes due.
    pub fn advance(&self, by: Duration) {
        let target = self.now() + by;
        self.advance_to(target);
    }

    /// Move time forward to `target`, firing every timer that comes due.
    ///
    /// Targets in the past are ignored.
    pub fn advance_to(&self, target: Duration) {
        self.run_until(target, false);
    }

    /// Like `advance_to`, but each interval fires at most once.
    pub(crate) fn advance_to_coalesced(&self, target: Duration) {
        self.run_until(target, true);
    }

    /// Schedule relative to an external time base instead of `now`.
    ///
    /// Used when the owner's notion of time has moved on since the last
    /// advance. A `base` earlier than `now` is treated as `now`.
    pub(crate) fn schedule_at(
        &self,
        base: Duration,
        delay: Duration,
        period: Option<Duration>,
        callback: TimerCallback,
    ) -> TimerId {
        let period = period.map(|period| period.max(MIN_PERIOD));
        let delay = period.unwrap_or(delay);
        self.inner.borrow_mut().insert(base, delay, period, callback)
    }

    fn run_until(&self, target: Duration, coalesce: bool) {
        loop {
            // Find and take the next callback without holding the borrow
            // across the call.
            let (id, mut callback) = {
                let mut inner = self.inner.borrow_mut();
                let Some((id, due)) = inner.next_due(target) else {
                    break;
                };
                if due > inner.now {
                    inner.now = due;
                }
                let Some(callback) = inner.timers.get_mut(&id).and_then(|e| e.callback.take()) else {
                    break;
                };
                (id, callback)
            };

            trace!("virtual clock: firing timer#{} at {:?}", id, self.now());
            callback();

            let mut inner = self.inner.borrow_mut();
            let reschedule = match inner.timers.get(&id) {
                Some(entry) => entry.period,
                // Cancelled from inside its own callback
                None => continue,
            };
            match reschedule {
                Some(period) => {
                    if let Some(entry) = inner.timers.get_mut(&id) {
                        entry.due += period;
                        if coalesce && entry.due <= target {
                            // First period boundary strictly after target
                            let behind = (target - entry.due).as_nanos() % period.as_nanos();
                            entry.due = target + period - Duration::from_nanos(behind as u64);
                        }
                        entry.callback = Some(callback);
                    }
                }
                None => {
                    inner.timers.remove(&id);
                }
            }
        }

        let mut inner = self.inner.borrow_mut();
        if target > inner.now {
            inner.now = target;
        }
    }
}

impl Scheduler for VirtualClock {
    fn schedule_interval(&self, period: Duration, callback: TimerCallback) -> TimerId {
        self.schedule_at(self.now(), period, Some(period), callback)
    }

    fn schedule_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        self.schedule_at(self.now(), delay, None, callback)
    }

    fn cancel(&self, id: TimerId) {
        self.inner.borrow_mut().timers.remove(&id.0);
    }

    fn is_scheduled(&self, id: TimerId) -> bool {
        self.inner.borrow().timers.contains_key(&id.0)
    }

    fn active_timers(&self) -> usize {
        self.inner.borrow().timers.len()
    }
}

impl std::fmt::Debug for VirtualClock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("VirtualClock")
            .field("now", &inner.now)
            .field("timers", &inner.timers.len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
