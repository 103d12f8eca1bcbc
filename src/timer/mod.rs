//! Timer Module - Scheduler abstraction and scoped timer handles
//!
//! Controllers never talk to a concrete timing primitive. They ask a
//! [`Scheduler`] for an interval or a timeout and hold the returned
//! [`TimerHandle`]; dropping the handle cancels the timer.
//!
//! - [`VirtualClock`] - deterministic scheduler driven by `advance()`
//! - [`RealtimeClock`] - wall-clock scheduler pumped from a host loop
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use std::time::Duration;
//! use kantin_ui::timer::{Scheduler, TimerHandle, VirtualClock};
//!
//! let clock = VirtualClock::new();
//! let scheduler: Rc<dyn Scheduler> = Rc::new(clock.clone());
//!
//! let handle = TimerHandle::interval(&scheduler, Duration::from_millis(500), Box::new(|| {
//!     println!("tick");
//! }));
//!
//! clock.advance(Duration::from_millis(1000)); // prints "tick" twice
//! drop(handle); // timer cancelled
//! ```

mod realtime;
mod virtual_clock;

pub use realtime::RealtimeClock;
pub use virtual_clock::VirtualClock;

use std::fmt;
use std::rc::Rc;
use std::time::Duration;

// =============================================================================
// TYPES
// =============================================================================

/// Callback fired when a timer comes due.
pub type TimerCallback = Box<dyn FnMut()>;

/// Identifier of a scheduled timer, unique per scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(pub(crate) u64);

impl fmt::Display for TimerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

// =============================================================================
// SCHEDULER
// =============================================================================

/// Source of periodic and one-shot timers.
///
/// Callbacks run on the thread that drives the scheduler, one at a time.
/// A callback may cancel or schedule timers (including its own) while it
/// runs.
pub trait Scheduler {
    /// Fire `callback` every `period` until cancelled.
    fn schedule_interval(&self, period: Duration, callback: TimerCallback) -> TimerId;

    /// Fire `callback` once after `delay`.
    fn schedule_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerId;

    /// Cancel a timer. Unknown or already finished ids are ignored.
    fn cancel(&self, id: TimerId);

    /// Whether the timer is still pending.
    fn is_scheduled(&self, id: TimerId) -> bool;

    /// Number of pending timers.
    fn active_timers(&self) -> usize;
}

// =============================================================================
// TIMER HANDLE
// =============================================================================

/// Owns a scheduled timer and cancels it on drop.
pub struct TimerHandle {
    id: TimerId,
    scheduler: Rc<dyn Scheduler>,
}

impl TimerHandle {
    /// Schedule a repeating timer and take ownership of it.
    pub fn interval(scheduler: &Rc<dyn Scheduler>, period: Duration, callback: TimerCallback) -> Self {
        let id = scheduler.schedule_interval(period, callback);
        Self {
            id,
            scheduler: Rc::clone(scheduler),
        }
    }

    /// Schedule a one-shot timer and take ownership of it.
    pub fn timeout(scheduler: &Rc<dyn Scheduler>, delay: Duration, callback: TimerCallback) -> Self {
        let id = scheduler.schedule_timeout(delay, callback);
        Self {
            id,
            scheduler: Rc::clone(scheduler),
        }
    }

    pub fn id(&self) -> TimerId {
        self.id
    }

    /// Whether the underlying timer is still pending.
    ///
    /// A fired timeout reports false even while the handle is alive.
    pub fn is_scheduled(&self) -> bool {
        self.scheduler.is_scheduled(self.id)
    }

    /// Cancel now. Equivalent to dropping the handle.
    pub fn cancel(self) {
        drop(self);
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.scheduler.cancel(self.id);
    }
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle").field("id", &self.id).finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    fn setup() -> (VirtualClock, Rc<dyn Scheduler>) {
        let clock = VirtualClock::new();
        let scheduler: Rc<dyn Scheduler> = Rc::new(clock.clone());
        (clock, scheduler)
    }

    #[test]
    fn test_handle_drop_cancels() {
        let (clock, scheduler) = setup();
        let fired = Rc::new(Cell::new(0));
        let fired_clone = fired.clone();

        let handle = TimerHandle::interval(
            &scheduler,
            Duration::from_millis(100),
            Box::new(move || fired_clone.set(fired_clone.get() + 1)),
        );
        assert!(handle.is_scheduled());
        assert_eq!(scheduler.active_timers(), 1);

        clock.advance(Duration::from_millis(250));
        assert_eq!(fired.get(), 2);

        drop(handle);
        assert_eq!(scheduler.active_timers(), 0);

        clock.advance(Duration::from_millis(1000));
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_explicit_cancel() {
        let (clock, scheduler) = setup();
        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();

        let handle = TimerHandle::timeout(
            &scheduler,
            Duration::from_millis(50),
            Box::new(move || fired_clone.set(true)),
        );
        handle.cancel();

        clock.advance(Duration::from_millis(100));
        assert!(!fired.get());
    }

    #[test]
    fn test_fired_timeout_not_scheduled() {
        let (clock, scheduler) = setup();
        let handle = TimerHandle::timeout(&scheduler, Duration::from_millis(10), Box::new(|| {}));

        clock.advance(Duration::from_millis(10));
        assert!(!handle.is_scheduled());

        // Dropping after completion is harmless
        drop(handle);
        assert_eq!(scheduler.active_timers(), 0);
    }
}
