//! Realtime Clock - Wall-clock scheduler for host event loops
//!
//! Wraps a [`VirtualClock`] and advances it to the time elapsed since
//! creation whenever the host calls `pump()`. Nothing runs on a background
//! thread; callbacks fire inside `pump()` on the caller's thread.
//!
//! Timers are scheduled against the wall clock, not the last pump, and an
//! interval fires at most once per pump no matter how long the loop idled.
//!
//! ```ignore
//! let clock = RealtimeClock::new();
//! loop {
//!     clock.pump();
//!     std::thread::sleep(Duration::from_millis(16));
//! }
//! ```

use std::time::{Duration, Instant};

use super::{Scheduler, TimerCallback, TimerId, VirtualClock};

/// Scheduler driven by `Instant::now()`.
#[derive(Debug, Clone)]
pub struct RealtimeClock {
    origin: Instant,
    clock: VirtualClock,
}

impl RealtimeClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            clock: VirtualClock::new(),
        }
    }

    /// Fire every timer due by now. Returns the time elapsed since creation.
    ///
    /// Intervals that missed several periods fire once and resume on their
    /// next period boundary.
    pub fn pump(&self) -> Duration {
        let elapsed = self.origin.elapsed();
        self.clock.advance_to_coalesced(elapsed);
        elapsed
    }

    /// Time already processed by `pump()`.
    pub fn processed(&self) -> Duration {
        self.clock.now()
    }
}

impl Default for RealtimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler for RealtimeClock {
    fn schedule_interval(&self, period: Duration, callback: TimerCallback) -> TimerId {
        self.clock.schedule_at(self.origin.elapsed(), period, Some(period), callback)
    }

    fn schedule_timeout(&self, delay: Duration, callback: TimerCallback) -> TimerId {
        self.clock.schedule_at(self.origin.elapsed(), delay, None, callback)
    }

    fn cancel(&self, id: TimerId) {
        self.clock.cancel(id);
    }

    fn is_scheduled(&self, id: TimerId) -> bool {
        self.clock.is_scheduled(id)
    }

    fn active_timers(&self) -> usize {
        self.clock.active_timers()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;
    use std::thread;

    use crate::carousel::{AutoplayConfig, CarouselController, Slide};

    fn carousel(clock: &RealtimeClock, delay_ms: u64) -> CarouselController {
        let slides = (0..7)
            .map(|i| Slide::new(format!("promo-{i}"), format!("Promo {i}"), "", format!("promo-{i}.jpg")))
            .collect();
        let scheduler: Rc<dyn Scheduler> = Rc::new(clock.clone());
        CarouselController::new(slides, AutoplayConfig::new(true, Some(delay_ms)), scheduler)
    }

    #[test]
    fn test_pump_fires_due_timers() {
        let clock = RealtimeClock::new();
        let fired = Rc::new(Cell::new(0));
        let fired_clone = fired.clone();

        clock.schedule_interval(
            Duration::from_millis(10),
            Box::new(move || fired_clone.set(fired_clone.get() + 1)),
        );

        // Nothing due yet
        clock.pump();
        assert_eq!(fired.get(), 0);

        thread::sleep(Duration::from_millis(35));
        let elapsed = clock.pump();

        // Three periods passed, one firing
        assert!(elapsed >= Duration::from_millis(35));
        assert_eq!(fired.get(), 1);
        assert_eq!(clock.processed(), elapsed);
    }

    #[test]
    fn test_cancel_before_due() {
        let clock = RealtimeClock::new();
        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();

        let id = clock.schedule_timeout(Duration::from_millis(5), Box::new(move || fired_clone.set(true)));
        clock.cancel(id);

        thread::sleep(Duration::from_millis(10));
        clock.pump();
        assert!(!fired.get());
        assert_eq!(clock.active_timers(), 0);
    }

    #[test]
    fn test_timer_scheduled_after_idle_starts_from_wall_clock() {
        let clock = RealtimeClock::new();
        clock.pump();

        // Host loop idles before the carousel mounts
        thread::sleep(Duration::from_millis(250));
        let carousel = carousel(&clock, 50);
        clock.pump();

        assert_eq!(carousel.current_index(), Some(0));
    }

    #[test]
    fn test_idle_gap_advances_carousel_by_one() {
        let clock = RealtimeClock::new();
        let carousel = carousel(&clock, 50);

        thread::sleep(Duration::from_millis(160));
        clock.pump();
        assert_eq!(carousel.current_index(), Some(1));

        thread::sleep(Duration::from_millis(160));
        clock.pump();
        assert_eq!(carousel.current_index(), Some(2));
        assert_eq!(clock.active_timers(), 1);
    }

    #[test]
    fn test_timeout_scheduled_after_idle() {
        let clock = RealtimeClock::new();
        thread::sleep(Duration::from_millis(100));

        let fired = Rc::new(Cell::new(false));
        let fired_clone = fired.clone();
        clock.schedule_timeout(Duration::from_millis(50), Box::new(move || fired_clone.set(true)));

        clock.pump();
        assert!(!fired.get());
        assert_eq!(clock.active_timers(), 1);
    }
}
