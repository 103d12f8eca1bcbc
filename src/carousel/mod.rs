//! Carousel Module - Hero carousel navigation and autoplay
//!
//! [`CarouselController`] is the only authority over which slide is shown.
//! It combines three input sources through one piece of state:
//!
//! - an autoplay interval that advances unless a drag is in progress
//! - discrete commands (`previous`, `next`, `go_to`)
//! - drag gestures, classified on release by [`classify_drag`]
//!
//! Navigation always wraps. With fewer than two slides navigation is
//! disabled: commands are no-ops and autoplay never starts. Every operation
//! is total; out-of-range or stale input is ignored rather than reported.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use kantin_ui::carousel::{AutoplayConfig, CarouselController, IndexChange, Slide};
//! use kantin_ui::timer::{Scheduler, VirtualClock};
//!
//! let clock = VirtualClock::new();
//! let scheduler: Rc<dyn Scheduler> = Rc::new(clock.clone());
//!
//! let mut carousel = CarouselController::new(slides, AutoplayConfig::default(), scheduler);
//! let cleanup = carousel.subscribe(Rc::new(|change: &IndexChange| {
//!     println!("slide {:?} -> {:?}", change.from, change.to);
//! }));
//!
//! carousel.next();
//! carousel.on_drag_start();
//! carousel.on_drag_end(-150.0); // swipe left -> next slide
//!
//! cleanup();
//! carousel.teardown();
//! ```

mod drag;
mod slide;

pub use drag::{classify_drag, DragOutcome, DragTracker, DEFAULT_DRAG_THRESHOLD};
pub use slide::{duplicate_ids, Slide, SlideAction};

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};
use std::time::Duration;

use log::{debug, trace, warn};
use spark_signals::{signal, Signal};

use crate::config::CarouselConfig;
use crate::timer::{Scheduler, TimerHandle};

// =============================================================================
// AUTOPLAY CONFIG
// =============================================================================

/// Interval used when none (or zero) is supplied.
pub const DEFAULT_AUTOPLAY_DELAY: Duration = Duration::from_millis(5000);

/// Autoplay settings: on/off plus the advance interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoplayConfig {
    enabled: bool,
    delay: Duration,
}

impl AutoplayConfig {
    /// `delay_ms` of `None` or `Some(0)` falls back to the default interval.
    pub fn new(enabled: bool, delay_ms: Option<u64>) -> Self {
        let delay = match delay_ms {
            Some(0) => {
                if enabled {
                    warn!(
                        "carousel autoplay delay of 0ms replaced by {}ms",
                        DEFAULT_AUTOPLAY_DELAY.as_millis()
                    );
                }
                DEFAULT_AUTOPLAY_DELAY
            }
            Some(ms) => Duration::from_millis(ms),
            None => DEFAULT_AUTOPLAY_DELAY,
        };
        Self { enabled, delay }
    }

    pub fn disabled() -> Self {
        Self::new(false, None)
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self::new(true, None)
    }
}

/// Whether the autoplay timer is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoplayState {
    Stopped,
    Running,
}

// =============================================================================
// CHROME
// =============================================================================

bitflags::bitflags! {
    /// Navigation affordances the renderer should show.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Chrome: u8 {
        const ARROWS = 1 << 0;
        const INDICATORS = 1 << 1;
        /// Autoplay timer is running
        const AUTOPLAY = 1 << 2;
    }
}

// =============================================================================
// OBSERVER
// =============================================================================

/// Why the current index changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationCause {
    Previous,
    Next,
    Jump,
    Swipe(DragOutcome),
    Autoplay,
    /// Slide sequence replaced and the index was clamped
    SlidesReplaced,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexChange {
    pub from: Option<usize>,
    pub to: Option<usize>,
    pub cause: NavigationCause,
}

/// Receives carousel state changes (renderer, analytics, test doubles).
pub trait NavigationObserver {
    fn index_changed(&self, change: &IndexChange);

    fn interaction_changed(&self, _in_progress: bool) {}
}

impl<F: Fn(&IndexChange)> NavigationObserver for F {
    fn index_changed(&self, change: &IndexChange) {
        self(change)
    }
}

// =============================================================================
// SHARED CORE
// =============================================================================

/// State reachable from both the controller and its timer callback.
struct CarouselCore {
    slides: RefCell<Rc<[Slide]>>,
    current: Signal<Option<usize>>,
    interacting: Signal<bool>,
    observers: RefCell<Vec<(usize, Rc<dyn NavigationObserver>)>>,
    next_observer_id: Cell<usize>,
    inert: Cell<bool>,
}

impl CarouselCore {
    fn len(&self) -> usize {
        self.slides.borrow().len()
    }

    fn observers(&self) -> Vec<Rc<dyn NavigationObserver>> {
        self.observers.borrow().iter().map(|(_, o)| Rc::clone(o)).collect()
    }

    fn set_index(&self, to: Option<usize>, cause: NavigationCause) -> bool {
        let from = self.current.get();
        if from == to {
            return false;
        }
        self.current.set(to);
        trace!("carousel index {:?} -> {:?} ({:?})", from, to, cause);

        let change = IndexChange { from, to, cause };
        for observer in self.observers() {
            observer.index_changed(&change);
        }
        true
    }

    fn set_interacting(&self, in_progress: bool) {
        if self.interacting.get() == in_progress {
            return;
        }
        self.interacting.set(in_progress);
        for observer in self.observers() {
            observer.interaction_changed(in_progress);
        }
    }

    /// Cyclic step. Disabled when inert or with fewer than two slides.
    fn step(&self, forward: bool, cause: NavigationCause) -> bool {
        if self.inert.get() {
            return false;
        }
        let len = self.len();
        if len <= 1 {
            return false;
        }
        let Some(current) = self.current.get() else {
            return false;
        };
        let target = if forward {
            (current + 1) % len
        } else {
            (current + len - 1) % len
        };
        self.set_index(Some(target), cause)
    }

    fn autoplay_tick(&self) {
        if self.inert.get() {
            return;
        }
        if self.interacting.get() {
            trace!("carousel autoplay tick skipped: drag in progress");
            return;
        }
        self.step(true, NavigationCause::Autoplay);
    }
}

// =============================================================================
// CONTROLLER
// =============================================================================

/// Owns the carousel's index, interaction flag and autoplay timer.
///
/// Dropping the controller cancels its timer.
pub struct CarouselController {
    core: Rc<CarouselCore>,
    scheduler: Rc<dyn Scheduler>,
    autoplay: AutoplayConfig,
    drag_threshold: f32,
    tracker: DragTracker,
    timer: Option<TimerHandle>,
}

impl CarouselController {
    /// Create a controller showing the first slide.
    ///
    /// Autoplay starts immediately when enabled and there are at least two
    /// slides.
    pub fn new(slides: Vec<Slide>, autoplay: AutoplayConfig, scheduler: Rc<dyn Scheduler>) -> Self {
        warn_duplicate_ids(&slides);
        let current = if slides.is_empty() { None } else { Some(0) };
        let core = Rc::new(CarouselCore {
            slides: RefCell::new(slides.into()),
            current: signal(current),
            interacting: signal(false),
            observers: RefCell::new(Vec::new()),
            next_observer_id: Cell::new(0),
            inert: Cell::new(false),
        });

        let mut controller = Self {
            core,
            scheduler,
            autoplay,
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            tracker: DragTracker::new(),
            timer: None,
        };
        controller.restart_autoplay();
        controller
    }

    pub fn from_config(config: &CarouselConfig, slides: Vec<Slide>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self::new(slides, config.autoplay_config(), scheduler).with_drag_threshold(config.drag_threshold_px)
    }

    /// Override the swipe distance. Negative or non-finite values keep the
    /// default.
    pub fn with_drag_threshold(mut self, threshold: f32) -> Self {
        if threshold.is_finite() && threshold >= 0.0 {
            self.drag_threshold = threshold;
        }
        self
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Index of the visible slide (`None` when there are no slides).
    pub fn current_index(&self) -> Option<usize> {
        self.core.current.get()
    }

    pub fn current_slide(&self) -> Option<Slide> {
        let index = self.current_index()?;
        self.core.slides.borrow().get(index).cloned()
    }

    pub fn slides(&self) -> Rc<[Slide]> {
        Rc::clone(&self.core.slides.borrow())
    }

    pub fn len(&self) -> usize {
        self.core.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_interacting(&self) -> bool {
        self.core.interacting.get()
    }

    /// Reactive view of the current index.
    pub fn index_signal(&self) -> Signal<Option<usize>> {
        self.core.current.clone()
    }

    /// Reactive view of the interaction flag.
    pub fn interaction_signal(&self) -> Signal<bool> {
        self.core.interacting.clone()
    }

    /// True with two or more slides on a live controller.
    pub fn navigation_enabled(&self) -> bool {
        !self.core.inert.get() && self.len() > 1
    }

    pub fn chrome(&self) -> Chrome {
        let mut chrome = Chrome::empty();
        if self.navigation_enabled() {
            chrome |= Chrome::ARROWS | Chrome::INDICATORS;
        }
        if self.autoplay_state() == AutoplayState::Running {
            chrome |= Chrome::AUTOPLAY;
        }
        chrome
    }

    pub fn autoplay(&self) -> AutoplayConfig {
        self.autoplay
    }

    pub fn autoplay_state(&self) -> AutoplayState {
        match &self.timer {
            Some(timer) if timer.is_scheduled() => AutoplayState::Running,
            _ => AutoplayState::Stopped,
        }
    }

    pub fn drag_threshold(&self) -> f32 {
        self.drag_threshold
    }

    pub fn is_torn_down(&self) -> bool {
        self.core.inert.get()
    }

    // -------------------------------------------------------------------------
    // Navigation
    // -------------------------------------------------------------------------

    /// Jump to `index`. Out-of-range indices are ignored.
    ///
    /// Returns true if the visible slide changed.
    pub fn go_to(&mut self, index: usize) -> bool {
        if !self.navigation_enabled() || index >= self.len() {
            return false;
        }
        self.core.set_index(Some(index), NavigationCause::Jump)
    }

    /// Show the previous slide, wrapping from the first to the last.
    pub fn previous(&mut self) -> bool {
        self.core.step(false, NavigationCause::Previous)
    }

    /// Show the next slide, wrapping from the last to the first.
    pub fn next(&mut self) -> bool {
        self.core.step(true, NavigationCause::Next)
    }

    /// Run the visible slide's action callback.
    pub fn activate_current(&self) -> bool {
        if self.core.inert.get() {
            return false;
        }
        self.current_slide().is_some_and(|slide| slide.activate())
    }

    // -------------------------------------------------------------------------
    // Drag gestures
    // -------------------------------------------------------------------------

    /// A drag began. Autoplay ticks are skipped until it ends.
    pub fn on_drag_start(&mut self) {
        if self.core.inert.get() {
            return;
        }
        self.core.set_interacting(true);
    }

    /// A drag was released after moving `displacement_x` pixels
    /// (positive = right).
    ///
    /// Clears the interaction flag, then navigates according to
    /// [`classify_drag`]. The decision uses this displacement only.
    pub fn on_drag_end(&mut self, displacement_x: f32) -> DragOutcome {
        if self.core.inert.get() {
            return DragOutcome::Stay;
        }
        self.core.set_interacting(false);

        let outcome = classify_drag(displacement_x, self.drag_threshold);
        let cause = NavigationCause::Swipe(outcome);
        match outcome {
            DragOutcome::Previous => {
                self.core.step(false, cause);
            }
            DragOutcome::Next => {
                self.core.step(true, cause);
            }
            DragOutcome::Stay => {}
        }
        outcome
    }

    /// Abandon a drag without navigating.
    pub fn cancel_drag(&mut self) {
        self.tracker.cancel();
        if self.core.inert.get() {
            return;
        }
        self.core.set_interacting(false);
    }

    /// Pointer pressed at `x`. Starts a drag.
    pub fn pointer_down(&mut self, x: f32) {
        if self.core.inert.get() {
            return;
        }
        self.tracker.begin(x);
        self.on_drag_start();
    }

    pub fn pointer_move(&mut self, x: f32) {
        self.tracker.move_to(x);
    }

    /// Pointer released at `x`. Ends the drag started by `pointer_down`.
    pub fn pointer_up(&mut self, x: f32) -> DragOutcome {
        match self.tracker.end(x) {
            Some(displacement) => self.on_drag_end(displacement),
            None => DragOutcome::Stay,
        }
    }

    // -------------------------------------------------------------------------
    // Reconfiguration
    // -------------------------------------------------------------------------

    /// Replace the slide sequence.
    ///
    /// The index is clamped into the new range (`None` when empty). Autoplay
    /// restarts when the slide count changes.
    pub fn set_slides(&mut self, slides: Vec<Slide>) {
        if self.core.inert.get() {
            return;
        }
        warn_duplicate_ids(&slides);
        let old_len = self.len();
        let new_len = slides.len();
        *self.core.slides.borrow_mut() = slides.into();
        debug!("carousel slides replaced: {} -> {}", old_len, new_len);

        let clamped = match (self.current_index(), new_len) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(index), len) => Some(index.min(len - 1)),
        };
        self.core.set_index(clamped, NavigationCause::SlidesReplaced);

        if old_len != new_len {
            self.restart_autoplay();
        }
    }

    /// Change autoplay settings. Restarts the timer only if they differ.
    pub fn set_autoplay(&mut self, autoplay: AutoplayConfig) {
        if self.core.inert.get() || self.autoplay == autoplay {
            return;
        }
        self.autoplay = autoplay;
        self.restart_autoplay();
    }

    /// Subscribe to state changes. Returns a cleanup function.
    pub fn subscribe(&self, observer: Rc<dyn NavigationObserver>) -> impl FnOnce() + use<> {
        let id = self.core.next_observer_id.get();
        self.core.next_observer_id.set(id + 1);
        self.core.observers.borrow_mut().push((id, observer));

        let core: Weak<CarouselCore> = Rc::downgrade(&self.core);
        move || {
            if let Some(core) = core.upgrade() {
                core.observers.borrow_mut().retain(|(other, _)| *other != id);
            }
        }
    }

    /// Cancel autoplay and make every later command a no-op.
    pub fn teardown(&mut self) {
        if self.core.inert.get() {
            return;
        }
        self.stop_autoplay();
        self.tracker.cancel();
        self.core.set_interacting(false);
        self.core.inert.set(true);
        self.core.observers.borrow_mut().clear();
        debug!("carousel torn down");
    }

    // -------------------------------------------------------------------------
    // Autoplay timer
    // -------------------------------------------------------------------------

    fn stop_autoplay(&mut self) {
        if let Some(timer) = self.timer.take() {
            debug!("carousel autoplay stopped ({})", timer.id());
            timer.cancel();
        }
    }

    /// Cancel any live timer, then schedule a new one if autoplay applies.
    fn restart_autoplay(&mut self) {
        self.stop_autoplay();

        if self.core.inert.get() || !self.autoplay.enabled() || self.len() <= 1 {
            return;
        }

        let core = Rc::downgrade(&self.core);
        let timer = TimerHandle::interval(
            &self.scheduler,
            self.autoplay.delay(),
            Box::new(move || {
                if let Some(core) = core.upgrade() {
                    core.autoplay_tick();
                }
            }),
        );
        debug!(
            "carousel autoplay started ({}, every {}ms)",
            timer.id(),
            self.autoplay.delay().as_millis()
        );
        self.timer = Some(timer);
    }
}

fn warn_duplicate_ids(slides: &[Slide]) {
    let duplicates = duplicate_ids(slides);
    if !duplicates.is_empty() {
        warn!("carousel slides have duplicate ids: {}", duplicates.join(", "));
    }
}

impl std::fmt::Debug for CarouselController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CarouselController")
            .field("len", &self.len())
            .field("current_index", &self.current_index())
            .field("interacting", &self.is_interacting())
            .field("autoplay", &self.autoplay)
            .field("autoplay_state", &self.autoplay_state())
            .field("torn_down", &self.is_torn_down())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
