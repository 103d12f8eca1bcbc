//! # kantin-ui
//!
//! Reactive presentation controllers for a school-canteen ordering app.
//!
//! Built on [spark-signals](https://github.com/RLabs-Inc/spark-signals) for
//! observable state. Rendering is left to the host: controllers expose
//! signals and observer callbacks, and take every timer from a
//! [`timer::Scheduler`] so they run the same on a wall clock or a virtual
//! one.
//!
//! ## Modules
//!
//! - [`carousel`] - Hero carousel: wrap-around navigation, autoplay, swipes
//! - [`menu`] - Menu items and the card add-to-cart flow
//! - [`timer`] - Scheduler trait, scoped timer handles, virtual/realtime clocks
//! - [`config`] - TOML configuration
//! - [`error`] - Configuration errors

pub mod carousel;
pub mod config;
pub mod error;
pub mod menu;
pub mod timer;

pub use carousel::{
    classify_drag, duplicate_ids, AutoplayConfig, AutoplayState, CarouselController, Chrome, DragOutcome, DragTracker,
    IndexChange, NavigationCause, NavigationObserver, Slide,
};

pub use menu::{format_rupiah, CardActions, MenuCardController, MenuItem};

pub use timer::{RealtimeClock, Scheduler, TimerHandle, TimerId, VirtualClock};

pub use config::{CarouselConfig, MenuCardConfig, UiConfig};

pub use error::{ConfigError, Result};
