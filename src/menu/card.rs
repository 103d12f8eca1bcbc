//! Menu Card - Add-to-cart button state
//!
//! Pressing "add" marks the card as adding for a short feedback window,
//! during which further presses are ignored. The reset is a one-shot timer
//! owned by the card and cancelled when the card goes away.

use std::rc::Rc;
use std::time::Duration;

use log::{debug, trace};
use spark_signals::{signal, Signal};

use super::{format_rupiah, MenuItem};
use crate::config::MenuCardConfig;
use crate::timer::{Scheduler, TimerHandle};

/// Length of the "adding" state after a press.
pub const DEFAULT_ADD_FEEDBACK: Duration = Duration::from_millis(600);

/// Tags shown on a card.
const MAX_VISIBLE_TAGS: usize = 2;

/// Receives card actions (the page's cart and favorites).
pub trait CardActions {
    fn add_to_cart(&self, item_id: &str);

    fn toggle_favorite(&self, item_id: &str);
}

pub struct MenuCardController {
    item: MenuItem,
    actions: Rc<dyn CardActions>,
    scheduler: Rc<dyn Scheduler>,
    feedback: Duration,
    adding: Signal<bool>,
    favorite: Signal<bool>,
    reset_timer: Option<TimerHandle>,
}

impl MenuCardController {
    pub fn new(item: MenuItem, actions: Rc<dyn CardActions>, scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            item,
            actions,
            scheduler,
            feedback: DEFAULT_ADD_FEEDBACK,
            adding: signal(false),
            favorite: signal(false),
            reset_timer: None,
        }
    }

    pub fn from_config(
        config: &MenuCardConfig,
        item: MenuItem,
        actions: Rc<dyn CardActions>,
        scheduler: Rc<dyn Scheduler>,
    ) -> Self {
        let mut card = Self::new(item, actions, scheduler);
        if !config.add_feedback().is_zero() {
            card.feedback = config.add_feedback();
        }
        card
    }

    /// Initial heart state, as known by the page.
    pub fn with_favorite(self, favorite: bool) -> Self {
        self.favorite.set(favorite);
        self
    }

    pub fn item(&self) -> &MenuItem {
        &self.item
    }

    pub fn is_adding(&self) -> bool {
        self.adding.get()
    }

    pub fn adding_signal(&self) -> Signal<bool> {
        self.adding.clone()
    }

    /// Whether the add button is enabled.
    pub fn can_add(&self) -> bool {
        self.item.in_stock && !self.is_adding()
    }

    /// Press the add button.
    ///
    /// Ignored when out of stock or while the previous press is still
    /// showing feedback.
    pub fn add_to_cart(&mut self) -> bool {
        if !self.can_add() {
            trace!("add to cart ignored for item {}", self.item.id);
            return false;
        }

        self.adding.set(true);
        self.actions.add_to_cart(&self.item.id);

        let adding = self.adding.clone();
        self.reset_timer = Some(TimerHandle::timeout(
            &self.scheduler,
            self.feedback,
            Box::new(move || {
                adding.set(false);
            }),
        ));
        debug!("item {} added to cart", self.item.id);
        true
    }

    pub fn is_favorite(&self) -> bool {
        self.favorite.get()
    }

    pub fn favorite_signal(&self) -> Signal<bool> {
        self.favorite.clone()
    }

    /// Sync the heart with the page's favorites list.
    pub fn set_favorite(&self, favorite: bool) {
        self.favorite.set(favorite);
    }

    /// Flip the heart and tell the page.
    pub fn toggle_favorite(&self) {
        self.favorite.set(!self.favorite.get());
        self.actions.toggle_favorite(&self.item.id);
    }

    pub fn visible_tags(&self) -> &[String] {
        let count = self.item.tags.len().min(MAX_VISIBLE_TAGS);
        &self.item.tags[..count]
    }

    pub fn price_label(&self) -> String {
        format_rupiah(self.item.price)
    }

    /// Rating with one decimal, e.g. `4.8`.
    pub fn rating_label(&self) -> Option<String> {
        self.item.rating.map(|rating| format!("{rating:.1}"))
    }

    /// Cancel the pending reset and clear the adding flag.
    pub fn teardown(&mut self) {
        if let Some(timer) = self.reset_timer.take() {
            timer.cancel();
        }
        self.adding.set(false);
    }
}

impl std::fmt::Debug for MenuCardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MenuCardController")
            .field("item", &self.item.id)
            .field("adding", &self.is_adding())
            .field("favorite", &self.is_favorite())
            .field("feedback", &self.feedback)
            .finish()
    }
}
