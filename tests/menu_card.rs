//! Menu card add-to-cart flow on a virtual clock.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use kantin_ui::config::UiConfig;
use kantin_ui::menu::{CardActions, MenuCardController, MenuItem};
use kantin_ui::timer::{Scheduler, VirtualClock};

#[derive(Default)]
struct Cart {
    items: RefCell<Vec<String>>,
}

impl CardActions for Cart {
    fn add_to_cart(&self, item_id: &str) {
        self.items.borrow_mut().push(item_id.to_string());
    }

    fn toggle_favorite(&self, _item_id: &str) {}
}

#[test]
fn cards_share_one_cart() {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = UiConfig::default();
    let clock = VirtualClock::new();
    let scheduler: Rc<dyn Scheduler> = Rc::new(clock.clone());
    let cart = Rc::new(Cart::default());

    let mut gudeg = MenuCardController::from_config(
        &config.menu_card,
        MenuItem::new("1", "Nasi Gudeg Spesial", 15000, "gudeg.jpg"),
        cart.clone(),
        scheduler.clone(),
    );
    let mut jus = MenuCardController::from_config(
        &config.menu_card,
        MenuItem::new("5", "Jus Alpukat", 8000, "jus.jpg"),
        cart.clone(),
        scheduler,
    );

    assert!(gudeg.add_to_cart());
    assert!(jus.add_to_cart());
    assert!(!gudeg.add_to_cart());
    assert_eq!(clock.active_timers(), 2);

    clock.advance(Duration::from_millis(600));
    assert!(gudeg.add_to_cart());

    assert_eq!(*cart.items.borrow(), vec!["1", "5", "1"]);
}
