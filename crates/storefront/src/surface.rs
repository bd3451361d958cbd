//! The page-side collaborator that receives the widget's output.
//!
//! In the browser this is the DOM: text nodes for the count and totals, the
//! cart list container, attributes on the panel and modal, and `alert()`.
//! [`PageSurface`] keeps the latest published values in memory so the page
//! can be re-rendered from them and tests can inspect them.

use serde::Serialize;

use crate::visibility::{CartPanel, CheckoutModal};

/// Everything the widget writes to the page.
pub trait Surface {
    /// Total quantity shown on the cart badge.
    fn set_cart_count(&mut self, count: u64);

    /// Subtotal text in the cart panel.
    fn set_subtotal(&mut self, text: &str);

    /// Amount text inside the checkout modal.
    fn set_checkout_amount(&mut self, text: &str);

    /// Replace the cart list contents with `markup`.
    fn set_cart_items(&mut self, markup: &str);

    fn set_cart_panel(&mut self, panel: CartPanel);

    fn set_checkout_modal(&mut self, modal: CheckoutModal);

    /// Footer year, written once at mount.
    fn set_year(&mut self, year: i32);

    /// Blocking notification shown to the shopper.
    fn notify(&mut self, message: &str);
}

/// In-memory surface holding the most recently published values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PageSurface {
    pub cart_count: u64,
    pub subtotal: String,
    pub checkout_amount: String,
    pub cart_items: String,
    pub cart_panel: CartPanel,
    pub checkout_modal: CheckoutModal,
    pub year: Option<i32>,
    /// Every notification shown so far, oldest first.
    pub notifications: Vec<String>,
}

impl PageSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent notification, if any.
    #[must_use]
    pub fn last_notification(&self) -> Option<&str> {
        self.notifications.last().map(String::as_str)
    }
}

impl Surface for PageSurface {
    fn set_cart_count(&mut self, count: u64) {
        self.cart_count = count;
    }

    fn set_subtotal(&mut self, text: &str) {
        text.clone_into(&mut self.subtotal);
    }

    fn set_checkout_amount(&mut self, text: &str) {
        text.clone_into(&mut self.checkout_amount);
    }

    fn set_cart_items(&mut self, markup: &str) {
        markup.clone_into(&mut self.cart_items);
    }

    fn set_cart_panel(&mut self, panel: CartPanel) {
        self.cart_panel = panel;
    }

    fn set_checkout_modal(&mut self, modal: CheckoutModal) {
        self.checkout_modal = modal;
    }

    fn set_year(&mut self, year: i32) {
        self.year = Some(year);
    }

    fn notify(&mut self, message: &str) {
        self.notifications.push(message.to_string());
    }
}
