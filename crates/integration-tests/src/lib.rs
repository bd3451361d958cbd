//! Integration tests for the Pineapple cart widget.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p pineapple-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_scenarios` - End-to-end shopper sessions against the demo page
//! - `page_rendering` - Full page output and markup safety

use pineapple_cart_core::ProductId;
use pineapple_cart_storefront::{CartWidget, PageSurface, WidgetConfig};

/// The demo product page shipped with the storefront crate.
pub const DEMO_PAGE: &str = include_str!("../../storefront/static/index.html");

/// A mounted widget over [`DEMO_PAGE`] and the surface it publishes to.
pub struct TestContext {
    pub widget: CartWidget,
    pub surface: PageSurface,
}

impl TestContext {
    /// Mount a widget over `html` with default configuration.
    ///
    /// # Panics
    ///
    /// Panics if the initial render fails.
    #[must_use]
    pub fn with_page(html: &str) -> Self {
        let widget = CartWidget::from_markup(html, WidgetConfig::default());
        let mut surface = PageSurface::new();
        widget.mount(&mut surface).expect("initial render");
        Self { widget, surface }
    }

    /// Mount a widget over the demo page.
    #[must_use]
    pub fn demo() -> Self {
        Self::with_page(DEMO_PAGE)
    }

    /// Run a sequence of textual commands, panicking on the first error.
    ///
    /// # Panics
    ///
    /// Panics if any command fails.
    pub fn run(&mut self, commands: &[&str]) {
        for command in commands {
            self.widget
                .dispatch(command, &mut self.surface)
                .expect("command should succeed");
        }
    }
}

/// Parse a product id, panicking on invalid input.
///
/// # Panics
///
/// Panics if `s` is blank.
#[must_use]
pub fn pid(s: &str) -> ProductId {
    ProductId::parse(s).expect("valid product id")
}
