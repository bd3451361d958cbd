//! The cart widget: keeps the page in step with the cart.
//!
//! [`CartWidget`] owns the [`CartStore`] together with the visibility state
//! of the cart panel and checkout modal. Every gesture goes through
//! [`CartWidget::handle`], which mutates state and then republishes the
//! whole cart to the [`Surface`] in a single pass. Rows are rebuilt from
//! scratch each time; there is no diffing.

use askama::Template;
use chrono::Datelike;
use pineapple_cart_core::{CartStore, Price, ProductId};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::catalog::Catalog;
use crate::config::WidgetConfig;
use crate::error::{Result, WidgetError};
use crate::event::UiEvent;
use crate::format::format_currency;
use crate::surface::Surface;
use crate::views::{CartItemsTemplate, CartView};
use crate::visibility::{CartPanel, CheckoutModal};

/// Result of a simulated checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutConfirmation {
    /// Subtotal captured before the cart was cleared.
    pub amount: Price,
    /// Text shown to the shopper.
    pub message: String,
}

impl CheckoutConfirmation {
    fn for_amount(amount: Price) -> Self {
        Self {
            amount,
            message: format!(
                "Order placed (demo). Amount: {}\nThank you!",
                format_currency(amount)
            ),
        }
    }
}

/// What handling an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// State changed and the surface was republished.
    Updated,
    /// The event referred to a row that no longer exists; nothing changed.
    Unchanged,
    /// The transition is not allowed right now; the surface was not
    /// republished (the shopper may have been notified).
    Blocked,
    /// Checkout completed; the cart is empty and both overlays are closed.
    CheckedOut(CheckoutConfirmation),
}

/// Cart state plus its projection onto the page.
#[derive(Debug, Clone)]
pub struct CartWidget {
    config: WidgetConfig,
    catalog: Catalog,
    cart: CartStore,
    panel: CartPanel,
    modal: CheckoutModal,
}

impl CartWidget {
    /// A widget with an empty cart and both overlays closed.
    #[must_use]
    pub fn new(config: WidgetConfig, catalog: Catalog) -> Self {
        Self {
            config,
            catalog,
            cart: CartStore::new(),
            panel: CartPanel::default(),
            modal: CheckoutModal::default(),
        }
    }

    /// A widget for the product cards found in `html`.
    #[must_use]
    pub fn from_markup(html: &str, config: WidgetConfig) -> Self {
        let catalog = Catalog::from_markup(html, &config);
        Self::new(config, catalog)
    }

    /// Like [`from_markup`](Self::from_markup), but every product card must
    /// be valid and unique.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Catalog` for the first rejected card.
    pub fn try_from_markup(html: &str, config: WidgetConfig) -> Result<Self> {
        let catalog = Catalog::try_from_markup(html, &config)?;
        Ok(Self::new(config, catalog))
    }

    /// Build a widget for `html` with configuration from the environment.
    ///
    /// With `strict`, invalid product cards fail the load instead of being
    /// skipped.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::Config` if the environment is invalid, or
    /// `WidgetError::Catalog` for a rejected card in strict mode.
    pub fn load(html: &str, strict: bool) -> Result<Self> {
        let config = WidgetConfig::from_env()?;
        Self::assemble(html, config, strict)
    }

    /// [`load`](Self::load) through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_with(
        html: &str,
        strict: bool,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self> {
        let config = WidgetConfig::from_lookup(lookup)?;
        Self::assemble(html, config, strict)
    }

    fn assemble(html: &str, config: WidgetConfig, strict: bool) -> Result<Self> {
        if strict {
            Self::try_from_markup(html, config)
        } else {
            Ok(Self::from_markup(html, config))
        }
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn config(&self) -> &WidgetConfig {
        &self.config
    }

    #[must_use]
    pub const fn panel(&self) -> CartPanel {
        self.panel
    }

    #[must_use]
    pub const fn modal(&self) -> CheckoutModal {
        self.modal
    }

    /// Stamp the footer year and publish the initial (empty) cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart rows fail to render.
    pub fn mount<S: Surface>(&self, surface: &mut S) -> Result<()> {
        surface.set_year(chrono::Utc::now().year());
        self.render(surface)
    }

    /// Parse a textual command and handle it.
    ///
    /// # Errors
    ///
    /// Returns an error if the command does not parse or handling fails.
    pub fn dispatch<S: Surface>(&mut self, command: &str, surface: &mut S) -> Result<Outcome> {
        let event: UiEvent = command.parse()?;
        self.handle(&event, surface)
    }

    /// Apply one UI event and republish.
    ///
    /// # Errors
    ///
    /// Returns `WidgetError::UnknownProduct` when adding a product the page
    /// does not offer (state is left untouched), or a render error.
    #[instrument(skip(self, event, surface), fields(event = %event))]
    pub fn handle<S: Surface>(&mut self, event: &UiEvent, surface: &mut S) -> Result<Outcome> {
        match event {
            UiEvent::AddToCart(id) => self.add_to_cart(id)?,
            UiEvent::Increment(id) => {
                if self.cart.increment(id).is_none() {
                    return Ok(Self::stale_row(id));
                }
            }
            UiEvent::Decrement(id) => {
                if self.cart.decrement(id).is_none() {
                    return Ok(Self::stale_row(id));
                }
            }
            UiEvent::Remove(id) => {
                if self.cart.remove(id).is_none() {
                    return Ok(Self::stale_row(id));
                }
            }
            UiEvent::ToggleCart => self.panel = self.panel.toggled(),
            UiEvent::CloseCart => self.panel = CartPanel::Closed,
            UiEvent::ClearCart => self.cart.clear(),
            UiEvent::OpenCheckout => {
                if self.cart.is_empty() {
                    warn!("Checkout blocked: cart is empty");
                    surface.notify(&self.config.empty_message);
                    return Ok(Outcome::Blocked);
                }
                self.modal = CheckoutModal::Visible;
            }
            UiEvent::CloseCheckout => self.modal = CheckoutModal::Hidden,
            UiEvent::SubmitCheckout => return self.submit_checkout(surface),
        }

        self.render(surface)?;
        Ok(Outcome::Updated)
    }

    fn stale_row(id: &ProductId) -> Outcome {
        debug!(product_id = %id, "Ignoring control for a line not in the cart");
        Outcome::Unchanged
    }

    fn add_to_cart(&mut self, id: &ProductId) -> Result<()> {
        let product = self
            .catalog
            .get(id)
            .ok_or_else(|| WidgetError::UnknownProduct(id.clone()))?;
        let quantity = self.cart.add_product(product);
        debug!(product_id = %id, quantity, "Added to cart");
        self.panel = CartPanel::Open;
        Ok(())
    }

    /// Capture the subtotal, empty the cart and close both overlays, then
    /// publish once so no repaint shows a cleared cart beside stale totals.
    /// Only the open checkout form can submit; an emptied cart confirms
    /// `$0.00`.
    fn submit_checkout<S: Surface>(&mut self, surface: &mut S) -> Result<Outcome> {
        if !self.modal.is_visible() {
            warn!("Checkout submit ignored: checkout is not open");
            return Ok(Outcome::Blocked);
        }

        let confirmation = CheckoutConfirmation::for_amount(self.cart.subtotal());
        info!(
            amount = %confirmation.amount,
            lines = self.cart.len(),
            "Checkout submitted"
        );

        self.cart.clear();
        self.panel = CartPanel::Closed;
        self.modal = CheckoutModal::Hidden;

        let markup = self.render_items()?;
        surface.notify(&confirmation.message);
        self.publish(surface, &markup);

        Ok(Outcome::CheckedOut(confirmation))
    }

    /// Render the cart rows, or the empty-state message.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render_items(&self) -> Result<String> {
        let cart = CartView::from_store(&self.cart, &self.config.empty_message);
        Ok(CartItemsTemplate { cart }.render()?)
    }

    /// Rebuild the rows and republish every derived display.
    ///
    /// Nothing is written to the surface if rendering fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to render.
    pub fn render<S: Surface>(&self, surface: &mut S) -> Result<()> {
        let markup = self.render_items()?;
        self.publish(surface, &markup);
        Ok(())
    }

    fn publish<S: Surface>(&self, surface: &mut S, markup: &str) {
        let subtotal = format_currency(self.cart.subtotal());
        surface.set_cart_items(markup);
        surface.set_cart_count(self.cart.total_quantity());
        surface.set_subtotal(&subtotal);
        surface.set_checkout_amount(&subtotal);
        surface.set_cart_panel(self.panel);
        surface.set_checkout_modal(self.modal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogError;
    use crate::config::ConfigError;
    use crate::surface::PageSurface;

    const PAGE: &str = r#"
        <article class="product-card" data-id="a" data-name="Product A" data-price="9.99">
          <img src="/img/a.jpg" />
        </article>
        <article class="product-card" data-id="b" data-name="Product B" data-price="5.00"></article>
        <article class="product-card" data-id="x" data-name="&lt;script&gt;x&lt;/script&gt;" data-price="1"></article>
    "#;

    fn id(s: &str) -> ProductId {
        ProductId::parse(s).unwrap()
    }

    fn mounted() -> (CartWidget, PageSurface) {
        let widget = CartWidget::from_markup(PAGE, WidgetConfig::default());
        let mut surface = PageSurface::new();
        widget.mount(&mut surface).unwrap();
        (widget, surface)
    }

    /// Records every call so tests can check publish ordering.
    #[derive(Default)]
    struct RecordingSurface {
        calls: Vec<String>,
    }

    impl Surface for RecordingSurface {
        fn set_cart_count(&mut self, count: u64) {
            self.calls.push(format!("count:{count}"));
        }
        fn set_subtotal(&mut self, text: &str) {
            self.calls.push(format!("subtotal:{text}"));
        }
        fn set_checkout_amount(&mut self, text: &str) {
            self.calls.push(format!("amount:{text}"));
        }
        fn set_cart_items(&mut self, _markup: &str) {
            self.calls.push("items".to_string());
        }
        fn set_cart_panel(&mut self, panel: CartPanel) {
            self.calls.push(format!("panel:{panel:?}"));
        }
        fn set_checkout_modal(&mut self, modal: CheckoutModal) {
            self.calls.push(format!("modal:{modal:?}"));
        }
        fn set_year(&mut self, year: i32) {
            self.calls.push(format!("year:{year}"));
        }
        fn notify(&mut self, message: &str) {
            self.calls.push(format!("notify:{message}"));
        }
    }

    #[test]
    fn test_mount_publishes_empty_cart_and_year() {
        let (_, surface) = mounted();
        assert!(surface.year.is_some());
        assert_eq!(surface.cart_count, 0);
        assert_eq!(surface.subtotal, "$0.00");
        assert!(surface.cart_items.contains("Your cart is empty."));
    }

    #[test]
    fn test_add_twice_updates_totals_and_opens_panel() {
        let (mut widget, mut surface) = mounted();
        widget.handle(&UiEvent::AddToCart(id("a")), &mut surface).unwrap();
        widget.handle(&UiEvent::AddToCart(id("a")), &mut surface).unwrap();

        assert_eq!(widget.cart().total_quantity(), 2);
        assert_eq!(widget.cart().len(), 1);
        assert_eq!(surface.cart_count, 2);
        assert_eq!(surface.subtotal, "$19.98");
        assert_eq!(surface.checkout_amount, surface.subtotal);
        assert!(surface.cart_panel.is_open());
    }

    #[test]
    fn test_add_always_opens_panel() {
        let (mut widget, mut surface) = mounted();
        widget.handle(&UiEvent::AddToCart(id("a")), &mut surface).unwrap();
        widget.handle(&UiEvent::AddToCart(id("b")), &mut surface).unwrap();
        assert_eq!(widget.panel(), CartPanel::Open);
    }

    #[test]
    fn test_add_unknown_product_leaves_state_untouched() {
        let (mut widget, mut surface) = mounted();
        let before = surface.clone();

        let err = widget
            .handle(&UiEvent::AddToCart(id("ghost")), &mut surface)
            .unwrap_err();
        assert!(matches!(err, WidgetError::UnknownProduct(ref p) if p.as_str() == "ghost"));
        assert!(widget.cart().is_empty());
        assert_eq!(widget.panel(), CartPanel::Closed);
        assert_eq!(surface, before);
    }

    #[test]
    fn test_row_controls() {
        let (mut widget, mut surface) = mounted();
        widget.handle(&UiEvent::AddToCart(id("b")), &mut surface).unwrap();
        widget.handle(&UiEvent::Increment(id("b")), &mut surface).unwrap();
        assert_eq!(surface.subtotal, "$10.00");

        widget.handle(&UiEvent::Decrement(id("b")), &mut surface).unwrap();
        widget.handle(&UiEvent::Decrement(id("b")), &mut surface).unwrap();
        assert_eq!(widget.cart().get(&id("b")).map(|l| l.quantity), Some(1));
        assert_eq!(surface.cart_count, 1);

        widget.handle(&UiEvent::Remove(id("b")), &mut surface).unwrap();
        assert!(widget.cart().is_empty());
        assert!(surface.cart_items.contains("Your cart is empty."));
    }

    #[test]
    fn test_stale_row_control_is_noop() {
        let (mut widget, mut surface) = mounted();
        let outcome = widget
            .handle(&UiEvent::Increment(id("a")), &mut surface)
            .unwrap();
        assert_eq!(outcome, Outcome::Unchanged);
        assert!(widget.cart().is_empty());
    }

    #[test]
    fn test_panel_toggle_and_close() {
        let (mut widget, mut surface) = mounted();
        widget.handle(&UiEvent::ToggleCart, &mut surface).unwrap();
        assert!(surface.cart_panel.is_open());
        widget.handle(&UiEvent::ToggleCart, &mut surface).unwrap();
        assert!(!surface.cart_panel.is_open());

        widget.handle(&UiEvent::ToggleCart, &mut surface).unwrap();
        widget.handle(&UiEvent::CloseCart, &mut surface).unwrap();
        assert_eq!(widget.panel(), CartPanel::Closed);
        widget.handle(&UiEvent::CloseCart, &mut surface).unwrap();
        assert_eq!(widget.panel(), CartPanel::Closed);
    }

    #[test]
    fn test_checkout_blocked_when_empty() {
        let (mut widget, mut surface) = mounted();
        let outcome = widget.handle(&UiEvent::OpenCheckout, &mut surface).unwrap();

        assert_eq!(outcome, Outcome::Blocked);
        assert_eq!(widget.modal(), CheckoutModal::Hidden);
        assert_eq!(surface.checkout_modal, CheckoutModal::Hidden);
        assert_eq!(surface.last_notification(), Some("Your cart is empty."));
    }

    #[test]
    fn test_checkout_modal_independent_of_panel() {
        let (mut widget, mut surface) = mounted();
        widget.handle(&UiEvent::AddToCart(id("a")), &mut surface).unwrap();
        widget.handle(&UiEvent::OpenCheckout, &mut surface).unwrap();
        widget.handle(&UiEvent::CloseCart, &mut surface).unwrap();
        assert_eq!(widget.modal(), CheckoutModal::Visible);

        widget.handle(&UiEvent::ToggleCart, &mut surface).unwrap();
        widget.handle(&UiEvent::CloseCheckout, &mut surface).unwrap();
        assert_eq!(widget.modal(), CheckoutModal::Hidden);
        assert_eq!(widget.panel(), CartPanel::Open);
    }

    #[test]
    fn test_submit_checkout_resets_everything() {
        let (mut widget, mut surface) = mounted();
        for _ in 0..3 {
            widget.handle(&UiEvent::AddToCart(id("b")), &mut surface).unwrap();
        }
        widget.handle(&UiEvent::OpenCheckout, &mut surface).unwrap();
        assert_eq!(surface.checkout_amount, "$15.00");

        let outcome = widget.handle(&UiEvent::SubmitCheckout, &mut surface).unwrap();
        let Outcome::CheckedOut(confirmation) = outcome.clone() else {
            panic!("expected checkout, got {outcome:?}");
        };
        assert_eq!(confirmation.amount, Price::from_cents(1_500));
        assert_eq!(
            confirmation.message,
            "Order placed (demo). Amount: $15.00\nThank you!"
        );

        assert!(widget.cart().is_empty());
        assert_eq!(widget.panel(), CartPanel::Closed);
        assert_eq!(widget.modal(), CheckoutModal::Hidden);
        assert_eq!(surface.cart_count, 0);
        assert_eq!(surface.subtotal, "$0.00");
        assert_eq!(surface.last_notification(), Some(confirmation.message.as_str()));
    }

    #[test]
    fn test_submit_checkout_publishes_once() {
        let mut widget = CartWidget::from_markup(PAGE, WidgetConfig::default());
        let mut surface = RecordingSurface::default();
        widget.handle(&UiEvent::AddToCart(id("a")), &mut surface).unwrap();
        widget.handle(&UiEvent::OpenCheckout, &mut surface).unwrap();
        surface.calls.clear();

        widget.handle(&UiEvent::SubmitCheckout, &mut surface).unwrap();
        assert_eq!(
            surface.calls,
            [
                "notify:Order placed (demo). Amount: $9.99\nThank you!",
                "items",
                "count:0",
                "subtotal:$0.00",
                "amount:$0.00",
                "panel:Closed",
                "modal:Hidden",
            ]
        );
    }

    #[test]
    fn test_submit_without_open_checkout_is_blocked() {
        let (mut widget, mut surface) = mounted();
        widget.handle(&UiEvent::AddToCart(id("a")), &mut surface).unwrap();

        let outcome = widget.handle(&UiEvent::SubmitCheckout, &mut surface).unwrap();
        assert_eq!(outcome, Outcome::Blocked);
        assert_eq!(widget.cart().total_quantity(), 1);
    }

    #[test]
    fn test_submit_after_clearing_in_open_checkout_confirms_zero() {
        let (mut widget, mut surface) = mounted();
        widget.handle(&UiEvent::AddToCart(id("a")), &mut surface).unwrap();
        widget.handle(&UiEvent::OpenCheckout, &mut surface).unwrap();
        widget.handle(&UiEvent::ClearCart, &mut surface).unwrap();

        let outcome = widget.handle(&UiEvent::SubmitCheckout, &mut surface).unwrap();
        let Outcome::CheckedOut(confirmation) = outcome else {
            panic!("submit from the open checkout should complete");
        };
        assert_eq!(confirmation.amount, Price::ZERO);
        assert_eq!(
            surface.last_notification(),
            Some("Order placed (demo). Amount: $0.00\nThank you!")
        );
        assert_eq!(widget.panel(), CartPanel::Closed);
        assert_eq!(widget.modal(), CheckoutModal::Hidden);
        assert_eq!(surface.checkout_modal, CheckoutModal::Hidden);
        assert_eq!(surface.cart_panel, CartPanel::Closed);
    }

    #[test]
    fn test_strict_load_reports_catalog_errors() {
        let no_env = |_: &str| None;
        assert!(matches!(
            CartWidget::try_from_markup(PAGE, WidgetConfig::default()),
            Ok(ref widget) if widget.catalog().len() == 3
        ));

        let broken = r#"<article class="product-card" data-id="z" data-name="Z" data-price="free"></article>"#;
        assert!(matches!(
            CartWidget::load_with(broken, true, no_env),
            Err(WidgetError::Catalog(CatalogError::InvalidPrice { .. }))
        ));
        assert!(matches!(
            CartWidget::load_with(broken, false, no_env),
            Ok(ref widget) if widget.catalog().is_empty()
        ));
    }

    #[test]
    fn test_load_reports_config_errors() {
        let result = CartWidget::load_with(PAGE, false, |key| {
            (key == "CART_EMPTY_MESSAGE").then(|| "   ".to_string())
        });
        assert!(matches!(
            result,
            Err(WidgetError::Config(ConfigError::InvalidEnvVar(ref key, _)))
                if key == "CART_EMPTY_MESSAGE"
        ));

        let widget = CartWidget::load_with(PAGE, false, |key| {
            (key == "CART_EMPTY_MESSAGE").then(|| "Nothing here yet.".to_string())
        })
        .unwrap();
        assert_eq!(widget.config().empty_message, "Nothing here yet.");
    }

    #[test]
    fn test_rendered_rows_escape_catalog_names() {
        let (mut widget, mut surface) = mounted();
        widget.handle(&UiEvent::AddToCart(id("x")), &mut surface).unwrap();

        assert!(!surface.cart_items.contains("<script>"));
        assert!(surface.cart_items.contains("&lt;script&gt;x&lt;/script&gt;"));
    }

    #[test]
    fn test_dispatch_parses_commands() {
        let (mut widget, mut surface) = mounted();
        assert_eq!(
            widget.dispatch("add a", &mut surface).unwrap(),
            Outcome::Updated
        );
        assert!(matches!(
            widget.dispatch("frobnicate", &mut surface),
            Err(WidgetError::Command(_))
        ));
    }
}
