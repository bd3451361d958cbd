//! Askama views for the cart list and the product page.
//!
//! Catalog strings are carried raw in the view structs and escaped in the
//! templates through the `display_escape` filter.

use askama::Template;
use pineapple_cart_core::{CartStore, LineItem, Product};

use crate::catalog::Catalog;
use crate::filters;
use crate::format::format_currency;
use crate::surface::PageSurface;

/// Cart row display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemView {
    pub id: String,
    pub name: String,
    pub price: String,
    pub quantity: u32,
    pub image: String,
}

/// Cart display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u64,
    pub empty_message: String,
}

impl CartView {
    /// Snapshot the store for rendering.
    #[must_use]
    pub fn from_store(cart: &CartStore, empty_message: &str) -> Self {
        Self {
            items: cart.items().iter().map(CartItemView::from).collect(),
            subtotal: format_currency(cart.subtotal()),
            item_count: cart.total_quantity(),
            empty_message: empty_message.to_string(),
        }
    }
}

impl From<&LineItem> for CartItemView {
    fn from(line: &LineItem) -> Self {
        Self {
            id: line.id.to_string(),
            name: line.name.clone(),
            price: format_currency(line.price),
            quantity: line.quantity,
            image: line.image_ref.clone(),
        }
    }
}

/// Product card display data for templates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductView {
    pub id: String,
    pub name: String,
    /// Formatted for display, e.g. `$9.99`.
    pub price: String,
    /// Plain decimal for the `data-price` attribute.
    pub price_attr: String,
    pub image: String,
}

impl From<&Product> for ProductView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: format_currency(product.price),
            price_attr: product.price.amount().to_string(),
            image: product.image_ref.clone(),
        }
    }
}

/// Cart rows fragment, or the empty-state message.
#[derive(Template)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// The whole product page with the cart panel and checkout modal.
#[derive(Template)]
#[template(path = "page.html")]
pub struct PageTemplate<'a> {
    pub title: &'a str,
    pub products: Vec<ProductView>,
    pub state: &'a PageSurface,
}

/// Render the product page from a catalog and the latest published state.
///
/// # Errors
///
/// Returns an error if the template fails to render.
pub fn render_page(title: &str, catalog: &Catalog, state: &PageSurface) -> askama::Result<String> {
    PageTemplate {
        title,
        products: catalog.products().iter().map(ProductView::from).collect(),
        state,
    }
    .render()
}
