//! In-memory cart state.
//!
//! [`CartStore`] owns the mapping of product id to [`LineItem`] and is the
//! only way to change it. Lines keep the order in which they were first
//! added, which is also the order they are rendered in.

use serde::Serialize;
use tracing::debug;

use crate::types::{LineItem, Price, Product, ProductId};

/// Insertion-ordered cart contents keyed by product id.
///
/// Invariants upheld by every operation:
/// - at most one line per id
/// - every line has `quantity >= 1`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartStore {
    lines: Vec<LineItem>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    fn position(&self, id: &ProductId) -> Option<usize> {
        self.lines.iter().position(|line| &line.id == id)
    }

    fn line_mut(&mut self, id: &ProductId) -> Option<&mut LineItem> {
        self.lines.iter_mut().find(|line| &line.id == id)
    }

    /// Add a product, or bump its quantity if it is already in the cart.
    ///
    /// The name, price and image of an existing line are left as first
    /// captured. Returns the line's quantity after the call.
    pub fn add_or_increment(
        &mut self,
        id: ProductId,
        name: impl Into<String>,
        price: Price,
        image_ref: impl Into<String>,
    ) -> u32 {
        if let Some(line) = self.line_mut(&id) {
            line.quantity = line.quantity.saturating_add(1);
            debug!(product_id = %line.id, quantity = line.quantity, "Incremented cart line");
            return line.quantity;
        }

        debug!(product_id = %id, "Added cart line");
        self.lines
            .push(LineItem::new(id, name.into(), price, image_ref.into()));
        1
    }

    /// [`add_or_increment`](Self::add_or_increment) for a catalog product.
    pub fn add_product(&mut self, product: &Product) -> u32 {
        self.add_or_increment(
            product.id.clone(),
            product.name.as_str(),
            product.price,
            product.image_ref.as_str(),
        )
    }

    /// Increase a line's quantity by one.
    ///
    /// Returns the new quantity, or `None` if the id is not in the cart.
    pub fn increment(&mut self, id: &ProductId) -> Option<u32> {
        let line = self.line_mut(id)?;
        line.quantity = line.quantity.saturating_add(1);
        debug!(product_id = %id, quantity = line.quantity, "Incremented cart line");
        Some(line.quantity)
    }

    /// Decrease a line's quantity by one, never below 1.
    ///
    /// A line at quantity 1 is left in place; use [`remove`](Self::remove)
    /// to drop it. Returns the new quantity, or `None` if the id is not in
    /// the cart.
    pub fn decrement(&mut self, id: &ProductId) -> Option<u32> {
        let line = self.line_mut(id)?;
        line.quantity = line.quantity.saturating_sub(1).max(1);
        debug!(product_id = %id, quantity = line.quantity, "Decremented cart line");
        Some(line.quantity)
    }

    /// Delete a line entirely, returning it if it existed.
    pub fn remove(&mut self, id: &ProductId) -> Option<LineItem> {
        let index = self.position(id)?;
        debug!(product_id = %id, "Removed cart line");
        Some(self.lines.remove(index))
    }

    /// Empty the cart.
    pub fn clear(&mut self) {
        debug!(lines = self.lines.len(), "Cleared cart");
        self.lines.clear();
    }

    /// Sum of all quantities; 0 for an empty cart.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of `price * quantity` over all lines; zero for an empty cart.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines.iter().map(LineItem::line_total).sum()
    }

    /// Snapshot of the current lines in insertion order.
    #[must_use]
    pub fn items(&self) -> Vec<LineItem> {
        self.lines.clone()
    }

    /// Borrowing view of the current lines in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &LineItem> {
        self.lines.iter()
    }

    /// Look up a single line.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&LineItem> {
        self.lines.iter().find(|line| &line.id == id)
    }

    /// Returns `true` if the id has a line in the cart.
    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.position(id).is_some()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
