//! Products offered on the page and the cart lines built from them.

use serde::{Deserialize, Serialize};

use super::{Price, ProductId};

/// A product as advertised by the page, ready to be added to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    /// Image URL; already resolved to the placeholder if the card had none.
    pub image_ref: String,
}

/// One row in the cart.
///
/// `quantity` is at least 1 for every line held by a
/// [`CartStore`](crate::CartStore).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub id: ProductId,
    pub name: String,
    /// Unit price captured when the line was created.
    pub price: Price,
    pub quantity: u32,
    pub image_ref: String,
}

impl LineItem {
    /// A fresh line with quantity 1.
    #[must_use]
    pub const fn new(id: ProductId, name: String, price: Price, image_ref: String) -> Self {
        Self {
            id,
            name,
            price,
            quantity: 1,
            image_ref,
        }
    }

    /// `price * quantity`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.quantity)
    }
}

impl From<Product> for LineItem {
    fn from(product: Product) -> Self {
        Self::new(product.id, product.name, product.price, product.image_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_from_product_starts_at_one() {
        let product = Product {
            id: ProductId::parse("p1").unwrap(),
            name: "Tee".to_string(),
            price: Price::from_cents(1_250),
            image_ref: "tee.jpg".to_string(),
        };
        let line = LineItem::from(product);
        assert_eq!(line.quantity, 1);
        assert_eq!(line.line_total(), Price::from_cents(1_250));
    }

    #[test]
    fn test_line_total() {
        let mut line = LineItem::new(
            ProductId::parse("p2").unwrap(),
            "Mug".to_string(),
            Price::from_cents(500),
            String::new(),
        );
        line.quantity = 3;
        assert_eq!(line.line_total().display(), "$15.00");
    }
}
