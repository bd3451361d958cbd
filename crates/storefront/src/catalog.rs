//! Products read from the page markup.
//!
//! The static product page declares each product as an element with class
//! `product-card` and `data-id`, `data-name` and `data-price` attributes,
//! optionally wrapping an `<img src>`. Those attributes are untyped input;
//! this module turns them into [`Product`]s, rejecting cards that do not
//! carry a usable id, name or price.
//!
//! Attribute values may be double- or single-quoted. Unquoted values are
//! not recognised. A card's image is searched for only between its opening
//! tag and the matching closing tag.

use std::sync::LazyLock;

use pineapple_cart_core::{Price, PriceError, Product, ProductId, ProductIdError};
use regex::{Captures, Regex};
use thiserror::Error;
use tracing::warn;

use crate::config::WidgetConfig;
use crate::format::decode_entities;

/// Opening tag of any element whose class list contains `product-card`.
static CARD_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<([a-zA-Z][\w-]*)\s([^>]*\bclass\s*=\s*(?:"[^"]*\bproduct-card\b[^"]*"|'[^']*\bproduct-card\b[^']*')[^>]*)>"#,
    )
    .expect("Invalid regex")
});

/// Regex for extracting key="value" and key='value' attributes.
static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([\w-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("Invalid regex")
});

/// First `<img>` with a `src` attribute.
static IMG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<img\b[^>]*\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("Invalid regex")
});

/// Any opening, closing or self-closing tag.
static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<(/?)([a-zA-Z][\w-]*)\b[^>]*?(/?)>").expect("Invalid regex"));

/// Errors turning a product card into a [`Product`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CatalogError {
    #[error("product card is missing the {0} attribute")]
    MissingAttribute(&'static str),

    #[error("product card has an invalid id: {0}")]
    InvalidId(#[from] ProductIdError),

    #[error("product {id} has an invalid price: {source}")]
    InvalidPrice { id: String, source: PriceError },

    #[error("product {0} appears more than once")]
    DuplicateId(ProductId),
}

/// Raw attributes of one product card, as found in the markup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCard {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
}

impl ProductCard {
    /// Validate the card.
    ///
    /// A missing or empty image falls back to `placeholder_image`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the id, name or price is missing or invalid.
    pub fn into_product(self, placeholder_image: &str) -> Result<Product, CatalogError> {
        let raw_id = self.id.ok_or(CatalogError::MissingAttribute("data-id"))?;
        let id = ProductId::parse(&raw_id)?;
        let name = self
            .name
            .filter(|name| !name.trim().is_empty())
            .ok_or(CatalogError::MissingAttribute("data-name"))?;
        let raw_price = self
            .price
            .ok_or(CatalogError::MissingAttribute("data-price"))?;
        let price = Price::parse(&raw_price).map_err(|source| CatalogError::InvalidPrice {
            id: id.to_string(),
            source,
        })?;
        let image_ref = self
            .image
            .filter(|src| !src.trim().is_empty())
            .unwrap_or_else(|| placeholder_image.to_string());

        Ok(Product {
            id,
            name,
            price,
            image_ref,
        })
    }
}

/// Value of a double- or single-quoted attribute match.
fn quoted<'h>(caps: &Captures<'h>, double: usize, single: usize) -> &'h str {
    caps.get(double)
        .or_else(|| caps.get(single))
        .map_or("", |m| m.as_str())
}

/// Byte offset of the tag closing the `tag` element whose content starts at
/// `from`, accounting for nested elements of the same name.
fn closing_tag_offset(html: &str, tag: &str, from: usize) -> Option<usize> {
    let rest = html.get(from..)?;
    let mut depth = 1_usize;
    for caps in TAG_RE.captures_iter(rest) {
        if !caps[2].eq_ignore_ascii_case(tag) {
            continue;
        }
        if &caps[1] == "/" {
            depth -= 1;
            if depth == 0 {
                return caps.get(0).map(|m| from + m.start());
            }
        } else if &caps[3] != "/" {
            depth += 1;
        }
    }
    None
}

/// Find every product card in a page, in document order.
#[must_use]
pub fn scan_product_cards(html: &str) -> Vec<ProductCard> {
    let starts: Vec<_> = CARD_RE.captures_iter(html).collect();

    starts
        .iter()
        .enumerate()
        .map(|(i, caps)| {
            let mut card = ProductCard::default();
            let attrs = caps.get(2).map_or("", |m| m.as_str());
            for attr_cap in ATTR_RE.captures_iter(attrs) {
                let value = decode_entities(quoted(&attr_cap, 2, 3)).into_owned();
                match &attr_cap[1] {
                    "data-id" => card.id = Some(value),
                    "data-name" => card.name = Some(value),
                    "data-price" => card.price = Some(value),
                    _ => {}
                }
            }

            // An unclosed card ends where the next card begins.
            let body_start = caps.get(0).map_or(0, |m| m.end());
            let body_end = closing_tag_offset(html, &caps[1], body_start).unwrap_or_else(|| {
                starts
                    .get(i + 1)
                    .and_then(|next| next.get(0))
                    .map_or(html.len(), |m| m.start())
            });
            card.image = html
                .get(body_start..body_end)
                .and_then(|body| IMG_RE.captures(body))
                .map(|img| decode_entities(quoted(&img, 1, 2)).into_owned());

            card
        })
        .collect()
}

/// The products offered on the page, in page order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Build a catalog from scanned cards.
    ///
    /// Invalid cards and repeated ids are logged and skipped; the first card
    /// for an id wins.
    #[must_use]
    pub fn from_cards(cards: impl IntoIterator<Item = ProductCard>, config: &WidgetConfig) -> Self {
        let mut catalog = Self::new();
        for card in cards {
            match card.into_product(&config.placeholder_image) {
                Ok(product) => {
                    let id = product.id.clone();
                    if !catalog.insert(product) {
                        warn!(product_id = %id, "Skipping duplicate product card");
                    }
                }
                Err(e) => warn!(error = %e, "Skipping invalid product card"),
            }
        }
        catalog
    }

    /// Scan a page and build a catalog from its product cards.
    #[must_use]
    pub fn from_markup(html: &str, config: &WidgetConfig) -> Self {
        Self::from_cards(scan_product_cards(html), config)
    }

    /// Scan a page, failing on the first invalid or repeated card.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` for the first card that cannot be turned into a
    /// product, or `CatalogError::DuplicateId` when an id is declared twice.
    pub fn try_from_markup(html: &str, config: &WidgetConfig) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for card in scan_product_cards(html) {
            let product = card.into_product(&config.placeholder_image)?;
            let id = product.id.clone();
            if !catalog.insert(product) {
                return Err(CatalogError::DuplicateId(id));
            }
        }
        Ok(catalog)
    }

    /// Add a product. Returns `false` (and keeps the existing entry) if the
    /// id is already present.
    pub fn insert(&mut self, product: Product) -> bool {
        if self.get(&product.id).is_some() {
            return false;
        }
        self.products.push(product);
        true
    }

    /// Look up a product by id.
    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|product| &product.id == id)
    }

    /// Products in page order.
    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.products.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}
