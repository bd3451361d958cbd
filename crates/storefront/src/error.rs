//! Unified error handling for the cart widget.
//!
//! Provides a unified `WidgetError` type returned by every fallible widget
//! operation. A blocked transition (such as opening checkout with an empty
//! cart) is not an error; see [`Outcome`](crate::widget::Outcome).

use pineapple_cart_core::ProductId;
use thiserror::Error;

use crate::catalog::CatalogError;
use crate::config::ConfigError;
use crate::event::EventParseError;

/// Application-level error type for the cart widget.
#[derive(Debug, Error)]
pub enum WidgetError {
    /// A product card could not be read.
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Configuration could not be loaded.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// A textual command could not be parsed.
    #[error("Invalid command: {0}")]
    Command(#[from] EventParseError),

    /// "Add to cart" referenced a product the page does not offer.
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    /// A template failed to render.
    #[error("Render error: {0}")]
    Render(#[from] askama::Error),
}

/// Result type alias for `WidgetError`.
pub type Result<T> = std::result::Result<T, WidgetError>;
