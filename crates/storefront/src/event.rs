//! UI gestures the widget reacts to.

use core::fmt;
use core::str::FromStr;

use pineapple_cart_core::{ProductId, ProductIdError};
use thiserror::Error;

/// A click or submit on one of the page's controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// "Add to cart" on a product card.
    AddToCart(ProductId),
    /// "+" on a cart row.
    Increment(ProductId),
    /// "−" on a cart row.
    Decrement(ProductId),
    /// "Remove" on a cart row.
    Remove(ProductId),
    /// Cart button in the header.
    ToggleCart,
    /// Close button inside the cart panel.
    CloseCart,
    ClearCart,
    /// "Checkout" button in the cart panel.
    OpenCheckout,
    /// Close button inside the checkout modal.
    CloseCheckout,
    /// Checkout form submission.
    SubmitCheckout,
}

/// Errors parsing a textual command into a [`UiEvent`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EventParseError {
    #[error("empty command")]
    Empty,

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("{0} needs a product id")]
    MissingProductId(&'static str),

    #[error("{command} takes no arguments")]
    UnexpectedArgument { command: &'static str },

    #[error("invalid product id: {0}")]
    InvalidProductId(#[from] ProductIdError),
}

impl FromStr for UiEvent {
    type Err = EventParseError;

    /// Parse commands such as `add tee`, `decr mug`, `toggle` or `submit`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let command = parts.next().ok_or(EventParseError::Empty)?;
        let rest: Vec<&str> = parts.collect();
        let argument = rest.join(" ");

        let with_id = |name: &'static str, build: fn(ProductId) -> Self| -> Result<Self, Self::Err> {
            if argument.is_empty() {
                return Err(EventParseError::MissingProductId(name));
            }
            Ok(build(ProductId::parse(&argument)?))
        };
        let bare = |name: &'static str, event: Self| -> Result<Self, Self::Err> {
            if argument.is_empty() {
                Ok(event)
            } else {
                Err(EventParseError::UnexpectedArgument { command: name })
            }
        };

        match command.to_ascii_lowercase().as_str() {
            "add" => with_id("add", Self::AddToCart),
            "incr" | "increment" | "+" => with_id("incr", Self::Increment),
            "decr" | "decrement" | "-" => with_id("decr", Self::Decrement),
            "remove" | "rm" => with_id("remove", Self::Remove),
            "toggle" => bare("toggle", Self::ToggleCart),
            "close" => bare("close", Self::CloseCart),
            "clear" => bare("clear", Self::ClearCart),
            "checkout" => bare("checkout", Self::OpenCheckout),
            "cancel" => bare("cancel", Self::CloseCheckout),
            "submit" => bare("submit", Self::SubmitCheckout),
            _ => Err(EventParseError::UnknownCommand(command.to_string())),
        }
    }
}

impl fmt::Display for UiEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AddToCart(id) => write!(f, "add {id}"),
            Self::Increment(id) => write!(f, "incr {id}"),
            Self::Decrement(id) => write!(f, "decr {id}"),
            Self::Remove(id) => write!(f, "remove {id}"),
            Self::ToggleCart => f.write_str("toggle"),
            Self::CloseCart => f.write_str("close"),
            Self::ClearCart => f.write_str("clear"),
            Self::OpenCheckout => f.write_str("checkout"),
            Self::CloseCheckout => f.write_str("cancel"),
            Self::SubmitCheckout => f.write_str("submit"),
        }
    }
}
