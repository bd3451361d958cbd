//! Pineapple Cart Storefront - the cart widget for the static product page.
//!
//! The widget reads product cards from the page, keeps an in-memory cart,
//! and republishes the cart list, totals and overlay visibility after every
//! gesture. There is no backend: checkout is simulated and nothing is
//! persisted.
//!
//! # Modules
//!
//! - [`widget`] - [`CartWidget`], the event loop tying cart and page together
//! - [`catalog`] - Product cards scanned from the page markup
//! - [`surface`] - The page-side output trait and an in-memory implementation
//! - [`views`] - Askama templates for cart rows and the full page
//! - [`visibility`] - Cart panel and checkout modal state machines

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod event;
pub mod filters;
pub mod format;
pub mod surface;
pub mod views;
pub mod visibility;
pub mod widget;

pub use catalog::Catalog;
pub use config::WidgetConfig;
pub use error::{Result, WidgetError};
pub use event::UiEvent;
pub use surface::{PageSurface, Surface};
pub use widget::{CartWidget, CheckoutConfirmation, Outcome};
