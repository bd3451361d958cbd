//! Pineapple Cart Core - cart state and shared types.
//!
//! This crate provides the parts of the cart widget that have no knowledge
//! of markup:
//! - [`types`] - Newtype wrappers for product ids and prices, plus line items
//! - [`cart`] - The [`CartStore`], the only sanctioned way to mutate a cart
//!
//! # Architecture
//!
//! The core crate contains only types and in-memory state - no I/O, no
//! rendering. The storefront crate owns a `CartStore` and projects it onto
//! the page.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod types;

pub use cart::CartStore;
pub use types::*;
