//! Core types for the Pineapple cart.
//!
//! This module provides type-safe wrappers for the cart's domain concepts.

pub mod id;
pub mod price;
pub mod product;

pub use id::{ProductId, ProductIdError};
pub use price::{Price, PriceError};
pub use product::{LineItem, Product};
