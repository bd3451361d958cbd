//! Product identifiers.
//!
//! Product ids come straight from the page markup (`data-id`), so they are
//! opaque strings rather than numeric database keys.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`ProductId`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ProductIdError {
    /// The input is empty or only whitespace.
    #[error("product id cannot be empty")]
    Empty,
}

/// A stable, unique product identifier.
///
/// ## Examples
///
/// ```
/// use pineapple_cart_core::ProductId;
///
/// assert!(ProductId::parse("p1").is_ok());
/// assert!(ProductId::parse("  ").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct ProductId(String);

impl ProductId {
    /// Parse a `ProductId`. The text is kept exactly as written.
    ///
    /// # Errors
    ///
    /// Returns [`ProductIdError::Empty`] if `s` is empty or only whitespace.
    pub fn parse(s: &str) -> Result<Self, ProductIdError> {
        if s.trim().is_empty() {
            return Err(ProductIdError::Empty);
        }
        Ok(Self(s.to_owned()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::str::FromStr for ProductId {
    type Err = ProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_whitespace() {
        let id = ProductId::parse(" tee-01 ").unwrap();
        assert_eq!(id.as_str(), " tee-01 ");
        assert_ne!(id, ProductId::parse("tee-01").unwrap());
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!(ProductId::parse(""), Err(ProductIdError::Empty));
        assert_eq!(ProductId::parse("\t"), Err(ProductIdError::Empty));
    }

    #[test]
    fn test_display() {
        let id: ProductId = "mug".parse().unwrap();
        assert_eq!(format!("{id}"), "mug");
    }

    #[test]
    fn test_serde_transparent() {
        let id = ProductId::parse("p2").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"p2\"");

        let parsed: ProductId = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, id);
    }
}
