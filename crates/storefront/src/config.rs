//! Widget configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `CART_PLACEHOLDER_IMAGE` - Image used for products without one
//!   (default: `https://via.placeholder.com/120`)
//! - `CART_EMPTY_MESSAGE` - Text shown for an empty cart and when checkout is
//!   attempted without items (default: `Your cart is empty.`)

use thiserror::Error;

/// Default image for product cards that carry no `<img>`.
pub const DEFAULT_PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/120";

/// Default empty-cart message.
pub const DEFAULT_EMPTY_MESSAGE: &str = "Your cart is empty.";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Cart widget configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConfig {
    /// Image reference substituted when a product has none
    pub placeholder_image: String,
    /// Empty-state message and empty-checkout notification
    pub empty_message: String,
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            placeholder_image: DEFAULT_PLACEHOLDER_IMAGE.to_string(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }
}

impl WidgetConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but blank.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but blank.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            placeholder_image: get_or_default(
                &lookup,
                "CART_PLACEHOLDER_IMAGE",
                DEFAULT_PLACEHOLDER_IMAGE,
            )?,
            empty_message: get_or_default(&lookup, "CART_EMPTY_MESSAGE", DEFAULT_EMPTY_MESSAGE)?,
        })
    }
}

fn get_or_default(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: &str,
) -> Result<String, ConfigError> {
    match lookup(key) {
        None => Ok(default.to_string()),
        Some(value) if value.trim().is_empty() => Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "value cannot be blank".to_string(),
        )),
        Some(value) => Ok(value.trim().to_string()),
    }
}
