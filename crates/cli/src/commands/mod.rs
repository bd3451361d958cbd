//! CLI subcommands.

use std::path::Path;

use pineapple_cart_storefront::CartWidget;
use tracing::info;

pub mod page;
pub mod session;

/// Shop name used when `--title` is not given.
pub const DEFAULT_TITLE: &str = "Pineapple Shop";

/// Load configuration and build a widget for the product page at `path`.
///
/// # Errors
///
/// Returns an error if the page cannot be read, configuration is invalid,
/// or (with `strict`) a product card is rejected.
pub fn load_widget(path: &Path, strict: bool) -> Result<CartWidget, Box<dyn std::error::Error>> {
    let html = std::fs::read_to_string(path)
        .map_err(|e| format!("Failed to read {}: {e}", path.display()))?;

    let widget = CartWidget::load(&html, strict)?;
    info!(
        path = %path.display(),
        products = widget.catalog().len(),
        "Loaded product page"
    );
    Ok(widget)
}
