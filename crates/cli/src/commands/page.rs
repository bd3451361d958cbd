//! Render the product page with an empty cart.

use std::io::Write;
use std::path::Path;

use pineapple_cart_storefront::PageSurface;
use pineapple_cart_storefront::views::render_page;

use super::load_widget;

/// Print the rendered page to stdout.
///
/// # Errors
///
/// Returns an error if the page cannot be loaded or rendered.
pub fn render(path: &Path, title: &str, strict: bool) -> Result<(), Box<dyn std::error::Error>> {
    let widget = load_widget(path, strict)?;
    let mut surface = PageSurface::new();
    widget.mount(&mut surface)?;

    let html = render_page(title, widget.catalog(), &surface)?;
    let mut out = std::io::stdout().lock();
    writeln!(out, "{html}")?;
    Ok(())
}
