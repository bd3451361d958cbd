//! Custom Askama template filters.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

use crate::format::escape_for_display;

/// Escapes catalog-supplied text for embedding in markup.
///
/// Produces `&quot;` and `&#39;` rather than Askama's numeric entities; pair
/// it with `|safe` so the output is not escaped twice.
///
/// Usage in templates: `{{ item.name|display_escape|safe }}`
#[askama::filter_fn]
pub fn display_escape(value: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(escape_for_display(&value.to_string()).into_owned())
}
