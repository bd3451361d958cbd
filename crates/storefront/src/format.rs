//! Text formatting shared by the cart views and templates.

use std::borrow::Cow;

use pineapple_cart_core::Price;

/// Entities understood by [`decode_entities`].
const ENTITIES: [(&str, char); 6] = [
    ("&amp;", '&'),
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&quot;", '"'),
    ("&#39;", '\''),
    ("&#x27;", '\''),
];

/// Format an amount as shown in the cart: `"$"` plus two decimal places.
#[must_use]
pub fn format_currency(amount: Price) -> String {
    amount.display()
}

/// Replace `& < > " '` with their entity equivalents.
///
/// Every catalog-supplied string embedded in markup goes through this, in
/// text content and in attribute values alike.
#[must_use]
pub fn escape_for_display(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }

    let mut escaped = String::with_capacity(text.len() + 16);
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    Cow::Owned(escaped)
}

/// Undo [`escape_for_display`] for attribute values read back from markup.
///
/// Only the five entities produced by the escaper (plus `&#x27;`) are
/// recognised; anything else is left as written.
#[must_use]
pub fn decode_entities(text: &str) -> Cow<'_, str> {
    if !text.contains('&') {
        return Cow::Borrowed(text);
    }

    let mut decoded = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        let (head, tail) = rest.split_at(pos);
        decoded.push_str(head);
        match ENTITIES
            .iter()
            .find(|(entity, _)| tail.starts_with(entity))
        {
            Some((entity, c)) => {
                decoded.push(*c);
                rest = tail.get(entity.len()..).unwrap_or_default();
            }
            None => {
                decoded.push('&');
                rest = tail.get(1..).unwrap_or_default();
            }
        }
    }
    decoded.push_str(rest);
    Cow::Owned(decoded)
}
