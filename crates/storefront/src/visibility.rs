//! Visibility state of the cart panel and the checkout modal.
//!
//! The two are independent: closing the panel never touches the modal and
//! vice versa. The accessibility attributes published to the page are
//! derived from these states so they can never disagree with them.

use serde::Serialize;

/// Slide-out cart panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CartPanel {
    #[default]
    Closed,
    Open,
}

impl CartPanel {
    /// The state after pressing the cart toggle.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// Value of the panel's `aria-hidden` attribute.
    #[must_use]
    pub const fn aria_hidden(self) -> &'static str {
        if self.is_open() { "false" } else { "true" }
    }

    /// Value of the toggle button's `aria-expanded` attribute.
    #[must_use]
    pub const fn aria_expanded(self) -> &'static str {
        if self.is_open() { "true" } else { "false" }
    }
}

/// Checkout modal dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutModal {
    #[default]
    Hidden,
    Visible,
}

impl CheckoutModal {
    #[must_use]
    pub const fn is_visible(self) -> bool {
        matches!(self, Self::Visible)
    }

    /// Value of the modal's `aria-hidden` attribute.
    #[must_use]
    pub const fn aria_hidden(self) -> &'static str {
        if self.is_visible() { "false" } else { "true" }
    }

    /// Inline `style` keeping CSS visibility and opacity in step.
    #[must_use]
    pub const fn style(self) -> &'static str {
        if self.is_visible() {
            "visibility:visible;opacity:1"
        } else {
            "visibility:hidden;opacity:0"
        }
    }
}
