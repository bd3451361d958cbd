//! Replay a scripted shopping session.
//!
//! Each input line is one UI command. Blank lines and lines starting with
//! `#` are skipped. After every command the published state is printed,
//! either as a short summary or as one JSON object per line.

use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use pineapple_cart_storefront::views::render_page;
use pineapple_cart_storefront::{CartWidget, Outcome, PageSurface, WidgetError};
use serde::Serialize;
use tracing::warn;

use super::load_widget;

/// Output switches for a session.
#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub json: bool,
    pub html: bool,
    pub strict: bool,
    pub title: String,
}

/// One JSON output line.
#[derive(Serialize)]
struct Step<'a> {
    command: &'a str,
    outcome: Option<&'static str>,
    error: Option<String>,
    notifications: &'a [String],
    state: &'a PageSurface,
}

/// Load the page and replay commands from `script` (or stdin).
///
/// # Errors
///
/// Returns an error if the page or script cannot be read, or rendering fails.
pub fn replay(
    page: &Path,
    script: Option<&Path>,
    options: &SessionOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut widget = load_widget(page, options.strict)?;
    let out = std::io::stdout().lock();

    match script {
        Some(path) => {
            let file = File::open(path)
                .map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
            run(&mut widget, BufReader::new(file), out, options)
        }
        None => run(&mut widget, std::io::stdin().lock(), out, options),
    }
}

/// Drive `widget` with the commands read from `input`, reporting to `out`.
///
/// Commands that fail (unknown product, unparseable line) are reported and
/// the session continues.
///
/// # Errors
///
/// Returns an error on I/O failure or if a template fails to render.
pub fn run(
    widget: &mut CartWidget,
    input: impl BufRead,
    mut out: impl Write,
    options: &SessionOptions,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut surface = PageSurface::new();
    widget.mount(&mut surface)?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();
        if command.is_empty() || command.starts_with('#') {
            continue;
        }

        let seen = surface.notifications.len();
        let (outcome, error) = match widget.dispatch(command, &mut surface) {
            Ok(outcome) => (Some(outcome_label(&outcome)), None),
            Err(WidgetError::Render(e)) => return Err(e.into()),
            Err(e) => {
                warn!(command, error = %e, "Command failed");
                (None, Some(e.to_string()))
            }
        };
        let fresh = surface.notifications.get(seen..).unwrap_or_default();

        if options.json {
            let step = Step {
                command,
                outcome,
                error,
                notifications: fresh,
                state: &surface,
            };
            writeln!(out, "{}", serde_json::to_string(&step)?)?;
        } else {
            write_summary(&mut out, command, outcome, error.as_deref(), fresh, &surface)?;
        }
    }

    if options.html {
        let html = render_page(&options.title, widget.catalog(), &surface)?;
        writeln!(out, "{html}")?;
    }
    Ok(())
}

const fn outcome_label(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::Updated => "updated",
        Outcome::Unchanged => "unchanged",
        Outcome::Blocked => "blocked",
        Outcome::CheckedOut(_) => "checked out",
    }
}

fn write_summary(
    out: &mut impl Write,
    command: &str,
    outcome: Option<&str>,
    error: Option<&str>,
    notifications: &[String],
    surface: &PageSurface,
) -> std::io::Result<()> {
    writeln!(out, "> {command}")?;
    if let Some(error) = error {
        writeln!(out, "  error: {error}")?;
    }
    for message in notifications {
        for text in message.lines() {
            writeln!(out, "  ! {text}")?;
        }
    }
    if let Some(outcome) = outcome {
        writeln!(
            out,
            "  {outcome} | count {} | subtotal {} | panel {} | checkout {}",
            surface.cart_count,
            surface.subtotal,
            if surface.cart_panel.is_open() { "open" } else { "closed" },
            if surface.checkout_modal.is_visible() {
                "visible"
            } else {
                "hidden"
            },
        )?;
    }
    Ok(())
}
