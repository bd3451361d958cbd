//! Pineapple Cart CLI - render the product page and replay cart sessions.
//!
//! # Usage
//!
//! ```bash
//! # Render a product page with an empty cart
//! cart-cli page static/index.html
//!
//! # Replay commands from a script, printing the published state after each
//! cart-cli session static/index.html --script demo.cart
//!
//! # Read commands from stdin and print the final page
//! echo "add tee" | cart-cli session static/index.html --html
//! ```
//!
//! # Commands
//!
//! - `page` - Render the product page
//! - `session` - Replay UI commands (`add <id>`, `incr <id>`, `decr <id>`,
//!   `remove <id>`, `toggle`, `close`, `clear`, `checkout`, `cancel`, `submit`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "cart-cli")]
#[command(author, version, about = "Pineapple cart widget tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the product page with an empty cart
    Page {
        /// Product page containing `product-card` elements
        page: PathBuf,

        /// Shop name used in the page title and footer
        #[arg(short, long, default_value = commands::DEFAULT_TITLE)]
        title: String,

        /// Fail on invalid or repeated product cards instead of skipping them
        #[arg(long)]
        strict: bool,
    },
    /// Replay UI commands against a product page
    Session {
        /// Product page containing `product-card` elements
        page: PathBuf,

        /// File with one command per line (defaults to stdin)
        #[arg(short, long)]
        script: Option<PathBuf>,

        /// Print the published state as JSON lines
        #[arg(long)]
        json: bool,

        /// Print the final page markup after the last command
        #[arg(long)]
        html: bool,

        /// Fail on invalid or repeated product cards instead of skipping them
        #[arg(long)]
        strict: bool,

        /// Shop name used in the page title and footer
        #[arg(short, long, default_value = commands::DEFAULT_TITLE)]
        title: String,
    },
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        "pineapple_cart_storefront=info,pineapple_cart_cli=info".into()
    });
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Page {
            page,
            title,
            strict,
        } => commands::page::render(&page, &title, strict)?,
        Commands::Session {
            page,
            script,
            json,
            html,
            strict,
            title,
        } => {
            let options = commands::session::SessionOptions {
                json,
                html,
                strict,
                title,
            };
            commands::session::replay(&page, script.as_deref(), &options)?;
        }
    }
    Ok(())
}
