//! # checkout-link
//!
//! Prints the checkout-with-card iframe URL for a session.
//!
//! ## Usage
//!
//! ```bash
//! # Optional overrides
//! export EMBED_APP_URL_ALT=https://papercheckout.com
//!
//! checkout-link --secret "$CLIENT_SECRET" --locale fr --style primaryColor=#fff
//! ```

use clap::Parser;
use embed_cli::{run, Cli};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    // Initialize logging; stdout is reserved for the link
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();
    println!("{}", run(&cli)?);

    Ok(())
}
