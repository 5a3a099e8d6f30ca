//! # niramaya-quote
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Load config (env)   2. Init logging (stderr)   3. Parse args        │
//! │  4. Read cart JSON      5. Price with the catalog  6. Print quote       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fs;
use std::io::{self, Read};

use anyhow::Context;
use chrono::Utc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use niramaya_core::Catalog;
use niramaya_quote::cli::USAGE;
use niramaya_quote::{
    build_quote, resolve_tier, CartFile, CartSource, CliArgs, QuoteConfig, QuoteError,
};

fn main() -> anyhow::Result<()> {
    let config = QuoteConfig::load()?;
    init_tracing(&config.log_filter);

    let args = CliArgs::parse(std::env::args().skip(1))?;
    if args.show_help {
        println!("{}", USAGE);
        return Ok(());
    }

    debug!(?config, ?args, "Starting niramaya-quote");

    let raw = read_cart(&args.source)?;
    let cart_file = CartFile::from_json(&raw)?;

    let catalog = Catalog::builtin().context("loading built-in catalog")?;
    info!(entries = catalog.entries().len(), "Catalog loaded");

    let tier = resolve_tier(args.tier, cart_file.tier, config.default_tier);
    let quote = build_quote(&catalog, &cart_file, tier, Utc::now())?;

    let output = if config.pretty_json {
        serde_json::to_string_pretty(&quote)?
    } else {
        serde_json::to_string(&quote)?
    };
    println!("{}", output);

    Ok(())
}

/// Logs go to stderr so stdout stays pure JSON.
fn init_tracing(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(io::stderr)
        .init();
}

fn read_cart(source: &CartSource) -> Result<String, QuoteError> {
    match source {
        CartSource::File(path) => fs::read_to_string(path).map_err(|source| QuoteError::ReadInput {
            path: path.clone(),
            source,
        }),
        CartSource::Stdin => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| QuoteError::ReadInput {
                    path: "<stdin>".into(),
                    source,
                })?;
            Ok(buf)
        }
    }
}
