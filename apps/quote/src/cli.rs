//! Command-line argument parsing.
//!
//! ## Usage
//! ```bash
//! # Price a cart file with the tier it names (or the configured default)
//! niramaya-quote cart.json
//!
//! # Override the tier, read the cart from stdin
//! echo '{"items":[{"code":"CBC001"}]}' | niramaya-quote --tier maximum -
//! ```

use std::path::PathBuf;

use niramaya_core::DiscountTier;

use crate::error::{QuoteError, QuoteResult};

pub const USAGE: &str = "\
Usage: niramaya-quote [--tier <standard|negotiated|maximum>] [<cart.json> | -]

Reads a cart from the given file (or stdin when omitted or '-') and prints
a priced quote as JSON.";

/// Where the cart JSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartSource {
    Stdin,
    File(PathBuf),
}

/// Parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    /// `--tier` override; beats the cart file and the config default.
    pub tier: Option<DiscountTier>,
    pub source: CartSource,
    pub show_help: bool,
}

impl CliArgs {
    /// Parses arguments, excluding the program name.
    pub fn parse<I, S>(args: I) -> QuoteResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tier = None;
        let mut source = CartSource::Stdin;
        let mut show_help = false;

        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--tier" | "-t" => {
                    let value = args
                        .next()
                        .ok_or_else(|| QuoteError::MissingValue(arg.clone()))?;
                    tier = Some(value.parse()?);
                }
                "--help" | "-h" => show_help = true,
                "-" => source = CartSource::Stdin,
                other if other.starts_with('-') => {
                    return Err(QuoteError::UnknownArgument(other.to_string()));
                }
                path => source = CartSource::File(PathBuf::from(path)),
            }
        }

        Ok(CliArgs {
            tier,
            source,
            show_help,
        })
    }
}
