//! # NirAmaya Quote CLI
//!
//! Prices a cart file with `niramaya-core` and prints a JSON quote.
//!
//! ## Module Organization
//! ```text
//! niramaya_quote/
//! ├── lib.rs      ◄─── You are here
//! ├── cli.rs      ◄─── Argument parsing
//! ├── config.rs   ◄─── Environment configuration
//! ├── quote.rs    ◄─── Cart file → Quote document
//! └── error.rs    ◄─── QuoteError
//! ```
//!
//! ## Configuration
//! Environment variables:
//! - `NIRAMAYA_DEFAULT_TIER` - Fallback discount tier (default: standard)
//! - `NIRAMAYA_PRETTY_JSON` - Indent output (default: true)
//! - `NIRAMAYA_LOG` - Log filter (default: info)

pub mod cli;
pub mod config;
pub mod error;
pub mod quote;

pub use cli::{CartSource, CliArgs};
pub use config::{ConfigError, QuoteConfig};
pub use error::{QuoteError, QuoteResult};
pub use quote::{build_quote, resolve_tier, CartFile, Quote};
